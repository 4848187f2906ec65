// Public modules
pub mod chat;
pub mod ingest;
pub mod message;
pub mod message_log;

// Re-exports
pub use chat::{ChatParams, ChatResponse};
pub use ingest::{IngestParams, IngestResponse};
pub use message::{ChatTurn, Message, MessageRole, Source};
pub use message_log::MessageLog;
