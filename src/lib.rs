// Public modules
pub mod client;
pub mod error;
pub mod observability;
pub mod repl;
pub mod session;
pub mod types;
pub mod view;

// Re-exports
pub use client::{Backend, RagClient};
pub use error::{Error, Result};
pub use session::{
    CHAT_FAILURE_NOTICE, CONNECTIVITY_NOTICE, HISTORY_WINDOW, INVALID_REPOSITORY_NOTICE,
    SessionController, SessionObserver, SessionStatus,
};
pub use types::*;
pub use view::{Screen, ScreenSink, ViewCoordinator};
