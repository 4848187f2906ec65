use serde::{Deserialize, Serialize};

/// Role of a conversation turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

/// A file from the ingested repository cited by an assistant answer.
///
/// The backend gives no uniqueness guarantee; de-duplicating repeated paths is
/// a presentation concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Path of the cited file within the repository.
    pub file_path: String,
}

impl Source {
    /// Create a new `Source` for the given file path.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

/// One turn of the conversation as kept in the message log.
///
/// Assistant content is markdown-formatted; the log stores it verbatim and
/// leaves interpretation to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this turn.
    pub role: MessageRole,

    /// The text payload.
    pub content: String,

    /// Cited files, present only on assistant turns that ground their answer
    /// in retrieved material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            sources: None,
        }
    }

    /// Create a new assistant message without citations.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            sources: None,
        }
    }

    /// Create a new assistant message citing the given sources.
    pub fn assistant_with_sources(content: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            sources: Some(sources),
        }
    }
}

/// The wire form of a history entry sent with a chat request.
///
/// Carries role and content only; sources are never replayed to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who produced this turn.
    pub role: MessageRole,

    /// The text payload.
    pub content: String,
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}
