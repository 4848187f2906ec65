use serde::{Deserialize, Serialize};

use crate::types::{ChatTurn, Source};

/// Request body for `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatParams {
    /// The question to answer.
    pub question: String,

    /// Trailing window of prior turns, oldest first, role and content only.
    pub history: Vec<ChatTurn>,
}

impl ChatParams {
    /// Create chat parameters for the given question and history window.
    pub fn new(question: impl Into<String>, history: Vec<ChatTurn>) -> Self {
        Self {
            question: question.into(),
            history,
        }
    }
}

/// Success body for `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The markdown-formatted answer.
    pub answer: String,

    /// Files the answer was grounded in, in backend order.
    #[serde(default)]
    pub sources: Vec<Source>,

    /// Backend status string, e.g. "success".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ChatResponse {
    /// Create a response with an answer and its cited sources.
    pub fn new(answer: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            answer: answer.into(),
            sources,
            status: None,
        }
    }
}
