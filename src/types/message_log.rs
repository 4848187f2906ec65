use crate::types::Message;

/// Append-only ordered record of conversation turns.
///
/// The log is owned exclusively by the session controller; presentation layers
/// get cloned snapshots, never write access. It is cleared only on session
/// reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageLog {
    entries: Vec<Message>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the end of the log.
    pub fn append(&mut self, message: Message) {
        self.entries.push(message);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the log holds no messages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.entries
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    /// The trailing `n` messages, oldest of the window first.
    ///
    /// Returns the whole log when it holds fewer than `n` entries.
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut log = MessageLog::new();
        log.append(Message::user("first"));
        log.append(Message::assistant("second"));
        log.append(Message::user("third"));

        let contents: Vec<&str> = log
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(log.last().unwrap().content, "third");
    }

    #[test]
    fn recent_window_caps_and_keeps_order() {
        let mut log = MessageLog::new();
        for i in 0..15 {
            log.append(Message::user(format!("msg-{i}")));
        }

        let window = log.recent(10);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].content, "msg-5");
        assert_eq!(window[9].content, "msg-14");
    }

    #[test]
    fn recent_window_smaller_than_cap() {
        let mut log = MessageLog::new();
        log.append(Message::user("only"));

        let window = log.recent(10);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].content, "only");

        assert!(MessageLog::new().recent(10).is_empty());
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = MessageLog::new();
        log.append(Message::user("gone"));
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }
}
