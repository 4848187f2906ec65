//! Screen selection for presentation layers.
//!
//! The mapping from session status to screen is a pure function; the
//! [`ViewCoordinator`] subscribes to the session and forwards only actual
//! transitions to a [`ScreenSink`]. Because the controller commits its state
//! before notifying, the conversation screen is never presented ahead of a
//! confirmed ingestion, and the landing screen only appears after the data
//! reset has already happened.

use std::sync::{Arc, Mutex};

use crate::session::{SessionObserver, SessionStatus};

/// Which top-level screen the presentation layer should show.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Repository input, spinner while ingesting, failure notices.
    Landing,

    /// The conversation with the ingested repository.
    Conversation,
}

impl Screen {
    /// The screen that presents the given status.
    ///
    /// `Ingesting` keeps the landing screen: the user watches the spinner
    /// there and only pages forward once ingestion is confirmed.
    pub fn for_status(status: SessionStatus) -> Screen {
        match status {
            SessionStatus::Idle | SessionStatus::Ingesting | SessionStatus::IngestFailed => {
                Screen::Landing
            }
            SessionStatus::Ready | SessionStatus::AwaitingReply | SessionStatus::ChatFailed => {
                Screen::Conversation
            }
        }
    }
}

/// Receives one-way screen transitions.
pub trait ScreenSink: Send + Sync {
    /// Called once per actual transition with the screen to present.
    fn screen_changed(&self, screen: Screen);
}

/// Maps session status changes onto screen transitions.
///
/// Holds no business logic: it tracks the current screen and forwards each
/// first transition to its sink, so repeated statuses on the same screen
/// (`Ready` ⇄ `AwaitingReply`) cause no churn.
pub struct ViewCoordinator {
    current: Mutex<Screen>,
    sink: Arc<dyn ScreenSink>,
}

impl ViewCoordinator {
    /// Create a coordinator presenting the landing screen.
    pub fn new(sink: Arc<dyn ScreenSink>) -> Self {
        Self {
            current: Mutex::new(Screen::Landing),
            sink,
        }
    }

    /// The screen currently presented.
    pub fn current(&self) -> Screen {
        *self.current.lock().unwrap()
    }
}

impl SessionObserver for ViewCoordinator {
    fn status_changed(&self, status: SessionStatus) {
        let next = Screen::for_status(status);
        let mut current = self.current.lock().unwrap();
        if *current != next {
            *current = next;
            self.sink.screen_changed(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_to_screen_mapping() {
        assert_eq!(Screen::for_status(SessionStatus::Idle), Screen::Landing);
        assert_eq!(Screen::for_status(SessionStatus::Ingesting), Screen::Landing);
        assert_eq!(
            Screen::for_status(SessionStatus::IngestFailed),
            Screen::Landing
        );
        assert_eq!(
            Screen::for_status(SessionStatus::Ready),
            Screen::Conversation
        );
        assert_eq!(
            Screen::for_status(SessionStatus::AwaitingReply),
            Screen::Conversation
        );
        assert_eq!(
            Screen::for_status(SessionStatus::ChatFailed),
            Screen::Conversation
        );
    }

    #[derive(Default)]
    struct RecordingSink {
        transitions: Mutex<Vec<Screen>>,
    }

    impl ScreenSink for RecordingSink {
        fn screen_changed(&self, screen: Screen) {
            self.transitions.lock().unwrap().push(screen);
        }
    }

    #[test]
    fn transitions_are_deduplicated() {
        let sink = Arc::new(RecordingSink::default());
        let coordinator = ViewCoordinator::new(sink.clone());
        assert_eq!(coordinator.current(), Screen::Landing);

        coordinator.status_changed(SessionStatus::Ingesting);
        coordinator.status_changed(SessionStatus::IngestFailed);
        assert!(sink.transitions.lock().unwrap().is_empty());

        coordinator.status_changed(SessionStatus::Ready);
        coordinator.status_changed(SessionStatus::AwaitingReply);
        coordinator.status_changed(SessionStatus::Ready);
        assert_eq!(
            *sink.transitions.lock().unwrap(),
            vec![Screen::Conversation]
        );
        assert_eq!(coordinator.current(), Screen::Conversation);

        coordinator.status_changed(SessionStatus::Idle);
        assert_eq!(
            *sink.transitions.lock().unwrap(),
            vec![Screen::Conversation, Screen::Landing]
        );
    }
}
