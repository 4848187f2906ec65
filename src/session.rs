//! Session orchestration.
//!
//! This module provides [`SessionController`], the state machine that drives a
//! talk-to-your-codebase session: it sequences the backend's reset, ingest,
//! and chat calls, owns the message log, and only ever advances to the
//! conversational phase after a confirmed-successful ingestion.
//!
//! All state lives behind the controller's methods; presentation layers
//! subscribe through [`SessionObserver`] and read cloned snapshots. The lock
//! guarding the state is never held across an await: each operation captures
//! what it needs, performs the backend call, and re-checks the session
//! generation before folding the result back in, so a response that arrives
//! after a reset is discarded instead of applied to the fresh session.

use std::sync::{Arc, Mutex};

use crate::client::Backend;
use crate::error::Error;
use crate::observability::{SESSION_EXCHANGES, SESSION_INGESTIONS, SESSION_RESETS, STALE_RESPONSES};
use crate::types::{ChatTurn, Message, MessageLog};

/// Number of trailing log messages replayed to the backend with each question.
pub const HISTORY_WINDOW: usize = 10;

/// Assistant notice appended inline when a chat exchange fails.
pub const CHAT_FAILURE_NOTICE: &str = "Something went wrong.";

/// Notice shown when the backend cannot be reached at all.
pub const CONNECTIVITY_NOTICE: &str =
    "Failed to connect to the backend. Check that it is running.";

/// Fallback reason when the backend rejects an ingest without a detail.
pub const INVALID_REPOSITORY_NOTICE: &str = "Invalid repository URL.";

/// Phase of the session lifecycle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// No repository selected; the landing phase.
    #[default]
    Idle,

    /// An ingestion request is in flight.
    Ingesting,

    /// Ingestion succeeded; a question may be sent.
    Ready,

    /// A chat exchange is in flight.
    AwaitingReply,

    /// The last ingestion attempt failed; retrying is allowed.
    IngestFailed,

    /// A chat exchange failed. Observed through notifications; the session
    /// settles back on [`SessionStatus::Ready`] so the user can retry
    /// immediately.
    ChatFailed,
}

impl SessionStatus {
    /// True when a new ingestion may begin.
    pub fn can_ingest(self) -> bool {
        matches!(self, SessionStatus::Idle | SessionStatus::IngestFailed)
    }

    /// True when a question may be sent.
    pub fn can_send(self) -> bool {
        matches!(self, SessionStatus::Ready)
    }
}

/// Observer for session state changes.
///
/// All methods default to no-ops so implementations override only what they
/// present. Observers receive references and snapshots; the controller owns
/// the only mutation path.
pub trait SessionObserver: Send + Sync {
    /// Called after the session status changes.
    fn status_changed(&self, status: SessionStatus) {
        _ = status;
    }

    /// Called after a message is appended to the log.
    fn message_appended(&self, message: &Message) {
        _ = message;
    }

    /// Called when an ingestion attempt fails, with the human-readable
    /// reason to present as a blocking notice.
    fn ingest_failed(&self, reason: &str) {
        _ = reason;
    }
}

#[derive(Debug, Default)]
struct Session {
    status: SessionStatus,
    repository: String,
    file_count: u64,
    log: MessageLog,
    generation: u64,
    last_ingest_error: Option<String>,
}

/// Owns session state and sequences backend calls.
///
/// Methods take `&self`; state sits behind a mutex released across every
/// await, matching the single-logical-thread model: user input, backend
/// continuations, and observers all interleave without parallel mutation.
pub struct SessionController {
    backend: Arc<dyn Backend>,
    session: Mutex<Session>,
    observers: Mutex<Vec<Arc<dyn SessionObserver>>>,
}

impl SessionController {
    /// Create a controller in the `Idle` state.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            session: Mutex::new(Session::default()),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Register an observer for state-change notifications.
    pub fn subscribe(&self, observer: Arc<dyn SessionObserver>) {
        self.observers.lock().unwrap().push(observer);
    }

    /// The current session status.
    pub fn status(&self) -> SessionStatus {
        self.session.lock().unwrap().status
    }

    /// The repository identifier, empty when `Idle`.
    pub fn repository(&self) -> String {
        self.session.lock().unwrap().repository.clone()
    }

    /// Files processed by the last successful ingestion.
    pub fn file_count(&self) -> u64 {
        self.session.lock().unwrap().file_count
    }

    /// Number of messages in the log.
    pub fn message_count(&self) -> usize {
        self.session.lock().unwrap().log.len()
    }

    /// A snapshot of the message log, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.session.lock().unwrap().log.messages().to_vec()
    }

    /// The reason the last ingestion attempt failed, if it did.
    pub fn last_ingest_error(&self) -> Option<String> {
        self.session.lock().unwrap().last_ingest_error.clone()
    }

    /// Start ingesting a repository.
    ///
    /// Returns whether the request was admitted: the identifier must be
    /// non-empty after trimming and the session must be in `Idle` or
    /// `IngestFailed` — a call while an ingestion is already in flight is
    /// ignored, keeping at most one outstanding.
    ///
    /// The backend is purged before the ingest request; a failed purge does
    /// not block the attempt. On success the session becomes `Ready` with the
    /// reported file count and a welcome message; on failure it becomes
    /// `IngestFailed` with the reason retained for presentation, and the
    /// conversational phase is never entered.
    pub async fn start_ingestion(&self, repository: &str) -> bool {
        let repository = repository.trim();
        if repository.is_empty() {
            return false;
        }

        let generation = {
            let mut session = self.session.lock().unwrap();
            if !session.status.can_ingest() {
                return false;
            }
            session.status = SessionStatus::Ingesting;
            session.repository = repository.to_string();
            session.last_ingest_error = None;
            session.generation
        };
        SESSION_INGESTIONS.click();
        self.notify_status(SessionStatus::Ingesting);

        // Purge first so stale state from an earlier repository never leaks
        // into this session's answers. Purge failure is non-fatal.
        let _ = self.backend.reset().await;
        let outcome = self.backend.ingest(repository).await;

        let folded = {
            let mut session = self.session.lock().unwrap();
            if session.generation != generation {
                STALE_RESPONSES.click();
                return true;
            }
            match outcome {
                Ok(response) => {
                    session.status = SessionStatus::Ready;
                    session.file_count = response.files_processed;
                    let welcome = Message::assistant(format!(
                        "Success! I've processed **{} files** from the repository.\n\n\
                         Ask me about architecture, bugs, or specific functions.",
                        response.files_processed
                    ));
                    session.log.append(welcome.clone());
                    Ok(welcome)
                }
                Err(err) => {
                    session.status = SessionStatus::IngestFailed;
                    session.file_count = 0;
                    let reason = ingest_failure_notice(&err);
                    session.last_ingest_error = Some(reason.clone());
                    Err(reason)
                }
            }
        };

        match folded {
            Ok(welcome) => {
                // Message first: the log is complete before any view advances.
                self.notify_message(&welcome);
                self.notify_status(SessionStatus::Ready);
            }
            Err(reason) => {
                self.notify_ingest_failed(&reason);
                self.notify_status(SessionStatus::IngestFailed);
            }
        }
        true
    }

    /// Send a question to the backend.
    ///
    /// Returns whether the request was admitted: the text must be non-empty
    /// after trimming and the session must be `Ready` — anything else is a
    /// no-op, which also guards against duplicate submits while a reply is
    /// outstanding.
    ///
    /// The user message is appended optimistically before the round trip. A
    /// failed exchange appends an inline assistant notice instead of an
    /// error and the session settles back on `Ready`; failure is
    /// per-message, never session-fatal.
    pub async fn send_message(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        let (generation, window, user_message) = {
            let mut session = self.session.lock().unwrap();
            if !session.status.can_send() {
                return false;
            }
            // The window predates the user turn: the question rides in its
            // own field, so replaying it in history would duplicate it.
            let window: Vec<ChatTurn> = session
                .log
                .recent(HISTORY_WINDOW)
                .iter()
                .map(ChatTurn::from)
                .collect();
            let user_message = Message::user(text);
            session.log.append(user_message.clone());
            session.status = SessionStatus::AwaitingReply;
            (session.generation, window, user_message)
        };
        SESSION_EXCHANGES.click();
        self.notify_message(&user_message);
        self.notify_status(SessionStatus::AwaitingReply);

        let outcome = self.backend.chat(text, &window).await;

        let (reply, failed) = {
            let mut session = self.session.lock().unwrap();
            if session.generation != generation {
                STALE_RESPONSES.click();
                return true;
            }
            let (reply, failed) = match outcome {
                Ok(response) => {
                    let reply = if response.sources.is_empty() {
                        Message::assistant(response.answer)
                    } else {
                        Message::assistant_with_sources(response.answer, response.sources)
                    };
                    (reply, false)
                }
                Err(_) => (Message::assistant(CHAT_FAILURE_NOTICE), true),
            };
            session.log.append(reply.clone());
            session.status = SessionStatus::Ready;
            (reply, failed)
        };

        self.notify_message(&reply);
        if failed {
            // Views observe the failed exchange, but the session is already
            // ready for the next attempt.
            self.notify_status(SessionStatus::ChatFailed);
        }
        self.notify_status(SessionStatus::Ready);
        true
    }

    /// Reset the session to `Idle`.
    ///
    /// Allowed from any status, with or without outstanding requests: the
    /// generation bump makes any late response a discard. The local state is
    /// cleared synchronously before the best-effort backend purge, whose
    /// failure never blocks a new session.
    pub async fn reset(&self) {
        {
            let mut session = self.session.lock().unwrap();
            session.generation += 1;
            session.status = SessionStatus::Idle;
            session.repository.clear();
            session.file_count = 0;
            session.last_ingest_error = None;
            session.log.clear();
        }
        SESSION_RESETS.click();
        self.notify_status(SessionStatus::Idle);

        let _ = self.backend.reset().await;
    }

    fn observers(&self) -> Vec<Arc<dyn SessionObserver>> {
        // Cloned out of the lock so observers may re-enter accessors.
        self.observers.lock().unwrap().clone()
    }

    fn notify_status(&self, status: SessionStatus) {
        for observer in self.observers() {
            observer.status_changed(status);
        }
    }

    fn notify_message(&self, message: &Message) {
        for observer in self.observers() {
            observer.message_appended(message);
        }
    }

    fn notify_ingest_failed(&self, reason: &str) {
        for observer in self.observers() {
            observer.ingest_failed(reason);
        }
    }
}

/// Map an ingest failure to the notice shown on the landing screen.
fn ingest_failure_notice(err: &Error) -> String {
    if err.is_connectivity() {
        CONNECTIVITY_NOTICE.to_string()
    } else if err.is_validation() {
        err.message().to_string()
    } else {
        INVALID_REPOSITORY_NOTICE.to_string()
    }
}
