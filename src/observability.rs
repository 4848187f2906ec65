use biometrics::{Collector, Counter};

pub(crate) static INGEST_REQUESTS: Counter = Counter::new("codetalk.client.ingest_requests");
pub(crate) static INGEST_ERRORS: Counter = Counter::new("codetalk.client.ingest_errors");
pub(crate) static CHAT_REQUESTS: Counter = Counter::new("codetalk.client.chat_requests");
pub(crate) static CHAT_ERRORS: Counter = Counter::new("codetalk.client.chat_errors");
pub(crate) static PURGE_REQUESTS: Counter = Counter::new("codetalk.client.purge_requests");
pub(crate) static PURGE_ERRORS: Counter = Counter::new("codetalk.client.purge_errors");

pub(crate) static SESSION_INGESTIONS: Counter = Counter::new("codetalk.session.ingestions");
pub(crate) static SESSION_EXCHANGES: Counter = Counter::new("codetalk.session.exchanges");
pub(crate) static SESSION_RESETS: Counter = Counter::new("codetalk.session.resets");
pub(crate) static STALE_RESPONSES: Counter =
    Counter::new("codetalk.session.stale_responses_dropped");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&INGEST_REQUESTS);
    collector.register_counter(&INGEST_ERRORS);
    collector.register_counter(&CHAT_REQUESTS);
    collector.register_counter(&CHAT_ERRORS);
    collector.register_counter(&PURGE_REQUESTS);
    collector.register_counter(&PURGE_ERRORS);

    collector.register_counter(&SESSION_INGESTIONS);
    collector.register_counter(&SESSION_EXCHANGES);
    collector.register_counter(&SESSION_RESETS);
    collector.register_counter(&STALE_RESPONSES);
}
