//! Worker thread implementation for feed decoding.
//!
//! Decoding a large feed body is the only expensive step in the dashboard, so
//! it runs on a Zellij worker thread instead of the plugin's render loop. The
//! worker is stateless apart from a counter used in trace output.

use crate::domain::{decode_feed, DashboardError};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DashboardWorker {
    /// Number of feed bodies this worker has decoded successfully.
    #[serde(skip)]
    decoded_feeds: u64,
}

impl DashboardWorker {
    /// Number of successfully decoded feeds.
    #[must_use]
    pub const fn decoded_feeds(&self) -> u64 {
        self.decoded_feeds
    }

    fn handle_decode_feed(&mut self, request_id: u64, body: &str) -> WorkerResponse {
        match decode_feed(body.as_bytes()) {
            Ok(feed) => {
                self.decoded_feeds += 1;
                tracing::debug!(
                    request_id = request_id,
                    updates = feed.updates.len(),
                    skipped = feed.skipped,
                    "feed body decoded"
                );
                WorkerResponse::FeedDecoded { request_id, feed }
            }
            Err(e) => {
                tracing::warn!(request_id = request_id, error = %e, "feed body rejected");
                WorkerResponse::Error {
                    request_id: Some(request_id),
                    message: e.to_string(),
                }
            }
        }
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to send back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message");
        let _guard = span.entered();

        match message {
            WorkerMessage::DecodeFeed { request_id, body, .. } => {
                tracing::debug!(
                    request_id = request_id,
                    body_len = body.len(),
                    "decoding feed body"
                );
                self.handle_decode_feed(request_id, &body)
            }
        }
    }

    /// Handles a raw JSON payload and returns the JSON response payload.
    ///
    /// Payloads that are not a valid [`WorkerMessage`] produce an
    /// [`WorkerResponse::Error`] so the plugin never waits on a lost request.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                let error = DashboardError::Worker(format!("malformed worker message: {e}"));
                tracing::debug!(error = %error, "failed to deserialize worker message");
                WorkerResponse::Error {
                    request_id: None,
                    message: error.to_string(),
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }
}

/// Initializes tracing for the worker thread.
fn init_worker_tracing() {
    crate::observability::init_tracing(&crate::Config::default());
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for DashboardWorker {
    /// Handles incoming messages from the main plugin thread.
    ///
    /// Decodes the payload, processes it and posts the serialized response
    /// back under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        if let Some(payload) = self.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_feed_bodies() {
        let mut worker = DashboardWorker::default();
        let message =
            WorkerMessage::decode_feed(7, r#"[{"title": "Fraud Alert"}, 1]"#.to_string());

        match worker.handle_message(message) {
            WorkerResponse::FeedDecoded { request_id, feed } => {
                assert_eq!(request_id, 7);
                assert_eq!(feed.updates.len(), 1);
                assert_eq!(feed.skipped, 1);
            }
            other => panic!("unexpected response: {other:?}"),
        }
        assert_eq!(worker.decoded_feeds(), 1);
    }

    #[test]
    fn reports_undecodable_bodies() {
        let mut worker = DashboardWorker::default();
        let response = worker.handle_message(WorkerMessage::decode_feed(3, "{}".to_string()));

        assert!(matches!(
            response,
            WorkerResponse::Error { request_id: Some(3), .. }
        ));
        assert_eq!(worker.decoded_feeds(), 0);
    }

    #[test]
    fn payloads_round_trip_as_json() {
        let mut worker = DashboardWorker::default();
        let request =
            serde_json::to_string(&WorkerMessage::decode_feed(1, "[]".to_string())).unwrap();

        let reply = worker.handle_payload(&request).unwrap();
        let response: WorkerResponse = serde_json::from_str(&reply).unwrap();
        assert!(matches!(response, WorkerResponse::FeedDecoded { request_id: 1, .. }));

        let reply = worker.handle_payload("not json").unwrap();
        let response: WorkerResponse = serde_json::from_str(&reply).unwrap();
        assert!(matches!(response, WorkerResponse::Error { request_id: None, .. }));
    }

    #[test]
    fn malformed_messages_are_worker_errors() {
        let mut worker = DashboardWorker::default();
        let reply = worker.handle_payload(r#"{"unknown": true}"#).unwrap();

        match serde_json::from_str::<WorkerResponse>(&reply).unwrap() {
            WorkerResponse::Error { request_id, message } => {
                assert_eq!(request_id, None);
                assert!(message.starts_with("Worker communication error: malformed"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
