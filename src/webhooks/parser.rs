//! Buildkite webhook payload parser.
//!
//! This module turns a raw JSON payload into a typed [`WebhookEvent`] value.
//! The event type comes from the `X-Buildkite-Event` header; the dispatch
//! table over those strings is closed, so an event type this crate does not
//! know is an error rather than something to ignore.
//!
//! # Headers
//!
//! Buildkite webhooks include these headers:
//! - `X-Buildkite-Event` - Event type (e.g., "job.scheduled")
//! - `X-Buildkite-Signature` - Timestamped HMAC signature (verified in
//!   [`signature`](super::signature))

use http::HeaderMap;
use thiserror::Error;

use super::events::WebhookEvent;

/// Header carrying the event-type string.
pub const EVENT_TYPE_HEADER: &str = "x-buildkite-event";

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The event-type string is not in the dispatch table.
    ///
    /// The message text is a compatibility surface; callers match on it.
    #[error("unknown X-Buildkite-Event in message: {0}")]
    UnknownEvent(String),

    /// JSON deserialization failed (malformed payload or field of the wrong
    /// shape). The decoder's error is surfaced verbatim.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Returns the event type of a webhook delivery.
///
/// Pure header lookup: `None` when the header is absent (or not valid
/// UTF-8). The value is not validated here; [`parse_webhook`] judges it.
pub fn webhook_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(EVENT_TYPE_HEADER)
        .and_then(|value| value.to_str().ok())
}

/// Parses a webhook payload into a typed event.
///
/// # Arguments
///
/// * `event_type` - The value of the `X-Buildkite-Event` header
/// * `payload` - The raw JSON payload bytes, as returned by
///   [`validate_payload`](super::validate_payload)
///
/// # Errors
///
/// * [`ParseError::UnknownEvent`] - event type not in the dispatch table
/// * [`ParseError::Json`] - payload does not decode into the selected shape
///
/// # Examples
///
/// ```
/// use buildkite_webhooks::webhooks::{WebhookEvent, parse_webhook};
///
/// let payload = br#"{
///     "event": "build.finished",
///     "build": { "number": 7, "state": "passed", "branch": "main" },
///     "pipeline": { "slug": "deploy" }
/// }"#;
///
/// let event = parse_webhook("build.finished", payload).unwrap();
/// match event {
///     WebhookEvent::BuildFinished(e) => {
///         assert_eq!(e.build.unwrap().number, Some(7));
///     }
///     _ => unreachable!(),
/// }
/// ```
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<WebhookEvent, ParseError> {
    let event = match event_type {
        "agent.connected" => WebhookEvent::AgentConnected(serde_json::from_slice(payload)?),
        "agent.disconnected" => WebhookEvent::AgentDisconnected(serde_json::from_slice(payload)?),
        "agent.lost" => WebhookEvent::AgentLost(serde_json::from_slice(payload)?),
        "agent.stopped" => WebhookEvent::AgentStopped(serde_json::from_slice(payload)?),
        "agent.stopping" => WebhookEvent::AgentStopping(serde_json::from_slice(payload)?),
        "build.failing" => WebhookEvent::BuildFailing(serde_json::from_slice(payload)?),
        "build.finished" => WebhookEvent::BuildFinished(serde_json::from_slice(payload)?),
        "build.running" => WebhookEvent::BuildRunning(serde_json::from_slice(payload)?),
        "build.scheduled" => WebhookEvent::BuildScheduled(serde_json::from_slice(payload)?),
        "job.activated" => WebhookEvent::JobActivated(serde_json::from_slice(payload)?),
        "job.finished" => WebhookEvent::JobFinished(serde_json::from_slice(payload)?),
        "job.scheduled" => WebhookEvent::JobScheduled(serde_json::from_slice(payload)?),
        "job.started" => WebhookEvent::JobStarted(serde_json::from_slice(payload)?),
        "ping" => WebhookEvent::Ping(serde_json::from_slice(payload)?),
        other => return Err(ParseError::UnknownEvent(other.to_string())),
    };

    tracing::trace!(event_type, "decoded webhook payload");

    Ok(event)
}
