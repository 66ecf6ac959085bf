//! Webhook handling for Buildkite events.
//!
//! This module provides the two halves of webhook intake:
//! - Signature verification for webhook payloads (timestamped HMAC-SHA256)
//! - Parsing of JSON payloads into typed [`WebhookEvent`] values
//!
//! The intended flow is validate-then-parse:
//!
//! ```
//! use buildkite_webhooks::webhooks::{parse_webhook, validate_payload, webhook_type};
//! use buildkite_webhooks::webhooks::{SIGNATURE_HEADER, compute_signature, format_signature_header};
//! use http::HeaderMap;
//!
//! # let secret = b"my-webhook-token";
//! # let body = br#"{"event":"ping"}"#.to_vec();
//! # let mut headers = HeaderMap::new();
//! # let sig = compute_signature("1642080837", &body, secret);
//! # headers.insert(SIGNATURE_HEADER, format_signature_header("1642080837", &sig).parse().unwrap());
//! # headers.insert("x-buildkite-event", "ping".parse().unwrap());
//! let payload = validate_payload(&headers, &body, secret)?;
//! let event_type = webhook_type(&headers).unwrap_or_default();
//! let event = parse_webhook(event_type, payload)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod events;
pub mod parser;
pub mod signature;

pub use events::{AgentEvent, BuildEvent, JobEvent, PingEvent, WebhookEvent};
pub use parser::{EVENT_TYPE_HEADER, ParseError, parse_webhook, webhook_type};
pub use signature::{
    SIGNATURE_HEADER, SignatureError, SignatureHeader, compute_signature,
    format_signature_header, parse_signature_header, validate_payload,
};
