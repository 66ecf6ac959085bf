//! Buildkite webhook verification and parsing.
//!
//! This library provides the security-sensitive core of a Buildkite webhook
//! consumer: HMAC-SHA256 signature validation and dispatch of JSON payloads
//! into typed event values. It owns no HTTP endpoint; a service passes in the
//! request headers and raw body and receives back either a typed event or a
//! classified error.

pub mod types;
pub mod webhooks;
