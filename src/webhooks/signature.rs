//! Buildkite webhook signature verification using HMAC-SHA256.
//!
//! Buildkite signs webhook payloads using HMAC-SHA256 with a shared secret.
//! The signature is provided in the `X-Buildkite-Signature` header as
//! `timestamp=<digits>,signature=<hex>`, and the MAC is computed over the
//! timestamp and the raw body joined by a single period:
//!
//! ```text
//! HMAC-SHA256(secret, "{timestamp}.{body}")
//! ```
//!
//! Signature verification is the first step in webhook processing; a payload
//! that fails verification must be rejected before parsing.

use hmac::{Hmac, Mac};
use http::HeaderMap;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the payload signature.
pub const SIGNATURE_HEADER: &str = "x-buildkite-signature";

/// Errors produced by signature validation.
///
/// All four kinds are terminal: the caller rejects the delivery and never
/// retries through this crate.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The signature header is absent.
    #[error("missing signature header")]
    MissingSignature,

    /// The header value does not match `timestamp=<digits>,signature=<hex>`.
    #[error("malformed signature header")]
    MalformedHeader,

    /// The signature value is not a valid hex string.
    #[error("signature is not a hex string")]
    NonHexSignature,

    /// The supplied MAC does not match the one computed from the body.
    ///
    /// The message text is a compatibility surface; callers match on it.
    #[error("payload signature check failed")]
    SignatureMismatch,
}

/// A parsed `X-Buildkite-Signature` header value.
///
/// The timestamp is kept as its raw digit string: the MAC input must be
/// byte-identical to what the producer signed, and re-formatting an integer
/// would not preserve that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    /// Unix timestamp of the delivery, as sent.
    pub timestamp: &'a str,
    /// The decoded HMAC-SHA256 signature (32 bytes when well-formed).
    pub signature: Vec<u8>,
}

/// Parses a Buildkite signature header into its timestamp and signature.
///
/// The grammar is exact: two comma-separated `key=value` pairs, `timestamp`
/// first, no whitespace tolerance. A non-digit or empty timestamp, missing
/// keys, or extra parts are [`SignatureError::MalformedHeader`]; a signature
/// that is not valid hex is [`SignatureError::NonHexSignature`].
///
/// # Examples
///
/// ```
/// use buildkite_webhooks::webhooks::parse_signature_header;
///
/// let parsed = parse_signature_header("timestamp=1642080837,signature=abcd1234").unwrap();
/// assert_eq!(parsed.timestamp, "1642080837");
/// assert_eq!(parsed.signature, vec![0xab, 0xcd, 0x12, 0x34]);
///
/// assert!(parse_signature_header("invalid").is_err());
/// ```
pub fn parse_signature_header(header: &str) -> Result<SignatureHeader<'_>, SignatureError> {
    let (timestamp_pair, signature_pair) = header
        .split_once(',')
        .ok_or(SignatureError::MalformedHeader)?;

    let timestamp = timestamp_pair
        .strip_prefix("timestamp=")
        .ok_or(SignatureError::MalformedHeader)?;
    let signature_hex = signature_pair
        .strip_prefix("signature=")
        .ok_or(SignatureError::MalformedHeader)?;

    if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SignatureError::MalformedHeader);
    }

    // A second comma means more than two pairs
    if signature_hex.contains(',') {
        return Err(SignatureError::MalformedHeader);
    }

    let signature = hex::decode(signature_hex).map_err(|_| SignatureError::NonHexSignature)?;

    Ok(SignatureHeader {
        timestamp,
        signature,
    })
}

/// Computes the HMAC-SHA256 signature of a payload using the given secret.
///
/// The MAC covers `"{timestamp}.{body}"`. This is also useful for tests and
/// for producing deliveries (generating expected signatures).
pub fn compute_signature(timestamp: &str, body: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    mac.finalize().into_bytes().to_vec()
}

/// Formats a timestamp and signature as a Buildkite-style header value.
///
/// Returns a string in the format `timestamp=<digits>,signature=<hex>`.
pub fn format_signature_header(timestamp: &str, signature: &[u8]) -> String {
    format!("timestamp={timestamp},signature={}", hex::encode(signature))
}

/// Validates a webhook delivery's signature and returns the raw body.
///
/// Reads the `X-Buildkite-Signature` header, recomputes the MAC over the
/// timestamp and body, and compares it to the supplied signature in constant
/// time. On success the input body slice is returned unchanged; the caller
/// must reuse those bytes for parsing rather than re-reading the request.
///
/// # Errors
///
/// * [`SignatureError::MissingSignature`] - header absent
/// * [`SignatureError::MalformedHeader`] - header does not match the grammar
/// * [`SignatureError::NonHexSignature`] - signature value is not hex
/// * [`SignatureError::SignatureMismatch`] - MAC comparison failed
///
/// # Examples
///
/// ```
/// use buildkite_webhooks::webhooks::{
///     SIGNATURE_HEADER, compute_signature, format_signature_header, validate_payload,
/// };
/// use http::HeaderMap;
///
/// let body = br#"{"event":"ping"}"#;
/// let secret = b"my-webhook-token";
///
/// let signature = compute_signature("1642080837", body, secret);
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     SIGNATURE_HEADER,
///     format_signature_header("1642080837", &signature).parse().unwrap(),
/// );
///
/// let validated = validate_payload(&headers, body, secret).unwrap();
/// assert_eq!(validated, body);
/// ```
pub fn validate_payload<'a>(
    headers: &HeaderMap,
    body: &'a [u8],
    secret: &[u8],
) -> Result<&'a [u8], SignatureError> {
    let value = headers
        .get(SIGNATURE_HEADER)
        .ok_or(SignatureError::MissingSignature)?;
    let header = value
        .to_str()
        .map_err(|_| SignatureError::MalformedHeader)?;

    let parsed = parse_signature_header(header)?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(parsed.timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);

    // Constant-time comparison via the HMAC library
    mac.verify_slice(&parsed.signature)
        .map_err(|_| SignatureError::SignatureMismatch)?;

    tracing::trace!(timestamp = parsed.timestamp, "webhook signature verified");

    Ok(body)
}
