use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::error;

use crate::core::config::AppConfig;

/// Oldest request timestamp accepted, in seconds.
pub const MAX_REQUEST_AGE_SECS: u64 = 300;

/// Allowed clock skew for timestamps from the future, in seconds.
pub const MAX_CLOCK_SKEW_SECS: u64 = 60;

pub fn verify_slack_signature(
    request_body: &str,
    timestamp: &str,
    signature: &str,
    config: &AppConfig,
) -> bool {
    let signing_secret = match config.require_slack_signing_secret() {
        Ok(secret) => secret,
        Err(e) => {
            error!("Cannot verify Slack signature: {}", e);
            return false;
        }
    };

    let Ok(now) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        error!("System clock is before the Unix epoch");
        return false;
    };

    verify_signature_at(
        request_body,
        timestamp,
        signature,
        signing_secret,
        now.as_secs(),
    )
}

/// Verify a `v0=` Slack signature against `now_secs`.
///
/// Rejects malformed or out-of-window timestamps before touching the HMAC,
/// and compares the digest in constant time.
pub fn verify_signature_at(
    request_body: &str,
    timestamp: &str,
    signature: &str,
    signing_secret: &str,
    now_secs: u64,
) -> bool {
    let Ok(ts) = timestamp.parse::<u64>() else {
        error!("Malformed Slack request timestamp '{}'", timestamp);
        return false;
    };

    if now_secs.saturating_sub(ts) > MAX_REQUEST_AGE_SECS
        || ts > now_secs.saturating_add(MAX_CLOCK_SKEW_SECS)
    {
        error!("Timestamp out of range, potential replay attack");
        return false;
    }

    let Some(received) = signature
        .strip_prefix("v0=")
        .and_then(|hex_sig| hex::decode(hex_sig).ok())
    else {
        error!("Malformed Slack signature header");
        return false;
    };

    let mut mac = match Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return false;
        }
    };
    mac.update(format!("v0:{timestamp}:{request_body}").as_bytes());

    if mac.verify_slice(&received).is_ok() {
        true
    } else {
        error!("Signature verification failed");
        false
    }
}

pub fn compute_signature(timestamp: &str, request_body: &str, signing_secret: &str) -> String {
    let base_string = format!("v0:{timestamp}:{request_body}");
    let mut mac = match Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return String::new();
        }
    };
    mac.update(base_string.as_bytes());
    format!("v0={}", hex::encode(mac.finalize().into_bytes()))
}
