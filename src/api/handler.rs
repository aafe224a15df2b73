//! API Lambda handler - thin router in front of the Events API handler.
//!
//! This module handles:
//! - Request validation (headers, body, signature)
//! - Slack delivery retries
//! - Event callbacks (delegated to `event_handler` module)

use super::{event_handler, helpers, parsing, signature};
use crate::core::config::AppConfig;
use crate::errors::BotError;
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded. Malformed or unsigned
/// requests get a 4xx response payload instead.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(
    event: LambdaEvent<serde_json::Value>,
) -> Result<impl Serialize, Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    Ok(handle_request(&config, &event.payload).await)
}

/// Validate and route one API Gateway request.
pub async fn handle_request(config: &AppConfig, payload: &Value) -> Value {
    let Some(headers) = payload.get("headers") else {
        error!("Request missing headers");
        return helpers::err_response(400, "Missing headers");
    };

    let body = match extract_body(payload) {
        Ok(b) => b,
        Err(response) => return response,
    };

    if let Err(response) = verify_signature(body, headers, config) {
        return response;
    }

    info!("Slack signature verified successfully");

    // Slack redelivers when the first ack was slow; the first delivery is already queued
    if let Some(retry) = parsing::get_header_value(headers, "X-Slack-Retry-Num") {
        let reason = parsing::get_header_value(headers, "X-Slack-Retry-Reason").unwrap_or("");
        warn!(
            retry_num = %retry,
            retry_reason = %reason,
            "Acknowledging Slack retry without enqueueing"
        );
        return helpers::ok_empty();
    }

    let json_body = match serde_json::from_str::<Value>(body) {
        Ok(v) => v,
        Err(e) => {
            let e = BotError::Parse(format!("Invalid JSON body: {e}"));
            error!("{}", e);
            return helpers::err_response(400, &e.to_string());
        }
    };

    event_handler::handle_event_callback(config, &json_body).await
}

// ============================================================================
// Request Validation Helpers
// ============================================================================

fn extract_body(payload: &Value) -> Result<&str, Value> {
    let Some(body) = payload.get("body") else {
        error!("Request missing body");
        return Err(helpers::err_response(400, "Missing body"));
    };

    let Some(body_str) = body.as_str() else {
        error!("Request body is not a string");
        return Err(helpers::err_response(400, "Invalid body format"));
    };

    Ok(body_str)
}

fn verify_signature(body: &str, headers: &Value, config: &AppConfig) -> Result<(), Value> {
    let Some(sig) = parsing::get_header_value(headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Signature header",
        ));
    };

    let Some(timestamp) = parsing::get_header_value(headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Request-Timestamp header",
        ));
    };

    if !signature::verify_slack_signature(body, timestamp, sig, config) {
        error!("Slack signature verification failed");
        return Err(helpers::err_response(401, "Invalid Slack signature"));
    }

    Ok(())
}
