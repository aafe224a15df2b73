//! Response builders for the API Lambda.

use serde_json::{Value, json};

/// Returns a 200 OK response with an empty JSON body.
#[must_use]
pub fn ok_empty() -> Value {
    json!({ "statusCode": 200, "body": "{}" })
}

/// Returns a 200 OK response whose body is `text` verbatim.
#[must_use]
pub fn ok_text(text: &str) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "text/plain" },
        "body": text
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "body": json!({ "error": message }).to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_err_response_wraps_message_in_json_body() {
        let resp = err_response(401, "Invalid Slack signature");
        assert_eq!(resp["statusCode"], 401);
        let body: Value = serde_json::from_str(resp["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["error"], "Invalid Slack signature");
    }

    #[test]
    fn test_ok_text_returns_body_verbatim() {
        let resp = ok_text("challenge-token");
        assert_eq!(resp["statusCode"], 200);
        assert_eq!(resp["body"], "challenge-token");
    }
}
