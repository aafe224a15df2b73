use std::error::Error;
use scribe::errors::BotError;
use scribe::worker::{CANONICAL_FAILURE_MESSAGE, FILE_TOO_LARGE_MESSAGE, UNSUPPORTED_FILE_MESSAGE};

#[test]
fn test_bot_error_implements_error_trait() {
    // Verify BotError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = BotError::Parse("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_bot_error_display() {
    let error = BotError::Slack("API failed".to_string());
    assert_eq!(format!("{error}"), "Failed to access Slack API: API failed");

    let error = BotError::Generation("Model unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to generate text: Model unavailable"
    );

    let error = BotError::UnsupportedFormat(".csv".to_string());
    assert_eq!(format!("{error}"), "Unsupported file type: .csv");

    let error = BotError::AttachmentTooLarge("report.pdf (30B > 20B)".to_string());
    assert_eq!(
        format!("{error}"),
        "Attachment too large: report.pdf (30B > 20B)"
    );
}

#[test]
fn test_user_messages_per_variant() {
    assert_eq!(
        BotError::UnsupportedFormat(".csv".into()).user_message(),
        UNSUPPORTED_FILE_MESSAGE
    );
    assert_eq!(
        BotError::AttachmentTooLarge("x".into()).user_message(),
        FILE_TOO_LARGE_MESSAGE
    );
    assert_eq!(
        BotError::Generation("x".into()).user_message(),
        CANONICAL_FAILURE_MESSAGE
    );
    assert_eq!(
        BotError::Http("x".into()).user_message(),
        CANONICAL_FAILURE_MESSAGE
    );
    assert!(
        BotError::Decoding("x".into())
            .user_message()
            .contains("not valid UTF-8")
    );
    assert!(
        BotError::Extraction("x".into())
            .user_message()
            .contains("couldn't read that document")
    );
    assert!(
        BotError::Network("x".into())
            .user_message()
            .contains("couldn't fetch a quote")
    );
}

#[test]
fn test_bot_error_from_conversions() {
    let invalid = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
    let err: BotError = invalid.into();
    assert!(matches!(err, BotError::Decoding(_)));

    // We can't easily build a reqwest::Error directly, so this only verifies
    // that the conversion exists
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> BotError {
        BotError::from(err)
    }
}
