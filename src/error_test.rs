use super::*;

// =============================================================
// retryable
// =============================================================

#[test]
fn network_and_server_errors_are_retryable() {
    assert!(AdminError::Network("refused".into()).retryable());
    assert!(AdminError::EmptyPayload.retryable());
    assert!(AdminError::Status { status: 503, body: String::new() }.retryable());
    assert!(AdminError::Status { status: 429, body: String::new() }.retryable());
}

#[test]
fn client_errors_are_not_retryable() {
    assert!(!AdminError::Status { status: 404, body: String::new() }.retryable());
    assert!(!AdminError::Validation("pick one".into()).retryable());
    assert!(!AdminError::Decode("bad".into()).retryable());
}

// =============================================================
// user_message
// =============================================================

#[test]
fn user_message_prefers_server_message_field() {
    let err = AdminError::Status { status: 400, body: r#"{"message":"Name already exists"}"#.into() };
    assert_eq!(err.user_message(), "Name already exists");
}

#[test]
fn user_message_reads_error_field() {
    let err = AdminError::Status { status: 500, body: r#"{"error":"boom"}"#.into() };
    assert_eq!(err.user_message(), "boom");
}

#[test]
fn user_message_empty_body_uses_generic_text() {
    let err = AdminError::Status { status: 500, body: "  ".into() };
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[test]
fn user_message_plain_body_uses_display() {
    let err = AdminError::Status { status: 502, body: "Bad Gateway".into() };
    assert_eq!(err.user_message(), "HTTP 502: Bad Gateway");
    assert_eq!(err.status(), Some(502));
}

#[test]
fn validation_message_is_verbatim() {
    let err = AdminError::Validation("Please select a record".into());
    assert_eq!(err.user_message(), "Please select a record");
    assert_eq!(err.status(), None);
}
