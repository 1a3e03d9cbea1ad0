//! Unit tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(ErrorCode::InvalidRequest, "invalid_request")]
#[case(ErrorCode::Unauthorized, "unauthorized")]
#[case(ErrorCode::InternalError, "internal_error")]
fn codes_serialise_as_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
    let value = serde_json::to_value(code).expect("code serialises");
    assert_eq!(value, json!(expected));
}

#[test]
fn blank_messages_are_rejected() {
    let err = Error::try_new(ErrorCode::InternalError, "   ")
        .expect_err("blank message must fail");
    assert_eq!(err, ErrorValidationError::EmptyMessage);
}

#[test]
fn details_are_omitted_when_absent() {
    let error = Error::unauthorized("Incorrect username or password.");
    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "unauthorized",
            "message": "Incorrect username or password.",
        })
    );
}

#[test]
fn details_round_trip_through_serde() {
    let error = Error::invalid_request("Email/Username not provided")
        .with_details(json!({ "fields": [{ "field": "email" }] }));
    let encoded = serde_json::to_string(&error).expect("error serialises");
    let decoded: Error = serde_json::from_str(&encoded).expect("error deserialises");

    assert_eq!(decoded, error);
}

#[test]
fn deserialising_blank_messages_fails() {
    let result = serde_json::from_value::<Error>(json!({
        "code": "unauthorized",
        "message": "  ",
    }));
    assert!(result.is_err());
}
