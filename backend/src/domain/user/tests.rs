//! Unit tests for the user data model.

use super::*;
use rstest::rstest;

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("   ", UserValidationError::EmptyUsername)]
#[case(" admin@example.com", UserValidationError::UntrimmedUsername)]
#[case("admin@example.com ", UserValidationError::UntrimmedUsername)]
fn invalid_usernames_are_rejected(
    #[case] value: &str,
    #[case] expected: UserValidationError,
) {
    let err = Username::new(value).expect_err("invalid username must fail");
    assert_eq!(err, expected);
}

#[test]
fn username_round_trips_valid_input() {
    let username = Username::new("admin@example.com").expect("valid username");
    assert_eq!(username.as_ref(), "admin@example.com");
    assert_eq!(username.to_string(), "admin@example.com");
}

#[test]
fn new_users_are_active_without_credentials() {
    let username = Username::new("ada@example.com").expect("valid username");
    let user = User::new(UserId::random(), username);

    assert!(user.is_active());
    assert!(user.password_hash().is_none());
}

#[test]
fn builder_helpers_set_hash_and_active_flag() {
    let username = Username::new("ada@example.com").expect("valid username");
    let user = User::new(UserId::random(), username)
        .with_password_hash("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
        .with_active(false);

    assert!(!user.is_active());
    assert!(
        user.password_hash()
            .is_some_and(|hash| hash.starts_with("$argon2id$"))
    );
}

#[test]
fn user_ids_display_as_uuids() {
    let id = UserId::random();
    assert_eq!(id.to_string(), id.as_uuid().to_string());
}
