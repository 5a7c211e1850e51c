use super::*;
use jsonwebtoken::{EncodingKey, Header};

const SECRET: &str = "test-secret";

/// Tests that a freshly issued token verifies and carries the user id in its
/// subject claim.
///
/// Expected: Ok with matching subject
#[test]
fn issued_token_round_trips() {
    let token = issue_token("6651f0a2c8d9e4b1a2c3d4e5", SECRET).unwrap();

    let claims = verify_token(&token, SECRET).unwrap();

    assert_eq!(claims.sub, "6651f0a2c8d9e4b1a2c3d4e5");
    assert!(claims.exp > claims.iat);
}

/// Tests that a token signed with a different secret fails verification.
///
/// Expected: Err(InvalidToken)
#[test]
fn rejects_token_signed_with_other_secret() {
    let token = issue_token("6651f0a2c8d9e4b1a2c3d4e5", "other-secret").unwrap();

    let err = verify_token(&token, SECRET).unwrap_err();

    assert!(matches!(err, AuthError::InvalidToken));
}

/// Tests that an expired token is rejected even when the signature is valid.
///
/// Expected: Err(InvalidToken)
#[test]
fn rejects_expired_token() {
    let now = Utc::now();
    let claims = Claims {
        sub: "6651f0a2c8d9e4b1a2c3d4e5".to_string(),
        iat: (now - Duration::hours(48)).timestamp(),
        exp: (now - Duration::hours(24)).timestamp(),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let err = verify_token(&token, SECRET).unwrap_err();

    assert!(matches!(err, AuthError::InvalidToken));
}

/// Tests that a token whose subject claim is empty is rejected: it would
/// otherwise scope every query to the empty owner.
///
/// Expected: Err(MissingSubject)
#[test]
fn rejects_empty_subject() {
    let token = issue_token("", SECRET).unwrap();

    let err = verify_token(&token, SECRET).unwrap_err();

    assert!(matches!(err, AuthError::MissingSubject));
}

/// Tests that a string that is not a JWT at all is rejected.
///
/// Expected: Err(InvalidToken)
#[test]
fn rejects_garbage_token() {
    let err = verify_token("not-a-token", SECRET).unwrap_err();

    assert!(matches!(err, AuthError::InvalidToken));
}
