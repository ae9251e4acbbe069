//! Unit tests for token service

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use crate::errors::TokenError;
use crate::services::token::{Clock, ManualClock, TokenService, TokenServiceConfig};

const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

fn service_with_clock() -> (TokenService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    ));
    let service = TokenService::with_clock(TokenServiceConfig::new(SECRET, 3_600), clock.clone());
    (service, clock)
}

#[test]
fn test_issued_token_verifies_to_its_subject() {
    let (service, _) = service_with_clock();

    for subject in ["a@x.com", "student.name+tag@uni.edu", "x"] {
        let issued = service.issue(subject).unwrap();
        assert_eq!(issued.subject, subject);
        assert_eq!(service.verify_subject(&issued.token).unwrap(), subject);
    }
}

#[test]
fn test_validity_window_matches_ttl() {
    let (service, clock) = service_with_clock();

    let issued = service.issue("a@x.com").unwrap();
    assert_eq!(issued.issued_at, clock.now());
    assert_eq!(issued.expires_at - issued.issued_at, Duration::seconds(3_600));

    let claims = service.verify(&issued.token).unwrap();
    assert_eq!(claims.iat, clock.now().timestamp());
    assert_eq!(claims.exp, claims.iat + 3_600);
}

#[test]
fn test_token_expires_exactly_at_ttl() {
    let (service, clock) = service_with_clock();
    let issued = service.issue("a@x.com").unwrap();

    clock.advance(Duration::seconds(3_599));
    assert!(service.verify(&issued.token).is_ok());

    clock.advance(Duration::seconds(1));
    assert_eq!(service.verify(&issued.token), Err(TokenError::Expired));
}

#[test]
fn test_two_tokens_for_same_subject_are_distinct_and_valid() {
    let (service, _) = service_with_clock();

    let a = service.issue("a@x.com").unwrap();
    let b = service.issue("a@x.com").unwrap();

    assert_ne!(a.token, b.token);
    assert!(service.verify(&a.token).is_ok());
    assert!(service.verify(&b.token).is_ok());
}

#[test]
fn test_tampering_any_byte_fails_verification() {
    let (service, _) = service_with_clock();
    let token = service.issue("a@x.com").unwrap().token;

    for index in 0..token.len() {
        let mut bytes = token.clone().into_bytes();
        bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let result = service.verify(&tampered);
        assert!(
            matches!(result, Err(TokenError::BadSignature) | Err(TokenError::Malformed)),
            "byte {} tampered but got {:?}",
            index,
            result
        );
    }
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let (service, _) = service_with_clock();
    let other = TokenService::new(TokenServiceConfig::new("another-secret-also-32-bytes-long!!", 3_600));

    let token = other.issue("a@x.com").unwrap().token;
    assert_eq!(service.verify(&token), Err(TokenError::BadSignature));
}

#[test]
fn test_signature_is_checked_before_expiry() {
    let (service, clock) = service_with_clock();
    let other = TokenService::with_clock(
        TokenServiceConfig::new("another-secret-also-32-bytes-long!!", 60),
        clock.clone(),
    );
    let forged = other.issue("a@x.com").unwrap().token;

    clock.advance(Duration::hours(2));
    assert_eq!(service.verify(&forged), Err(TokenError::BadSignature));
}

#[test]
fn test_garbage_is_malformed() {
    let (service, _) = service_with_clock();

    for input in ["", "not-a-token", "a.b", "a.b.c", "...."] {
        assert_eq!(service.verify(input), Err(TokenError::Malformed), "input {:?}", input);
    }
}

#[test]
fn test_default_config_uses_one_day_ttl() {
    let service = TokenService::new(TokenServiceConfig::default());
    assert_eq!(service.ttl(), Duration::days(1));
}
