//! Unit tests for the OTP token entity

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::otp_token::{
    OtpPurpose, OtpToken, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EXPIRATION_MINUTES,
    MAX_ATTEMPTS,
};
use crate::domain::value_objects::AttemptOutcome;

fn issued_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

fn token() -> OtpToken {
    OtpToken::issue_at(
        "Student@College.EDU",
        OtpPurpose::EmailVerification,
        Some(Uuid::new_v4()),
        issued_at(),
        DEFAULT_EXPIRATION_MINUTES,
        MAX_ATTEMPTS,
    )
}

fn wrong_code(token: &OtpToken) -> String {
    if token.code == "123456" {
        "654321".to_string()
    } else {
        "123456".to_string()
    }
}

#[test]
fn test_issue_sets_fresh_state() {
    let token = token();

    assert_eq!(token.email, "student@college.edu");
    assert_eq!(token.code.len(), CODE_LENGTH);
    assert_eq!(token.attempts, 0);
    assert_eq!(token.max_attempts, MAX_ATTEMPTS);
    assert!(!token.is_used);
    assert!(token.verified_at.is_none());
    assert_eq!(token.expires_at, issued_at() + Duration::minutes(10));
    assert!(token.is_effective_at(issued_at()));
}

#[test]
fn test_generate_code_stays_in_range() {
    for _ in 0..500 {
        let code = OtpToken::generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let num: u32 = code.parse().expect("generated code should be numeric");
        assert!((CODE_MIN..=CODE_MAX).contains(&num));
    }
}

#[test]
fn test_code_uniqueness() {
    let codes: std::collections::HashSet<String> =
        (0..100).map(|_| OtpToken::generate_code()).collect();
    assert!(codes.len() > 1);
}

#[test]
fn test_correct_code_consumes_token_without_counting_attempt() {
    let mut token = token();
    let code = token.code.clone();
    let user_id = token.user_id;
    let now = issued_at() + Duration::minutes(2);

    let outcome = token.apply_attempt(&code, now);

    assert_eq!(outcome, AttemptOutcome::Verified { user_id });
    assert!(token.is_used);
    assert_eq!(token.verified_at, Some(now));
    assert_eq!(token.attempts, 0);
}

#[test]
fn test_consumed_token_cannot_be_reused() {
    let mut token = token();
    let code = token.code.clone();
    let now = issued_at() + Duration::minutes(1);

    assert!(token.apply_attempt(&code, now).is_verified());
    assert_eq!(token.apply_attempt(&code, now), AttemptOutcome::NoActiveToken);
}

#[test]
fn test_mismatch_counts_down_remaining_attempts() {
    let mut token = token();
    let wrong = wrong_code(&token);
    let now = issued_at() + Duration::minutes(1);

    assert_eq!(
        token.apply_attempt(&wrong, now),
        AttemptOutcome::Mismatch { remaining: 2 }
    );
    assert_eq!(
        token.apply_attempt(&wrong, now),
        AttemptOutcome::Mismatch { remaining: 1 }
    );
    assert_eq!(
        token.apply_attempt(&wrong, now),
        AttemptOutcome::Mismatch { remaining: 0 }
    );
    assert_eq!(token.attempts, MAX_ATTEMPTS);
    assert!(!token.is_used);
}

#[test]
fn test_exhausted_token_rejects_even_correct_code() {
    let mut token = token();
    let correct = token.code.clone();
    let wrong = wrong_code(&token);
    let now = issued_at() + Duration::minutes(1);

    for _ in 0..MAX_ATTEMPTS {
        token.apply_attempt(&wrong, now);
    }

    assert_eq!(token.apply_attempt(&correct, now), AttemptOutcome::TooManyAttempts);
    assert_eq!(token.attempts, MAX_ATTEMPTS);
    assert!(!token.is_used);
    assert!(token.verified_at.is_none());
}

#[test]
fn test_expired_token_rejects_correct_code() {
    let mut token = token();
    let correct = token.code.clone();

    let outcome = token.apply_attempt(&correct, issued_at() + Duration::minutes(11));

    assert_eq!(outcome, AttemptOutcome::NoActiveToken);
    assert!(!token.is_used);
    assert_eq!(token.attempts, 0);
}

#[test]
fn test_expiry_boundary() {
    let token = token();
    assert!(!token.is_expired_at(token.expires_at - Duration::seconds(1)));
    assert!(token.is_expired_at(token.expires_at));
}

#[test]
fn test_matches_requires_exact_string() {
    let token = token();
    let padded = format!(" {}", token.code);

    assert!(token.matches(&token.code.clone()));
    assert!(!token.matches(&padded));
    assert!(!token.matches(&token.code[..5]));
}

#[test]
fn test_supersede_kills_token() {
    let mut token = token();
    let code = token.code.clone();
    let now = issued_at() + Duration::minutes(1);

    token.supersede(now);

    assert!(token.is_used);
    assert!(token.verified_at.is_none());
    assert_eq!(token.apply_attempt(&code, now), AttemptOutcome::NoActiveToken);
}

#[test]
fn test_purpose_round_trips_through_string() {
    for purpose in OtpPurpose::ALL {
        let parsed: OtpPurpose = purpose.as_str().parse().unwrap();
        assert_eq!(parsed, purpose);
    }
    assert!("login".parse::<OtpPurpose>().is_err());
}

#[test]
fn test_purpose_serializes_as_snake_case() {
    let json = serde_json::to_string(&OtpPurpose::PasswordReset).unwrap();
    assert_eq!(json, "\"password_reset\"");
}
