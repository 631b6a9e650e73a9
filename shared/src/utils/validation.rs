//! Email and OTP format validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of every issued code
pub const OTP_CODE_LENGTH: usize = 6;

/// Loose shape check used by every entry point: something@something.tld
pub static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Exactly six ASCII digits
pub static OTP_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{6}$").expect("valid otp regex"));

/// Lower-case and trim an address before storage or matching
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address has a plausible shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Check that a submitted code is exactly six ASCII digits
pub fn is_valid_otp_code(code: &str) -> bool {
    // `\d` in the regex crate is Unicode-aware, so also insist on ASCII.
    code.len() == OTP_CODE_LENGTH && code.is_ascii() && OTP_CODE_REGEX.is_match(code)
}

/// Mask an email address for logging: `a***@ncit.edu.np`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@NCIT.edu.NP "), "a@ncit.edu.np");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@ncit.edu.np"));
        assert!(!is_valid_email("a@ncit"));
        assert!(!is_valid_email("no spaces@x.io"));
        assert!(!is_valid_email("@x.io"));
    }

    #[test]
    fn test_is_valid_otp_code() {
        assert!(is_valid_otp_code("012345"));
        assert!(is_valid_otp_code("999999"));
        assert!(!is_valid_otp_code("12345"));
        assert!(!is_valid_otp_code("1234567"));
        assert!(!is_valid_otp_code("12345a"));
        assert!(!is_valid_otp_code("١٢٣٤٥٦"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("student@ncit.edu.np"), "s***@ncit.edu.np");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
