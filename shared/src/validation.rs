//! Input validation functions
//!
//! Request bodies use the `validator` derive for field rules. The helpers here
//! cover the checks that run after deserialization, inside the services.

use std::sync::OnceLock;

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_LEN: usize = 6;

const MAX_EMAIL_LEN: usize = 255;

fn email_regex() -> &'static regex_lite::Regex {
    static EMAIL: OnceLock<regex_lite::Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|e| panic!("email pattern is a literal: {e}"))
    })
}

/// Canonical form of an email address: trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err("Email too long".to_string());
    }
    if !email_regex().is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

/// Reject values that are empty once surrounding whitespace is removed
pub fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

/// Parse a path identifier. Only positive integers name a stored row.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@domain.co.uk").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@dot").is_err());
        assert!(validate_email("spaces in@email.com").is_err());
        assert!(validate_email(&format!("{}@example.com", "a".repeat(250))).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
        assert_eq!(normalize_email("ada@example.com"), "ada@example.com");
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_password("").is_err());
        // Multi-byte characters count once each
        assert!(validate_password("ääääää").is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_validate_required_rejects_blank(#[case] value: &str) {
        let err = validate_required("Name", value).unwrap_err();
        assert_eq!(err, "Name is required");
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case(" 42 ", Some(42))]
    #[case("0", None)]
    #[case("-3", None)]
    #[case("abc", None)]
    #[case("", None)]
    fn test_parse_id(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_id(raw), expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_short_passwords_rejected(password in "[a-zA-Z0-9]{0,5}") {
            prop_assert!(validate_password(&password).is_err());
        }

        #[test]
        fn prop_long_enough_passwords_accepted(password in "[a-zA-Z0-9!@#]{6,64}") {
            prop_assert!(validate_password(&password).is_ok());
        }

        #[test]
        fn prop_normalize_email_is_idempotent(email in "[ ]{0,2}[A-Za-z0-9]{1,10}@[A-Za-z]{1,8}\\.[A-Za-z]{2,4}[ ]{0,2}") {
            let once = normalize_email(&email);
            prop_assert_eq!(normalize_email(&once), once.clone());
            prop_assert!(validate_email(&once).is_ok());
        }
    }
}
