//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Usernames: 3-30 chars, lowercase letters, digits and underscores,
    /// starting with a letter.
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9_]{2,29}$").unwrap();

    /// Tag slugs: lowercase letters, digits and hyphens, no leading/trailing
    /// hyphen.
    pub static ref SLUG_REGEX: Regex =
        Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Validates a username against the platform format.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_format");
        err.message = Some(
            "Username must be 3-30 lowercase letters, digits or underscores, starting with a letter"
                .into(),
        );
        Err(err)
    }
}

/// Validates a tag slug.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if !slug.is_empty() && slug.len() <= 64 && SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_format");
        err.message = Some("Slug must be lowercase letters, digits and hyphens".into());
        Err(err)
    }
}

/// Derives a slug from a tag name: lowercase, alphanumeric runs joined by
/// hyphens.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = true;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('-');
            last_was_sep = true;
        }
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Validates a positive amount in cents (wallet credits, budgets).
pub fn validate_amount_cents(cents: i64) -> Result<(), ValidationError> {
    if cents > 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_positive");
        err.message = Some("Amount must be positive".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        for name in ["alice", "bob_42", "a_b", "x2y"] {
            assert!(validate_username(name).is_ok(), "{} should be valid", name);
        }
    }

    #[test]
    fn test_invalid_usernames() {
        for name in ["ab", "Alice", "1alice", "_alice", "al ice", ""] {
            assert!(
                validate_username(name).is_err(),
                "{} should be invalid",
                name
            );
        }
    }

    #[test]
    fn test_valid_slugs() {
        for slug in ["rust", "rust-lang", "a1-b2-c3"] {
            assert!(validate_slug(slug).is_ok(), "{} should be valid", slug);
        }
    }

    #[test]
    fn test_invalid_slugs() {
        for slug in ["", "-rust", "rust-", "Rust", "rust--lang", "a b"] {
            assert!(validate_slug(slug).is_err(), "{} should be invalid", slug);
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rust Lang"), "rust-lang");
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("C++"), "c");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn test_amount_validation() {
        assert!(validate_amount_cents(1).is_ok());
        assert!(validate_amount_cents(0).is_err());
        assert!(validate_amount_cents(-100).is_err());
    }
}
