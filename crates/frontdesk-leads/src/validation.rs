// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Form field normalization.

use std::sync::LazyLock;

use frontdesk_core::FrontdeskError;
use rand::RngCore;
use rand::rngs::OsRng;
use regex::Regex;

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// Trims and lowercases an email, rejecting missing or malformed input.
pub fn normalize_email(raw: Option<&str>) -> Result<String, FrontdeskError> {
    let email = raw.map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(FrontdeskError::Validation("Email is required".into()));
    }
    let pattern = EMAIL_PATTERN
        .as_ref()
        .map_err(|e| FrontdeskError::Internal(format!("email pattern failed to compile: {e}")))?;
    if !pattern.is_match(email) {
        return Err(FrontdeskError::Validation("Invalid email format".into()));
    }
    Ok(email.to_lowercase())
}

/// Trimmed value, `None` when absent or blank.
pub fn optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 48 hex characters from 24 bytes of OS randomness.
pub fn booking_token() -> String {
    let mut bytes = [0u8; 24];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email(Some("  Ada@Example.COM ")).unwrap(),
            "ada@example.com"
        );
    }

    #[test]
    fn missing_and_malformed_emails_are_rejected() {
        for (input, expected) in [
            (None, "Email is required"),
            (Some("   "), "Email is required"),
            (Some("ada"), "Invalid email format"),
            (Some("ada@example"), "Invalid email format"),
            (Some("ada lovelace@example.com"), "Invalid email format"),
            (Some("a@b@c.com"), "Invalid email format"),
        ] {
            let err = normalize_email(input).unwrap_err();
            assert_eq!(err.to_string(), expected, "input {input:?}");
        }
    }

    #[test]
    fn blank_optional_fields_are_none() {
        assert_eq!(optional(Some("  Acme ")), Some("Acme".to_string()));
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(None), None);
    }

    #[test]
    fn tokens_are_unique_hex() {
        let a = booking_token();
        let b = booking_token();
        assert_eq!(a.len(), 48);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
