//! Phone number value object
//!
//! Submitted phone numbers arrive as raw user input and are normalized by
//! stripping all whitespace before any network call is made. Numbers are
//! never format-validated here: the risk-check service and the identity
//! provider are the authorities on what constitutes a reachable number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized phone number.
///
/// Construction goes through [`PhoneNumber::normalize`], which guarantees the
/// inner string is non-empty and contains no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize raw user input into a phone number.
    ///
    /// Removes all whitespace (spaces, tabs, any Unicode whitespace) from the
    /// input. Returns `None` if nothing remains, in which case the sign-in
    /// flow never starts.
    pub fn normalize(raw: &str) -> Option<Self> {
        let normalized: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// The normalized number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Log-safe rendering: everything but the last four digits is hidden.
    ///
    /// Full phone numbers must never appear in logs.
    pub fn masked(&self) -> String {
        let len = self.0.len();
        if len <= 4 {
            "*".repeat(len)
        } else {
            format!("{}{}", "*".repeat(len - 4), &self.0[len - 4..])
        }
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_embedded_whitespace() {
        let phone = PhoneNumber::normalize("+1 555 0100").unwrap();
        assert_eq!(phone.as_str(), "+15550100");

        let phone = PhoneNumber::normalize("  +44\t20 7946\u{00A0}0958 ").unwrap();
        assert_eq!(phone.as_str(), "+442079460958");
    }

    #[test]
    fn normalize_passes_clean_input_through() {
        let phone = PhoneNumber::normalize("+15550100").unwrap();
        assert_eq!(phone.as_str(), "+15550100");
    }

    #[test]
    fn normalize_rejects_empty_and_all_whitespace_input() {
        assert!(PhoneNumber::normalize("").is_none());
        assert!(PhoneNumber::normalize("   ").is_none());
        assert!(PhoneNumber::normalize(" \t\n ").is_none());
    }

    #[test]
    fn masked_hides_all_but_last_four() {
        let phone = PhoneNumber::normalize("+15550100").unwrap();
        assert_eq!(phone.masked(), "*****0100");
    }

    #[test]
    fn masked_handles_short_numbers() {
        let phone = PhoneNumber::normalize("123").unwrap();
        assert_eq!(phone.masked(), "***");
    }
}
