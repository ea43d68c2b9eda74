//! Password credential type.
//!
//! The remote API enforces its own password policy; this type mirrors the
//! client-side schema so invalid credentials are rejected before any network
//! call is made.

use core::fmt;

use serde::Serialize;

/// Special characters the password policy accepts (and requires one of).
const SPECIAL_CHARS: &str = "!@#$%^&*";

/// Errors that can occur when parsing a [`Password`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PasswordError {
    /// The input string is too short.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input string is too long.
    #[error("password must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains no digit.
    #[error("password must contain at least one number")]
    MissingDigit,
    /// The input contains no special character.
    #[error("password must contain at least one special character (!@#$%^&*)")]
    MissingSpecialChar,
    /// The input contains a character outside the allowed set.
    #[error("password may only contain letters, numbers, and !@#$%^&*")]
    InvalidCharacter,
}

/// A validated password.
///
/// ## Constraints
///
/// - Length: 6-16 characters
/// - At least one ASCII digit
/// - At least one special character from `!@#$%^&*`
/// - Only ASCII letters, digits, and the special set above
///
/// The `Debug` implementation redacts the value; passwords are serialized
/// only when sent in an authentication request body.
#[derive(Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Minimum password length.
    pub const MIN_LENGTH: usize = 6;
    /// Maximum password length.
    pub const MAX_LENGTH: usize = 16;

    /// Parse a `Password` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input violates any of the policy constraints
    /// listed on the type.
    pub fn parse(s: &str) -> Result<Self, PasswordError> {
        if s.len() < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(PasswordError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SPECIAL_CHARS.contains(c))
        {
            return Err(PasswordError::InvalidCharacter);
        }

        if !s.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordError::MissingDigit);
        }

        if !s.chars().any(|c| SPECIAL_CHARS.contains(c)) {
            return Err(PasswordError::MissingSpecialChar);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the password as a string slice.
    ///
    /// Only intended for building authentication request bodies.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Password::parse("abc123!").is_ok());
        assert!(Password::parse("P4ssw0rd*").is_ok());
        assert!(Password::parse("1!aaaa").is_ok());
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Password::parse("a1!"),
            Err(PasswordError::TooShort { min: 6 })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Password::parse("a1!aaaaaaaaaaaaaaaaaa"),
            Err(PasswordError::TooLong { max: 16 })
        ));
    }

    #[test]
    fn test_parse_missing_digit() {
        assert!(matches!(
            Password::parse("abcdef!"),
            Err(PasswordError::MissingDigit)
        ));
    }

    #[test]
    fn test_parse_missing_special() {
        assert!(matches!(
            Password::parse("abcdef1"),
            Err(PasswordError::MissingSpecialChar)
        ));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert!(matches!(
            Password::parse("abc 123!"),
            Err(PasswordError::InvalidCharacter)
        ));
        assert!(matches!(
            Password::parse("abc123?"),
            Err(PasswordError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_debug_redacts() {
        let password = Password::parse("abc123!").unwrap();
        let debug = format!("{password:?}");
        assert!(!debug.contains("abc123"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_serialize_transparent() {
        let password = Password::parse("abc123!").unwrap();
        let json = serde_json::to_string(&password).unwrap();
        assert_eq!(json, "\"abc123!\"");
    }
}
