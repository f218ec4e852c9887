//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character that is not a digit (or leading `+`).
    #[error("phone number may only contain digits and an optional leading +")]
    NonDigit,
    /// The first digit is zero.
    #[error("phone number cannot start with zero")]
    LeadingZero,
    /// The input has more than 16 digits.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum allowed number of digits.
        max: usize,
    },
}

/// An international phone number.
///
/// ## Constraints
///
/// - Optional leading `+`
/// - Digits only, 1-16 of them
/// - First digit must be non-zero
///
/// ## Examples
///
/// ```
/// use customer_registry_core::Phone;
///
/// assert!(Phone::parse("+1234567890").is_ok());
/// assert!(Phone::parse("1234567890").is_ok());
///
/// assert!(Phone::parse("").is_err());            // empty
/// assert!(Phone::parse("0123").is_err());        // leading zero
/// assert!(Phone::parse("+12 34").is_err());      // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Maximum number of digits in a phone number.
    pub const MAX_DIGITS: usize = 16;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains non-digit characters
    /// (beyond an optional leading `+`), starts with zero, or has more than
    /// 16 digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits = s.strip_prefix('+').unwrap_or(s);

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        if digits.starts_with('0') {
            return Err(PhoneError::LeadingZero);
        }

        if digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
