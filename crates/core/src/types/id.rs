//! Opaque customer identifier.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`CustomerId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty.
    #[error("customer id cannot be empty")]
    Empty,
    /// The input string is not a well-formed identifier.
    #[error("Invalid customer ID format")]
    Malformed,
}

/// A store-assigned customer identifier.
///
/// Identifiers are opaque to callers: the only supported operations are
/// parsing a candidate string, generating a fresh identifier, and rendering
/// back to a string. Generated identifiers are random (UUID v4), so an
/// identifier is never reused after the record it named has been deleted.
///
/// ## Examples
///
/// ```
/// use customer_registry_core::CustomerId;
///
/// let id = CustomerId::generate();
/// let parsed = CustomerId::parse(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
///
/// assert!(CustomerId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a `CustomerId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not a well-formed identifier.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        Uuid::parse_str(s).map(Self).map_err(|_| IdError::Malformed)
    }

    /// Returns `true` if the input is structurally a valid identifier.
    ///
    /// This is the well-formedness predicate the service uses before asking
    /// the store for a record, so obviously broken identifiers never reach
    /// the store.
    #[must_use]
    pub fn is_well_formed(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// Get the underlying UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CustomerId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for CustomerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
