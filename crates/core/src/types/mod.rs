//! Core types for Customer Registry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod phone;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{CustomerId, IdError};
pub use phone::{Phone, PhoneError};
pub use status::CustomerStatus;
