//! Customer Registry Core - Shared types library.
//!
//! This crate provides the typed domain primitives used across all Customer
//! Registry components:
//! - `service` - The record-management service layer
//! - `integration-tests` - End-to-end tests over the service
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no store access, no async.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identifiers, emails, phone numbers, and
//!   the customer status enum

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
