//! Customer Registry Service - record management over a document store.
//!
//! This crate implements validated creation, retrieval, update, deletion,
//! search, and aggregate statistics for customer records. All persistence
//! goes through the [`store::RecordStore`] adapter contract; the bundled
//! [`store::memory::MemoryStore`] implements it in-process.
//!
//! # Usage
//!
//! ```
//! use customer_registry_service::{
//!     CustomerDraft, CustomerService, store::ConnectOptions, store::memory::MemoryStore,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = CustomerService::new(MemoryStore::new());
//! service
//!     .initialize("memory://example", ConnectOptions::default())
//!     .await
//!     .expect("connect");
//!
//! let draft = CustomerDraft {
//!     first_name: Some("John".to_owned()),
//!     last_name: Some("Doe".to_owned()),
//!     email: Some("john@test.com".to_owned()),
//!     phone: Some("+1234567890".to_owned()),
//!     ..CustomerDraft::default()
//! };
//! let created = service.create(&draft).await;
//! assert!(created.is_success());
//! # }
//! ```
//!
//! # Modules
//!
//! - [`model`] - Record, draft, patch, and view shapes
//! - [`validate`] - Create-mode and update-mode validation
//! - [`error`] - The closed service error taxonomy
//! - [`envelope`] - The uniform success/failure envelope
//! - [`store`] - The record store adapter contract and memory engine
//! - [`service`] - The customer service itself
//! - [`stats`] - Aggregate statistics
//! - [`config`] - Environment-driven configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod envelope;
pub mod error;
pub mod model;
pub mod service;
pub mod stats;
pub mod store;
pub mod validate;

pub use config::RegistryConfig;
pub use envelope::{ErrorBody, Pagination, ServiceResponse};
pub use error::{FieldError, ServiceError};
pub use model::{Address, CustomerDraft, CustomerPatch, CustomerRecord, CustomerView, NewCustomer, SocialMedia};
pub use service::{CustomerService, ListOptions};
pub use stats::{CustomerStats, StatusBreakdown};
