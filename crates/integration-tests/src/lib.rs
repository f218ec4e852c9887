//! Integration tests for Customer Registry.
//!
//! The tests exercise the full service stack - validation, uniqueness,
//! store adapter, envelope shaping - over the in-process memory store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p customer-registry-integration-tests
//! ```

use std::sync::Once;

use secrecy::ExposeSecret;

use customer_registry_service::store::ConnectOptions;
use customer_registry_service::store::memory::MemoryStore;
use customer_registry_service::{CustomerDraft, CustomerService, RegistryConfig};

static TRACING: Once = Once::new();

/// Initialize tracing once for the whole test binary. Honors `RUST_LOG`
/// and a local `.env`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = dotenvy::dotenv();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A connected service over a fresh memory store.
///
/// # Panics
///
/// Panics if the memory store refuses the connection, which indicates a
/// broken test environment.
pub async fn connected_service() -> CustomerService<MemoryStore> {
    init_tracing();
    let config = RegistryConfig::from_env().unwrap_or_default();
    let service = CustomerService::with_config(MemoryStore::new(), &config);
    service
        .initialize(config.store_uri.expose_secret(), ConnectOptions::default())
        .await
        .expect("memory store should always connect");
    service
}

/// A minimal valid create draft.
#[must_use]
pub fn draft(first: &str, last: &str, email: &str) -> CustomerDraft {
    CustomerDraft {
        first_name: Some(first.to_owned()),
        last_name: Some(last.to_owned()),
        email: Some(email.to_owned()),
        phone: Some("+1234567890".to_owned()),
        ..CustomerDraft::default()
    }
}
