//! In-process implementation of the record store contract.
//!
//! `MemoryStore` behaves like a single-node document store: it assigns
//! identifiers and timestamps, keeps a unique index on the normalized email,
//! and applies every mutation under one lock so each document operation is
//! atomic. Two concurrent inserts with the same email therefore resolve to
//! exactly one success and one unique-index violation, regardless of what
//! the service pre-checked.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use customer_registry_core::CustomerId;

use super::{ConnectOptions, RecordFilter, RecordStore, SortSpec, StoreError};
use crate::model::{CustomerPatch, CustomerRecord, NewCustomer};

#[derive(Debug, Default)]
struct Inner {
    connected: bool,
    uri: Option<String>,
    options: Option<ConnectOptions>,
    records: BTreeMap<CustomerId, CustomerRecord>,
    /// Unique index: normalized email -> record id.
    email_index: BTreeMap<String, CustomerId>,
}

/// An in-memory document store for customer records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn ensure_connected(&self) -> Result<(), StoreError> {
        if self.connected {
            Ok(())
        } else {
            Err(StoreError::NotConnected)
        }
    }
}

fn parse_id(id: &str) -> Result<CustomerId, StoreError> {
    CustomerId::parse(id).map_err(|_| StoreError::MalformedId(id.to_owned()))
}

impl RecordStore for MemoryStore {
    async fn connect(&self, uri: &str, options: ConnectOptions) -> Result<(), StoreError> {
        let mut inner = self.write();
        if inner.connected {
            tracing::debug!(uri, "memory store already connected");
            return Ok(());
        }
        inner.connected = true;
        inner.uri = Some(uri.to_owned());
        inner.options = Some(options);
        tracing::info!(uri, "memory store connected");
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), StoreError> {
        let mut inner = self.write();
        if inner.connected {
            inner.connected = false;
            tracing::info!("memory store disconnected");
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.read().connected
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CustomerRecord>, StoreError> {
        let inner = self.read();
        inner.ensure_connected()?;
        let id = parse_id(id)?;
        Ok(inner.records.get(&id).cloned())
    }

    async fn find_one(&self, filter: &RecordFilter) -> Result<Option<CustomerRecord>, StoreError> {
        let inner = self.read();
        inner.ensure_connected()?;
        Ok(inner
            .records
            .values()
            .find(|r| filter.matches(r))
            .cloned())
    }

    async fn find(
        &self,
        filter: &RecordFilter,
        sort: SortSpec,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<CustomerRecord>, StoreError> {
        let inner = self.read();
        inner.ensure_connected()?;
        let mut matched: Vec<&CustomerRecord> =
            inner.records.values().filter(|r| filter.matches(r)).collect();
        matched.sort_by(|a, b| sort.compare(a, b));
        Ok(matched
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &RecordFilter) -> Result<u64, StoreError> {
        let inner = self.read();
        inner.ensure_connected()?;
        let n = inner.records.values().filter(|r| filter.matches(r)).count();
        Ok(n as u64)
    }

    async fn insert(&self, new: NewCustomer) -> Result<CustomerRecord, StoreError> {
        let mut inner = self.write();
        inner.ensure_connected()?;

        let email_key = new.email.as_str().to_owned();
        if let Some(existing_id) = inner.email_index.get(&email_key) {
            if !inner.records.contains_key(existing_id) {
                return Err(StoreError::Corrupted(format!(
                    "email index references missing record {existing_id}"
                )));
            }
            return Err(StoreError::UniqueViolation { field: "email" });
        }

        let mut id = CustomerId::generate();
        while inner.records.contains_key(&id) {
            id = CustomerId::generate();
        }

        let record = new.into_record(id, Utc::now());
        inner.email_index.insert(email_key, id);
        inner.records.insert(id, record.clone());
        Ok(record)
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: CustomerPatch,
    ) -> Result<Option<CustomerRecord>, StoreError> {
        let mut inner = self.write();
        inner.ensure_connected()?;
        let id = parse_id(id)?;

        if let Some(new_email) = &patch.email
            && let Some(other) = inner.email_index.get(new_email.as_str())
            && *other != id
        {
            return Err(StoreError::UniqueViolation { field: "email" });
        }

        let Some(record) = inner.records.get(&id).cloned() else {
            return Ok(None);
        };

        let old_email = record.email.as_str().to_owned();
        let mut updated = record;
        updated.apply(patch);
        updated.updated_at = Utc::now().max(updated.created_at);

        if updated.email.as_str() != old_email {
            inner.email_index.remove(&old_email);
            inner
                .email_index
                .insert(updated.email.as_str().to_owned(), id);
        }
        inner.records.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<CustomerRecord>, StoreError> {
        let mut inner = self.write();
        inner.ensure_connected()?;
        let id = parse_id(id)?;

        let Some(record) = inner.records.remove(&id) else {
            return Ok(None);
        };
        inner.email_index.remove(record.email.as_str());
        Ok(Some(record))
    }
}
