//! Record store adapter contract.
//!
//! The service talks to persistence only through [`RecordStore`]: an opaque
//! document store reachable by identifier and by field query. The store is
//! the sole arbiter of email uniqueness (via its unique index) and performs
//! every mutation as an atomic single-document operation; the service never
//! needs locking or multi-record transactions.
//!
//! [`memory::MemoryStore`] is the in-process implementation of this
//! contract.

use std::cmp::Ordering;
use std::time::Duration;

use customer_registry_core::{CustomerId, CustomerStatus};

use crate::model::{CustomerPatch, CustomerRecord, NewCustomer};

pub mod memory;

/// Errors surfaced by a record store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The store has not been connected, or has been closed.
    #[error("store is not connected")]
    NotConnected,

    /// A write violated a unique index.
    #[error("unique index violation on {field}")]
    UniqueViolation {
        /// Name of the indexed field.
        field: &'static str,
    },

    /// The given identifier is not structurally valid for this store.
    #[error("malformed identifier: {0}")]
    MalformedId(String),

    /// The storage engine itself failed (I/O, transport, timeout).
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// The store's internal invariants are broken.
    #[error("data corruption: {0}")]
    Corrupted(String),
}

/// Connection tuning accepted by [`RecordStore::connect`].
///
/// Engines that pool or dial a server honor these; the in-memory engine
/// records them and otherwise ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    pub max_pool_size: u32,
    pub server_selection_timeout: Duration,
    pub socket_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            max_pool_size: 10,
            server_selection_timeout: Duration::from_secs(5),
            socket_timeout: Duration::from_secs(45),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// A field-level query over customer records. All present clauses must
/// match (logical AND).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Exact match on the normalized (lowercase) email.
    pub email: Option<String>,
    /// Exact match on status.
    pub status: Option<CustomerStatus>,
    /// Case-insensitive substring match against first name, last name, or
    /// email.
    pub search: Option<String>,
    /// Exclude the record with this id (used for uniqueness re-checks).
    pub exclude_id: Option<CustomerId>,
}

impl RecordFilter {
    /// Filter on the normalized email only.
    #[must_use]
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Exclude a record id from the matches.
    #[must_use]
    pub fn excluding(mut self, id: CustomerId) -> Self {
        self.exclude_id = Some(id);
        self
    }

    /// Whether `record` satisfies every clause of this filter.
    #[must_use]
    pub fn matches(&self, record: &CustomerRecord) -> bool {
        if self.exclude_id.is_some_and(|id| id == record.id) {
            return false;
        }
        if let Some(email) = &self.email
            && record.email.as_str() != email
        {
            return false;
        }
        if let Some(status) = self.status
            && record.status != status
        {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = record.first_name.to_lowercase().contains(&needle)
                || record.last_name.to_lowercase().contains(&needle)
                || record.email.as_str().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Sortable record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    FirstName,
    LastName,
    Email,
    Status,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            "firstName" => Ok(Self::FirstName),
            "lastName" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "status" => Ok(Self::Status),
            _ => Err(format!("unsortable field: {s}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// A complete sort specification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    /// Ordering of two records under this specification. Ties fall back to
    /// the record id so sorting is total and pagination stable.
    #[must_use]
    pub fn compare(&self, a: &CustomerRecord, b: &CustomerRecord) -> Ordering {
        let forward = match self.key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortKey::FirstName => a.first_name.cmp(&b.first_name),
            SortKey::LastName => a.last_name.cmp(&b.last_name),
            SortKey::Email => a.email.as_str().cmp(b.email.as_str()),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        };
        let ordered = match self.order {
            SortOrder::Asc => forward,
            SortOrder::Desc => forward.reverse(),
        };
        ordered.then_with(|| a.id.cmp(&b.id))
    }
}

/// The persistent document store holding customer records.
///
/// Identifier-addressed methods take the raw identifier string and fail
/// with [`StoreError::MalformedId`] when it is not structurally valid.
/// `insert` assigns the id and both timestamps; `update_by_id` applies the
/// patch and stamps `updatedAt` within the same atomic operation.
#[allow(async_fn_in_trait)]
pub trait RecordStore: Send + Sync {
    /// Establish the store connection. Connecting an already-connected
    /// store is a no-op.
    async fn connect(&self, uri: &str, options: ConnectOptions) -> Result<(), StoreError>;

    /// Tear the connection down. Safe to call when already disconnected.
    async fn disconnect(&self) -> Result<(), StoreError>;

    /// Whether the connection is currently usable.
    fn is_active(&self) -> bool;

    async fn find_by_id(&self, id: &str) -> Result<Option<CustomerRecord>, StoreError>;

    async fn find_one(&self, filter: &RecordFilter) -> Result<Option<CustomerRecord>, StoreError>;

    async fn find(
        &self,
        filter: &RecordFilter,
        sort: SortSpec,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<CustomerRecord>, StoreError>;

    async fn count(&self, filter: &RecordFilter) -> Result<u64, StoreError>;

    async fn insert(&self, new: NewCustomer) -> Result<CustomerRecord, StoreError>;

    async fn update_by_id(
        &self,
        id: &str,
        patch: CustomerPatch,
    ) -> Result<Option<CustomerRecord>, StoreError>;

    async fn delete_by_id(&self, id: &str) -> Result<Option<CustomerRecord>, StoreError>;
}
