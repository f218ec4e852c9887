//! Customer service: orchestrates validation, uniqueness, the store
//! adapter, and response shaping.
//!
//! Every public operation resolves to the uniform [`ServiceResponse`]
//! envelope; the private `*_inner` methods carry the actual `Result` flow
//! and the public wrappers are the shaping boundary. Operations invoked
//! before [`CustomerService::initialize`] (or after
//! [`CustomerService::close`]) fail fast with a connection error instead of
//! attempting I/O.

use chrono::Utc;

use customer_registry_core::{CustomerId, CustomerStatus};

use crate::config::RegistryConfig;
use crate::envelope::{Pagination, ServiceResponse};
use crate::error::{FieldError, ServiceError};
use crate::model::{CustomerDraft, CustomerView};
use crate::stats::CustomerStats;
use crate::store::{ConnectOptions, RecordFilter, RecordStore, SortKey, SortOrder, SortSpec};
use crate::validate;

/// Query options for list-shaped operations.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub limit: u64,
    /// Exact status filter.
    pub status: Option<CustomerStatus>,
    /// Case-insensitive substring match on first name, last name, or email.
    pub search: Option<String>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
            search: None,
            sort_by: SortKey::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

/// The customer record-management service.
///
/// Holds the store connection handle explicitly; there is no process-wide
/// singleton. Construct one per store, call
/// [`initialize`](Self::initialize), and share it freely - operations take
/// `&self` and may run concurrently.
pub struct CustomerService<S> {
    store: S,
    debug: bool,
}

impl<S: RecordStore> CustomerService<S> {
    /// Create a service over a store, with debug output disabled.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            debug: false,
        }
    }

    /// Create a service configured from a [`RegistryConfig`].
    pub const fn with_config(store: S, config: &RegistryConfig) -> Self {
        Self {
            store,
            debug: config.debug,
        }
    }

    /// Establish the store connection. Must be called before any operation.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Connection`] if the store cannot connect.
    pub async fn initialize(
        &self,
        uri: &str,
        options: ConnectOptions,
    ) -> Result<(), ServiceError> {
        self.store.connect(uri, options).await.map_err(|e| {
            ServiceError::Connection(format!("Failed to initialize customer registry: {e}"))
        })?;
        tracing::info!("customer registry initialized");
        Ok(())
    }

    /// Tear the store connection down. Operations after this fail fast.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Connection`] if the store cannot disconnect.
    pub async fn close(&self) -> Result<(), ServiceError> {
        self.store.disconnect().await.map_err(|e| {
            ServiceError::Connection(format!("Failed to close customer registry: {e}"))
        })?;
        tracing::info!("customer registry closed");
        Ok(())
    }

    /// Whether the store connection is currently usable.
    pub fn is_connected(&self) -> bool {
        self.store.is_active()
    }

    fn ensure_connected(&self) -> Result<(), ServiceError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(ServiceError::Connection(
                "Customer registry not initialized. Call initialize() first.".to_owned(),
            ))
        }
    }

    /// Create a new customer from a candidate draft.
    pub async fn create(&self, draft: &CustomerDraft) -> ServiceResponse<CustomerView> {
        match self.create_inner(draft).await {
            Ok(view) => {
                ServiceResponse::ok_with_message(view, "Customer created successfully")
            }
            Err(err) => ServiceResponse::failure(&err, self.debug),
        }
    }

    async fn create_inner(&self, draft: &CustomerDraft) -> Result<CustomerView, ServiceError> {
        self.ensure_connected()?;
        let new = validate::validate_create(draft, Utc::now().date_naive())
            .map_err(ServiceError::Validation)?;

        // Pre-check is an optimization; the store's unique index is the
        // race-safe arbiter and insert may still report a violation.
        let duplicate = self
            .store
            .find_one(&RecordFilter::by_email(new.email.as_str()))
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::AlreadyExists(format!(
                "Customer with email {} already exists",
                new.email
            )));
        }

        let record = self.store.insert(new).await?;
        tracing::debug!(id = %record.id, "customer created");
        Ok(CustomerView::from(record))
    }

    /// Fetch a customer by its identifier.
    pub async fn get_by_id(&self, id: &str) -> ServiceResponse<CustomerView> {
        match self.get_by_id_inner(id).await {
            Ok(view) => ServiceResponse::ok(view),
            Err(err) => ServiceResponse::failure(&err, self.debug),
        }
    }

    async fn get_by_id_inner(&self, id: &str) -> Result<CustomerView, ServiceError> {
        self.ensure_connected()?;
        if !CustomerId::is_well_formed(id) {
            return Err(ServiceError::invalid_id());
        }
        let record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer with ID {id} not found")))?;
        Ok(CustomerView::from(record))
    }

    /// Fetch a customer by email, case-insensitively.
    pub async fn get_by_email(&self, email: &str) -> ServiceResponse<CustomerView> {
        match self.get_by_email_inner(email).await {
            Ok(view) => ServiceResponse::ok(view),
            Err(err) => ServiceResponse::failure(&err, self.debug),
        }
    }

    async fn get_by_email_inner(&self, email: &str) -> Result<CustomerView, ServiceError> {
        self.ensure_connected()?;
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Validation(vec![FieldError::new(
                "email",
                "Valid email is required",
            )]));
        }
        let normalized = trimmed.to_lowercase();
        let record = self
            .store
            .find_one(&RecordFilter::by_email(&normalized))
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer with email {trimmed} not found"))
            })?;
        Ok(CustomerView::from(record))
    }

    /// List customers with filtering, sorting, and pagination.
    pub async fn list(&self, options: &ListOptions) -> ServiceResponse<Vec<CustomerView>> {
        match self.list_inner(options).await {
            Ok((views, pagination)) => {
                let message = format!("Retrieved {} customers", views.len());
                ServiceResponse::ok_paginated(views, pagination, message)
            }
            Err(err) => ServiceResponse::failure(&err, self.debug),
        }
    }

    async fn list_inner(
        &self,
        options: &ListOptions,
    ) -> Result<(Vec<CustomerView>, Pagination), ServiceError> {
        self.ensure_connected()?;
        let page = options.page.max(1);
        let limit = options.limit.max(1);
        let filter = RecordFilter {
            status: options.status,
            search: options.search.clone(),
            ..RecordFilter::default()
        };
        let sort = SortSpec {
            key: options.sort_by,
            order: options.sort_order,
        };

        let records = self
            .store
            .find(&filter, sort, (page - 1) * limit, limit)
            .await?;
        let total = self.store.count(&filter).await?;

        let views = records.into_iter().map(CustomerView::from).collect();
        Ok((views, Pagination::new(page, limit, total)))
    }

    /// Apply a partial update to a customer.
    pub async fn update(&self, id: &str, draft: &CustomerDraft) -> ServiceResponse<CustomerView> {
        match self.update_inner(id, draft).await {
            Ok(view) => {
                ServiceResponse::ok_with_message(view, "Customer updated successfully")
            }
            Err(err) => ServiceResponse::failure(&err, self.debug),
        }
    }

    async fn update_inner(
        &self,
        id: &str,
        draft: &CustomerDraft,
    ) -> Result<CustomerView, ServiceError> {
        self.ensure_connected()?;
        let Ok(own_id) = CustomerId::parse(id) else {
            return Err(ServiceError::invalid_id());
        };
        let patch = validate::validate_update(draft, Utc::now().date_naive())
            .map_err(ServiceError::Validation)?;

        if let Some(new_email) = &patch.email {
            let duplicate = self
                .store
                .find_one(&RecordFilter::by_email(new_email.as_str()).excluding(own_id))
                .await?;
            if duplicate.is_some() {
                return Err(ServiceError::AlreadyExists(format!(
                    "Customer with email {new_email} already exists"
                )));
            }
        }

        let record = self
            .store
            .update_by_id(id, patch)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer with ID {id} not found")))?;
        tracing::debug!(id = %record.id, "customer updated");
        Ok(CustomerView::from(record))
    }

    /// Delete a customer, returning the pre-deletion snapshot.
    pub async fn delete(&self, id: &str) -> ServiceResponse<CustomerView> {
        match self.delete_inner(id).await {
            Ok(view) => {
                ServiceResponse::ok_with_message(view, "Customer deleted successfully")
            }
            Err(err) => ServiceResponse::failure(&err, self.debug),
        }
    }

    async fn delete_inner(&self, id: &str) -> Result<CustomerView, ServiceError> {
        self.ensure_connected()?;
        if !CustomerId::is_well_formed(id) {
            return Err(ServiceError::invalid_id());
        }
        let record = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer with ID {id} not found")))?;
        tracing::debug!(id = %record.id, "customer deleted");
        Ok(CustomerView::from(record))
    }

    /// List customers with the given status (as a raw string).
    pub async fn list_by_status(
        &self,
        status: &str,
        options: &ListOptions,
    ) -> ServiceResponse<Vec<CustomerView>> {
        let Ok(status) = status.parse::<CustomerStatus>() else {
            let err = ServiceError::Validation(vec![FieldError::new(
                "status",
                "Invalid status. Must be one of: active, inactive, suspended",
            )]);
            return ServiceResponse::failure(&err, self.debug);
        };
        let merged = ListOptions {
            status: Some(status),
            ..options.clone()
        };
        match self.list_inner(&merged).await {
            Ok((views, pagination)) => {
                let message = format!("Retrieved {} {status} customers", views.len());
                ServiceResponse::ok_paginated(views, pagination, message)
            }
            Err(err) => ServiceResponse::failure(&err, self.debug),
        }
    }

    /// Search customers by name or email.
    pub async fn search(
        &self,
        term: &str,
        options: &ListOptions,
    ) -> ServiceResponse<Vec<CustomerView>> {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            let err = ServiceError::Validation(vec![FieldError::new(
                "search",
                "Search term is required",
            )]);
            return ServiceResponse::failure(&err, self.debug);
        }
        let merged = ListOptions {
            search: Some(trimmed.to_owned()),
            ..options.clone()
        };
        self.list(&merged).await
    }

    /// Aggregate counts and status distribution.
    pub async fn stats(&self) -> ServiceResponse<CustomerStats> {
        match self.stats_inner().await {
            Ok(stats) => ServiceResponse::ok(stats),
            Err(err) => ServiceResponse::failure(&err, self.debug),
        }
    }

    async fn stats_inner(&self) -> Result<CustomerStats, ServiceError> {
        self.ensure_connected()?;
        let total = self.store.count(&RecordFilter::default()).await?;
        let mut by_status = [0_u64; 3];
        for (slot, status) in by_status.iter_mut().zip(CustomerStatus::ALL) {
            let filter = RecordFilter {
                status: Some(status),
                ..RecordFilter::default()
            };
            *slot = self.store.count(&filter).await?;
        }
        let [active, inactive, suspended] = by_status;
        Ok(CustomerStats::from_counts(total, active, inactive, suspended))
    }
}
