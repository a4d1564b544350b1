//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::types::*;

/// Storage abstraction for customer records
///
/// Implementations own the cpf -> customer mapping and are responsible for
/// its concurrency discipline: inserts must be atomic with the uniqueness
/// check, and [`CustomerStore::update_customer`] must run its closure while
/// holding exclusive access to that one customer.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert a new customer, failing if its cpf is already registered
    async fn insert_customer(&self, customer: Customer) -> LedgerResult<Customer>;

    /// Snapshot of an active customer by cpf
    async fn get_customer(&self, cpf: &str) -> LedgerResult<Option<Customer>>;

    /// Snapshot of all active customers
    async fn list_customers(&self) -> LedgerResult<Vec<Customer>>;

    /// Run `mutate` with exclusive access to one customer.
    ///
    /// The closure must leave the customer untouched when it returns an error.
    async fn update_customer<F, T>(&self, cpf: &str, mutate: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut Customer) -> LedgerResult<T> + Send,
        T: Send;

    /// Remove a customer and mark the record deleted
    async fn remove_customer(&self, cpf: &str, now: DateTime<Utc>) -> LedgerResult<Customer>;

    /// Number of registered customers
    async fn customer_count(&self) -> LedgerResult<usize>;
}

/// Trait for implementing custom customer validation rules
pub trait CustomerValidator: Send + Sync {
    /// Validate a customer before it is registered
    fn validate_customer(&self, customer: &Customer) -> LedgerResult<()>;

    /// Validate a new display name
    fn validate_name(&self, name: &str) -> LedgerResult<()>;
}

/// Default validator: cpf and name must not be blank
pub struct DefaultCustomerValidator;

impl CustomerValidator for DefaultCustomerValidator {
    fn validate_customer(&self, customer: &Customer) -> LedgerResult<()> {
        if customer.cpf.trim().is_empty() {
            return Err(LedgerError::Validation("CPF cannot be empty".to_string()));
        }

        self.validate_name(&customer.name)
    }

    fn validate_name(&self, name: &str) -> LedgerResult<()> {
        if name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Customer name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Source of timestamps for ledger entries
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays
///
/// Clones share the same reading, so a test can keep one handle and move the
/// time while the engine holds another.
#[derive(Debug, Clone)]
pub struct FixedClock {
    millis: Arc<AtomicI64>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(at.timestamp_millis())),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.millis.load(Ordering::SeqCst))
            .single()
            .unwrap_or_default()
    }
}
