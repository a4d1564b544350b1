//! In-memory storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::traits::*;
use crate::types::*;

type CustomerCell = Arc<Mutex<Customer>>;

/// In-memory customer store
///
/// The cpf map sits behind a read/write lock and every customer behind its own
/// mutex, so mutations on different customers proceed in parallel while those
/// on the same customer are serialized. Locks are always taken map first,
/// customer second.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    customers: Arc<RwLock<HashMap<String, CustomerCell>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub async fn clear(&self) {
        self.customers.write().await.clear();
    }

    async fn cell(&self, cpf: &str) -> Option<CustomerCell> {
        self.customers.read().await.get(cpf).cloned()
    }
}

#[async_trait]
impl CustomerStore for MemoryStorage {
    async fn insert_customer(&self, customer: Customer) -> LedgerResult<Customer> {
        let mut customers = self.customers.write().await;
        if customers.contains_key(&customer.cpf) {
            return Err(LedgerError::DuplicateAccount(customer.cpf));
        }

        customers.insert(
            customer.cpf.clone(),
            Arc::new(Mutex::new(customer.clone())),
        );
        Ok(customer)
    }

    async fn get_customer(&self, cpf: &str) -> LedgerResult<Option<Customer>> {
        let Some(cell) = self.cell(cpf).await else {
            return Ok(None);
        };

        let customer = cell.lock().await;
        Ok(customer.is_active().then(|| customer.clone()))
    }

    async fn list_customers(&self) -> LedgerResult<Vec<Customer>> {
        let customers = self.customers.read().await;
        let mut snapshot = Vec::with_capacity(customers.len());
        for cell in customers.values() {
            let customer = cell.lock().await;
            if customer.is_active() {
                snapshot.push(customer.clone());
            }
        }
        drop(customers);

        snapshot.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.cpf.cmp(&b.cpf))
        });
        Ok(snapshot)
    }

    async fn update_customer<F, T>(&self, cpf: &str, mutate: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut Customer) -> LedgerResult<T> + Send,
        T: Send,
    {
        let cell = self
            .cell(cpf)
            .await
            .ok_or_else(|| LedgerError::AccountNotFound(cpf.to_string()))?;

        let mut customer = cell.lock().await;
        // Removed from the map while we waited for the lock
        if !customer.is_active() {
            return Err(LedgerError::AccountNotFound(cpf.to_string()));
        }
        mutate(&mut *customer)
    }

    async fn remove_customer(&self, cpf: &str, now: DateTime<Utc>) -> LedgerResult<Customer> {
        let cell = self
            .customers
            .write()
            .await
            .remove(cpf)
            .ok_or_else(|| LedgerError::AccountNotFound(cpf.to_string()))?;

        let mut customer = cell.lock().await;
        customer.mark_deleted(now);
        Ok(customer.clone())
    }

    async fn customer_count(&self) -> LedgerResult<usize> {
        Ok(self.customers.read().await.len())
    }
}
