//! Customer registration and lookup

use std::sync::Arc;

use crate::traits::*;
use crate::types::*;

/// Registry of customers keyed by CPF
///
/// The only component that creates or removes customer records.
pub struct CustomerRegistry<S: CustomerStore> {
    pub(crate) storage: S,
    validator: Box<dyn CustomerValidator>,
    clock: Arc<dyn Clock>,
}

impl<S: CustomerStore> CustomerRegistry<S> {
    /// Create a new registry
    pub fn new(storage: S) -> Self {
        Self::with_parts(storage, Box::new(DefaultCustomerValidator), Arc::new(SystemClock))
    }

    /// Create a new registry with a custom validator and clock
    pub fn with_parts(
        storage: S,
        validator: Box<dyn CustomerValidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            validator,
            clock,
        }
    }

    /// Register a new customer with an empty ledger
    pub async fn create_customer(&self, cpf: String, name: String) -> LedgerResult<Customer> {
        let customer = Customer::new(cpf, name, self.clock.now());
        self.validator.validate_customer(&customer)?;

        self.storage.insert_customer(customer).await
    }

    /// Look up a customer by CPF
    pub async fn find_by_cpf(&self, cpf: &str) -> LedgerResult<Option<Customer>> {
        self.storage.get_customer(cpf).await
    }

    /// Look up a customer by CPF, returning an error if not found
    pub async fn get_customer_required(&self, cpf: &str) -> LedgerResult<Customer> {
        self.storage
            .get_customer(cpf)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(cpf.to_string()))
    }

    /// Change a customer's display name
    pub async fn rename_customer(&self, cpf: &str, name: String) -> LedgerResult<Customer> {
        self.validator.validate_name(&name)?;

        let clock = Arc::clone(&self.clock);
        self.storage
            .update_customer(cpf, move |customer| {
                customer.rename(name, clock.now());
                Ok(customer.clone())
            })
            .await
    }

    /// Remove a customer; the CPF becomes free for a new registration
    pub async fn delete_customer(&self, cpf: &str) -> LedgerResult<()> {
        self.storage
            .remove_customer(cpf, self.clock.now())
            .await
            .map(|_| ())
    }

    /// Snapshot of all customers, oldest first
    pub async fn list_customers(&self) -> LedgerResult<Vec<Customer>> {
        self.storage.list_customers().await
    }

    pub async fn len(&self) -> LedgerResult<usize> {
        self.storage.customer_count().await
    }

    pub async fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len().await? == 0)
    }
}
