//! Deposit and withdrawal processing

use bigdecimal::BigDecimal;
use std::sync::Arc;

use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_amount;

/// Applies movements to one customer's ledger at a time
///
/// Each call runs its balance check and append inside the storage's
/// per-customer critical section, so concurrent withdrawals can never overdraw.
pub struct TransactionProcessor<S: CustomerStore> {
    storage: S,
    clock: Arc<dyn Clock>,
    reject_zero_amounts: bool,
}

impl<S: CustomerStore> TransactionProcessor<S> {
    /// Create a new transaction processor
    pub fn new(storage: S) -> Self {
        Self::with_parts(storage, Arc::new(SystemClock), false)
    }

    /// Create a new transaction processor with a custom clock and amount policy
    pub fn with_parts(storage: S, clock: Arc<dyn Clock>, reject_zero_amounts: bool) -> Self {
        Self {
            storage,
            clock,
            reject_zero_amounts,
        }
    }

    /// Credit a customer's ledger
    pub async fn deposit(
        &self,
        cpf: &str,
        description: String,
        amount: BigDecimal,
    ) -> LedgerResult<Customer> {
        let clock = Arc::clone(&self.clock);
        let reject_zero = self.reject_zero_amounts;
        self.storage
            .update_customer(cpf, move |customer| {
                // Runs only once the account is known to exist
                validate_amount(&amount, reject_zero)?;

                let now = clock.now();
                customer.ledger.credit(Some(description), amount, now);
                customer.touch(now);
                Ok(customer.clone())
            })
            .await
    }

    /// Debit a customer's ledger if the balance covers the amount
    pub async fn withdraw(&self, cpf: &str, amount: BigDecimal) -> LedgerResult<Customer> {
        let clock = Arc::clone(&self.clock);
        let reject_zero = self.reject_zero_amounts;
        self.storage
            .update_customer(cpf, move |customer| {
                validate_amount(&amount, reject_zero)?;

                let now = clock.now();
                customer.ledger.debit(amount, now)?;
                customer.touch(now);
                Ok(customer.clone())
            })
            .await
    }

    /// Current balance of a customer
    pub async fn balance(&self, cpf: &str) -> LedgerResult<BigDecimal> {
        self.storage
            .get_customer(cpf)
            .await?
            .map(|customer| customer.balance().clone())
            .ok_or_else(|| LedgerError::AccountNotFound(cpf.to_string()))
    }
}
