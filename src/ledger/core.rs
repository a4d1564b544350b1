//! Bank facade that wires the registry, processor and statement queries together

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::LedgerConfig;
use crate::ledger::{CustomerRegistry, StatementQuery, TransactionProcessor};
use crate::traits::*;
use crate::types::*;

/// Main entry point: every operation of the ledger engine over one storage backend
pub struct Bank<S: CustomerStore> {
    registry: CustomerRegistry<S>,
    processor: TransactionProcessor<S>,
    statements: StatementQuery<S>,
}

impl<S: CustomerStore + Clone> Bank<S> {
    /// Create a new bank with default configuration and the system clock
    pub fn new(storage: S) -> Self {
        Self {
            registry: CustomerRegistry::new(storage.clone()),
            processor: TransactionProcessor::new(storage.clone()),
            statements: StatementQuery::new(storage),
        }
    }

    /// Start building a bank with custom configuration, clock or validator
    pub fn builder(storage: S) -> BankBuilder<S> {
        BankBuilder::new(storage)
    }

    pub fn registry(&self) -> &CustomerRegistry<S> {
        &self.registry
    }

    pub fn processor(&self) -> &TransactionProcessor<S> {
        &self.processor
    }

    pub fn statements(&self) -> &StatementQuery<S> {
        &self.statements
    }

    // Account operations
    /// Open an account
    pub async fn create_account(&self, cpf: String, name: String) -> LedgerResult<Customer> {
        self.registry.create_customer(cpf, name).await
    }

    /// Get an account by CPF
    pub async fn get_account(&self, cpf: &str) -> LedgerResult<Option<Customer>> {
        self.registry.find_by_cpf(cpf).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Customer>> {
        self.registry.list_customers().await
    }

    /// Rename an account holder
    pub async fn rename_account(&self, cpf: &str, name: String) -> LedgerResult<Customer> {
        self.registry.rename_customer(cpf, name).await
    }

    /// Close an account, returning the accounts that remain
    pub async fn delete_account(&self, cpf: &str) -> LedgerResult<Vec<Customer>> {
        self.registry.delete_customer(cpf).await?;
        self.registry.list_customers().await
    }

    // Movements
    pub async fn deposit(
        &self,
        cpf: &str,
        description: String,
        amount: BigDecimal,
    ) -> LedgerResult<Customer> {
        self.processor.deposit(cpf, description, amount).await
    }

    pub async fn withdraw(&self, cpf: &str, amount: BigDecimal) -> LedgerResult<Customer> {
        self.processor.withdraw(cpf, amount).await
    }

    pub async fn balance(&self, cpf: &str) -> LedgerResult<BigDecimal> {
        self.processor.balance(cpf).await
    }

    // Statements
    pub async fn statement(&self, cpf: &str) -> LedgerResult<Vec<Transaction>> {
        self.statements.full_statement(cpf).await
    }

    pub async fn statement_on_date(&self, cpf: &str, date: &str) -> LedgerResult<Vec<Transaction>> {
        self.statements.statement_on_date(cpf, date).await
    }

    pub async fn statement_for_day(
        &self,
        cpf: &str,
        day: NaiveDate,
    ) -> LedgerResult<Vec<Transaction>> {
        self.statements.statement_for_day(cpf, day).await
    }

    pub async fn statement_between(
        &self,
        cpf: &str,
        start: &str,
        end: &str,
    ) -> LedgerResult<Vec<Transaction>> {
        self.statements.statement_between(cpf, start, end).await
    }

    /// Check an account's ledger against its invariants
    pub async fn verify_integrity(&self, cpf: &str) -> LedgerResult<LedgerIntegrityReport> {
        let customer = self.registry.get_customer_required(cpf).await?;
        Ok(LedgerIntegrityReport::inspect(&customer))
    }
}

/// Builder for a [`Bank`] with non-default parts
pub struct BankBuilder<S: CustomerStore> {
    storage: S,
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
    validator: Box<dyn CustomerValidator>,
}

impl<S: CustomerStore + Clone> BankBuilder<S> {
    /// Create a new builder with defaults
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: LedgerConfig::default(),
            clock: Arc::new(SystemClock),
            validator: Box::new(DefaultCustomerValidator),
        }
    }

    pub fn config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn validator(mut self, validator: Box<dyn CustomerValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Build the bank, validating the configuration
    pub fn build(self) -> LedgerResult<Bank<S>> {
        let offset = self.config.reference_offset()?;

        Ok(Bank {
            registry: CustomerRegistry::with_parts(
                self.storage.clone(),
                self.validator,
                Arc::clone(&self.clock),
            ),
            processor: TransactionProcessor::with_parts(
                self.storage.clone(),
                self.clock,
                self.config.reject_zero_amounts,
            ),
            statements: StatementQuery::with_offset(self.storage, offset),
        })
    }
}
