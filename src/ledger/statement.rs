//! Read-only statement queries

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use crate::config::parse_date;
use crate::traits::*;
use crate::types::*;

/// Filters a customer's statement by calendar day
///
/// Days are computed in a single reference timezone fixed at construction.
pub struct StatementQuery<S: CustomerStore> {
    storage: S,
    offset: FixedOffset,
}

impl<S: CustomerStore> StatementQuery<S> {
    /// Create a query over UTC calendar days
    pub fn new(storage: S) -> Self {
        Self::with_offset(storage, Utc.fix())
    }

    /// Create a query over calendar days in the given timezone
    pub fn with_offset(storage: S, offset: FixedOffset) -> Self {
        Self { storage, offset }
    }

    pub fn reference_offset(&self) -> &FixedOffset {
        &self.offset
    }

    /// The whole statement, in insertion order
    pub async fn full_statement(&self, cpf: &str) -> LedgerResult<Vec<Transaction>> {
        Ok(self.customer(cpf).await?.ledger.statement().to_vec())
    }

    /// Entries made on a `DD/MM/YYYY` day
    pub async fn statement_on_date(&self, cpf: &str, date: &str) -> LedgerResult<Vec<Transaction>> {
        let customer = self.customer(cpf).await?;
        let day = parse_date(date)?;

        self.select(&customer, day, day, || date.to_string())
    }

    /// Entries made on a given day
    pub async fn statement_for_day(&self, cpf: &str, day: NaiveDate) -> LedgerResult<Vec<Transaction>> {
        let customer = self.customer(cpf).await?;
        self.select(&customer, day, day, || day.to_string())
    }

    /// Entries made between two `DD/MM/YYYY` days, both inclusive
    pub async fn statement_between(
        &self,
        cpf: &str,
        start: &str,
        end: &str,
    ) -> LedgerResult<Vec<Transaction>> {
        let customer = self.customer(cpf).await?;
        let (start_day, end_day) = (parse_date(start)?, parse_date(end)?);
        check_range(start_day, end_day)?;

        self.select(&customer, start_day, end_day, || format!("{} - {}", start, end))
    }

    /// Entries made between two days, both inclusive
    pub async fn statement_for_range(
        &self,
        cpf: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<Vec<Transaction>> {
        let customer = self.customer(cpf).await?;
        check_range(start, end)?;

        self.select(&customer, start, end, || format!("{} - {}", start, end))
    }

    async fn customer(&self, cpf: &str) -> LedgerResult<Customer> {
        self.storage
            .get_customer(cpf)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(cpf.to_string()))
    }

    // An empty match is an error, not an empty list.
    fn select(
        &self,
        customer: &Customer,
        start: NaiveDate,
        end: NaiveDate,
        describe: impl FnOnce() -> String,
    ) -> LedgerResult<Vec<Transaction>> {
        let entries = customer.ledger.entries_between(start, end, &self.offset);
        if entries.is_empty() {
            return Err(LedgerError::NoStatementFound(describe()));
        }
        Ok(entries)
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> LedgerResult<()> {
    if start > end {
        return Err(LedgerError::InvalidDate(format!(
            "range start {} is after end {}",
            start, end
        )));
    }
    Ok(())
}
