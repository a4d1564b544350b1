//! Core types and data structures for the bank ledger

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a movement on a customer's ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Credit - money coming in, increases the balance
    Credit,
    /// Debit - money going out, decreases the balance
    Debit,
}

impl TransactionType {
    /// Apply an amount of this type to a running balance
    pub fn apply(&self, balance: &mut BigDecimal, amount: &BigDecimal) {
        match self {
            TransactionType::Credit => *balance += amount,
            TransactionType::Debit => *balance -= amount,
        }
    }
}

/// A single immutable movement on a customer's ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Free text supplied with deposits; withdrawals carry none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Amount moved, never negative
    pub amount: BigDecimal,
    /// Credit or Debit
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Engine clock reading taken when the entry was appended
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a credit entry
    pub fn credit(description: Option<String>, amount: BigDecimal, created_at: DateTime<Utc>) -> Self {
        Self {
            description,
            amount,
            transaction_type: TransactionType::Credit,
            created_at,
        }
    }

    /// Create a debit entry
    pub fn debit(amount: BigDecimal, created_at: DateTime<Utc>) -> Self {
        Self {
            description: None,
            amount,
            transaction_type: TransactionType::Debit,
            created_at,
        }
    }

    /// Calendar day of this entry in the given reference timezone
    pub fn local_date(&self, offset: &FixedOffset) -> NaiveDate {
        self.created_at.with_timezone(offset).date_naive()
    }
}

/// Append-only statement of a single customer plus its running balance
///
/// The fields are private so the only way to change a ledger is through
/// [`Ledger::credit`] and [`Ledger::debit`], which keep the cached balance equal
/// to the fold of the statement and never let it go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    statement: Vec<Transaction>,
    balance: BigDecimal,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger with zero balance
    pub fn new() -> Self {
        Self {
            statement: Vec::new(),
            balance: BigDecimal::from(0),
        }
    }

    /// All entries in insertion order
    pub fn statement(&self) -> &[Transaction] {
        &self.statement
    }

    /// Current balance
    pub fn balance(&self) -> &BigDecimal {
        &self.balance
    }

    pub fn len(&self) -> usize {
        self.statement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statement.is_empty()
    }

    /// Append a credit entry and grow the balance
    pub fn credit(
        &mut self,
        description: Option<String>,
        amount: BigDecimal,
        now: DateTime<Utc>,
    ) -> &Transaction {
        let created_at = self.next_timestamp(now);
        self.append(Transaction::credit(description, amount, created_at))
    }

    /// Append a debit entry, or fail without touching the ledger when the
    /// balance does not cover the amount
    pub fn debit(&mut self, amount: BigDecimal, now: DateTime<Utc>) -> LedgerResult<&Transaction> {
        if self.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: self.balance.clone(),
                requested: amount,
            });
        }

        let created_at = self.next_timestamp(now);
        Ok(self.append(Transaction::debit(amount, created_at)))
    }

    /// Fold the whole statement into a balance, ignoring the cached value
    pub fn recompute_balance(&self) -> BigDecimal {
        self.statement
            .iter()
            .fold(BigDecimal::from(0), |mut balance, txn| {
                txn.transaction_type.apply(&mut balance, &txn.amount);
                balance
            })
    }

    /// Whether the cached balance matches the statement
    pub fn is_consistent(&self) -> bool {
        self.recompute_balance() == self.balance
    }

    /// Entries whose local calendar day falls within `start..=end`
    pub fn entries_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        offset: &FixedOffset,
    ) -> Vec<Transaction> {
        self.statement
            .iter()
            .filter(|txn| {
                let day = txn.local_date(offset);
                day >= start && day <= end
            })
            .cloned()
            .collect()
    }

    fn append(&mut self, transaction: Transaction) -> &Transaction {
        transaction
            .transaction_type
            .apply(&mut self.balance, &transaction.amount);
        self.statement.push(transaction);
        &self.statement[self.statement.len() - 1]
    }

    // Clock readings may step backwards; insertion order must stay chronological.
    fn next_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.statement.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        }
    }
}

/// Lifecycle state of a customer record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerStatus {
    /// Registered and able to transact
    Active,
    /// Removed from the registry; terminal
    Deleted,
}

/// An account holder and the ledger it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Internal identifier, generated at creation
    pub id: Uuid,
    /// External unique key the customer is looked up by
    pub cpf: String,
    /// Display name
    pub name: String,
    /// Statement and balance
    #[serde(flatten)]
    pub ledger: Ledger,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Create a new active customer with an empty ledger
    pub fn new(cpf: String, name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            cpf,
            name,
            ledger: Ledger::new(),
            status: CustomerStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shortcut for the ledger's balance
    pub fn balance(&self) -> &BigDecimal {
        self.ledger.balance()
    }

    /// Shortcut for the ledger's statement
    pub fn statement(&self) -> &[Transaction] {
        self.ledger.statement()
    }

    pub fn is_active(&self) -> bool {
        self.status == CustomerStatus::Active
    }

    pub fn rename(&mut self, name: String, now: DateTime<Utc>) {
        self.name = name;
        self.touch(now);
    }

    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.status = CustomerStatus::Deleted;
        self.touch(now);
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

/// Result of checking a single ledger against its invariants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerIntegrityReport {
    pub cpf: String,
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub transaction_count: usize,
    pub cached_balance: BigDecimal,
    pub recomputed_balance: BigDecimal,
}

impl LedgerIntegrityReport {
    /// Inspect a customer's ledger
    pub fn inspect(customer: &Customer) -> Self {
        let ledger = &customer.ledger;
        let cached_balance = ledger.balance().clone();
        let recomputed_balance = ledger.recompute_balance();
        let mut issues = Vec::new();

        if cached_balance != recomputed_balance {
            issues.push(format!(
                "Cached balance {} differs from statement total {}",
                cached_balance, recomputed_balance
            ));
        }

        if cached_balance < BigDecimal::from(0) {
            issues.push(format!("Balance is negative: {}", cached_balance));
        }

        if let Some(txn) = ledger.statement().iter().find(|t| t.amount < BigDecimal::from(0)) {
            issues.push(format!("Entry at {} has negative amount {}", txn.created_at, txn.amount));
        }

        let out_of_order = ledger
            .statement()
            .windows(2)
            .any(|pair| pair[1].created_at < pair[0].created_at);
        if out_of_order {
            issues.push("Statement timestamps are not in insertion order".to_string());
        }

        Self {
            cpf: customer.cpf.clone(),
            is_valid: issues.is_empty(),
            issues,
            transaction_count: ledger.len(),
            cached_balance,
            recomputed_balance,
        }
    }
}

/// Errors that can occur in the ledger system
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("An account with CPF '{0}' already exists")]
    DuplicateAccount(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        balance: BigDecimal,
        requested: BigDecimal,
    },
    #[error("No statement found for {0}")]
    NoStatementFound(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_credit_and_debit_update_balance() {
        let mut ledger = Ledger::new();
        ledger.credit(Some("salary".to_string()), BigDecimal::from(1000), at(10));
        ledger.debit(BigDecimal::from(300), at(11)).unwrap();

        assert_eq!(ledger.balance(), &BigDecimal::from(700));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.statement()[0].transaction_type, TransactionType::Credit);
        assert_eq!(ledger.statement()[1].transaction_type, TransactionType::Debit);
        assert_eq!(ledger.statement()[1].description, None);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_debit_beyond_balance_leaves_ledger_untouched() {
        let mut ledger = Ledger::new();
        ledger.credit(None, BigDecimal::from(50), at(10));

        let err = ledger.debit(BigDecimal::from(51), at(11)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                balance: BigDecimal::from(50),
                requested: BigDecimal::from(51),
            }
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.balance(), &BigDecimal::from(50));
    }

    #[test]
    fn test_debit_of_exact_balance_reaches_zero() {
        let mut ledger = Ledger::new();
        ledger.credit(None, BigDecimal::from(50), at(10));
        ledger.debit(BigDecimal::from(50), at(11)).unwrap();

        assert_eq!(ledger.balance(), &BigDecimal::from(0));
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let mut ledger = Ledger::new();
        ledger.credit(None, BigDecimal::from(10), at(12));
        ledger.credit(None, BigDecimal::from(10), at(9));

        assert_eq!(ledger.statement()[1].created_at, at(12));
    }

    #[test]
    fn test_entries_between_uses_reference_offset() {
        let mut ledger = Ledger::new();
        // 23:00 UTC on the 15th is already the 16th at UTC+3
        ledger.credit(None, BigDecimal::from(10), at(23));

        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let next = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();

        assert_eq!(ledger.entries_between(day, day, &utc).len(), 1);
        assert!(ledger.entries_between(day, day, &plus_three).is_empty());
        assert_eq!(ledger.entries_between(next, next, &plus_three).len(), 1);
    }

    #[test]
    fn test_integrity_report_on_healthy_ledger() {
        let mut customer = Customer::new("111".to_string(), "Ana".to_string(), at(9));
        customer.ledger.credit(None, BigDecimal::from(100), at(10));

        let report = LedgerIntegrityReport::inspect(&customer);
        assert!(report.is_valid);
        assert_eq!(report.transaction_count, 1);
        assert_eq!(report.recomputed_balance, BigDecimal::from(100));
    }

    #[test]
    fn test_mark_deleted_is_terminal_state() {
        let mut customer = Customer::new("111".to_string(), "Ana".to_string(), at(9));
        assert!(customer.is_active());

        customer.mark_deleted(at(10));
        assert_eq!(customer.status, CustomerStatus::Deleted);
        assert_eq!(customer.updated_at, at(10));
    }
}
