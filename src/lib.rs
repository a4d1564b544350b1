//! # Bank Ledger
//!
//! An in-memory bank account ledger: customers are registered by CPF, each
//! owns an append-only statement of credits and debits, and the running
//! balance can never go negative.
//!
//! ## Features
//!
//! - **Customer registry**: unique CPF per account, rename, delete, listing
//! - **Deposits and withdrawals**: balance check and append happen atomically per customer
//! - **Statements**: full history, a single `DD/MM/YYYY` day, or a range of days
//! - **Storage abstraction**: components are generic over [`CustomerStore`]
//!
//! ## Quick Start
//!
//! ```rust
//! use bank_ledger::{utils::MemoryStorage, Bank};
//! use bigdecimal::BigDecimal;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), bank_ledger::LedgerError> {
//! let bank = Bank::new(MemoryStorage::new());
//!
//! bank.create_account("111".to_string(), "Ana".to_string()).await?;
//! bank.deposit("111", "salary".to_string(), BigDecimal::from(1000)).await?;
//! let ana = bank.withdraw("111", BigDecimal::from(300)).await?;
//!
//! assert_eq!(ana.balance(), &BigDecimal::from(700));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use traits::*;
pub use types::*;
