//! Ledger engine: customer registry, movement processing and statement queries

pub mod core;
pub mod processor;
pub mod registry;
pub mod statement;

pub use self::core::*;
pub use processor::*;
pub use registry::*;
pub use statement::*;
