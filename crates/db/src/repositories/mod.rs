//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod ledger_reader;
pub mod ledger_writer;

pub use ledger_reader::SeaLedgerReader;
pub use ledger_writer::{LedgerRepository, RepositoryError, SeedCounts};
