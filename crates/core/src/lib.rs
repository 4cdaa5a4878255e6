//! Core business logic for Daftar.
//!
//! This crate contains pure reporting and VAT logic with ZERO web or database
//! dependencies. Storage is reached only through the [`source::LedgerReader`]
//! trait.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts and normal balance rules
//! - `company` - Reporting entity and TRN validation
//! - `journal` - Double-entry journal entries and lines
//! - `period` - Date ranges, as-of cursors and ISO date parsing
//! - `documents` - Sales invoices and vendor bills
//! - `vat` - UAE VAT rates and period summaries
//! - `reports` - Trial balance, balance sheet, profit and loss
//! - `source` - The ledger read seam
//! - `queries` - Async facade validating input and fanning out reads
//! - `memory` - In-memory ledger for demo mode and tests
//! - `demo` - Demo company dataset

pub mod accounts;
pub mod company;
pub mod demo;
pub mod documents;
pub mod journal;
pub mod memory;
pub mod period;
pub mod queries;
pub mod reports;
pub mod source;
pub mod vat;

pub use queries::ReportQueries;
pub use source::{LedgerReader, SourceError};
