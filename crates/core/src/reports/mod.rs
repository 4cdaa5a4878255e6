//! Financial report generation.
//!
//! Pure builders for the trial balance, balance sheet and profit and loss
//! statement. Every builder takes the company's accounts and journal lines
//! and returns a complete report; none of them touch storage.

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::{CURRENT_EARNINGS_LABEL, ReportService};
pub use types::*;
