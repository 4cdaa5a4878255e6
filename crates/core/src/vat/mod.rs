//! UAE VAT computation.
//!
//! Output VAT comes from sales invoice lines, input VAT from vendor bill
//! lines. All rate math uses integer basis points (10000 = 100%).

pub mod rate;
pub mod service;
pub mod types;

pub use rate::{STANDARD_RATE_BASIS_POINTS, VatRate, apply_basis_points};
pub use service::VatService;
pub use types::{
    FILING_WINDOW_DAYS, VatDirection, VatLine, VatReturn, VatReturnStatus, VatSummary,
};
