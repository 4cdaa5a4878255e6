//! Report data types.

use chrono::NaiveDate;
use daftar_shared::Fils;
use daftar_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use crate::accounts::{AccountType, NormalBalance};
use crate::period::DateRange;

/// Whether a report had data to check, and whether it checked out.
///
/// Keeps "nothing posted yet" distinct from "books balance".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// No journal lines fell inside the report's scope.
    NoData,
    /// Data present and the report's invariant holds.
    Balanced,
    /// Data present and the invariant fails.
    Imbalanced,
}

impl ReportStatus {
    /// Derives the status from whether any line was in scope and whether the
    /// invariant held.
    #[must_use]
    pub const fn from_check(has_data: bool, is_balanced: bool) -> Self {
        match (has_data, is_balanced) {
            (false, true) => Self::NoData,
            (_, true) => Self::Balanced,
            (_, false) => Self::Imbalanced,
        }
    }
}

/// Trial balance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceItem {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Normal balance side of the account.
    pub normal_balance: NormalBalance,
    /// Debit column (net debit balance, else zero).
    pub debit: Fils,
    /// Credit column (net credit balance, else zero).
    pub credit: Fils,
    /// Balance signed per the account's normal side.
    pub balance: Fils,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As of date.
    pub as_of: NaiveDate,
    /// Accounts with a nonzero balance, ordered by code.
    pub items: Vec<TrialBalanceItem>,
    /// Sum of the debit column.
    pub total_debit: Fils,
    /// Sum of the credit column.
    pub total_credit: Fils,
    /// Whether debits equal credits.
    pub is_balanced: bool,
    /// Data/balance tri-state.
    pub status: ReportStatus,
}

impl TrialBalanceReport {
    /// A zeroed report for the empty state.
    #[must_use]
    pub fn empty(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            items: Vec::new(),
            total_debit: Fils::ZERO,
            total_credit: Fils::ZERO,
            is_balanced: true,
            status: ReportStatus::NoData,
        }
    }
}

/// A single amount on a balance sheet or profit and loss statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Source account; `None` for computed lines such as current earnings.
    pub account_id: Option<AccountId>,
    /// Account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Amount, positive on the section's natural side.
    pub amount: Fils,
}

/// Assets, split into current and fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSection {
    /// Current assets.
    pub current: Vec<ReportLine>,
    /// Current assets total.
    pub current_total: Fils,
    /// Fixed (non-current) assets.
    pub fixed: Vec<ReportLine>,
    /// Fixed assets total.
    pub fixed_total: Fils,
    /// `current` followed by `fixed`.
    pub all: Vec<ReportLine>,
    /// Section total.
    pub total: Fils,
}

/// Liabilities, split into current and long-term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilitySection {
    /// Current liabilities.
    pub current: Vec<ReportLine>,
    /// Current liabilities total.
    pub current_total: Fils,
    /// Long-term liabilities.
    pub long_term: Vec<ReportLine>,
    /// Long-term liabilities total.
    pub long_term_total: Fils,
    /// `current` followed by `long_term`.
    pub all: Vec<ReportLine>,
    /// Section total.
    pub total: Fils,
}

/// Equity section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquitySection {
    /// Equity lines, including current period earnings.
    pub all: Vec<ReportLine>,
    /// Section total.
    pub total: Fils,
}

/// Balance sheet report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// As of date.
    pub as_of: NaiveDate,
    /// Assets section.
    pub assets: AssetSection,
    /// Liabilities section.
    pub liabilities: LiabilitySection,
    /// Equity section.
    pub equity: EquitySection,
    /// Liabilities plus equity.
    pub total_liabilities_and_equity: Fils,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
    /// Data/balance tri-state.
    pub status: ReportStatus,
}

impl BalanceSheetReport {
    /// A zeroed report for the empty state.
    #[must_use]
    pub fn empty(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            assets: AssetSection::default(),
            liabilities: LiabilitySection::default(),
            equity: EquitySection::default(),
            total_liabilities_and_equity: Fils::ZERO,
            is_balanced: true,
            status: ReportStatus::NoData,
        }
    }
}

/// Profit and loss statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAndLossReport {
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Revenue lines.
    pub revenue: Vec<ReportLine>,
    /// Total revenue.
    pub total_revenue: Fils,
    /// Cost of goods sold lines.
    pub cogs: Vec<ReportLine>,
    /// Total cost of goods sold.
    pub total_cogs: Fils,
    /// Revenue minus cost of goods sold.
    pub gross_profit: Fils,
    /// Operating expense lines.
    pub expenses: Vec<ReportLine>,
    /// Total operating expenses.
    pub total_expenses: Fils,
    /// Other income lines.
    pub other_income: Vec<ReportLine>,
    /// Total other income.
    pub total_other_income: Fils,
    /// Gross profit minus expenses plus other income.
    pub net_profit: Fils,
}

impl ProfitAndLossReport {
    /// A zeroed statement for `range`.
    #[must_use]
    pub fn empty(range: DateRange) -> Self {
        Self {
            start_date: range.start(),
            end_date: range.end(),
            revenue: Vec::new(),
            total_revenue: Fils::ZERO,
            cogs: Vec::new(),
            total_cogs: Fils::ZERO,
            gross_profit: Fils::ZERO,
            expenses: Vec::new(),
            total_expenses: Fils::ZERO,
            other_income: Vec::new(),
            total_other_income: Fils::ZERO,
            net_profit: Fils::ZERO,
        }
    }
}
