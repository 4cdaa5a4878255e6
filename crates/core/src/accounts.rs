//! Chart of accounts.
//!
//! Account classification drives every report: the account type decides
//! which report section an account lands in, the subtype picks the balance
//! sheet bucket, and the normal balance side decides how the trial balance
//! signs it.

use daftar_shared::Fils;
use daftar_shared::types::{AccountId, CompanyId};
use serde::{Deserialize, Serialize};

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Resources owned by the company.
    Asset,
    /// Obligations owed to others.
    Liability,
    /// Owners' residual interest.
    Equity,
    /// Operating income from sales and services.
    Revenue,
    /// Operating expenses.
    Expense,
    /// Cost of goods sold.
    Cogs,
    /// Non-operating income (interest, FX gains).
    OtherIncome,
}

impl AccountType {
    /// All account types, in reporting order.
    pub const ALL: [Self; 7] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Cogs,
        Self::Expense,
        Self::OtherIncome,
    ];

    /// Returns the side on which this account type normally carries a balance.
    ///
    /// - Asset/Expense/COGS: debit-normal
    /// - Liability/Equity/Revenue/Other income: credit-normal
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense | Self::Cogs => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue | Self::OtherIncome => {
                NormalBalance::Credit
            }
        }
    }

    /// Returns true for accounts reported on the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }

    /// Returns true for accounts whose activity flows into profit and loss.
    #[must_use]
    pub const fn is_income_statement(self) -> bool {
        !self.is_balance_sheet()
    }

    /// Returns the storage/wire name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
            Self::Cogs => "cogs",
            Self::OtherIncome => "other_income",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown account type: {s}"))
    }
}

/// Balance sheet sub-classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSubtype {
    /// Settles within twelve months (cash, receivables, payables).
    Current,
    /// Property, plant and equipment.
    Fixed,
    /// Non-current obligations and investments.
    LongTerm,
}

impl AccountSubtype {
    /// Returns the storage/wire name of this subtype.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Fixed => "fixed",
            Self::LongTerm => "long_term",
        }
    }
}

impl std::str::FromStr for AccountSubtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(Self::Current),
            "fixed" => Ok(Self::Fixed),
            "long_term" => Ok(Self::LongTerm),
            _ => Err(format!("Unknown account subtype: {s}")),
        }
    }
}

/// Side on which an account normally carries its balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debits increase the balance.
    Debit,
    /// Credits increase the balance.
    Credit,
}

impl NormalBalance {
    /// Signs a debit/credit pair according to this side.
    ///
    /// Debit-normal: `debit - credit`. Credit-normal: `credit - debit`.
    /// Returns `None` on overflow.
    #[must_use]
    pub const fn signed_balance(self, debit: Fils, credit: Fils) -> Option<Fils> {
        match self {
            Self::Debit => debit.checked_sub(credit),
            Self::Credit => credit.checked_sub(debit),
        }
    }

    /// Returns the storage/wire name of this side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl std::str::FromStr for NormalBalance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("Unknown normal balance: {s}")),
        }
    }
}

/// A chart of accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Account code, unique per company (e.g. "1010").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Balance sheet bucket, where applicable.
    pub subtype: Option<AccountSubtype>,
    /// Normal balance side. Differs from the type default for contra accounts.
    pub normal_balance: NormalBalance,
}

impl Account {
    /// Creates an account with the normal balance implied by its type.
    #[must_use]
    pub fn new(
        company_id: CompanyId,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        subtype: Option<AccountSubtype>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            company_id,
            code: code.into(),
            name: name.into(),
            account_type,
            subtype,
            normal_balance: account_type.normal_balance(),
        }
    }

    /// Marks this account as a contra account (opposite normal side).
    #[must_use]
    pub fn contra(mut self) -> Self {
        self.normal_balance = match self.account_type.normal_balance() {
            NormalBalance::Debit => NormalBalance::Credit,
            NormalBalance::Credit => NormalBalance::Debit,
        };
        self
    }
}

/// Well-known account codes in the default chart.
pub mod codes {
    /// Main bank account.
    pub const BANK: &str = "1010";
    /// Trade receivables.
    pub const ACCOUNTS_RECEIVABLE: &str = "1100";
    /// Inventory on hand.
    pub const INVENTORY: &str = "1200";
    /// Input VAT recoverable from the FTA.
    pub const VAT_RECOVERABLE: &str = "1300";
    /// Property, plant and equipment.
    pub const PROPERTY_AND_EQUIPMENT: &str = "1500";
    /// Accumulated depreciation (contra asset).
    pub const ACCUMULATED_DEPRECIATION: &str = "1510";
    /// Trade payables.
    pub const ACCOUNTS_PAYABLE: &str = "2000";
    /// Output VAT payable to the FTA.
    pub const VAT_PAYABLE: &str = "2100";
    /// Salaries payable through WPS.
    pub const SALARIES_PAYABLE: &str = "2200";
    /// Bank loans due after twelve months.
    pub const LONG_TERM_LOANS: &str = "2500";
    /// Paid-up share capital.
    pub const SHARE_CAPITAL: &str = "3000";
    /// Sales of goods.
    pub const SALES: &str = "4000";
    /// Consulting and service fees.
    pub const SERVICE_REVENUE: &str = "4100";
    /// Cost of goods sold.
    pub const COST_OF_GOODS_SOLD: &str = "5000";
    /// Salaries and wages.
    pub const SALARIES: &str = "6000";
    /// Office rent.
    pub const RENT: &str = "6100";
    /// Electricity, water and telecoms.
    pub const UTILITIES: &str = "6200";
    /// Depreciation expense.
    pub const DEPRECIATION: &str = "6300";
    /// Bank charges.
    pub const BANK_CHARGES: &str = "6400";
    /// Interest income.
    pub const INTEREST_INCOME: &str = "7000";
}

/// Generates the default UAE chart of accounts for a new company.
#[must_use]
pub fn default_chart_of_accounts(company_id: CompanyId) -> Vec<Account> {
    use AccountSubtype::{Current, Fixed, LongTerm};
    use AccountType::{Asset, Cogs, Equity, Expense, Liability, OtherIncome, Revenue};

    let account = |code: &str, name: &str, account_type, subtype| {
        Account::new(company_id, code, name, account_type, subtype)
    };

    vec![
        account("1000", "Cash on Hand", Asset, Some(Current)),
        account(codes::BANK, "Bank - Current Account", Asset, Some(Current)),
        account(codes::ACCOUNTS_RECEIVABLE, "Accounts Receivable", Asset, Some(Current)),
        account(codes::INVENTORY, "Inventory", Asset, Some(Current)),
        account(codes::VAT_RECOVERABLE, "VAT Recoverable (Input VAT)", Asset, Some(Current)),
        account("1400", "Prepaid Expenses", Asset, Some(Current)),
        account(codes::PROPERTY_AND_EQUIPMENT, "Property, Plant & Equipment", Asset, Some(Fixed)),
        account(codes::ACCUMULATED_DEPRECIATION, "Accumulated Depreciation", Asset, Some(Fixed))
            .contra(),
        account(codes::ACCOUNTS_PAYABLE, "Accounts Payable", Liability, Some(Current)),
        account(codes::VAT_PAYABLE, "VAT Payable (Output VAT)", Liability, Some(Current)),
        account(codes::SALARIES_PAYABLE, "Salaries Payable (WPS)", Liability, Some(Current)),
        account("2300", "End of Service Benefits", Liability, Some(LongTerm)),
        account(codes::LONG_TERM_LOANS, "Long-term Loans", Liability, Some(LongTerm)),
        account(codes::SHARE_CAPITAL, "Share Capital", Equity, None),
        account("3100", "Retained Earnings", Equity, None),
        account("3200", "Owner Drawings", Equity, None).contra(),
        account(codes::SALES, "Sales Revenue", Revenue, None),
        account(codes::SERVICE_REVENUE, "Service Revenue", Revenue, None),
        account(codes::COST_OF_GOODS_SOLD, "Cost of Goods Sold", Cogs, None),
        account(codes::SALARIES, "Salaries & Wages", Expense, None),
        account(codes::RENT, "Rent Expense", Expense, None),
        account(codes::UTILITIES, "Utilities", Expense, None),
        account(codes::DEPRECIATION, "Depreciation Expense", Expense, None),
        account(codes::BANK_CHARGES, "Bank Charges", Expense, None),
        account(codes::INTEREST_INCOME, "Interest Income", OtherIncome, None),
        account("7100", "Foreign Exchange Gain", OtherIncome, None),
    ]
}

/// Finds an account by code.
#[must_use]
pub fn find_by_code<'a>(accounts: &'a [Account], code: &str) -> Option<&'a Account> {
    accounts.iter().find(|a| a.code == code)
}
