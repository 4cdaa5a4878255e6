//! `SeaORM` active enums mirroring the PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `account_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    /// Asset.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Operating expense.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Cost of goods sold.
    #[sea_orm(string_value = "cogs")]
    Cogs,
    /// Other income.
    #[sea_orm(string_value = "other_income")]
    OtherIncome,
}

/// `account_subtype` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_subtype")]
pub enum AccountSubtype {
    /// Current.
    #[sea_orm(string_value = "current")]
    Current,
    /// Fixed.
    #[sea_orm(string_value = "fixed")]
    Fixed,
    /// Long-term.
    #[sea_orm(string_value = "long_term")]
    LongTerm,
}

/// `normal_balance` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "normal_balance")]
pub enum NormalBalance {
    /// Debit.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Credit.
    #[sea_orm(string_value = "credit")]
    Credit,
}

/// `document_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_kind")]
pub enum DocumentKind {
    /// Sales invoice.
    #[sea_orm(string_value = "sales_invoice")]
    SalesInvoice,
    /// Vendor bill.
    #[sea_orm(string_value = "vendor_bill")]
    VendorBill,
}

/// `document_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_status")]
pub enum DocumentStatus {
    /// Draft.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Issued or received.
    #[sea_orm(string_value = "issued")]
    Issued,
    /// Paid.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Void.
    #[sea_orm(string_value = "void")]
    Void,
}

/// `vat_rate` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vat_rate")]
pub enum VatRate {
    /// 5% standard rate.
    #[sea_orm(string_value = "standard")]
    Standard,
    /// Zero-rated.
    #[sea_orm(string_value = "zero_rated")]
    ZeroRated,
    /// Exempt.
    #[sea_orm(string_value = "exempt")]
    Exempt,
}

/// `vat_return_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vat_return_status")]
pub enum VatReturnStatus {
    /// Draft.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Filed with the FTA.
    #[sea_orm(string_value = "filed")]
    Filed,
}
