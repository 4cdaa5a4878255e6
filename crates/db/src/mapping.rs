//! Conversions between `SeaORM` models and domain types.

use chrono::Utc;
use daftar_core::accounts::{self, Account};
use daftar_core::company::{Company, Trn};
use daftar_core::documents;
use daftar_core::journal::JournalLine;
use daftar_core::source::SourceError;
use daftar_core::vat::{self, VatReturn};
use daftar_shared::Fils;
use daftar_shared::types::{AccountId, CompanyId, JournalEntryId, JournalLineId, VatReturnId};

use crate::entities::{
    accounts as account_rows, companies, journal_lines, sea_orm_active_enums as db, vat_returns,
};

impl From<db::AccountType> for accounts::AccountType {
    fn from(value: db::AccountType) -> Self {
        match value {
            db::AccountType::Asset => Self::Asset,
            db::AccountType::Liability => Self::Liability,
            db::AccountType::Equity => Self::Equity,
            db::AccountType::Revenue => Self::Revenue,
            db::AccountType::Expense => Self::Expense,
            db::AccountType::Cogs => Self::Cogs,
            db::AccountType::OtherIncome => Self::OtherIncome,
        }
    }
}

impl From<accounts::AccountType> for db::AccountType {
    fn from(value: accounts::AccountType) -> Self {
        match value {
            accounts::AccountType::Asset => Self::Asset,
            accounts::AccountType::Liability => Self::Liability,
            accounts::AccountType::Equity => Self::Equity,
            accounts::AccountType::Revenue => Self::Revenue,
            accounts::AccountType::Expense => Self::Expense,
            accounts::AccountType::Cogs => Self::Cogs,
            accounts::AccountType::OtherIncome => Self::OtherIncome,
        }
    }
}

impl From<db::AccountSubtype> for accounts::AccountSubtype {
    fn from(value: db::AccountSubtype) -> Self {
        match value {
            db::AccountSubtype::Current => Self::Current,
            db::AccountSubtype::Fixed => Self::Fixed,
            db::AccountSubtype::LongTerm => Self::LongTerm,
        }
    }
}

impl From<accounts::AccountSubtype> for db::AccountSubtype {
    fn from(value: accounts::AccountSubtype) -> Self {
        match value {
            accounts::AccountSubtype::Current => Self::Current,
            accounts::AccountSubtype::Fixed => Self::Fixed,
            accounts::AccountSubtype::LongTerm => Self::LongTerm,
        }
    }
}

impl From<db::NormalBalance> for accounts::NormalBalance {
    fn from(value: db::NormalBalance) -> Self {
        match value {
            db::NormalBalance::Debit => Self::Debit,
            db::NormalBalance::Credit => Self::Credit,
        }
    }
}

impl From<accounts::NormalBalance> for db::NormalBalance {
    fn from(value: accounts::NormalBalance) -> Self {
        match value {
            accounts::NormalBalance::Debit => Self::Debit,
            accounts::NormalBalance::Credit => Self::Credit,
        }
    }
}

impl From<db::DocumentKind> for documents::DocumentKind {
    fn from(value: db::DocumentKind) -> Self {
        match value {
            db::DocumentKind::SalesInvoice => Self::SalesInvoice,
            db::DocumentKind::VendorBill => Self::VendorBill,
        }
    }
}

impl From<documents::DocumentKind> for db::DocumentKind {
    fn from(value: documents::DocumentKind) -> Self {
        match value {
            documents::DocumentKind::SalesInvoice => Self::SalesInvoice,
            documents::DocumentKind::VendorBill => Self::VendorBill,
        }
    }
}

impl From<documents::DocumentStatus> for db::DocumentStatus {
    fn from(value: documents::DocumentStatus) -> Self {
        match value {
            documents::DocumentStatus::Draft => Self::Draft,
            documents::DocumentStatus::Issued => Self::Issued,
            documents::DocumentStatus::Paid => Self::Paid,
            documents::DocumentStatus::Void => Self::Void,
        }
    }
}

impl From<db::VatRate> for vat::VatRate {
    fn from(value: db::VatRate) -> Self {
        match value {
            db::VatRate::Standard => Self::Standard,
            db::VatRate::ZeroRated => Self::ZeroRated,
            db::VatRate::Exempt => Self::Exempt,
        }
    }
}

impl From<vat::VatRate> for db::VatRate {
    fn from(value: vat::VatRate) -> Self {
        match value {
            vat::VatRate::Standard => Self::Standard,
            vat::VatRate::ZeroRated => Self::ZeroRated,
            vat::VatRate::Exempt => Self::Exempt,
        }
    }
}

impl From<db::VatReturnStatus> for vat::VatReturnStatus {
    fn from(value: db::VatReturnStatus) -> Self {
        match value {
            db::VatReturnStatus::Draft => Self::Draft,
            db::VatReturnStatus::Filed => Self::Filed,
        }
    }
}

impl From<vat::VatReturnStatus> for db::VatReturnStatus {
    fn from(value: vat::VatReturnStatus) -> Self {
        match value {
            vat::VatReturnStatus::Draft => Self::Draft,
            vat::VatReturnStatus::Filed => Self::Filed,
        }
    }
}

/// Converts a company row, validating the stored TRN.
///
/// # Errors
///
/// Returns [`SourceError::InvalidData`] for a malformed TRN.
pub fn company_from_row(row: companies::Model) -> Result<Company, SourceError> {
    let trn = row
        .trn
        .as_deref()
        .map(Trn::parse)
        .transpose()
        .map_err(|e| SourceError::InvalidData(format!("company {}: {e}", row.id)))?;

    Ok(Company {
        id: CompanyId::from_uuid(row.id),
        name: row.name,
        trn,
        base_currency: row.base_currency,
    })
}

/// Converts an account row.
#[must_use]
pub fn account_from_row(row: account_rows::Model) -> Account {
    Account {
        id: AccountId::from_uuid(row.id),
        company_id: CompanyId::from_uuid(row.company_id),
        code: row.code,
        name: row.name,
        account_type: row.account_type.into(),
        subtype: row.account_subtype.map(Into::into),
        normal_balance: row.normal_balance.into(),
    }
}

/// Converts a journal line row.
#[must_use]
pub fn journal_line_from_row(row: journal_lines::Model) -> JournalLine {
    JournalLine {
        id: JournalLineId::from_uuid(row.id),
        entry_id: JournalEntryId::from_uuid(row.entry_id),
        company_id: CompanyId::from_uuid(row.company_id),
        account_id: AccountId::from_uuid(row.account_id),
        entry_date: row.entry_date,
        debit: Fils::new(row.debit),
        credit: Fils::new(row.credit),
        memo: row.memo,
    }
}

/// Converts a VAT return row.
#[must_use]
pub fn vat_return_from_row(row: vat_returns::Model) -> VatReturn {
    VatReturn {
        id: VatReturnId::from_uuid(row.id),
        company_id: CompanyId::from_uuid(row.company_id),
        period_start: row.period_start,
        period_end: row.period_end,
        output_vat: Fils::new(row.output_vat),
        input_vat: Fils::new(row.input_vat),
        net_payable: Fils::new(row.net_payable),
        status: row.status.into(),
        filed_at: row.filed_at.map(|at| at.with_timezone(&Utc)),
        reference: row.reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;
    use uuid::Uuid;

    #[test]
    fn test_account_types_round_trip() {
        for value in db::AccountType::iter() {
            let domain: accounts::AccountType = value.into();
            assert_eq!(db::AccountType::from(domain), value);
        }
    }

    #[test]
    fn test_vat_rates_round_trip() {
        for value in db::VatRate::iter() {
            let domain: vat::VatRate = value.into();
            assert_eq!(db::VatRate::from(domain), value);
        }
    }

    #[test]
    fn test_company_with_bad_trn_is_invalid_data() {
        let row = companies::Model {
            id: Uuid::now_v7(),
            name: "Broken LLC".to_string(),
            trn: Some("12345".to_string()),
            base_currency: "AED".to_string(),
        };
        assert!(matches!(company_from_row(row), Err(SourceError::InvalidData(_))));
    }

    #[test]
    fn test_account_row_keeps_contra_side() {
        let row = account_rows::Model {
            id: Uuid::now_v7(),
            company_id: Uuid::now_v7(),
            code: "1510".to_string(),
            name: "Accumulated Depreciation".to_string(),
            account_type: db::AccountType::Asset,
            account_subtype: Some(db::AccountSubtype::Fixed),
            normal_balance: db::NormalBalance::Credit,
        };
        let account = account_from_row(row);
        assert_eq!(account.normal_balance, accounts::NormalBalance::Credit);
        assert_eq!(account.subtype, Some(accounts::AccountSubtype::Fixed));
    }
}
