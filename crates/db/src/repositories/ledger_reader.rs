//! PostgreSQL implementation of [`LedgerReader`].

use std::collections::HashMap;

use daftar_core::accounts::Account;
use daftar_core::company::Company;
use daftar_core::documents::DocumentKind;
use daftar_core::journal::JournalLine;
use daftar_core::period::{DateRange, Period};
use daftar_core::source::{LedgerReader, SourceError};
use daftar_core::vat::{VatLine, VatReturn};
use daftar_shared::Fils;
use daftar_shared::types::{CompanyId, DocumentId};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::entities::{
    accounts, companies, journal_lines, sea_orm_active_enums::DocumentStatus, tax_document_lines,
    tax_documents, vat_returns,
};
use crate::mapping::{
    account_from_row, company_from_row, journal_line_from_row, vat_return_from_row,
};

/// Reads company ledgers from PostgreSQL.
#[derive(Debug, Clone)]
pub struct SeaLedgerReader {
    db: DatabaseConnection,
}

impl SeaLedgerReader {
    /// Creates a new reader.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn unreachable(err: DbErr) -> SourceError {
    error!(error = %err, "Ledger query failed");
    SourceError::Unreachable(err.to_string())
}

#[async_trait::async_trait]
impl LedgerReader for SeaLedgerReader {
    #[instrument(skip(self))]
    async fn find_company(&self, company_id: CompanyId) -> Result<Option<Company>, SourceError> {
        companies::Entity::find_by_id(company_id.into_inner())
            .one(&self.db)
            .await
            .map_err(unreachable)?
            .map(company_from_row)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, SourceError> {
        let rows = accounts::Entity::find()
            .filter(accounts::Column::CompanyId.eq(company_id.into_inner()))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await
            .map_err(unreachable)?;

        Ok(rows.into_iter().map(account_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn journal_lines(
        &self,
        company_id: CompanyId,
        period: Period,
    ) -> Result<Vec<JournalLine>, SourceError> {
        let mut query = journal_lines::Entity::find()
            .filter(journal_lines::Column::CompanyId.eq(company_id.into_inner()))
            .filter(journal_lines::Column::EntryDate.lte(period.end()));
        if let Some(start) = period.start() {
            query = query.filter(journal_lines::Column::EntryDate.gte(start));
        }

        let rows = query
            .order_by_asc(journal_lines::Column::EntryDate)
            .order_by_asc(journal_lines::Column::Id)
            .all(&self.db)
            .await
            .map_err(unreachable)?;

        Ok(rows.into_iter().map(journal_line_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn vat_lines(
        &self,
        company_id: CompanyId,
        range: DateRange,
    ) -> Result<Vec<VatLine>, SourceError> {
        let documents = tax_documents::Entity::find()
            .filter(tax_documents::Column::CompanyId.eq(company_id.into_inner()))
            .filter(
                tax_documents::Column::Status.is_in([DocumentStatus::Issued, DocumentStatus::Paid]),
            )
            .filter(tax_documents::Column::IssueDate.between(range.start(), range.end()))
            .order_by_asc(tax_documents::Column::IssueDate)
            .all(&self.db)
            .await
            .map_err(unreachable)?;

        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let rows = tax_document_lines::Entity::find()
            .filter(tax_document_lines::Column::DocumentId.is_in(documents.iter().map(|d| d.id)))
            .order_by_asc(tax_document_lines::Column::DocumentId)
            .order_by_asc(tax_document_lines::Column::LineNo)
            .all(&self.db)
            .await
            .map_err(unreachable)?;

        let by_id: HashMap<Uuid, &tax_documents::Model> =
            documents.iter().map(|d| (d.id, d)).collect();

        rows.into_iter()
            .map(|line| {
                let document = by_id.get(&line.document_id).ok_or_else(|| {
                    SourceError::InvalidData(format!(
                        "document line {} has no matching document",
                        line.id
                    ))
                })?;
                Ok(VatLine {
                    document_id: DocumentId::from_uuid(document.id),
                    direction: DocumentKind::from(document.kind).vat_direction(),
                    date: document.issue_date,
                    net_amount: Fils::new(line.net_amount),
                    rate: line.vat_rate.into(),
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn vat_returns(&self, company_id: CompanyId) -> Result<Vec<VatReturn>, SourceError> {
        let rows = vat_returns::Entity::find()
            .filter(vat_returns::Column::CompanyId.eq(company_id.into_inner()))
            .order_by_desc(vat_returns::Column::PeriodStart)
            .all(&self.db)
            .await
            .map_err(unreachable)?;

        Ok(rows.into_iter().map(vat_return_from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::{
        AccountSubtype, AccountType, DocumentKind as DbDocumentKind, NormalBalance, VatRate,
        VatReturnStatus,
    };
    use chrono::NaiveDate;
    use daftar_core::vat::VatDirection;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn q1() -> DateRange {
        DateRange::new(date(1, 1), date(3, 31)).unwrap()
    }

    fn document(
        company_id: Uuid,
        kind: DbDocumentKind,
        issue_date: NaiveDate,
    ) -> tax_documents::Model {
        tax_documents::Model {
            id: Uuid::now_v7(),
            company_id,
            kind,
            number: "INV-0001".to_string(),
            counterparty: "Emirates Logistics FZE".to_string(),
            issue_date,
            status: DocumentStatus::Issued,
        }
    }

    fn document_line(
        document_id: Uuid,
        line_no: i32,
        net: i64,
        rate: VatRate,
    ) -> tax_document_lines::Model {
        tax_document_lines::Model {
            id: Uuid::now_v7(),
            document_id,
            line_no,
            description: "Line".to_string(),
            account_id: Uuid::now_v7(),
            net_amount: net,
            vat_rate: rate,
        }
    }

    #[tokio::test]
    async fn test_find_company_maps_row() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![companies::Model {
                id,
                name: "Al Noor General Trading LLC".to_string(),
                trn: Some("100234567890003".to_string()),
                base_currency: "AED".to_string(),
            }]])
            .into_connection();

        let company = SeaLedgerReader::new(db)
            .find_company(CompanyId::from_uuid(id))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(company.id, CompanyId::from_uuid(id));
        assert!(company.is_vat_registered());
    }

    #[tokio::test]
    async fn test_missing_company_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<companies::Model>::new()])
            .into_connection();

        let company = SeaLedgerReader::new(db)
            .find_company(CompanyId::new())
            .await
            .unwrap();

        assert_eq!(company, None);
    }

    #[tokio::test]
    async fn test_accounts_and_lines_map_rows() {
        let company_id = Uuid::now_v7();
        let account_id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![accounts::Model {
                id: account_id,
                company_id,
                code: "1010".to_string(),
                name: "Bank - Current Account".to_string(),
                account_type: AccountType::Asset,
                account_subtype: Some(AccountSubtype::Current),
                normal_balance: NormalBalance::Debit,
            }]])
            .append_query_results([vec![journal_lines::Model {
                id: Uuid::now_v7(),
                entry_id: Uuid::now_v7(),
                company_id,
                account_id,
                entry_date: date(2, 1),
                debit: 150_000,
                credit: 0,
                memo: None,
            }]])
            .into_connection();
        let reader = SeaLedgerReader::new(db);

        let accounts = reader.accounts(CompanyId::from_uuid(company_id)).await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].code, "1010");

        let lines = reader
            .journal_lines(CompanyId::from_uuid(company_id), Period::range(q1()))
            .await
            .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].net_debit(), Some(Fils::new(150_000)));
    }

    #[tokio::test]
    async fn test_vat_lines_join_documents() {
        let company_id = Uuid::now_v7();
        let invoice = document(company_id, DbDocumentKind::SalesInvoice, date(2, 1));
        let bill = document(company_id, DbDocumentKind::VendorBill, date(2, 15));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![invoice.clone(), bill.clone()]])
            .append_query_results([vec![
                document_line(invoice.id, 1, 10_000, VatRate::Standard),
                document_line(bill.id, 1, 4_000, VatRate::Standard),
            ]])
            .into_connection();

        let lines = SeaLedgerReader::new(db)
            .vat_lines(CompanyId::from_uuid(company_id), q1())
            .await
            .unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].direction, VatDirection::Output);
        assert_eq!(lines[0].vat(), Fils::new(500));
        assert_eq!(lines[1].direction, VatDirection::Input);
        assert_eq!(lines[1].date, date(2, 15));
    }

    #[tokio::test]
    async fn test_vat_lines_without_documents_skip_line_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<tax_documents::Model>::new()])
            .into_connection();

        let lines = SeaLedgerReader::new(db)
            .vat_lines(CompanyId::new(), q1())
            .await
            .unwrap();

        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_orphan_document_line_is_invalid_data() {
        let company_id = Uuid::now_v7();
        let invoice = document(company_id, DbDocumentKind::SalesInvoice, date(2, 1));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![invoice]])
            .append_query_results([vec![document_line(Uuid::now_v7(), 1, 100, VatRate::Exempt)]])
            .into_connection();

        let err = SeaLedgerReader::new(db)
            .vat_lines(CompanyId::from_uuid(company_id), q1())
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::InvalidData(_)));
    }

    #[tokio::test]
    async fn test_vat_returns_map_rows() {
        let company_id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![vat_returns::Model {
                id: Uuid::now_v7(),
                company_id,
                period_start: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
                period_end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
                output_vat: 420_000,
                input_vat: 135_000,
                net_payable: 285_000,
                status: VatReturnStatus::Filed,
                filed_at: None,
                reference: Some("FTA-2024-Q4-0001".to_string()),
            }]])
            .into_connection();

        let returns = SeaLedgerReader::new(db)
            .vat_returns(CompanyId::from_uuid(company_id))
            .await
            .unwrap();

        assert_eq!(returns.len(), 1);
        assert_eq!(returns[0].net_payable, Fils::new(285_000));
    }

    #[tokio::test]
    async fn test_database_errors_are_unreachable() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let err = SeaLedgerReader::new(db)
            .accounts(CompanyId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Unreachable(_)));
    }
}
