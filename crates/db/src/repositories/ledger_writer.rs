//! Inserts companies, journal entries and VAT documents.
//!
//! Used by the seeder. Journal entries are validated before any statement is
//! sent. The single-record methods each run in their own transaction;
//! [`LedgerRepository::seed_dataset`] writes a whole dataset in one.

use daftar_core::accounts::Account;
use daftar_core::company::Company;
use daftar_core::demo::DemoDataset;
use daftar_core::documents::TaxDocument;
use daftar_core::journal::{JournalEntry, JournalError};
use daftar_core::memory::LedgerWriteError;
use daftar_core::vat::VatReturn;
use daftar_shared::types::CompanyId;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{
    accounts, companies, journal_entries, journal_lines, tax_document_lines, tax_documents,
    vat_returns,
};

/// Error types for ledger writes.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Entry failed double-entry validation.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// A document could not be turned into a journal entry.
    #[error(transparent)]
    Posting(#[from] LedgerWriteError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Rows written by [`LedgerRepository::seed_dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    /// Chart of accounts rows.
    pub accounts: usize,
    /// Journal entries, document postings included.
    pub entries: usize,
    /// Invoices and bills.
    pub documents: usize,
    /// VAT returns.
    pub vat_returns: usize,
}

/// Writes ledger data to PostgreSQL.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks whether a company row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn company_exists(&self, company_id: CompanyId) -> Result<bool, DbErr> {
        let count = companies::Entity::find_by_id(company_id.into_inner())
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Inserts a company together with its chart of accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case.
    pub async fn insert_company(
        &self,
        company: &Company,
        chart: &[Account],
    ) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;
        insert_company_rows(&txn, company, chart).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Validates and inserts a journal entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Journal`] for an invalid entry, or a
    /// database error.
    pub async fn insert_entry(&self, entry: &JournalEntry) -> Result<(), RepositoryError> {
        entry.validate()?;

        let txn = self.db.begin().await?;
        insert_entry_rows(&txn, entry).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Inserts an invoice or bill with its lines.
    ///
    /// Does not post the document's journal entry.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub async fn insert_document(&self, document: &TaxDocument) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;
        insert_document_rows(&txn, document).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Inserts a VAT return record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_vat_return(&self, vat_return: &VatReturn) -> Result<(), RepositoryError> {
        insert_vat_return_row(&self.db, vat_return).await?;
        Ok(())
    }

    /// Writes a complete dataset in a single transaction: the company and
    /// its chart, every journal entry (document postings included), the
    /// invoices and bills, and the VAT returns.
    ///
    /// Entries are built and validated before the transaction opens. If any
    /// insert fails the transaction is rolled back and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Posting`] if a document cannot be booked,
    /// [`RepositoryError::Journal`] for an invalid entry, or a database
    /// error.
    pub async fn seed_dataset(&self, dataset: &DemoDataset) -> Result<SeedCounts, RepositoryError> {
        let entries = dataset.all_entries()?;
        for entry in &entries {
            entry.validate()?;
        }

        let txn = self.db.begin().await?;

        insert_company_rows(&txn, &dataset.company, &dataset.accounts).await?;
        for entry in &entries {
            insert_entry_rows(&txn, entry).await?;
        }
        for document in &dataset.documents {
            insert_document_rows(&txn, document).await?;
        }
        for vat_return in &dataset.vat_returns {
            insert_vat_return_row(&txn, vat_return).await?;
        }

        txn.commit().await?;

        let counts = SeedCounts {
            accounts: dataset.accounts.len(),
            entries: entries.len(),
            documents: dataset.documents.len(),
            vat_returns: dataset.vat_returns.len(),
        };
        debug!(company_id = %dataset.company.id, ?counts, "Dataset committed");
        Ok(counts)
    }
}

async fn insert_company_rows<C: ConnectionTrait>(
    conn: &C,
    company: &Company,
    chart: &[Account],
) -> Result<(), DbErr> {
    companies::Entity::insert(companies::ActiveModel {
        id: Set(company.id.into_inner()),
        name: Set(company.name.clone()),
        trn: Set(company.trn.as_ref().map(ToString::to_string)),
        base_currency: Set(company.base_currency.clone()),
    })
    .exec_without_returning(conn)
    .await?;

    if !chart.is_empty() {
        accounts::Entity::insert_many(chart.iter().map(|a| accounts::ActiveModel {
            id: Set(a.id.into_inner()),
            company_id: Set(a.company_id.into_inner()),
            code: Set(a.code.clone()),
            name: Set(a.name.clone()),
            account_type: Set(a.account_type.into()),
            account_subtype: Set(a.subtype.map(Into::into)),
            normal_balance: Set(a.normal_balance.into()),
        }))
        .exec_without_returning(conn)
        .await?;
    }

    Ok(())
}

async fn insert_entry_rows<C: ConnectionTrait>(
    conn: &C,
    entry: &JournalEntry,
) -> Result<(), DbErr> {
    journal_entries::Entity::insert(journal_entries::ActiveModel {
        id: Set(entry.id.into_inner()),
        company_id: Set(entry.company_id.into_inner()),
        entry_date: Set(entry.entry_date),
        reference: Set(entry.reference.clone()),
        description: Set(entry.description.clone()),
    })
    .exec_without_returning(conn)
    .await?;

    journal_lines::Entity::insert_many(entry.lines.iter().map(|l| journal_lines::ActiveModel {
        id: Set(l.id.into_inner()),
        entry_id: Set(l.entry_id.into_inner()),
        company_id: Set(l.company_id.into_inner()),
        account_id: Set(l.account_id.into_inner()),
        entry_date: Set(l.entry_date),
        debit: Set(l.debit.value()),
        credit: Set(l.credit.value()),
        memo: Set(l.memo.clone()),
    }))
    .exec_without_returning(conn)
    .await?;

    Ok(())
}

async fn insert_document_rows<C: ConnectionTrait>(
    conn: &C,
    document: &TaxDocument,
) -> Result<(), DbErr> {
    tax_documents::Entity::insert(tax_documents::ActiveModel {
        id: Set(document.id.into_inner()),
        company_id: Set(document.company_id.into_inner()),
        kind: Set(document.kind.into()),
        number: Set(document.number.clone()),
        counterparty: Set(document.counterparty.clone()),
        issue_date: Set(document.issue_date),
        status: Set(document.status.into()),
    })
    .exec_without_returning(conn)
    .await?;

    if !document.lines.is_empty() {
        tax_document_lines::Entity::insert_many(document.lines.iter().zip(1..).map(
            |(line, line_no)| tax_document_lines::ActiveModel {
                id: Set(Uuid::now_v7()),
                document_id: Set(document.id.into_inner()),
                line_no: Set(line_no),
                description: Set(line.description.clone()),
                account_id: Set(line.account_id.into_inner()),
                net_amount: Set(line.net_amount.value()),
                vat_rate: Set(line.rate.into()),
            },
        ))
        .exec_without_returning(conn)
        .await?;
    }

    Ok(())
}

async fn insert_vat_return_row<C: ConnectionTrait>(
    conn: &C,
    vat_return: &VatReturn,
) -> Result<(), DbErr> {
    vat_returns::Entity::insert(vat_returns::ActiveModel {
        id: Set(vat_return.id.into_inner()),
        company_id: Set(vat_return.company_id.into_inner()),
        period_start: Set(vat_return.period_start),
        period_end: Set(vat_return.period_end),
        output_vat: Set(vat_return.output_vat.value()),
        input_vat: Set(vat_return.input_vat.value()),
        net_payable: Set(vat_return.net_payable.value()),
        status: Set(vat_return.status.into()),
        filed_at: Set(vat_return.filed_at.map(Into::into)),
        reference: Set(vat_return.reference.clone()),
    })
    .exec_without_returning(conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daftar_shared::Fils;
    use daftar_shared::types::AccountId;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn inserted(count: usize) -> impl Iterator<Item = MockExecResult> {
        (0..count).map(|_| MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        })
    }

    #[tokio::test]
    async fn test_unbalanced_entry_is_rejected_before_any_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = LedgerRepository::new(db);

        let entry = JournalEntry::new(
            CompanyId::new(),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            "JV-0001",
            "Share capital",
        )
        .debit(AccountId::new(), Fils::new(1_000))
        .credit(AccountId::new(), Fils::new(900));

        let err = repo.insert_entry(&entry).await.unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::Journal(JournalError::Unbalanced { .. })
        ));
    }

    #[tokio::test]
    async fn test_seed_dataset_commits_once() {
        let dataset = DemoDataset::build(2025).unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(inserted(200))
            .into_connection();
        let repo = LedgerRepository::new(db.clone());

        let counts = repo.seed_dataset(&dataset).await.unwrap();

        assert_eq!(counts.entries, dataset.all_entries().unwrap().len());
        assert_eq!(counts.documents, dataset.documents.len());
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        assert!(format!("{log:?}").contains("COMMIT"));
    }

    #[tokio::test]
    async fn test_failure_mid_seed_commits_nothing() {
        let dataset = DemoDataset::build(2025).unwrap();
        // Company, chart and the first entry header succeed; its lines fail.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(inserted(3))
            .append_exec_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = LedgerRepository::new(db.clone());

        let err = repo.seed_dataset(&dataset).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Database(_)));
        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("COMMIT"));
    }
}
