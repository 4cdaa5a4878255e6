//! Demo dataset.
//!
//! A small UAE trading company with one quarter of activity: capital and a
//! loan, fixed assets, payroll and rent, invoices and bills at every VAT
//! treatment, and last year's Q4 return already filed. Powers demo mode and
//! the database seeder.

use chrono::{Datelike, NaiveDate, NaiveTime};
use daftar_shared::Fils;
use daftar_shared::types::{AccountId, CompanyId, DocumentId};
use uuid::Uuid;

use crate::accounts::{Account, codes, default_chart_of_accounts, find_by_code};
use crate::company::{Company, Trn};
use crate::documents::{DocumentKind, DocumentLine, DocumentStatus, TaxDocument};
use crate::journal::JournalEntry;
use crate::memory::{InMemoryLedger, LedgerWriteError, document_entry};
use crate::period::DateRange;
use crate::vat::{VatRate, VatReturn, VatSummary};

/// Fixed id of the demo company, stable across restarts.
pub const DEMO_COMPANY_ID: CompanyId =
    CompanyId::from_uuid(Uuid::from_u128(0x0192_d5a0_7c4e_7b1a_9f00_00de_0c0a_0001));

const DEMO_TRN: &str = "100-2345-6789-0003";

/// Everything needed to populate a ledger for the demo company.
#[derive(Debug, Clone)]
pub struct DemoDataset {
    /// The demo company.
    pub company: Company,
    /// Its chart of accounts.
    pub accounts: Vec<Account>,
    /// Manual journal entries (documents post their own).
    pub entries: Vec<JournalEntry>,
    /// Invoices and bills, drafts included.
    pub documents: Vec<TaxDocument>,
    /// Previously recorded VAT returns.
    pub vat_returns: Vec<VatReturn>,
}

fn aed(dirhams: i64) -> Fils {
    Fils::from_dirhams(dirhams)
}

impl DemoDataset {
    /// Builds the dataset with activity in the first quarter of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerWriteError::YearOutOfRange`] if `year` or the year
    /// before it cannot be represented as a calendar date, or
    /// [`LedgerWriteError::MissingControlAccount`] if the default chart lacks
    /// an account the dataset posts to.
    pub fn build(year: i32) -> Result<Self, LedgerWriteError> {
        let prior_year_end = year
            .checked_sub(1)
            .and_then(|prior| NaiveDate::from_ymd_opt(prior, 12, 31))
            .ok_or(LedgerWriteError::YearOutOfRange(year))?;
        let on = |month: u32, day: u32| {
            NaiveDate::from_ymd_opt(year, month, day).ok_or(LedgerWriteError::YearOutOfRange(year))
        };

        let mut company = Company::new(DEMO_COMPANY_ID, "Al Noor General Trading LLC");
        company.trn = Trn::parse(DEMO_TRN).ok();

        let accounts = default_chart_of_accounts(company.id);
        let id = |code: &'static str| -> Result<AccountId, LedgerWriteError> {
            find_by_code(&accounts, code)
                .map(|a| a.id)
                .ok_or(LedgerWriteError::MissingControlAccount(code))
        };

        let bank = id(codes::BANK)?;
        let journal = |date: NaiveDate, reference: &str, description: &str| {
            JournalEntry::new(company.id, date, reference, description)
        };

        let mut entries = vec![
            journal(on(1, 2)?, "JV-0001", "Share capital contribution")
                .debit(bank, aed(250_000))
                .credit(id(codes::SHARE_CAPITAL)?, aed(250_000)),
            journal(on(1, 5)?, "JV-0002", "Term loan drawdown")
                .debit(bank, aed(100_000))
                .credit(id(codes::LONG_TERM_LOANS)?, aed(100_000)),
            journal(on(1, 8)?, "JV-0003", "Warehouse racking and forklift")
                .debit(id(codes::PROPERTY_AND_EQUIPMENT)?, aed(60_000))
                .credit(bank, aed(60_000)),
        ];

        for month in 1..=3 {
            entries.push(
                journal(on(month, 25)?, &format!("PAY-{month:02}"), "Monthly payroll (WPS)")
                    .debit(id(codes::SALARIES)?, aed(18_000))
                    .credit(bank, aed(18_000)),
            );
            entries.push(
                journal(on(month, 1)?, &format!("RENT-{month:02}"), "Office rent")
                    .debit(id(codes::RENT)?, aed(7_500))
                    .credit(bank, aed(7_500)),
            );
            entries.push(
                journal(on(month, 28)?, &format!("BC-{month:02}"), "Bank charges")
                    .debit(id(codes::BANK_CHARGES)?, Fils::new(5_250))
                    .credit(bank, Fils::new(5_250)),
            );
        }

        entries.extend([
            journal(on(2, 10)?, "JV-0004", "Cost of goods shipped on INV-0002")
                .debit(id(codes::COST_OF_GOODS_SOLD)?, aed(11_000))
                .credit(id(codes::INVENTORY)?, aed(11_000)),
            journal(on(2, 28)?, "JV-0005", "Receipt against INV-0001")
                .debit(bank, aed(21_000))
                .credit(id(codes::ACCOUNTS_RECEIVABLE)?, aed(21_000)),
            journal(on(3, 15)?, "JV-0006", "Payment of BILL-0001")
                .debit(id(codes::ACCOUNTS_PAYABLE)?, aed(15_750))
                .credit(bank, aed(15_750)),
            journal(on(3, 31)?, "JV-0007", "Quarterly depreciation")
                .debit(id(codes::DEPRECIATION)?, aed(1_500))
                .credit(id(codes::ACCUMULATED_DEPRECIATION)?, aed(1_500)),
            journal(on(3, 31)?, "JV-0008", "Interest on call deposit")
                .debit(bank, Fils::new(41_875))
                .credit(id(codes::INTEREST_INCOME)?, Fils::new(41_875)),
        ]);

        let document = |kind, number: &str, counterparty: &str, date, status, lines| TaxDocument {
            id: DocumentId::new(),
            company_id: company.id,
            kind,
            number: number.to_string(),
            counterparty: counterparty.to_string(),
            issue_date: date,
            status,
            lines,
        };
        let line = |description: &str, account_id, dirhams, rate| DocumentLine {
            description: description.to_string(),
            account_id,
            net_amount: aed(dirhams),
            rate,
        };

        let documents = vec![
            document(
                DocumentKind::SalesInvoice,
                "INV-0001",
                "Emirates Logistics FZE",
                on(1, 15)?,
                DocumentStatus::Paid,
                vec![line(
                    "Supply chain consulting",
                    id(codes::SERVICE_REVENUE)?,
                    20_000,
                    VatRate::Standard,
                )],
            ),
            document(
                DocumentKind::SalesInvoice,
                "INV-0002",
                "Gulf Retail Co.",
                on(2, 10)?,
                DocumentStatus::Issued,
                vec![
                    line("Packaged goods", id(codes::SALES)?, 35_000, VatRate::Standard),
                    line("Export shipment to Oman", id(codes::SALES)?, 12_000, VatRate::ZeroRated),
                ],
            ),
            document(
                DocumentKind::SalesInvoice,
                "INV-0003",
                "Desert Rose Hotels",
                on(3, 20)?,
                DocumentStatus::Draft,
                vec![line("Linen supply", id(codes::SALES)?, 9_000, VatRate::Standard)],
            ),
            document(
                DocumentKind::VendorBill,
                "BILL-0001",
                "Jebel Ali Wholesale LLC",
                on(1, 12)?,
                DocumentStatus::Paid,
                vec![line("Stock purchase", id(codes::INVENTORY)?, 15_000, VatRate::Standard)],
            ),
            document(
                DocumentKind::VendorBill,
                "BILL-0002",
                "DEWA",
                on(2, 20)?,
                DocumentStatus::Issued,
                vec![line(
                    "Electricity and water",
                    id(codes::UTILITIES)?,
                    2_400,
                    VatRate::Standard,
                )],
            ),
            document(
                DocumentKind::VendorBill,
                "BILL-0003",
                "Al Qusais Residences",
                on(3, 5)?,
                DocumentStatus::Issued,
                vec![line("Staff accommodation", id(codes::RENT)?, 6_000, VatRate::Exempt)],
            ),
        ];

        let mut q4 = VatSummary::empty(DateRange::quarter_containing(prior_year_end));
        q4.output_vat = aed(4_200);
        q4.input_vat = aed(1_350);
        q4.net_payable = q4.output_vat - q4.input_vat;
        let filed_at = on(1, 20)?.and_time(NaiveTime::MIN).and_utc();
        let reference = format!("FTA-{}-Q4-0001", prior_year_end.year());
        let vat_returns = vec![VatReturn::draft(company.id, &q4).filed(filed_at, reference)];

        Ok(Self {
            company,
            accounts,
            entries,
            documents,
            vat_returns,
        })
    }

    /// Every journal entry the dataset posts: manual entries followed by
    /// those generated by issued and paid documents.
    ///
    /// # Errors
    ///
    /// Fails if a document cannot be booked against the chart.
    pub fn all_entries(&self) -> Result<Vec<JournalEntry>, LedgerWriteError> {
        let mut all = self.entries.clone();
        for document in &self.documents {
            all.extend(document_entry(&self.accounts, document)?);
        }
        Ok(all)
    }

    /// Loads the dataset into a fresh in-memory ledger.
    ///
    /// # Errors
    ///
    /// Fails if any entry is rejected by the ledger.
    pub fn into_ledger(self) -> Result<InMemoryLedger, LedgerWriteError> {
        let mut ledger = InMemoryLedger::new();
        ledger.add_company(self.company, self.accounts)?;
        for entry in self.entries {
            ledger.post_entry(entry)?;
        }
        for document in self.documents {
            ledger.record_document(document)?;
        }
        for vat_return in self.vat_returns {
            ledger.record_vat_return(vat_return)?;
        }
        Ok(ledger)
    }
}
