//! Initial database migration.
//!
//! Creates the enums, ledger tables, VAT document tables and the balance
//! constraint on journal entries. Money columns are BIGINT fils.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: COMPANIES & CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: JOURNAL
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_LINES_SQL).await?;
        db.execute_unprepared(BALANCE_CHECK_SQL).await?;

        // ============================================================
        // PART 4: VAT
        // ============================================================
        db.execute_unprepared(TAX_DOCUMENTS_SQL).await?;
        db.execute_unprepared(TAX_DOCUMENT_LINES_SQL).await?;
        db.execute_unprepared(VAT_RETURNS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE account_type AS ENUM (
    'asset',
    'liability',
    'equity',
    'revenue',
    'expense',
    'cogs',
    'other_income'
);

CREATE TYPE account_subtype AS ENUM ('current', 'fixed', 'long_term');

CREATE TYPE normal_balance AS ENUM ('debit', 'credit');

CREATE TYPE document_kind AS ENUM ('sales_invoice', 'vendor_bill');

CREATE TYPE document_status AS ENUM ('draft', 'issued', 'paid', 'void');

CREATE TYPE vat_rate AS ENUM ('standard', 'zero_rated', 'exempt');

CREATE TYPE vat_return_status AS ENUM ('draft', 'filed');
";

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    trn CHAR(15) CHECK (trn ~ '^[0-9]{15}$'),
    base_currency CHAR(3) NOT NULL DEFAULT 'AED',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    code VARCHAR(20) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    account_subtype account_subtype,
    normal_balance normal_balance NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (company_id, code)
);

CREATE INDEX idx_accounts_company ON accounts(company_id, code);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    entry_date DATE NOT NULL,
    reference VARCHAR(100) NOT NULL,
    description TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_journal_entries_company_date ON journal_entries(company_id, entry_date);
";

const JOURNAL_LINES_SQL: &str = r"
CREATE TABLE journal_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    entry_date DATE NOT NULL,
    debit BIGINT NOT NULL DEFAULT 0 CHECK (debit >= 0),
    credit BIGINT NOT NULL DEFAULT 0 CHECK (credit >= 0),
    memo TEXT,
    CHECK ((debit > 0 AND credit = 0) OR (credit > 0 AND debit = 0))
);

CREATE INDEX idx_journal_lines_company_date ON journal_lines(company_id, entry_date);
CREATE INDEX idx_journal_lines_account ON journal_lines(account_id);
";

// Deferred so that all lines of an entry can be inserted in one transaction
// before the sums are compared.
const BALANCE_CHECK_SQL: &str = r"
CREATE OR REPLACE FUNCTION check_entry_balance()
RETURNS TRIGGER AS $$
DECLARE
    v_entry_id UUID;
    v_debits BIGINT;
    v_credits BIGINT;
BEGIN
    v_entry_id := COALESCE(NEW.entry_id, OLD.entry_id);

    SELECT COALESCE(SUM(debit), 0), COALESCE(SUM(credit), 0)
    INTO v_debits, v_credits
    FROM journal_lines
    WHERE entry_id = v_entry_id;

    IF v_debits <> v_credits THEN
        RAISE EXCEPTION 'Journal entry % is unbalanced: debits % <> credits %',
            v_entry_id, v_debits, v_credits;
    END IF;

    RETURN NULL;
END;
$$ LANGUAGE plpgsql;

CREATE CONSTRAINT TRIGGER trg_journal_lines_balance
    AFTER INSERT OR UPDATE OR DELETE ON journal_lines
    DEFERRABLE INITIALLY DEFERRED
    FOR EACH ROW EXECUTE FUNCTION check_entry_balance();
";

const TAX_DOCUMENTS_SQL: &str = r"
CREATE TABLE tax_documents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    kind document_kind NOT NULL,
    number VARCHAR(50) NOT NULL,
    counterparty VARCHAR(255) NOT NULL,
    issue_date DATE NOT NULL,
    status document_status NOT NULL DEFAULT 'draft',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (company_id, kind, number)
);

CREATE INDEX idx_tax_documents_company_date ON tax_documents(company_id, issue_date)
    WHERE status IN ('issued', 'paid');
";

const TAX_DOCUMENT_LINES_SQL: &str = r"
CREATE TABLE tax_document_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    document_id UUID NOT NULL REFERENCES tax_documents(id) ON DELETE CASCADE,
    line_no INTEGER NOT NULL,
    description TEXT NOT NULL,
    account_id UUID NOT NULL REFERENCES accounts(id),
    net_amount BIGINT NOT NULL CHECK (net_amount >= 0),
    vat_rate vat_rate NOT NULL,
    UNIQUE (document_id, line_no)
);
";

const VAT_RETURNS_SQL: &str = r"
CREATE TABLE vat_returns (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    period_start DATE NOT NULL,
    period_end DATE NOT NULL,
    output_vat BIGINT NOT NULL,
    input_vat BIGINT NOT NULL,
    net_payable BIGINT NOT NULL,
    status vat_return_status NOT NULL DEFAULT 'draft',
    filed_at TIMESTAMPTZ,
    reference VARCHAR(100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (period_start <= period_end),
    CHECK (net_payable = output_vat - input_vat),
    UNIQUE (company_id, period_start, period_end)
);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS vat_returns;
DROP TABLE IF EXISTS tax_document_lines;
DROP TABLE IF EXISTS tax_documents;
DROP TRIGGER IF EXISTS trg_journal_lines_balance ON journal_lines;
DROP FUNCTION IF EXISTS check_entry_balance();
DROP TABLE IF EXISTS journal_lines;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS accounts;
DROP TABLE IF EXISTS companies;
DROP TYPE IF EXISTS vat_return_status;
DROP TYPE IF EXISTS vat_rate;
DROP TYPE IF EXISTS document_status;
DROP TYPE IF EXISTS document_kind;
DROP TYPE IF EXISTS normal_balance;
DROP TYPE IF EXISTS account_subtype;
DROP TYPE IF EXISTS account_type;
";
