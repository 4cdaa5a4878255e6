//! `SeaORM` entity definitions.

pub mod accounts;
pub mod companies;
pub mod journal_entries;
pub mod journal_lines;
pub mod sea_orm_active_enums;
pub mod tax_document_lines;
pub mod tax_documents;
pub mod vat_returns;
