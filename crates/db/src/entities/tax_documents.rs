//! `SeaORM` Entity for tax_documents table (sales invoices and vendor bills).

use super::sea_orm_active_enums::{DocumentKind, DocumentStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tax_documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub kind: DocumentKind,
    pub number: String,
    pub counterparty: String,
    pub issue_date: Date,
    pub status: DocumentStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Companies,
    #[sea_orm(has_many = "super::tax_document_lines::Entity")]
    TaxDocumentLines,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::tax_document_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaxDocumentLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
