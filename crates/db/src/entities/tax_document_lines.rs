//! `SeaORM` Entity for tax_document_lines table.

use super::sea_orm_active_enums::VatRate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tax_document_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub document_id: Uuid,
    pub line_no: i32,
    pub description: String,
    pub account_id: Uuid,
    /// Net amount in fils.
    pub net_amount: i64,
    pub vat_rate: VatRate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tax_documents::Entity",
        from = "Column::DocumentId",
        to = "super::tax_documents::Column::Id"
    )]
    TaxDocuments,
}

impl Related<super::tax_documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaxDocuments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
