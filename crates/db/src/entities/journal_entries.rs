//! `SeaORM` Entity for the journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReferenceType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Sequential human-readable number, unique per tenant (e.g. "JE-00001").
    pub entry_number: String,
    pub entry_date: Date,
    pub description: String,
    /// Which business event produced this entry.
    pub reference_type: ReferenceType,
    /// Id of the producing business record, if any.
    pub reference_id: Option<Uuid>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// Always true: this engine only creates already-posted entries.
    pub is_posted: bool,
    pub is_reversed: bool,
    /// The mirror entry, set exactly once by the reversal engine.
    pub reversed_by_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_entry_lines::Entity")]
    JournalEntryLines,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ReversedById",
        to = "Column::Id"
    )]
    ReversedBy,
}

impl Related<super::journal_entry_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntryLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
