//! Receipt image entity - Ordered photo attachments for a receipt.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receipt image database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipt_images")]
pub struct Model {
    /// Unique identifier for the image row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Receipt this image belongs to
    pub receipt_id: i64,
    /// Object-store path of the blob
    pub storage_path: String,
    /// 1-based sort position within the receipt's image set
    pub position: i32,
}

/// Defines relationships between `ReceiptImage` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each image belongs to one receipt
    #[sea_orm(
        belongs_to = "super::receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::receipt::Column::Id"
    )]
    Receipt,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
