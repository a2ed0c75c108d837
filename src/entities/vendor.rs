//! Vendor entity - A stall or business that receipts are attributed to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether the vendor can issue tax invoices.
///
/// This flag only changes guidance copy shown next to status transitions,
/// never the transition graph itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceCapability {
    #[sea_orm(string_value = "supported")]
    Supported,
    #[sea_orm(string_value = "not_supported")]
    NotSupported,
}

/// Vendor database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    /// Unique identifier for the vendor
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who registered the vendor
    pub owner_id: String,
    /// Business name shown in listings and matched by the text filter
    pub name: String,
    /// Stall number within the market, if any
    pub stall_number: Option<String>,
    /// Market the stall belongs to, if any
    pub market_id: Option<i64>,
    /// Tax-invoice capability, guidance copy only
    pub invoice_capability: InvoiceCapability,
}

/// Defines relationships between Vendor and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each vendor may belong to one market
    #[sea_orm(
        belongs_to = "super::market::Entity",
        from = "Column::MarketId",
        to = "super::market::Column::Id"
    )]
    Market,
    /// One vendor has many receipts
    #[sea_orm(has_many = "super::receipt::Entity")]
    Receipts,
}

impl Related<super::market::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Market.def()
    }
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
