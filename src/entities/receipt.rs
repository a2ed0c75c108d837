//! Receipt entity - One purchase record awaiting tax-invoice processing.
//!
//! Each receipt belongs to a vendor, is scoped to its owning user, and carries
//! the financial classification (amount, tax type, payment method) plus the
//! lifecycle status. VAT and totals are derived, never stored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a receipt.
///
/// Transitions are unordered: any status may move to any other directly.
/// The stored value is a user choice; display logic must go through
/// [`crate::core::status::effective_status`], which overrides it to
/// `Completed` for simple receipts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    /// Photo uploaded, nothing requested yet
    #[sea_orm(string_value = "uploaded")]
    Uploaded,
    /// Tax invoice requested from the vendor
    #[sea_orm(string_value = "requested")]
    Requested,
    /// Vendor or accountant flagged a problem to fix
    #[sea_orm(string_value = "needs_fix")]
    NeedsFix,
    /// Invoice issued, nothing left to do
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Tax treatment of the purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum TaxType {
    /// Exempt goods, no VAT
    #[sea_orm(string_value = "tax_free")]
    TaxFree,
    /// Standard 10% VAT
    #[sea_orm(string_value = "tax")]
    Tax,
    /// Zero-rated, VAT charged at 0%
    #[sea_orm(string_value = "zero_rate")]
    ZeroRate,
}

/// How the purchase was paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank transfer; requires a deposit date
    #[sea_orm(string_value = "transfer")]
    Transfer,
    /// Outstanding payable, settled later
    #[sea_orm(string_value = "payable")]
    Payable,
}

/// Kind of receipt document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ReceiptKind {
    /// Regular receipt that goes through the full lifecycle
    #[sea_orm(string_value = "standard")]
    Standard,
    /// Simple (cash-register) receipt; auto-completed, status control disabled
    #[sea_orm(string_value = "simple")]
    Simple,
}

/// Receipt database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipts")]
pub struct Model {
    /// Unique identifier for the receipt
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who submitted the receipt; every query is scoped by this
    pub owner_id: String,
    /// Vendor the purchase is attributed to
    pub vendor_id: i64,
    /// Base amount in integer currency units, always positive
    pub amount: i64,
    /// Tax treatment; drives the derived VAT and total
    pub tax_type: TaxType,
    /// Payment method; `Transfer` requires `deposit_date`
    pub payment_method: PaymentMethod,
    /// Standard or simple; simple receipts are effectively completed
    pub receipt_type: ReceiptKind,
    /// Stored lifecycle status (the user's last manual choice)
    pub status: ReceiptStatus,
    /// Purchase date; required on submission, nullable for legacy rows
    pub receipt_date: Option<Date>,
    /// Deposit date, present iff paid by transfer
    pub deposit_date: Option<Date>,
    /// Optional free-text memo
    pub memo: Option<String>,
    /// Submission timestamp, last resort for the effective date
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Receipt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each receipt belongs to one vendor
    #[sea_orm(
        belongs_to = "super::vendor::Entity",
        from = "Column::VendorId",
        to = "super::vendor::Column::Id"
    )]
    Vendor,
    /// One receipt has many attached images
    #[sea_orm(has_many = "super::receipt_image::Entity")]
    Images,
}

impl Related<super::vendor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendor.def()
    }
}

impl Related<super::receipt_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
