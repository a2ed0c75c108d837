//! Shared test utilities for `Stallbook`.
//!
//! Helpers for setting up in-memory test databases and building test
//! entities with sensible defaults.

use crate::{
    backend::ImageUpload,
    core::{receipt::ReceiptDraft, receipt::ReceiptRow, vendor::create_vendor},
    entities,
    entities::{InvoiceCapability, PaymentMethod, ReceiptKind, ReceiptStatus, TaxType},
    errors::Result,
};
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a market with the given name.
pub async fn create_test_market(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::market::Model> {
    entities::market::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a vendor with sensible defaults: no stall number, no market,
/// invoice capability supported.
pub async fn create_test_vendor(
    db: &DatabaseConnection,
    owner_id: &str,
    name: &str,
) -> Result<entities::vendor::Model> {
    create_vendor(
        db,
        owner_id.to_string(),
        name.to_string(),
        None,
        None,
        InvoiceCapability::Supported,
    )
    .await
}

/// Sets up a complete test environment with one vendor for "owner-1".
/// Returns (db, vendor) for common test scenarios.
pub async fn setup_with_vendor() -> Result<(DatabaseConnection, entities::vendor::Model)> {
    let db = setup_test_db().await?;
    let vendor = create_test_vendor(&db, "owner-1", "Kim's Produce").await?;
    Ok((db, vendor))
}

/// A valid receipt draft with sensible defaults.
///
/// # Defaults
/// * `amount`: 45000, taxed
/// * `payment_method`: cash
/// * `receipt_type`: standard, status uploaded
/// * `receipt_date`: 2025-03-05
#[must_use]
pub fn test_draft(owner_id: &str, vendor_id: i64) -> ReceiptDraft {
    ReceiptDraft {
        owner_id: owner_id.to_string(),
        vendor_id,
        amount: 45000,
        tax_type: TaxType::Tax,
        payment_method: PaymentMethod::Cash,
        receipt_type: ReceiptKind::Standard,
        status: ReceiptStatus::Uploaded,
        receipt_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap_or_default(),
        deposit_date: None,
        memo: None,
    }
}

/// A minimal valid JPEG payload for upload tests.
#[must_use]
pub fn test_image() -> ImageUpload {
    ImageUpload {
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10],
        content_type: "image/jpeg",
        extension: "jpg",
    }
}

/// An in-memory receipt model for pure-function tests; never persisted.
///
/// Fixed creation timestamp so string outputs stay reproducible.
#[must_use]
pub fn sample_receipt(id: i64) -> entities::receipt::Model {
    entities::receipt::Model {
        id,
        owner_id: "owner-1".to_string(),
        vendor_id: 1,
        amount: 10000,
        tax_type: TaxType::Tax,
        payment_method: PaymentMethod::Cash,
        receipt_type: ReceiptKind::Standard,
        status: ReceiptStatus::Uploaded,
        receipt_date: Some(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap_or_default()),
        deposit_date: None,
        memo: None,
        created_at: Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap(),
    }
}

/// An in-memory listing row around [`sample_receipt`].
#[must_use]
pub fn sample_row(id: i64, vendor_name: &str) -> ReceiptRow {
    ReceiptRow {
        receipt: sample_receipt(id),
        vendor_name: vendor_name.to_string(),
        stall_number: None,
        market_name: None,
    }
}
