//! Receipt record accessor - owner-scoped reads and mutations.
//!
//! Every query here is scoped by the owning user's id; client-supplied
//! ownership is never trusted. Creation is a multi-step action (blob
//! uploads, then one database transaction for the receipt row plus its
//! image rows) with best-effort compensation: if the row insert fails after
//! blobs were uploaded, the just-uploaded blobs are deleted and the
//! original error is returned.

use crate::{
    backend::{ImageUpload, ObjectStore},
    entities::{
        Market, PaymentMethod, Receipt, ReceiptImage, ReceiptKind, ReceiptStatus, TaxType,
        receipt, receipt_image,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Derived VAT for a base amount: 10% rounded half-up when taxed, else 0.
#[must_use]
pub const fn vat_amount(amount: i64, tax_type: TaxType) -> i64 {
    match tax_type {
        TaxType::Tax => (amount + 5) / 10,
        TaxType::TaxFree | TaxType::ZeroRate => 0,
    }
}

/// Derived total: base plus VAT.
#[must_use]
pub const fn total_amount(amount: i64, tax_type: TaxType) -> i64 {
    amount + vat_amount(amount, tax_type)
}

/// Input for creating a receipt.
#[derive(Debug, Clone)]
pub struct ReceiptDraft {
    /// Owning user id (from the session, never from the client payload)
    pub owner_id: String,
    /// Vendor the purchase is attributed to
    pub vendor_id: i64,
    /// Base amount in integer currency units
    pub amount: i64,
    /// Tax treatment
    pub tax_type: TaxType,
    /// Payment method
    pub payment_method: PaymentMethod,
    /// Standard or simple
    pub receipt_type: ReceiptKind,
    /// Initial status; ignored for simple receipts, which store `Completed`
    pub status: ReceiptStatus,
    /// Purchase date
    pub receipt_date: NaiveDate,
    /// Deposit date; kept only when paying by transfer
    pub deposit_date: Option<NaiveDate>,
    /// Optional memo
    pub memo: Option<String>,
}

/// Partial update for an existing receipt. `None` fields are left as-is;
/// the nested options on `deposit_date` and `memo` distinguish "leave"
/// from "clear".
#[derive(Debug, Clone, Default)]
pub struct ReceiptPatch {
    pub amount: Option<i64>,
    pub tax_type: Option<TaxType>,
    pub payment_method: Option<PaymentMethod>,
    pub receipt_type: Option<ReceiptKind>,
    pub status: Option<ReceiptStatus>,
    pub receipt_date: Option<NaiveDate>,
    pub deposit_date: Option<Option<NaiveDate>>,
    pub memo: Option<Option<String>>,
}

/// A receipt joined with its vendor's display fields, the unit the filter
/// and grouping engine works on.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptRow {
    /// The receipt itself
    pub receipt: receipt::Model,
    /// Vendor name, matched by the text filter
    pub vendor_name: String,
    /// Stall number, also matched by the text filter
    pub stall_number: Option<String>,
    /// Market name, also matched by the text filter
    pub market_name: Option<String>,
}

fn validate_draft(draft: &ReceiptDraft, image_count: usize) -> Result<()> {
    if draft.amount <= 0 {
        return Err(Error::Validation {
            message: "amount must be positive".to_string(),
        });
    }
    if image_count == 0 {
        return Err(Error::Validation {
            message: "at least one receipt image is required".to_string(),
        });
    }
    if draft.payment_method == PaymentMethod::Transfer && draft.deposit_date.is_none() {
        return Err(Error::Validation {
            message: "deposit date is required for transfer payments".to_string(),
        });
    }
    Ok(())
}

/// Creates a receipt with its attached images.
///
/// Blobs are uploaded first; the receipt row and its image rows are then
/// inserted in one database transaction. Any failure after an upload
/// succeeded triggers best-effort deletion of the uploaded blobs (logged,
/// never propagated) before the original error is returned.
pub async fn create_receipt(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    draft: ReceiptDraft,
    images: Vec<ImageUpload>,
) -> Result<receipt::Model> {
    validate_draft(&draft, images.len())?;

    // Vendor must exist and belong to the same owner
    crate::core::vendor::get_vendor(db, draft.vendor_id, &draft.owner_id).await?;

    let created_at = Utc::now();
    let stamp = created_at.timestamp_millis();

    let mut uploaded: Vec<String> = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        let path = format!(
            "receipts/{}/{}-{}.{}",
            draft.owner_id,
            stamp,
            index + 1,
            image.extension
        );
        if let Err(e) = store.upload(&path, &image.bytes, image.content_type).await {
            rollback_uploads(store, &uploaded).await;
            return Err(e);
        }
        uploaded.push(path);
    }

    match insert_rows(db, &draft, created_at, &uploaded).await {
        Ok(model) => Ok(model),
        Err(e) => {
            rollback_uploads(store, &uploaded).await;
            Err(e)
        }
    }
}

async fn insert_rows(
    db: &DatabaseConnection,
    draft: &ReceiptDraft,
    created_at: DateTime<Utc>,
    paths: &[String],
) -> Result<receipt::Model> {
    // Simple receipts are auto-completed at creation; deposit dates only
    // make sense for transfers.
    let stored_status = if draft.receipt_type == ReceiptKind::Simple {
        ReceiptStatus::Completed
    } else {
        draft.status
    };
    let deposit_date = if draft.payment_method == PaymentMethod::Transfer {
        draft.deposit_date
    } else {
        None
    };

    let txn = db.begin().await?;

    let inserted = receipt::ActiveModel {
        owner_id: Set(draft.owner_id.clone()),
        vendor_id: Set(draft.vendor_id),
        amount: Set(draft.amount),
        tax_type: Set(draft.tax_type),
        payment_method: Set(draft.payment_method),
        receipt_type: Set(draft.receipt_type),
        status: Set(stored_status),
        receipt_date: Set(Some(draft.receipt_date)),
        deposit_date: Set(deposit_date),
        memo: Set(draft.memo.clone()),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (index, path) in paths.iter().enumerate() {
        receipt_image::ActiveModel {
            receipt_id: Set(inserted.id),
            storage_path: Set(path.clone()),
            position: Set(i32::try_from(index + 1).unwrap_or(i32::MAX)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(inserted)
}

async fn rollback_uploads(store: &dyn ObjectStore, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    if let Err(e) = store.remove(paths).await {
        warn!(
            count = paths.len(),
            "failed to clean up uploaded receipt images after aborted save: {e}"
        );
    }
}

/// Fetches one receipt, scoped to the owner.
///
/// Absent and not-owned are indistinguishable here on purpose: reads never
/// reveal whether someone else's receipt id exists.
pub async fn get_receipt(
    db: &DatabaseConnection,
    receipt_id: i64,
    owner_id: &str,
) -> Result<receipt::Model> {
    Receipt::find_by_id(receipt_id)
        .filter(receipt::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or(Error::ReceiptNotFound { id: receipt_id })
}

/// Looks a receipt up for mutation, distinguishing "absent" from "owned by
/// someone else" so the action layer can surface an auth failure.
async fn find_owned(
    db: &DatabaseConnection,
    receipt_id: i64,
    owner_id: &str,
) -> Result<receipt::Model> {
    match Receipt::find_by_id(receipt_id).one(db).await? {
        Some(r) if r.owner_id == owner_id => Ok(r),
        Some(_) => Err(Error::NotOwner { receipt_id }),
        None => Err(Error::ReceiptNotFound { id: receipt_id }),
    }
}

/// Applies a partial update, re-validating the invariants on the patched
/// values. Switching away from transfer clears the deposit date.
pub async fn update_receipt(
    db: &DatabaseConnection,
    receipt_id: i64,
    owner_id: &str,
    patch: ReceiptPatch,
) -> Result<receipt::Model> {
    let current = find_owned(db, receipt_id, owner_id).await?;

    let amount = patch.amount.unwrap_or(current.amount);
    let tax_type = patch.tax_type.unwrap_or(current.tax_type);
    let payment_method = patch.payment_method.unwrap_or(current.payment_method);
    let receipt_type = patch.receipt_type.unwrap_or(current.receipt_type);
    let status = patch.status.unwrap_or(current.status);
    let receipt_date = patch.receipt_date.or(current.receipt_date);
    let deposit_date = patch.deposit_date.unwrap_or(current.deposit_date);
    let memo = patch.memo.unwrap_or_else(|| current.memo.clone());

    if amount <= 0 {
        return Err(Error::Validation {
            message: "amount must be positive".to_string(),
        });
    }
    let deposit_date = if payment_method == PaymentMethod::Transfer {
        if deposit_date.is_none() {
            return Err(Error::Validation {
                message: "deposit date is required for transfer payments".to_string(),
            });
        }
        deposit_date
    } else {
        None
    };

    let mut active: receipt::ActiveModel = current.into();
    active.amount = Set(amount);
    active.tax_type = Set(tax_type);
    active.payment_method = Set(payment_method);
    active.receipt_type = Set(receipt_type);
    active.status = Set(status);
    active.receipt_date = Set(receipt_date);
    active.deposit_date = Set(deposit_date);
    active.memo = Set(memo);

    active.update(db).await.map_err(Into::into)
}

/// Returns a receipt's images in display order.
pub async fn get_images(
    db: &DatabaseConnection,
    receipt_id: i64,
    owner_id: &str,
) -> Result<Vec<receipt_image::Model>> {
    get_receipt(db, receipt_id, owner_id).await?;
    ReceiptImage::find()
        .filter(receipt_image::Column::ReceiptId.eq(receipt_id))
        .order_by_asc(receipt_image::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes every image whose storage path is not in `keep_paths`.
///
/// A receipt must keep at least one image. Blob deletion is best-effort;
/// the rows are the source of truth and a stale blob is only wasted space.
pub async fn prune_images(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    receipt_id: i64,
    owner_id: &str,
    keep_paths: &[String],
) -> Result<()> {
    find_owned(db, receipt_id, owner_id).await?;

    let images = ReceiptImage::find()
        .filter(receipt_image::Column::ReceiptId.eq(receipt_id))
        .all(db)
        .await?;

    let keep: HashSet<&str> = keep_paths.iter().map(String::as_str).collect();
    let removed: Vec<String> = images
        .iter()
        .filter(|image| !keep.contains(image.storage_path.as_str()))
        .map(|image| image.storage_path.clone())
        .collect();

    if removed.len() == images.len() {
        return Err(Error::Validation {
            message: "a receipt must keep at least one image".to_string(),
        });
    }
    if removed.is_empty() {
        return Ok(());
    }

    ReceiptImage::delete_many()
        .filter(receipt_image::Column::ReceiptId.eq(receipt_id))
        .filter(receipt_image::Column::StoragePath.is_in(removed.clone()))
        .exec(db)
        .await?;

    if let Err(e) = store.remove(&removed).await {
        warn!(count = removed.len(), "failed to delete pruned image blobs: {e}");
    }
    Ok(())
}

/// Lists a vendor's receipts joined with the vendor's display fields,
/// newest first.
pub async fn list_for_vendor(
    db: &DatabaseConnection,
    vendor_id: i64,
    owner_id: &str,
) -> Result<Vec<ReceiptRow>> {
    let vendor = crate::core::vendor::get_vendor(db, vendor_id, owner_id).await?;
    let market_name = match vendor.market_id {
        Some(market_id) => Market::find_by_id(market_id)
            .one(db)
            .await?
            .map(|market| market.name),
        None => None,
    };

    let receipts = Receipt::find()
        .filter(receipt::Column::VendorId.eq(vendor_id))
        .filter(receipt::Column::OwnerId.eq(owner_id))
        .order_by_desc(receipt::Column::CreatedAt)
        .order_by_desc(receipt::Column::Id)
        .all(db)
        .await?;

    Ok(receipts
        .into_iter()
        .map(|r| ReceiptRow {
            receipt: r,
            vendor_name: vendor.name.clone(),
            stall_number: vendor.stall_number.clone(),
            market_name: market_name.clone(),
        })
        .collect())
}

/// Lists every receipt the owner has, across vendors, newest first.
pub async fn list_for_owner(db: &DatabaseConnection, owner_id: &str) -> Result<Vec<ReceiptRow>> {
    let vendors: HashMap<i64, crate::entities::vendor::Model> =
        crate::core::vendor::list_vendors(db, owner_id)
            .await?
            .into_iter()
            .map(|v| (v.vendor.id, v.vendor))
            .collect();
    let markets: HashMap<i64, String> = Market::find()
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();

    let receipts = Receipt::find()
        .filter(receipt::Column::OwnerId.eq(owner_id))
        .order_by_desc(receipt::Column::CreatedAt)
        .order_by_desc(receipt::Column::Id)
        .all(db)
        .await?;

    Ok(receipts
        .into_iter()
        .map(|r| {
            let vendor = vendors.get(&r.vendor_id);
            ReceiptRow {
                vendor_name: vendor.map(|v| v.name.clone()).unwrap_or_default(),
                stall_number: vendor.and_then(|v| v.stall_number.clone()),
                market_name: vendor
                    .and_then(|v| v.market_id)
                    .and_then(|id| markets.get(&id).cloned()),
                receipt: r,
            }
        })
        .collect())
}

/// Moves every listed receipt to `new_status` in one batched statement.
///
/// Callers treat this as all-or-nothing: in-memory state is only mutated
/// after this returns `Ok`. Ids owned by someone else are silently ignored
/// by the owner scoping.
pub async fn bulk_update_status(
    db: &DatabaseConnection,
    receipt_ids: &[i64],
    new_status: ReceiptStatus,
    owner_id: &str,
) -> Result<()> {
    if receipt_ids.is_empty() {
        return Ok(());
    }
    Receipt::update_many()
        .set(receipt::ActiveModel {
            status: Set(new_status),
            ..Default::default()
        })
        .filter(receipt::Column::Id.is_in(receipt_ids.iter().copied()))
        .filter(receipt::Column::OwnerId.eq(owner_id))
        .exec(db)
        .await?;
    Ok(())
}
