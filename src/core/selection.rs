//! Selection set and bulk status transition controller.
//!
//! A page instance owns one [`BulkTransition`] per listing; there is no
//! process-wide selection state. The controller enforces the same-status
//! invariant on entry, stages a pending target without touching the row
//! store, and commits everything in a single batched update. In-memory
//! receipt state is only mutated after the backend confirmed the update,
//! so a failed commit leaves both the rows and the selection untouched.

use crate::core::receipt::bulk_update_status;
use crate::core::status::label;
use crate::entities::{ReceiptStatus, receipt};
use crate::errors::{Error, Result};
use sea_orm::DatabaseConnection;

/// In-memory selection of same-status receipts plus a staged target status.
#[derive(Debug, Default)]
pub struct BulkTransition {
    selected: Vec<i64>,
    shared_status: Option<ReceiptStatus>,
    pending_target: Option<ReceiptStatus>,
    in_flight: bool,
}

impl BulkTransition {
    /// Creates an empty controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected receipt ids, in the order they were added.
    #[must_use]
    pub fn selected(&self) -> &[i64] {
        &self.selected
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The status every member currently shares, if the set is non-empty.
    #[must_use]
    pub const fn shared_status(&self) -> Option<ReceiptStatus> {
        self.shared_status
    }

    /// The staged target status, if any.
    #[must_use]
    pub const fn pending_target(&self) -> Option<ReceiptStatus> {
        self.pending_target
    }

    /// True while a commit is running; the confirm control renders disabled.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Adds or removes a receipt from the selection.
    ///
    /// `status` is the receipt's effective status as currently displayed.
    /// Removal is always allowed; adding a receipt whose status differs
    /// from the existing members fails with
    /// [`Error::SelectionStatusMismatch`] and leaves the set unchanged.
    pub fn toggle(&mut self, receipt_id: i64, status: ReceiptStatus) -> Result<()> {
        if let Some(index) = self.selected.iter().position(|&id| id == receipt_id) {
            self.selected.remove(index);
            if self.selected.is_empty() {
                self.shared_status = None;
                self.pending_target = None;
            }
            return Ok(());
        }

        match self.shared_status {
            Some(shared) if shared != status => Err(Error::SelectionStatusMismatch {
                expected: label(shared).to_string(),
                found: label(status).to_string(),
            }),
            _ => {
                self.shared_status = Some(status);
                self.selected.push(receipt_id);
                Ok(())
            }
        }
    }

    /// Stages a target status for the next commit. Mutates nothing remote;
    /// requires a non-empty selection.
    pub fn set_pending_target(&mut self, status: ReceiptStatus) -> Result<()> {
        if self.selected.is_empty() {
            return Err(Error::SelectionEmpty);
        }
        self.pending_target = Some(status);
        Ok(())
    }

    /// Drops the whole selection and any staged target.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.shared_status = None;
        self.pending_target = None;
    }

    /// Commits the staged transition in one batched update.
    ///
    /// On success every selected receipt in `receipts` gets its stored
    /// status updated in memory and the controller resets completely. On
    /// failure the selection and pending target stay intact so the user
    /// can retry; the backend error is returned as-is.
    pub async fn commit(
        &mut self,
        db: &DatabaseConnection,
        owner_id: &str,
        receipts: &mut [receipt::Model],
    ) -> Result<()> {
        if self.in_flight {
            return Err(Error::CommitInFlight);
        }
        let Some(shared) = self.shared_status else {
            return Err(Error::SelectionEmpty);
        };
        let Some(target) = self.pending_target else {
            return Err(Error::TargetUnchanged);
        };
        if target == shared {
            return Err(Error::TargetUnchanged);
        }

        self.in_flight = true;
        let result = bulk_update_status(db, &self.selected, target, owner_id).await;
        self.in_flight = false;

        result?;

        for receipt in receipts.iter_mut() {
            if self.selected.contains(&receipt.id) {
                receipt.status = target;
            }
        }
        self.clear();
        Ok(())
    }
}
