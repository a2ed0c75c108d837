//! Status vocabulary - the receipt lifecycle states and their display
//! semantics.
//!
//! The lifecycle has four states and a complete transition graph: the UI
//! offers every status at all times and only disables the active one. The
//! single structural rule lives here as well: simple receipts are always
//! effectively completed, without ever touching the stored status.

use crate::entities::{InvoiceCapability, ReceiptKind, ReceiptStatus, receipt};

/// Every lifecycle status, in display order.
pub const ALL_STATUSES: [ReceiptStatus; 4] = [
    ReceiptStatus::Uploaded,
    ReceiptStatus::Requested,
    ReceiptStatus::NeedsFix,
    ReceiptStatus::Completed,
];

/// The status used for display and business logic.
///
/// Simple receipts are forced to `Completed` regardless of the stored
/// value; the stored value is preserved so switching the receipt back to
/// `Standard` restores the user's last manual choice.
#[must_use]
pub fn effective_status(receipt: &receipt::Model) -> ReceiptStatus {
    if receipt.receipt_type == ReceiptKind::Simple {
        ReceiptStatus::Completed
    } else {
        receipt.status
    }
}

/// Whether the status control must render disabled for this receipt.
#[must_use]
pub const fn status_locked(receipt: &receipt::Model) -> bool {
    matches!(receipt.receipt_type, ReceiptKind::Simple)
}

/// Short display label for a status.
#[must_use]
pub const fn label(status: ReceiptStatus) -> &'static str {
    match status {
        ReceiptStatus::Uploaded => "uploaded",
        ReceiptStatus::Requested => "requested",
        ReceiptStatus::NeedsFix => "needs fix",
        ReceiptStatus::Completed => "completed",
    }
}

/// Guidance copy shown next to a transition button.
///
/// The vendor's invoice capability changes the wording only; every
/// transition stays available either way.
#[must_use]
pub const fn transition_guidance(
    capability: InvoiceCapability,
    target: ReceiptStatus,
) -> &'static str {
    match (capability, target) {
        (InvoiceCapability::Supported, ReceiptStatus::Uploaded) => {
            "Receipt saved. Request a tax invoice when you are ready."
        }
        (InvoiceCapability::Supported, ReceiptStatus::Requested) => {
            "Invoice requested. The vendor will issue it from their portal."
        }
        (InvoiceCapability::Supported, ReceiptStatus::NeedsFix) => {
            "Something needs fixing before the vendor can issue the invoice."
        }
        (InvoiceCapability::Supported, ReceiptStatus::Completed) => {
            "Invoice issued. Keep the receipt for your records."
        }
        (InvoiceCapability::NotSupported, ReceiptStatus::Uploaded) => {
            "Receipt saved. This vendor cannot issue tax invoices directly."
        }
        (InvoiceCapability::NotSupported, ReceiptStatus::Requested) => {
            "Request noted. You will need to arrange the invoice outside the vendor portal."
        }
        (InvoiceCapability::NotSupported, ReceiptStatus::NeedsFix) => {
            "Something needs fixing. Contact the vendor directly."
        }
        (InvoiceCapability::NotSupported, ReceiptStatus::Completed) => {
            "Marked completed. Keep the paper receipt as your evidence."
        }
    }
}
