//! Core business logic - framework-agnostic receipt operations.
//!
//! Everything that touches the row store is a free async function taking a
//! `&DatabaseConnection`; everything else (filtering, grouping, export
//! composition, status derivation) is a pure function so the hosting UI can
//! call it from any state-management style.

/// Export composer - shareable text blocks from a receipt subset
pub mod export;
/// Filter & grouping engine - pure selection over in-memory listings
pub mod filter;
/// Business profile accessor
pub mod profile;
/// Receipt record accessor - owner-scoped reads and mutations
pub mod receipt;
/// Selection set and bulk status transition controller
pub mod selection;
/// Status vocabulary - lifecycle states, labels, derived status
pub mod status;
/// Vendor accessor
pub mod vendor;
