//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod market;
pub mod profile;
pub mod receipt;
pub mod receipt_image;
pub mod vendor;

// Re-export specific types to avoid conflicts
pub use market::{Column as MarketColumn, Entity as Market, Model as MarketModel};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
pub use receipt::{
    Column as ReceiptColumn, Entity as Receipt, Model as ReceiptModel, PaymentMethod, ReceiptKind,
    ReceiptStatus, TaxType,
};
pub use receipt_image::{
    Column as ReceiptImageColumn, Entity as ReceiptImage, Model as ReceiptImageModel,
};
pub use vendor::{Column as VendorColumn, Entity as Vendor, InvoiceCapability, Model as VendorModel};
