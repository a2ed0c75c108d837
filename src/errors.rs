use thiserror::Error;

/// Unified error type for every fallible operation in the crate.
///
/// Validation and selection failures are values the action layer renders
/// inline; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no authenticated session")]
    NoSession,

    #[error("authentication failed: {message}")]
    Credentials { message: String },

    #[error("receipt {receipt_id} belongs to another account")]
    NotOwner { receipt_id: i64 },

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("receipt not found: {id}")]
    ReceiptNotFound { id: i64 },

    #[error("vendor not found: {id}")]
    VendorNotFound { id: i64 },

    #[error("only receipts with status '{expected}' can join this selection (got '{found}')")]
    SelectionStatusMismatch { expected: String, found: String },

    #[error("no receipts selected")]
    SelectionEmpty,

    #[error("target status matches the current status")]
    TargetUnchanged,

    #[error("a bulk status update is already in progress")]
    CommitInFlight,

    #[error("database error: {0}")]
    Backend(#[from] sea_orm::DbErr),

    #[error("object storage error: {message}")]
    Storage { message: String },

    #[error("image conversion error: {message}")]
    Conversion { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
