//! External collaborator seams.
//!
//! The hosting platform provides authentication, row storage, and object
//! storage. Row storage is consumed directly through `SeaORM`; the other two
//! are consumed through the traits in this module so that core logic never
//! depends on a concrete provider.

/// Authentication provider seam and a single-session local implementation
pub mod auth;
/// Image intake - format sniffing and content-type normalization
pub mod image;
/// Object storage seam with filesystem and in-memory implementations
pub mod object_store;

pub use auth::{AuthProvider, AuthUser, SessionAuth, require_user};
pub use image::{ImageUpload, prepare_image};
pub use object_store::{LocalObjectStore, MemoryObjectStore, ObjectStore};
