//! Mockcode Storage Library
//!
//! Durable byte storage for uploaded mockups.
//!
//! # Storage key format
//!
//! Keys are flat filenames: `{unix_millis}-{token}-{sanitized original name}`,
//! where `token` is eight hex characters of a random UUID. Keys must not
//! contain `..` or a leading `/`.
//!
//! Uploads are write-once and are never deleted here; retention is left to
//! whoever operates the uploads directory.

pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::sanitize_filename;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
