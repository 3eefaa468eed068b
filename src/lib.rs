//! # ext-hash
//!
//! An in-memory extendible hash index over fixed-length bit-string keys.
//!
//! A directory of `2^global_depth` slots points at fixed-capacity buckets.
//! Slot `i` is addressed by the first `global_depth` bits of a key; several
//! slots may share one bucket. When a bucket overflows it splits on its next
//! key bit, and the directory doubles only when that bucket was already as
//! deep as the directory. The key set is never rehashed as a whole.
//!
//! ## Example
//!
//! ```rust
//! use ext_hash::ExtHash;
//!
//! let mut table = ExtHash::new(2, 4);
//! assert_eq!(table.insert("0010").unwrap(), true);
//! assert_eq!(table.insert("0010").unwrap(), false);
//! table.insert("0111").unwrap();
//! table.insert("1000").unwrap();
//!
//! assert!(table.search("0111"));
//! assert!(!table.search("1111"));
//! assert_eq!(table.global_depth(), 1);
//! println!("{}", table.describe());
//! ```
//!
//! Keys are trusted by the table; validate untrusted input first:
//!
//! ```rust
//! use ext_hash::{validate_key, Error};
//!
//! assert!(validate_key("0110", 4).is_ok());
//! assert!(matches!(validate_key("01", 4), Err(Error::InvalidKey { .. })));
//! ```

#![warn(clippy::all)]

pub mod bucket;
pub mod config;
pub mod error;
pub mod key;
pub mod repl;
pub mod shared;
pub mod snapshot;
pub mod table;

pub use bucket::Bucket;
pub use config::{TableConfig, MAX_KEY_LENGTH};
pub use error::{Error, InvalidKeyReason, Result};
pub use key::{binary_label, validate_key};
pub use shared::SharedExtHash;
pub use snapshot::{SlotView, Snapshot};
pub use table::{ExtHash, TableStats};

#[cfg(test)]
mod proptests;
