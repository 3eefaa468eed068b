//! Table construction parameters.

use crate::error::{Error, Result};

/// Longest supported key.
///
/// A table with capacity-1 buckets can double its directory up to
/// `2^key_length` slots, so this bounds both the slot index width and the
/// directory's worst-case allocation.
pub const MAX_KEY_LENGTH: usize = 32;

/// Configuration for an [`ExtHash`](crate::ExtHash) table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Maximum number of keys per bucket
    pub bucket_capacity: usize,
    /// Exact number of bits in every key
    pub key_length: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bucket_capacity: 4,
            key_length: 8,
        }
    }
}

impl TableConfig {
    pub fn new(bucket_capacity: usize, key_length: usize) -> Self {
        Self {
            bucket_capacity,
            key_length,
        }
    }

    pub fn with_bucket_capacity(mut self, bucket_capacity: usize) -> Self {
        self.bucket_capacity = bucket_capacity;
        self
    }

    pub fn with_key_length(mut self, key_length: usize) -> Self {
        self.key_length = key_length;
        self
    }

    /// Check that both parameters are positive and the key length is
    /// addressable.
    pub fn validate(&self) -> Result<()> {
        if self.bucket_capacity == 0 {
            return Err(Error::InvalidConfig(
                "bucket capacity must be a positive integer".to_owned(),
            ));
        }
        if self.key_length == 0 {
            return Err(Error::InvalidConfig(
                "key length must be a positive integer".to_owned(),
            ));
        }
        if self.key_length > MAX_KEY_LENGTH {
            return Err(Error::InvalidConfig(format!(
                "key length {} exceeds the supported maximum of {MAX_KEY_LENGTH}",
                self.key_length
            )));
        }
        Ok(())
    }
}
