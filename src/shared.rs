//! Thread-safe wrapper: one writer or many readers.

use parking_lot::RwLock;

use crate::config::TableConfig;
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::table::{ExtHash, TableStats};

/// An [`ExtHash`] behind a reader-writer lock.
///
/// `insert` holds the write lock for its whole split/retry sequence, so
/// readers never observe a directory mid-split or mid-doubling.
#[derive(Debug)]
pub struct SharedExtHash {
    inner: RwLock<ExtHash>,
}

impl SharedExtHash {
    pub fn new(bucket_capacity: usize, key_length: usize) -> Self {
        Self::from_table(ExtHash::new(bucket_capacity, key_length))
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Ok(Self::from_table(ExtHash::with_config(config)?))
    }

    pub fn from_table(table: ExtHash) -> Self {
        Self {
            inner: RwLock::new(table),
        }
    }

    pub fn insert(&self, key: &str) -> Result<bool> {
        self.inner.write().insert(key)
    }

    pub fn search(&self, key: &str) -> bool {
        self.inner.read().search(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> TableStats {
        self.inner.read().stats()
    }

    pub fn describe(&self) -> Snapshot {
        self.inner.read().describe()
    }

    /// Unwrap the table, consuming the lock.
    pub fn into_inner(self) -> ExtHash {
        self.inner.into_inner()
    }
}

impl From<ExtHash> for SharedExtHash {
    fn from(table: ExtHash) -> Self {
        Self::from_table(table)
    }
}
