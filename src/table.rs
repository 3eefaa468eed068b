//! The extendible hash directory.
//!
//! Buckets live in an arena and the directory stores arena indices, so many
//! slots can alias one bucket and identity comparison is index equality.
//! Splitting a bucket reuses its arena index for the `0` child and appends
//! the `1` child, so every arena entry is referenced by at least one slot.

use tracing::{debug, trace, warn};

use crate::bucket::Bucket;
use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::key::{label_has_prefix, prefix_value};
use crate::snapshot::{Snapshot, SlotView};

/// Index of a bucket in the table's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct BucketId(u32);

impl BucketId {
    #[inline]
    fn new(idx: usize) -> Self {
        debug_assert!(idx <= u32::MAX as usize);
        Self(idx as u32)
    }

    #[inline]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Structural counters for a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Number of distinct keys stored
    pub keys: usize,
    /// Number of live buckets
    pub buckets: usize,
    /// Number of directory slots (`2^global_depth`)
    pub slots: usize,
    /// Current global depth
    pub global_depth: usize,
    /// Deepest local depth of any bucket
    pub max_local_depth: usize,
    /// Bucket splits performed so far
    pub splits: u64,
    /// Directory doublings performed so far
    pub doublings: u64,
}

/// An in-memory extendible hash index over fixed-length bit-string keys.
///
/// Keys passed to [`insert`](Self::insert) and [`search`](Self::search) are
/// assumed to be exactly `key_length` characters of `0`/`1`; check them with
/// [`validate_key`](crate::validate_key) at the boundary.
#[derive(Clone, Debug)]
pub struct ExtHash {
    global_depth: usize,
    /// `2^global_depth` entries, possibly aliasing.
    pub(crate) slots: Vec<BucketId>,
    /// Live buckets only.
    pub(crate) buckets: Vec<Bucket>,
    bucket_capacity: usize,
    key_length: usize,
    len: usize,
    splits: u64,
    doublings: u64,
}

impl ExtHash {
    /// Create an empty table.
    ///
    /// # Panics
    ///
    /// Panics if the parameters fail [`TableConfig::validate`]. Use
    /// [`with_config`](Self::with_config) to get an error instead.
    pub fn new(bucket_capacity: usize, key_length: usize) -> Self {
        match Self::with_config(TableConfig::new(bucket_capacity, key_length)) {
            Ok(table) => table,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create an empty table after validating `config`.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            global_depth: 0,
            slots: vec![BucketId::new(0)],
            buckets: vec![Bucket::new(config.bucket_capacity, "")],
            bucket_capacity: config.bucket_capacity,
            key_length: config.key_length,
            len: 0,
            splits: 0,
            doublings: 0,
        })
    }

    #[inline]
    pub fn global_depth(&self) -> usize {
        self.global_depth
    }

    #[inline]
    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    #[inline]
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn config(&self) -> TableConfig {
        TableConfig::new(self.bucket_capacity, self.key_length)
    }

    /// Slot index addressed by the first `global_depth` bits of `key`.
    pub fn directory_index(&self, key: &str) -> usize {
        if self.global_depth == 0 {
            return 0;
        }
        debug_assert!(
            key.len() >= self.global_depth,
            "key {key} is shorter than global depth {}",
            self.global_depth
        );
        let bits = key.as_bytes();
        prefix_value(&bits[..bits.len().min(self.global_depth)])
    }

    #[inline]
    fn bucket_for(&self, key: &str) -> (BucketId, &Bucket) {
        let id = self.slots[self.directory_index(key)];
        (id, &self.buckets[id.idx()])
    }

    pub fn search(&self, key: &str) -> bool {
        self.bucket_for(key).1.contains(key)
    }

    /// Insert `key`, splitting buckets and doubling the directory as needed.
    ///
    /// Returns `Ok(false)` without touching the table if the key is already
    /// present. Fails with [`Error::CapacityExhausted`] if the addressed
    /// bucket is full and already as deep as the key is long; splits done
    /// before that point are kept and the directory stays consistent.
    pub fn insert(&mut self, key: &str) -> Result<bool> {
        let (_, start) = self.bucket_for(key);
        if start.contains(key) {
            trace!(key, "duplicate insert ignored");
            return Ok(false);
        }

        // Each failed attempt deepens the target bucket by one bit.
        let attempts = self.key_length.saturating_sub(start.local_depth()) + 1;
        for _ in 0..attempts {
            let (id, _) = self.bucket_for(key);
            let bucket = &mut self.buckets[id.idx()];
            if bucket.try_add(key) {
                self.len += 1;
                trace!(key, address = bucket.address(), "inserted");
                return Ok(true);
            }
            if bucket.local_depth() >= self.key_length {
                break;
            }
            self.split(id);
        }

        let (_, bucket) = self.bucket_for(key);
        warn!(
            key,
            address = bucket.address(),
            depth = bucket.local_depth(),
            "bucket full at maximum depth"
        );
        Err(Error::CapacityExhausted {
            key: key.to_owned(),
            address: bucket.address().to_owned(),
            depth: bucket.local_depth(),
        })
    }

    /// Replace bucket `id` with its two children, doubling first if the
    /// directory has no spare bit to tell them apart.
    fn split(&mut self, id: BucketId) {
        if self.buckets[id.idx()].local_depth() == self.global_depth {
            self.double();
        }

        let (zero, one) = self.buckets[id.idx()].split();
        let one_id = BucketId::new(self.buckets.len());
        let width = self.global_depth;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if *slot == id && !label_has_prefix(i, width, zero.address()) {
                *slot = one_id;
            }
        }

        debug!(
            zero = zero.address(),
            zero_keys = zero.len(),
            one = one.address(),
            one_keys = one.len(),
            local_depth = zero.local_depth(),
            "split bucket"
        );
        self.buckets[id.idx()] = zero;
        self.buckets.push(one);
        self.splits += 1;
    }

    /// Double the directory: old slot `i` becomes slots `2i` and `2i + 1`.
    fn double(&mut self) {
        let doubled: Vec<BucketId> = self.slots.iter().flat_map(|&id| [id, id]).collect();
        self.slots = doubled;
        self.global_depth += 1;
        self.doublings += 1;
        debug!(
            global_depth = self.global_depth,
            slots = self.slots.len(),
            "doubled directory"
        );
    }

    /// All stored keys, bucket by bucket.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.buckets
            .iter()
            .flat_map(|b| b.keys().iter().map(String::as_str))
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            keys: self.len,
            buckets: self.buckets.len(),
            slots: self.slots.len(),
            global_depth: self.global_depth,
            max_local_depth: self
                .buckets
                .iter()
                .map(Bucket::local_depth)
                .max()
                .unwrap_or(0),
            splits: self.splits,
            doublings: self.doublings,
        }
    }

    /// Structural view of every slot, for display.
    pub fn describe(&self) -> Snapshot {
        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, id)| SlotView::new(i, self.global_depth, &self.buckets[id.idx()]))
            .collect();
        Snapshot {
            global_depth: self.global_depth,
            slots,
        }
    }
}
