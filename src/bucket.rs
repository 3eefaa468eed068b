//! Fixed-capacity buckets: one page of the index.

/// A page of up to `capacity` keys that all share `address` as a prefix.
///
/// Local depth is not stored separately; it is the length of the address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket {
    address: String,
    capacity: usize,
    entries: Vec<String>,
}

impl Bucket {
    /// Create an empty bucket responsible for keys starting with `address`.
    pub fn new(capacity: usize, address: impl Into<String>) -> Self {
        debug_assert!(capacity > 0);
        Self {
            address: address.into(),
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[inline]
    pub fn local_depth(&self) -> usize {
        self.address.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Append `key` if there is room and it belongs to this bucket.
    ///
    /// Returns `false` and leaves the bucket untouched otherwise. Duplicates
    /// are not detected here.
    pub fn try_add(&mut self, key: &str) -> bool {
        if self.is_full() || !key.starts_with(self.address.as_str()) {
            return false;
        }
        self.entries.push(key.to_owned());
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|k| k == key)
    }

    /// Keys in insertion order.
    #[inline]
    pub fn keys(&self) -> &[String] {
        &self.entries
    }

    /// Owned copy of the current entries, unaffected by later mutation.
    pub fn snapshot_keys(&self) -> Vec<String> {
        self.entries.clone()
    }

    /// Split into the `address + "0"` and `address + "1"` children,
    /// redistributing every key by its next bit.
    pub(crate) fn split(&self) -> (Bucket, Bucket) {
        let mut zero = Bucket::new(self.capacity, format!("{}0", self.address));
        let mut one = Bucket::new(self.capacity, format!("{}1", self.address));
        for key in self.snapshot_keys() {
            let placed = zero.try_add(&key) || one.try_add(&key);
            debug_assert!(placed, "key {key} fits neither child of [{}*]", self.address);
        }
        (zero, one)
    }
}
