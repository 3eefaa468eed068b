//! Structural snapshots of a table, for display.
//!
//! A [`Snapshot`] is a detached copy: it stays valid after the table it came
//! from is mutated or dropped.

use std::fmt;

use crate::bucket::Bucket;
use crate::key::binary_label;

/// One directory slot and the bucket it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    /// Zero-padded binary slot index, `global_depth` characters wide
    pub label: String,
    /// Address of the owning bucket
    pub address: String,
    /// Local depth of the owning bucket
    pub local_depth: usize,
    /// Bucket contents in insertion order, padded with `None` up to capacity
    pub entries: Vec<Option<String>>,
}

impl SlotView {
    pub(crate) fn new(index: usize, global_depth: usize, bucket: &Bucket) -> Self {
        let mut entries: Vec<Option<String>> = bucket.keys().iter().cloned().map(Some).collect();
        entries.resize(bucket.capacity(), None);
        Self {
            label: binary_label(index, global_depth),
            address: bucket.address().to_owned(),
            local_depth: bucket.local_depth(),
            entries,
        }
    }
}

/// The whole directory, slot by slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub global_depth: usize,
    pub slots: Vec<SlotView>,
}

impl fmt::Display for SlotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Local({})[{}*] = [",
            self.label, self.local_depth, self.address
        )?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(entry.as_deref().unwrap_or("null"))?;
        }
        f.write_str("]")
    }
}

/// Renders `Global(d)` followed by one line per slot, no trailing newline.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Global({})", self.global_depth)?;
        for slot in &self.slots {
            write!(f, "\n{slot}")?;
        }
        Ok(())
    }
}
