//! Bit-string keys.
//!
//! Keys are plain strings over `{0,1}`. The table never validates them on the
//! hot path; callers run [`validate_key`] once at the boundary.

use crate::error::{Error, InvalidKeyReason, Result};

/// Check that `key` is exactly `key_length` characters of `0`/`1`.
///
/// Length is checked before the alphabet, so an over-long key of garbage
/// reports its length first.
pub fn validate_key(key: &str, key_length: usize) -> Result<()> {
    let actual = key.chars().count();
    let reason = if actual > key_length {
        Some(InvalidKeyReason::TooLong {
            expected: key_length,
            actual,
        })
    } else if actual < key_length {
        Some(InvalidKeyReason::TooShort {
            expected: key_length,
            actual,
        })
    } else {
        key.chars()
            .enumerate()
            .find(|&(_, c)| c != '0' && c != '1')
            .map(|(position, found)| InvalidKeyReason::NotABit { found, position })
    };

    match reason {
        Some(reason) => Err(Error::InvalidKey {
            key: key.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Interpret a string of `0`/`1` as a big-endian integer.
///
/// Any byte other than `b'1'` counts as a zero bit.
#[inline]
pub fn prefix_value(bits: &[u8]) -> usize {
    bits.iter()
        .fold(0usize, |acc, &b| (acc << 1) | usize::from(b == b'1'))
}

/// Zero-padded binary label of `index`, `width` characters wide.
///
/// A width of zero yields the empty string, the label of the single slot of
/// a depth-0 directory.
pub fn binary_label(index: usize, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    format!("{index:0width$b}")
}

/// Whether the `width`-bit label of `index` starts with `address`.
///
/// Equivalent to `binary_label(index, width).starts_with(address)` without
/// the allocation.
#[inline]
pub(crate) fn label_has_prefix(index: usize, width: usize, address: &str) -> bool {
    let depth = address.len();
    if depth > width {
        return false;
    }
    (index >> (width - depth)) == prefix_value(address.as_bytes())
}
