//! Error types for the `ext-hash` crate.

/// Why a key was rejected at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidKeyReason {
    /// The key has more characters than the table's key length.
    #[error("Key exceeds maximum length of {expected}")]
    TooLong {
        /// Configured key length.
        expected: usize,
        /// Length of the rejected key.
        actual: usize,
    },

    /// The key has fewer characters than the table's key length.
    #[error("Key must be exactly {expected} characters long")]
    TooShort {
        /// Configured key length.
        expected: usize,
        /// Length of the rejected key.
        actual: usize,
    },

    /// The key contains something other than `0` or `1`.
    #[error("Key may only contain '0' and '1' (found {found:?} at position {position})")]
    NotABit {
        /// Offending character.
        found: char,
        /// Character index of the offending character.
        position: usize,
    },
}

/// Errors produced by the table and its boundary checks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A key failed length or alphabet validation.
    #[error("{reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// What was wrong with it.
        reason: InvalidKeyReason,
    },

    /// The addressed bucket is full and already discriminates on every key
    /// bit, so it cannot be split any further.
    #[error("bucket [{address}*] is full at maximum depth {depth}, cannot place key {key}")]
    CapacityExhausted {
        /// The key that could not be placed.
        key: String,
        /// Address of the full bucket.
        address: String,
        /// Local depth of the full bucket (equal to the key length).
        depth: usize,
    },

    /// Table construction parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, Error>;
