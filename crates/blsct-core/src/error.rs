//! Address codec error types.
//!
//! [`AddressError`] covers every way an address string or key buffer can
//! be rejected. Variants are zero-size discriminants -- no payloads -- so
//! the enum is `Copy` and maps 1:1 onto the stable integer codes used
//! across FFI-style boundaries (see [`AddressError::code`]).
//!
//! A malformed address is permanently invalid: none of these errors is
//! retryable, and callers must reject the input rather than attempt any
//! kind of repair.

use std::fmt;

// ---------------------------------------------------------------------------
// AddressError
// ---------------------------------------------------------------------------

/// Errors from encoding or decoding double-public-key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressError {
    /// A key buffer or decoded payload is not exactly
    /// [`ENCODED_DPK_SIZE`](crate::ENCODED_DPK_SIZE) bytes.
    InvalidLength,

    /// A character outside the 32-symbol alphabet appeared in the data
    /// part, or a non-hex digit appeared in a hex key string.
    InvalidCharacter,

    /// The address mixes uppercase and lowercase letters.
    MixedCase,

    /// The separator is missing, the prefix is empty, or the data part is
    /// shorter than the checksum.
    InvalidFormat,

    /// The prefix does not name a known network.
    UnknownNetworkPrefix,

    /// The checksum matches no supported encoding variant.
    ChecksumMismatch,

    /// Nonzero or oversized padding bits after symbol-to-byte regrouping.
    InvalidPadding,
}

impl AddressError {
    /// Stable integer code for this error.
    ///
    /// `0` is reserved for success, so every variant is nonzero. These
    /// values are part of the FFI contract and must not be renumbered.
    pub const fn code(self) -> i32 {
        match self {
            Self::InvalidLength => 1,
            Self::InvalidCharacter => 2,
            Self::MixedCase => 3,
            Self::InvalidFormat => 4,
            Self::UnknownNetworkPrefix => 5,
            Self::ChecksumMismatch => 6,
            Self::InvalidPadding => 7,
        }
    }

    /// Reverse of [`code`](Self::code). `None` for `0` (success) and for
    /// codes outside the defined range.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::InvalidLength),
            2 => Some(Self::InvalidCharacter),
            3 => Some(Self::MixedCase),
            4 => Some(Self::InvalidFormat),
            5 => Some(Self::UnknownNetworkPrefix),
            6 => Some(Self::ChecksumMismatch),
            7 => Some(Self::InvalidPadding),
            _ => None,
        }
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => write!(f, "key length is not the encoded double-public-key size"),
            Self::InvalidCharacter => write!(f, "character outside the address alphabet"),
            Self::MixedCase => write!(f, "address mixes uppercase and lowercase"),
            Self::InvalidFormat => write!(f, "address structure is malformed"),
            Self::UnknownNetworkPrefix => write!(f, "unknown network prefix"),
            Self::ChecksumMismatch => write!(f, "checksum verification failed"),
            Self::InvalidPadding => write!(f, "invalid padding bits in payload"),
        }
    }
}

impl std::error::Error for AddressError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
