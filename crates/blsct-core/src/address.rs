//! Double-public-key address encoding and decoding.
//!
//! Addresses are human-readable renderings of a [`DoublePublicKey`],
//! checksum-protected so that corrupted input is rejected before any
//! cryptographic operation sees it.
//!
//! # Format
//!
//! An address consists of:
//! - a network prefix ([`Network::hrp`])
//! - a separator (`1`)
//! - 154 payload symbols carrying the 96-byte double public key
//! - 8 checksum symbols binding payload, prefix, and encoding variant
//!
//! The whole string is either all-lowercase or all-uppercase, never
//! mixed. Encoding always produces lowercase; `{:#}` formatting renders
//! uppercase for QR-style output.
//!
//! | Network | Prefix | Example            |
//! |---------|--------|--------------------|
//! | Mainnet | `nv`   | `nv1jlca8fe...`    |
//! | Testnet | `tnv`  | `tnv1...`          |
//! | Signet  | `snv`  | `snv1...`          |
//! | Regtest | `nvrt` | `nvrt1...`         |
//!
//! # Example
//!
//! ```rust
//! use blsct_core::{Address, AddressEncoding, DoublePublicKey, Network};
//!
//! let dpk = DoublePublicKey::from_keys(&[0x11; 48], &[0x22; 48]);
//! let addr = Address::new(Network::Mainnet, dpk, AddressEncoding::Bech32M);
//!
//! let encoded = addr.encode();
//! assert!(encoded.starts_with("nv1"));
//!
//! let parsed = Address::parse(&encoded).unwrap();
//! assert_eq!(parsed, addr);
//! ```

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bech32::{self, AddressEncoding, CHECKSUM_LEN};
use crate::double_public_key::DoublePublicKey;
use crate::error::AddressError;
use crate::Network;

/// Separator between the network prefix and the data part. Not a member
/// of the symbol alphabet, so the last occurrence is unambiguous.
const SEPARATOR: char = '1';

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A checksummed double-public-key address on a specific network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    network: Network,
    encoding: AddressEncoding,
    dpk: DoublePublicKey,
}

impl Address {
    /// Creates an address from its parts. Infallible: the key type
    /// already guarantees the exact payload length.
    pub fn new(network: Network, dpk: DoublePublicKey, encoding: AddressEncoding) -> Self {
        Self {
            network,
            encoding,
            dpk,
        }
    }

    /// Returns the network this address belongs to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Returns the checksum variant this address was encoded with.
    pub fn encoding(&self) -> AddressEncoding {
        self.encoding
    }

    /// Returns the encoded double public key.
    pub fn double_public_key(&self) -> &DoublePublicKey {
        &self.dpk
    }

    /// Returns the human-readable prefix for this address's network.
    pub fn hrp(&self) -> &'static str {
        self.network.hrp()
    }

    /// Encodes this address as a lowercase string.
    ///
    /// Allocates a `String`. For zero-alloc writing, use the [`fmt::Display`]
    /// impl directly (e.g. `write!(buf, "{address}")`).
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses an address string, detecting the checksum variant.
    ///
    /// Variants are tried in protocol-preference order (Bech32M first);
    /// the checksum constants are distinct, so at most one can match.
    ///
    /// # Errors
    ///
    /// Every violation is reported at its first detection point, in
    /// decode order: [`MixedCase`](AddressError::MixedCase),
    /// [`InvalidFormat`](AddressError::InvalidFormat),
    /// [`UnknownNetworkPrefix`](AddressError::UnknownNetworkPrefix),
    /// [`InvalidCharacter`](AddressError::InvalidCharacter),
    /// [`ChecksumMismatch`](AddressError::ChecksumMismatch),
    /// [`InvalidPadding`](AddressError::InvalidPadding),
    /// [`InvalidLength`](AddressError::InvalidLength).
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        Self::parse_impl(s, None)
    }

    /// Parses an address string, requiring a specific checksum variant.
    ///
    /// Fails with [`AddressError::ChecksumMismatch`] if the address was
    /// encoded with the other variant, even though it would be accepted
    /// by [`Address::parse`].
    pub fn parse_expecting(s: &str, encoding: AddressEncoding) -> Result<Self, AddressError> {
        Self::parse_impl(s, Some(encoding))
    }

    fn parse_impl(s: &str, expected: Option<AddressEncoding>) -> Result<Self, AddressError> {
        let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
        let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
        if has_upper && has_lower {
            return Err(AddressError::MixedCase);
        }

        // Checksum symbols and prefixes are defined over lowercase.
        let normalized: Cow<'_, str> = if has_upper {
            Cow::Owned(s.to_ascii_lowercase())
        } else {
            Cow::Borrowed(s)
        };

        let separator = normalized
            .rfind(SEPARATOR)
            .ok_or(AddressError::InvalidFormat)?;
        let (hrp, data) = (&normalized[..separator], &normalized[separator + 1..]);
        if hrp.is_empty() || data.len() < CHECKSUM_LEN {
            return Err(AddressError::InvalidFormat);
        }

        let network = Network::from_hrp(hrp).ok_or(AddressError::UnknownNetworkPrefix)?;

        let mut symbols = Vec::with_capacity(data.len());
        for c in data.chars() {
            symbols.push(bech32::char_to_symbol(c).ok_or(AddressError::InvalidCharacter)?);
        }

        let encoding = match expected {
            Some(encoding) => {
                if !bech32::verify_checksum(hrp, &symbols, encoding) {
                    return Err(AddressError::ChecksumMismatch);
                }
                encoding
            }
            None => [AddressEncoding::Bech32M, AddressEncoding::Bech32]
                .into_iter()
                .find(|&encoding| bech32::verify_checksum(hrp, &symbols, encoding))
                .ok_or(AddressError::ChecksumMismatch)?,
        };

        let payload = &symbols[..symbols.len() - CHECKSUM_LEN];
        let bytes = bech32::symbols_to_bytes(payload)?;
        let dpk = DoublePublicKey::try_from(bytes.as_slice())?;

        Ok(Self {
            network,
            encoding,
            dpk,
        })
    }
}

/// Lowercase by default; alternate formatting (`{:#}`) renders uppercase.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.dpk.to_bytes();
        let payload = bech32::bytes_to_symbols(&bytes);
        let checksum = bech32::create_checksum(self.hrp(), &payload, self.encoding);

        let upper = f.alternate();
        for c in self.hrp().chars() {
            f.write_char(if upper { c.to_ascii_uppercase() } else { c })?;
        }
        f.write_char(SEPARATOR)?;
        for &symbol in payload.iter().chain(&checksum) {
            let c = bech32::symbol_to_char(symbol);
            f.write_char(if upper { c.to_ascii_uppercase() } else { c })?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

/// Serializes as the canonical lowercase address string.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AddressVisitor;

        impl Visitor<'_> for AddressVisitor {
            type Value = Address;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a double-public-key address string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Address::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(AddressVisitor)
    }
}

// ---------------------------------------------------------------------------
// Convenience functions
// ---------------------------------------------------------------------------

/// Encodes a double public key as an address string for `network`.
pub fn encode_address(
    network: Network,
    dpk: &DoublePublicKey,
    encoding: AddressEncoding,
) -> String {
    Address::new(network, *dpk, encoding).encode()
}

/// Decodes an address string into its components.
pub fn decode_address(
    address: &str,
) -> Result<(DoublePublicKey, Network, AddressEncoding), AddressError> {
    let addr = Address::parse(address)?;
    Ok((addr.dpk, addr.network, addr.encoding))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
