//! Core types for BLSCT confidential-transaction wallets.
//!
//! This crate provides the foundational types shared across the wallet
//! stack:
//!
//! - [`Network`] -- chain identifier (Mainnet, Testnet, Signet, Regtest)
//! - [`DoublePublicKey`] -- the 96-byte view/spend key pair an address encodes
//! - [`Address`] -- checksummed, human-readable double-public-key address
//! - [`AddressEncoding`] -- the two supported checksum variants
//! - [`chain`] -- the process-wide chain context initializer
//!
//! The address codec is pure and stateless: every call takes its network
//! and encoding variant explicitly, all lookup tables are compile-time
//! constants, and nothing here blocks or locks. It is safe to call from
//! any number of threads.
//!
//! # Example
//!
//! ```rust
//! use blsct_core::{Address, AddressEncoding, Network};
//!
//! let addr = Address::parse(
//!     "nv1jlca8fe3jltegf54vwxyl2dvplpk3rz0ja6tjpdpfcar79cm43vxc40g8luh5xh0l\
//!      va0qzkmytrthftje04fqnt8g6yq3j8t2z552ryhy8dnpyfgqyj58ypdptp43f32u28ht\
//!      wu0r37y9su6332jn0c0fcvan8l53m",
//! )
//! .unwrap();
//!
//! assert_eq!(addr.network(), Network::Mainnet);
//! assert_eq!(addr.encoding(), AddressEncoding::Bech32M);
//! ```

pub mod address;
mod bech32;
pub mod chain;
pub mod double_public_key;
pub mod error;

pub use address::{decode_address, encode_address, Address};
pub use bech32::AddressEncoding;
pub use double_public_key::{DoublePublicKey, ENCODED_DPK_SIZE, PUBLIC_KEY_SIZE};
pub use error::AddressError;

use std::fmt;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// BLSCT chain identifier.
///
/// Each network owns a distinct lowercase address prefix. Decoding takes
/// everything before the last `1` separator as the prefix candidate, so
/// the prefixes below are chosen to disambiguate without further context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// The production chain.
    Mainnet,

    /// The public test chain.
    Testnet,

    /// The signed test chain.
    Signet,

    /// A local regression-test chain.
    Regtest,
}

impl Network {
    /// All supported networks, in protocol order.
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Testnet,
        Network::Signet,
        Network::Regtest,
    ];

    /// Returns the human-readable address prefix for this network.
    pub const fn hrp(self) -> &'static str {
        match self {
            Network::Mainnet => "nv",
            Network::Testnet => "tnv",
            Network::Signet => "snv",
            Network::Regtest => "nvrt",
        }
    }

    /// Resolves a lowercase address prefix back to its network.
    pub fn from_hrp(hrp: &str) -> Option<Network> {
        Network::ALL.into_iter().find(|network| network.hrp() == hrp)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Signet => "signet",
            Network::Regtest => "regtest",
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
