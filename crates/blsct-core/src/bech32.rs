//! Symbol codec underneath double-public-key addresses.
//!
//! Three layers, all pure and allocation-light:
//!
//! - the 32-symbol alphabet and its inverse lookup table
//! - bit regrouping between 8-bit bytes and 5-bit symbols
//! - the checksum: a degree-8 BCH code over GF(32) whose 40-bit residue
//!   is XOR-folded with a per-variant constant into 8 trailing symbols
//!
//! The checksum is computed over the expanded network prefix followed by
//! the payload symbols, so a payload cannot be reattached to a different
//! prefix, and the variant constant distinguishes [`AddressEncoding::Bech32`]
//! from [`AddressEncoding::Bech32M`] with the same generator.
//!
//! Any single-symbol substitution changes the residue with certainty;
//! callers reject on mismatch rather than attempting correction.

use crate::error::AddressError;

// ---------------------------------------------------------------------------
// Alphabet
// ---------------------------------------------------------------------------

/// Number of checksum symbols appended to every address.
pub(crate) const CHECKSUM_LEN: usize = 8;

/// The 32-symbol encoding alphabet. Excludes the visually ambiguous
/// glyphs `1`, `b`, `i`, and `o`.
const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Inverse of [`CHARSET`]: ASCII byte to symbol value, `0xFF` for bytes
/// outside the alphabet. Both cases of each letter map.
const CHARSET_REV: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        table[CHARSET[i] as usize] = i as u8;
        table[CHARSET[i].to_ascii_uppercase() as usize] = i as u8;
        i += 1;
    }
    table
};

/// Renders a symbol value as its lowercase alphabet character.
pub(crate) fn symbol_to_char(symbol: u8) -> char {
    debug_assert!(symbol < 32);
    CHARSET[symbol as usize] as char
}

/// Case-insensitive reverse lookup. `None` for characters outside the
/// alphabet.
pub(crate) fn char_to_symbol(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match CHARSET_REV[c as usize] {
        0xFF => None,
        symbol => Some(symbol),
    }
}

// ---------------------------------------------------------------------------
// Bit regrouping
// ---------------------------------------------------------------------------

/// Regroups bytes into 5-bit symbols.
///
/// The input is treated as one big-endian bit stream, split into 5-bit
/// groups left to right; the final group is zero-padded on the right.
pub(crate) fn bytes_to_symbols(bytes: &[u8]) -> Vec<u8> {
    let mut symbols = Vec::with_capacity(bytes.len() * 8 / 5 + 1);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &byte in bytes {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            symbols.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        symbols.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    symbols
}

/// Regroups 5-bit symbols back into bytes.
///
/// Fails with [`AddressError::InvalidPadding`] if the trailing padding is
/// 5 bits or more (a whole unused symbol) or if any padding bit is set.
pub(crate) fn symbols_to_bytes(symbols: &[u8]) -> Result<Vec<u8>, AddressError> {
    let mut bytes = Vec::with_capacity(symbols.len() * 5 / 8);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &symbol in symbols {
        debug_assert!(symbol < 32);
        acc = (acc << 5) | u32::from(symbol);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            bytes.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if bits >= 5 || acc & ((1 << bits) - 1) != 0 {
        return Err(AddressError::InvalidPadding);
    }
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Checksum
// ---------------------------------------------------------------------------

/// Encoding variant of an address, distinguished by checksum constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressEncoding {
    /// The original checksum constant.
    Bech32,

    /// The revised checksum constant. The protocol default.
    #[default]
    Bech32M,
}

impl AddressEncoding {
    /// The 40-bit constant the checksum residue must equal for this
    /// variant. The `Bech32M` value is pinned by the protocol's published
    /// mainnet test vector.
    pub(crate) const fn checksum_constant(self) -> u64 {
        match self {
            AddressEncoding::Bech32 => 1,
            AddressEncoding::Bech32M => 0xb3b21f36b3,
        }
    }
}

/// Generator constants of the degree-8 BCH code over GF(32).
const GENERATOR: [u64; 5] = [
    0xf5dee51989,
    0xa9fdca3312,
    0x1bab10e32d,
    0x3706b1677a,
    0x644d626ffd,
];

/// Residue of the symbol sequence under the generator polynomial,
/// computed as an LFSR over GF(32) with initial state 1.
fn polymod(symbols: impl IntoIterator<Item = u8>) -> u64 {
    let mut chk: u64 = 1;
    for symbol in symbols {
        let top = chk >> 35;
        chk = ((chk & 0x07_ffff_ffff) << 5) ^ u64::from(symbol);
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}

/// Expands a prefix for checksum computation: the high 3 bits of each
/// character, a zero separator, then the low 5 bits of each character.
fn expanded_hrp(hrp: &str) -> impl Iterator<Item = u8> + '_ {
    hrp.bytes()
        .map(|b| b >> 5)
        .chain(std::iter::once(0))
        .chain(hrp.bytes().map(|b| b & 0x1f))
}

/// Computes the checksum symbols for `payload` under `hrp` and `encoding`.
pub(crate) fn create_checksum(
    hrp: &str,
    payload: &[u8],
    encoding: AddressEncoding,
) -> [u8; CHECKSUM_LEN] {
    let values = expanded_hrp(hrp)
        .chain(payload.iter().copied())
        .chain(std::iter::repeat(0).take(CHECKSUM_LEN));
    let residue = polymod(values) ^ encoding.checksum_constant();

    let mut checksum = [0u8; CHECKSUM_LEN];
    for (i, symbol) in checksum.iter_mut().enumerate() {
        *symbol = ((residue >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8;
    }
    checksum
}

/// Verifies the trailing checksum of `data` (payload followed by checksum
/// symbols) under `hrp` and `encoding`.
pub(crate) fn verify_checksum(hrp: &str, data: &[u8], encoding: AddressEncoding) -> bool {
    polymod(expanded_hrp(hrp).chain(data.iter().copied())) == encoding.checksum_constant()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
