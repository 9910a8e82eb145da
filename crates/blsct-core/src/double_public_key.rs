//! The double public key a confidential address encodes.
//!
//! A [`DoublePublicKey`] is the concatenation of two compressed BLS12-381
//! G1 points: the view public key followed by the spend public key. This
//! crate treats both halves as opaque bytes -- whether they are valid
//! curve points is the key layer's concern, not the codec's.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size in bytes of one compressed G1 public key.
pub const PUBLIC_KEY_SIZE: usize = 48;

/// Serialized size of a double public key: view key followed by spend key.
pub const ENCODED_DPK_SIZE: usize = 2 * PUBLIC_KEY_SIZE;

// ---------------------------------------------------------------------------
// DoublePublicKey
// ---------------------------------------------------------------------------

/// A view/spend public-key pair, the payload of every address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoublePublicKey {
    view: [u8; PUBLIC_KEY_SIZE],
    spend: [u8; PUBLIC_KEY_SIZE],
}

impl DoublePublicKey {
    /// Creates a double public key from its view and spend halves.
    pub fn from_keys(view: &[u8; PUBLIC_KEY_SIZE], spend: &[u8; PUBLIC_KEY_SIZE]) -> Self {
        Self {
            view: *view,
            spend: *spend,
        }
    }

    /// Creates a double public key from its serialized form.
    pub fn from_bytes(bytes: [u8; ENCODED_DPK_SIZE]) -> Self {
        let mut view = [0u8; PUBLIC_KEY_SIZE];
        let mut spend = [0u8; PUBLIC_KEY_SIZE];
        view.copy_from_slice(&bytes[..PUBLIC_KEY_SIZE]);
        spend.copy_from_slice(&bytes[PUBLIC_KEY_SIZE..]);
        Self { view, spend }
    }

    /// Returns the serialized form: view key followed by spend key.
    pub fn to_bytes(&self) -> [u8; ENCODED_DPK_SIZE] {
        let mut bytes = [0u8; ENCODED_DPK_SIZE];
        bytes[..PUBLIC_KEY_SIZE].copy_from_slice(&self.view);
        bytes[PUBLIC_KEY_SIZE..].copy_from_slice(&self.spend);
        bytes
    }

    /// Returns the view public key half.
    pub fn view_key(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.view
    }

    /// Returns the spend public key half.
    pub fn spend_key(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.spend
    }

    /// Renders the key as a 192-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut s = String::with_capacity(2 * ENCODED_DPK_SIZE);
        for &b in self.view.iter().chain(&self.spend) {
            s.push(HEX[(b >> 4) as usize] as char);
            s.push(HEX[(b & 0x0f) as usize] as char);
        }
        s
    }

    /// Parses a key from its hex rendering. Case-insensitive.
    ///
    /// # Errors
    ///
    /// [`AddressError::InvalidLength`] if the string is not exactly
    /// 192 hex digits, [`AddressError::InvalidCharacter`] on a non-hex
    /// digit.
    pub fn from_hex(hex: &str) -> Result<Self, AddressError> {
        if hex.len() != 2 * ENCODED_DPK_SIZE {
            return Err(AddressError::InvalidLength);
        }
        let mut bytes = [0u8; ENCODED_DPK_SIZE];
        for (i, pair) in hex.as_bytes().chunks_exact(2).enumerate() {
            let hi = hex_value(pair[0]).ok_or(AddressError::InvalidCharacter)?;
            let lo = hex_value(pair[1]).ok_or(AddressError::InvalidCharacter)?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self::from_bytes(bytes))
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

impl TryFrom<&[u8]> for DoublePublicKey {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; ENCODED_DPK_SIZE] =
            bytes.try_into().map_err(|_| AddressError::InvalidLength)?;
        Ok(Self::from_bytes(bytes))
    }
}

impl fmt::Display for DoublePublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for DoublePublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DoublePublicKey({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

/// Hex string in human-readable formats, raw bytes otherwise.
impl Serialize for DoublePublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.to_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for DoublePublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DpkVisitor;

        impl Visitor<'_> for DpkVisitor {
            type Value = DoublePublicKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a {ENCODED_DPK_SIZE}-byte double public key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                DoublePublicKey::from_hex(v).map_err(E::custom)
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                DoublePublicKey::try_from(v).map_err(E::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(DpkVisitor)
        } else {
            deserializer.deserialize_bytes(DpkVisitor)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DoublePublicKey {
        let mut view = [0u8; PUBLIC_KEY_SIZE];
        let mut spend = [0u8; PUBLIC_KEY_SIZE];
        for i in 0..PUBLIC_KEY_SIZE {
            view[i] = i as u8;
            spend[i] = 0xff - i as u8;
        }
        DoublePublicKey::from_keys(&view, &spend)
    }

    #[test]
    fn halves_round_trip_through_bytes() {
        let dpk = sample();
        let bytes = dpk.to_bytes();
        assert_eq!(&bytes[..PUBLIC_KEY_SIZE], dpk.view_key());
        assert_eq!(&bytes[PUBLIC_KEY_SIZE..], dpk.spend_key());
        assert_eq!(DoublePublicKey::from_bytes(bytes), dpk);
    }

    #[test]
    fn try_from_enforces_length() {
        let dpk = sample();
        let bytes = dpk.to_bytes();
        assert_eq!(DoublePublicKey::try_from(&bytes[..]).unwrap(), dpk);
        assert_eq!(
            DoublePublicKey::try_from(&bytes[..95]),
            Err(AddressError::InvalidLength)
        );
        assert_eq!(
            DoublePublicKey::try_from(&[0u8; 97][..]),
            Err(AddressError::InvalidLength)
        );
    }

    #[test]
    fn hex_round_trip() {
        let dpk = sample();
        let hex = dpk.to_hex();
        assert_eq!(hex.len(), 192);
        assert_eq!(DoublePublicKey::from_hex(&hex).unwrap(), dpk);
        // Uppercase input parses to the same key.
        assert_eq!(DoublePublicKey::from_hex(&hex.to_uppercase()).unwrap(), dpk);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert_eq!(
            DoublePublicKey::from_hex("abcd"),
            Err(AddressError::InvalidLength)
        );
        let mut hex = sample().to_hex();
        hex.replace_range(0..1, "g");
        assert_eq!(
            DoublePublicKey::from_hex(&hex),
            Err(AddressError::InvalidCharacter)
        );
    }

    #[test]
    fn display_matches_hex() {
        let dpk = sample();
        assert_eq!(dpk.to_string(), dpk.to_hex());
        assert!(format!("{dpk:?}").starts_with("DoublePublicKey(0001"));
    }

    #[test]
    fn serde_json_uses_hex_string() {
        let dpk = sample();
        let json = serde_json::to_string(&dpk).unwrap();
        assert_eq!(json, format!("\"{}\"", dpk.to_hex()));
        let back: DoublePublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dpk);
    }
}
