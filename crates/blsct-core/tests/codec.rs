//! Integration tests for the address codec public API.
//!
//! Exercises the protocol's published mainnet test vector plus the
//! corruption, case, and truncation guarantees callers rely on when
//! rejecting pasted or typed addresses.

use blsct_core::{
    decode_address, encode_address, Address, AddressEncoding, AddressError, DoublePublicKey,
    Network, ENCODED_DPK_SIZE,
};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// The protocol's published mainnet Bech32M address.
const OFFICIAL_ADDR: &str = "nv1jlca8fe3jltegf54vwxyl2dvplpk3rz0ja6tjpdpfcar79cm43vxc40g8luh5xh0lva0qzkmytrthftje04fqnt8g6yq3j8t2z552ryhy8dnpyfgqyj58ypdptp43f32u28htwu0r37y9su6332jn0c0fcvan8l53m";

/// Hex of the vector's 96-byte double public key. The view half is the
/// BLS12-381 G1 generator point.
const OFFICIAL_DPK_HEX: &str = "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bba572cbea904d67468808c8eb50a9450c9721db309128012543902d0ac358a62ae28f75bb8f1c7c42c39a8c5529bf0f4e";

/// The 32-symbol alphabet, for picking replacement characters.
const CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

fn patterned_dpk(seed: u8) -> DoublePublicKey {
    let mut bytes = [0u8; ENCODED_DPK_SIZE];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = (i as u8).wrapping_mul(31).wrapping_add(seed);
    }
    DoublePublicKey::from_bytes(bytes)
}

// ---------------------------------------------------------------------------
// Protocol vector
// ---------------------------------------------------------------------------

#[test]
fn official_vector_decodes_and_re_encodes() {
    let (dpk, network, encoding) = decode_address(OFFICIAL_ADDR).unwrap();
    assert_eq!(network, Network::Mainnet);
    assert_eq!(encoding, AddressEncoding::Bech32M);
    assert_eq!(dpk.to_hex(), OFFICIAL_DPK_HEX);

    assert_eq!(encode_address(network, &dpk, encoding), OFFICIAL_ADDR);
}

#[test]
fn official_vector_from_key_halves() {
    let dpk = DoublePublicKey::from_hex(OFFICIAL_DPK_HEX).unwrap();
    let rebuilt = DoublePublicKey::from_keys(dpk.view_key(), dpk.spend_key());
    assert_eq!(
        encode_address(Network::Mainnet, &rebuilt, AddressEncoding::Bech32M),
        OFFICIAL_ADDR
    );
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn round_trips_across_networks_encodings_and_patterns() {
    for seed in [0x00, 0x01, 0x7f, 0xff] {
        let dpk = patterned_dpk(seed);
        for network in Network::ALL {
            for encoding in [AddressEncoding::Bech32, AddressEncoding::Bech32M] {
                let encoded = encode_address(network, &dpk, encoding);
                let (back, back_network, back_encoding) = decode_address(&encoded).unwrap();
                assert_eq!(back, dpk);
                assert_eq!(back_network, network);
                assert_eq!(back_encoding, encoding);
            }
        }
    }
}

#[test]
fn all_zero_and_all_one_payloads_round_trip() {
    for byte in [0x00u8, 0xff] {
        let dpk = DoublePublicKey::from_bytes([byte; ENCODED_DPK_SIZE]);
        let encoded = encode_address(Network::Testnet, &dpk, AddressEncoding::Bech32);
        assert_eq!(decode_address(&encoded).unwrap().0, dpk);
    }
}

// ---------------------------------------------------------------------------
// Corruption detection
// ---------------------------------------------------------------------------

#[test]
fn every_single_character_substitution_is_rejected() {
    let data_start = OFFICIAL_ADDR.find('1').unwrap() + 1;

    for pos in data_start..OFFICIAL_ADDR.len() {
        let original = OFFICIAL_ADDR.as_bytes()[pos] as char;
        for replacement in CHARSET.chars() {
            if replacement == original {
                continue;
            }
            let mut corrupt = String::from(OFFICIAL_ADDR);
            corrupt.replace_range(pos..pos + 1, &replacement.to_string());
            assert_eq!(
                Address::parse(&corrupt),
                Err(AddressError::ChecksumMismatch),
                "substitution {original}->{replacement} at {pos} went undetected"
            );
        }
    }
}

#[test]
fn truncation_never_yields_a_shorter_valid_address() {
    for len in 0..OFFICIAL_ADDR.len() {
        let truncated = &OFFICIAL_ADDR[..len];
        match Address::parse(truncated) {
            Err(AddressError::InvalidFormat) | Err(AddressError::ChecksumMismatch) => {}
            other => panic!("truncation to {len} chars returned {other:?}"),
        }
    }
}

#[test]
fn corrupted_prefix_is_rejected() {
    let foreign = format!("tv{}", &OFFICIAL_ADDR[2..]);
    assert_eq!(
        Address::parse(&foreign),
        Err(AddressError::UnknownNetworkPrefix)
    );
}

// ---------------------------------------------------------------------------
// Case rules
// ---------------------------------------------------------------------------

#[test]
fn uniform_case_variants_decode_identically() {
    let lower = Address::parse(OFFICIAL_ADDR).unwrap();
    let upper = Address::parse(&OFFICIAL_ADDR.to_uppercase()).unwrap();
    assert_eq!(lower, upper);
    assert_eq!(upper.encode(), OFFICIAL_ADDR);
}

#[test]
fn each_single_letter_case_flip_is_rejected() {
    // Flip the case of every letter position in turn; digits are skipped
    // since they carry no case.
    for (pos, c) in OFFICIAL_ADDR.char_indices() {
        if !c.is_ascii_lowercase() {
            continue;
        }
        let mut flipped = String::from(OFFICIAL_ADDR);
        flipped.replace_range(pos..pos + 1, &c.to_ascii_uppercase().to_string());
        assert_eq!(
            Address::parse(&flipped),
            Err(AddressError::MixedCase),
            "case flip at {pos} was not rejected"
        );
    }
}

// ---------------------------------------------------------------------------
// Variant binding
// ---------------------------------------------------------------------------

#[test]
fn encoding_variants_never_cross_verify() {
    let dpk = patterned_dpk(0x42);
    let m = encode_address(Network::Mainnet, &dpk, AddressEncoding::Bech32M);
    let plain = encode_address(Network::Mainnet, &dpk, AddressEncoding::Bech32);
    assert_ne!(m, plain);

    assert_eq!(
        Address::parse_expecting(&m, AddressEncoding::Bech32),
        Err(AddressError::ChecksumMismatch)
    );
    assert_eq!(
        Address::parse_expecting(&plain, AddressEncoding::Bech32M),
        Err(AddressError::ChecksumMismatch)
    );

    // Auto-detection still recovers the variant each was encoded with.
    assert_eq!(
        Address::parse(&m).unwrap().encoding(),
        AddressEncoding::Bech32M
    );
    assert_eq!(
        Address::parse(&plain).unwrap().encoding(),
        AddressEncoding::Bech32
    );
}

// ---------------------------------------------------------------------------
// FFI-style result codes
// ---------------------------------------------------------------------------

#[test]
fn every_rejection_maps_to_a_stable_nonzero_code() {
    let cases: [(&str, AddressError); 4] = [
        ("nv1qqqpp", AddressError::InvalidFormat),
        ("xx1qqqqqqqqqqqqqqqq", AddressError::UnknownNetworkPrefix),
        ("Nv1qqqqqqqqqqqqqqqq", AddressError::MixedCase),
        ("nv1qqqqqqqqqqqqqqqq", AddressError::ChecksumMismatch),
    ];
    for (input, expected) in cases {
        let err = Address::parse(input).unwrap_err();
        assert_eq!(err, expected);
        assert!(err.code() > 0);
        assert_eq!(AddressError::from_code(err.code()), Some(err));
    }
}
