//! Classic address, node public key and account public key codecs.
//!
//! Every encoding is Base58Check over `version prefix || payload`. Decoding
//! verifies the checksum, then the prefix, then the payload length.

use crate::base58;
use crate::constants::{
    ACCOUNT_ADDRESS_PREFIX, ACCOUNT_ID_LENGTH, ACCOUNT_PUBLIC_KEY_LENGTH,
    ACCOUNT_PUBLIC_KEY_PREFIX, ED25519_KEY_PREFIX, NODE_PUBLIC_KEY_LENGTH,
    NODE_PUBLIC_KEY_PREFIX,
};
use crate::hash::account_id;
use crate::PrimitivesError;

/// A 20-byte account identifier.
pub type AccountId = [u8; ACCOUNT_ID_LENGTH];

/// Base58Check-encode `prefix || payload` after checking the payload length.
///
/// # Arguments
/// * `payload` - Raw payload bytes.
/// * `prefix` - Version prefix bytes.
/// * `expected_len` - Required payload length.
///
/// # Returns
/// The encoded string, or `InvalidLength` if `payload.len() != expected_len`.
pub fn encode(
    payload: &[u8],
    prefix: &[u8],
    expected_len: usize,
) -> Result<String, PrimitivesError> {
    if payload.len() != expected_len {
        return Err(PrimitivesError::InvalidLength {
            field: "payload",
            expected: expected_len,
            got: payload.len(),
        });
    }
    let mut data = Vec::with_capacity(prefix.len() + payload.len());
    data.extend_from_slice(prefix);
    data.extend_from_slice(payload);
    Ok(base58::check_encode(&data))
}

/// Base58Check-decode `encoded` and strip `prefix`.
///
/// # Returns
/// The payload bytes, `ChecksumMismatch`/`InvalidBase58` for a bad encoding,
/// or `PrefixMismatch` if the decoded data does not start with `prefix`.
pub fn decode(encoded: &str, prefix: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = base58::check_decode(encoded)?;
    if !decoded.starts_with(prefix) {
        let got_len = prefix.len().min(decoded.len());
        return Err(PrimitivesError::PrefixMismatch {
            expected: hex::encode(prefix),
            got: hex::encode(&decoded[..got_len]),
        });
    }
    Ok(decoded[prefix.len()..].to_vec())
}

/// Encode a 20-byte AccountID as a classic `r...` address.
pub fn encode_account_id_to_classic_address(
    account_id: &[u8],
) -> Result<String, PrimitivesError> {
    encode(account_id, &ACCOUNT_ADDRESS_PREFIX, ACCOUNT_ID_LENGTH)
}

/// Derive the classic address of a hex-encoded public key.
///
/// A 32-byte key is treated as a bare Ed25519 key and gets the 0xED tag
/// prepended; otherwise the key must be 33 bytes.
///
/// # Arguments
/// * `public_key_hex` - Hex public key (either case).
///
/// # Returns
/// The classic address of RIPEMD160(SHA256(key)).
pub fn encode_classic_address_from_public_key_hex(
    public_key_hex: &str,
) -> Result<String, PrimitivesError> {
    let mut key = hex::decode(public_key_hex)?;
    if key.len() == ACCOUNT_PUBLIC_KEY_LENGTH - 1 {
        key.insert(0, ED25519_KEY_PREFIX);
    }
    if key.len() != ACCOUNT_PUBLIC_KEY_LENGTH {
        return Err(PrimitivesError::InvalidLength {
            field: "public key",
            expected: ACCOUNT_PUBLIC_KEY_LENGTH,
            got: key.len(),
        });
    }
    encode_account_id_to_classic_address(&account_id(&key))
}

/// Decode a classic address into its 20-byte AccountID.
///
/// # Returns
/// The AccountID, or `InvalidClassicAddress` if the address does not decode
/// to exactly 0x00 followed by 20 bytes.
pub fn decode_classic_address_to_account_id(
    address: &str,
) -> Result<AccountId, PrimitivesError> {
    let payload = decode(address, &ACCOUNT_ADDRESS_PREFIX)
        .map_err(|_| PrimitivesError::InvalidClassicAddress(address.to_string()))?;
    payload
        .as_slice()
        .try_into()
        .map_err(|_| PrimitivesError::InvalidClassicAddress(address.to_string()))
}

/// Whether `address` is a well-formed classic address.
pub fn is_valid_classic_address(address: &str) -> bool {
    decode_classic_address_to_account_id(address).is_ok()
}

/// Encode a 33-byte node (validator) public key (`n...`).
pub fn encode_node_public_key(key: &[u8]) -> Result<String, PrimitivesError> {
    encode(key, &NODE_PUBLIC_KEY_PREFIX, NODE_PUBLIC_KEY_LENGTH)
}

/// Decode an `n...` node public key into its 33 bytes.
pub fn decode_node_public_key(encoded: &str) -> Result<Vec<u8>, PrimitivesError> {
    let key = decode(encoded, &NODE_PUBLIC_KEY_PREFIX)?;
    check_payload_len("node public key", &key, NODE_PUBLIC_KEY_LENGTH)?;
    Ok(key)
}

/// Encode a 33-byte account public key (`a...`).
pub fn encode_account_public_key(key: &[u8]) -> Result<String, PrimitivesError> {
    encode(key, &ACCOUNT_PUBLIC_KEY_PREFIX, ACCOUNT_PUBLIC_KEY_LENGTH)
}

/// Decode an `a...` account public key into its 33 bytes.
pub fn decode_account_public_key(encoded: &str) -> Result<Vec<u8>, PrimitivesError> {
    let key = decode(encoded, &ACCOUNT_PUBLIC_KEY_PREFIX)?;
    check_payload_len("account public key", &key, ACCOUNT_PUBLIC_KEY_LENGTH)?;
    Ok(key)
}

fn check_payload_len(
    field: &'static str,
    payload: &[u8],
    expected: usize,
) -> Result<(), PrimitivesError> {
    if payload.len() != expected {
        return Err(PrimitivesError::InvalidLength {
            field,
            expected,
            got: payload.len(),
        });
    }
    Ok(())
}
