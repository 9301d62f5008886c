//! Base58 encoding and decoding with optional checksum support.
//!
//! The XRP Ledger uses its own Base58 alphabet (leading zero bytes encode
//! as `r`, not `1`). Base58Check appends the first four bytes of
//! SHA-256d(data) before encoding; every address, seed and public key
//! encoding in the SDK goes through [`check_encode`] / [`check_decode`].

use crate::constants::CHECKSUM_LENGTH;
use crate::hash::sha256d;
use crate::PrimitivesError;

/// The XRP Ledger's Base58 alphabet.
pub const ALPHABET: &[u8; 58] = b"rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

static XRPL_ALPHABET: &bs58::Alphabet = &bs58::Alphabet::new_unwrap(ALPHABET);

/// Encode a byte slice to a Base58 string using the XRPL alphabet.
///
/// Leading zero bytes are encoded as leading `r` characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(XRPL_ALPHABET).into_string()
}

/// Decode an XRPL Base58 string to a byte vector.
///
/// # Arguments
/// * `s` - The Base58 string to decode.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or an error for characters outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(XRPL_ALPHABET)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode a byte slice with a 4-byte double-SHA-256 checksum appended (Base58Check).
///
/// # Arguments
/// * `data` - The bytes to encode (version prefix + payload).
///
/// # Returns
/// A Base58Check-encoded string.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying the 4-byte checksum.
///
/// # Returns
/// `Ok(Vec<u8>)` of the version prefix and payload (without checksum) on
/// success, or an error for invalid encoding or checksum mismatch.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < CHECKSUM_LENGTH {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LENGTH);
    let expected = sha256d(payload);
    if checksum != &expected[..CHECKSUM_LENGTH] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}
