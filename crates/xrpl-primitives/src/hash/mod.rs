//! Hash function primitives for the XRPL SDK.
//!
//! Provides SHA-256, double SHA-256, RIPEMD-160, SHA-512, SHA-512Half,
//! the AccountID hash and HMAC-SHA512. SHA-512Half (the first 32 bytes of
//! SHA-512) is the ledger's general-purpose digest: transaction IDs,
//! signing digests and secp256k1 scalar derivation all go through it.

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

use crate::constants::hash_prefix;

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute double SHA-256 (SHA-256d) hash of the input data.
///
/// Base58Check checksums are the first four bytes of this digest.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 20];
    output.copy_from_slice(&result);
    output
}

/// Compute the AccountID of a public key: RIPEMD-160(SHA-256(public_key)).
///
/// # Arguments
/// * `public_key` - 33-byte public key (Ed25519 keys carry their 0xED tag).
///
/// # Returns
/// The 20-byte AccountID.
pub fn account_id(public_key: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(public_key))
}

/// Compute SHA-512 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 64-byte SHA-512 digest.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    output
}

/// Compute SHA-512Half: the first 32 bytes of SHA-512(data).
pub fn sha512_half(data: &[u8]) -> [u8; 32] {
    let full = sha512(data);
    let mut half = [0u8; 32];
    half.copy_from_slice(&full[..32]);
    half
}

/// Compute SHA-512Half over the concatenation of several byte slices.
///
/// Avoids building an intermediate buffer when a prefix, a payload and a
/// counter are hashed together.
pub fn sha512_half_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let full = hasher.finalize();
    let mut half = [0u8; 32];
    half.copy_from_slice(&full[..32]);
    half
}

/// Compute the transaction ID of a fully serialized transaction:
/// SHA-512Half(`TXN\0` || blob).
///
/// # Arguments
/// * `blob` - Binary-serialized transaction (including signatures).
///
/// # Returns
/// The 32-byte transaction hash.
pub fn transaction_id(blob: &[u8]) -> [u8; 32] {
    sha512_half_parts(&[&hash_prefix::TRANSACTION_ID[..], blob])
}

/// Compute HMAC-SHA512 of the input data with the given key.
///
/// # Arguments
/// * `key` - The HMAC key bytes.
/// * `data` - The message bytes to authenticate.
///
/// # Returns
/// A 64-byte HMAC-SHA512 tag.
pub fn sha512_hmac(key: &[u8], data: &[u8]) -> [u8; 64] {
    type HmacSha512 = Hmac<Sha512>;
    let mut mac = HmacSha512::new_from_slice(key)
        .expect("HMAC accepts any key length");
    mac.update(data);
    let result = mac.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result.into_bytes());
    output
}
