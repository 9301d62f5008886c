//! Family seed codec.
//!
//! A seed is 16 bytes of entropy, Base58Check-encoded with a version prefix
//! that also records the signing algorithm: `0x21` for secp256k1 (`s...`)
//! and `0x01 0xE1 0x4B` for Ed25519 (`sEd...`).

use crate::algorithm::Algorithm;
use crate::base58;
use crate::constants::{ED25519_SEED_PREFIX, FAMILY_SEED_LENGTH, FAMILY_SEED_PREFIX};
use crate::PrimitivesError;

/// Encode 16 bytes of entropy as a family seed for `algorithm`.
///
/// # Arguments
/// * `entropy` - Exactly 16 bytes.
/// * `algorithm` - Selects the version prefix.
///
/// # Returns
/// The seed string, or `InvalidLength` if `entropy` is not 16 bytes.
pub fn encode_seed(entropy: &[u8], algorithm: Algorithm) -> Result<String, PrimitivesError> {
    if entropy.len() != FAMILY_SEED_LENGTH {
        return Err(PrimitivesError::InvalidLength {
            field: "entropy",
            expected: FAMILY_SEED_LENGTH,
            got: entropy.len(),
        });
    }
    crate::address_codec::encode(entropy, algorithm.seed_prefix(), FAMILY_SEED_LENGTH)
}

/// Decode a family seed into its entropy and algorithm.
///
/// The Ed25519 prefix is tried first; anything else must carry the
/// secp256k1 prefix. A seed that fails Base58Check decoding is reported as
/// `InvalidSeed`, an unknown prefix as `PrefixMismatch`.
pub fn decode_seed(seed: &str) -> Result<([u8; FAMILY_SEED_LENGTH], Algorithm), PrimitivesError> {
    let decoded = base58::check_decode(seed).map_err(|_| PrimitivesError::InvalidSeed)?;

    let (algorithm, payload) = if let Some(rest) = decoded.strip_prefix(&ED25519_SEED_PREFIX[..]) {
        (Algorithm::Ed25519, rest)
    } else if let Some(rest) = decoded.strip_prefix(&FAMILY_SEED_PREFIX[..]) {
        (Algorithm::Secp256k1, rest)
    } else {
        let got_len = FAMILY_SEED_PREFIX.len().min(decoded.len());
        return Err(PrimitivesError::PrefixMismatch {
            expected: hex::encode(FAMILY_SEED_PREFIX),
            got: hex::encode(&decoded[..got_len]),
        });
    };

    let entropy: [u8; FAMILY_SEED_LENGTH] =
        payload.try_into().map_err(|_| PrimitivesError::InvalidLength {
            field: "seed entropy",
            expected: FAMILY_SEED_LENGTH,
            got: payload.len(),
        })?;
    Ok((entropy, algorithm))
}
