//! XRPL SDK - Key derivation, signing and verification.
//!
//! Dispatches over the two signing algorithm families:
//! - secp256k1 ECDSA (scalar-search derivation, DER signatures)
//! - Ed25519 EdDSA (SHA512Half seed expansion, 64-byte signatures)
//!
//! Every keypair returned by [`derive_keypair`] has already signed and
//! verified a fixed test message.

pub mod ed25519;
pub mod keys;
pub mod secp256k1;

mod error;
pub use error::KeypairError;
pub use keys::{KeyPair, Secp256k1PrivateKey};
pub use xrpl_primitives::Algorithm;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use xrpl_primitives::address_codec::encode_classic_address_from_public_key_hex;
use xrpl_primitives::constants::{ED25519_KEY_PREFIX, FAMILY_SEED_LENGTH};
use xrpl_primitives::seed::{decode_seed, encode_seed};
use xrpl_primitives::PrimitivesError;

/// Message signed and verified after every derivation.
pub const VERIFICATION_MESSAGE: &[u8] = b"This test message should verify.";

/// Encode a family seed from caller entropy, or from the OS RNG when
/// `entropy` is `None`.
///
/// # Arguments
/// * `entropy` - At least 16 bytes; only the first 16 are used.
/// * `algorithm` - Algorithm family recorded in the seed prefix.
///
/// # Returns
/// The encoded seed, or `InvalidLength` if fewer than 16 bytes are supplied.
pub fn generate_seed(
    entropy: Option<&[u8]>,
    algorithm: Algorithm,
) -> Result<String, KeypairError> {
    match entropy {
        Some(entropy) => {
            if entropy.len() < FAMILY_SEED_LENGTH {
                return Err(PrimitivesError::InvalidLength {
                    field: "entropy",
                    expected: FAMILY_SEED_LENGTH,
                    got: entropy.len(),
                }
                .into());
            }
            tracing::debug!(%algorithm, "encoding seed from caller entropy");
            Ok(encode_seed(&entropy[..FAMILY_SEED_LENGTH], algorithm)?)
        }
        None => generate_seed_with_rng(&mut OsRng, algorithm),
    }
}

/// Encode a family seed from 16 bytes drawn from `rng`.
pub fn generate_seed_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    algorithm: Algorithm,
) -> Result<String, KeypairError> {
    let mut entropy = [0u8; FAMILY_SEED_LENGTH];
    rng.try_fill_bytes(&mut entropy)
        .map_err(|e| KeypairError::Rng(e.to_string()))?;
    tracing::debug!(%algorithm, "generated random seed");
    let seed = encode_seed(&entropy, algorithm);
    entropy.zeroize();
    Ok(seed?)
}

/// Derive the keypair of an encoded family seed.
///
/// The algorithm comes from the seed prefix. The derived private key signs
/// [`VERIFICATION_MESSAGE`] and the public key must verify it.
///
/// # Arguments
/// * `seed` - Encoded family seed (`s...` or `sEd...`).
/// * `validator` - Validator keypairs are not supported and always fail.
///
/// # Returns
/// The verified keypair, or `VerificationFailed` if the self-check fails.
pub fn derive_keypair(seed: &str, validator: bool) -> Result<KeyPair, KeypairError> {
    let (mut entropy, algorithm) = decode_seed(seed)?;
    let derived = derive_keypair_from_entropy(&entropy, algorithm, validator);
    entropy.zeroize();
    derived
}

/// Derive and self-verify the keypair of raw seed entropy.
pub fn derive_keypair_from_entropy(
    entropy: &[u8],
    algorithm: Algorithm,
    validator: bool,
) -> Result<KeyPair, KeypairError> {
    let pair = match algorithm {
        Algorithm::Secp256k1 => secp256k1::derive_keypair(entropy, validator)?,
        Algorithm::Ed25519 => ed25519::derive_keypair(entropy, validator)?,
    };
    check_keypair(&pair)?;
    tracing::trace!(%algorithm, public_key = pair.public_key(), "derived keypair");
    Ok(pair)
}

/// Sign the fixed verification message with `pair` and verify it.
pub fn check_keypair(pair: &KeyPair) -> Result<(), KeypairError> {
    let signature = sign(VERIFICATION_MESSAGE, pair.private_key())?;
    if !verify(VERIFICATION_MESSAGE, &signature, pair.public_key())? {
        tracing::debug!(public_key = pair.public_key(), "derived keypair failed self-check");
        return Err(KeypairError::VerificationFailed);
    }
    Ok(())
}

/// Determine the algorithm family of a hex private or public key.
///
/// Keys must be 33 bytes. A leading `ED` byte selects Ed25519; `00`, `02`
/// or `03` selects secp256k1.
pub fn algorithm_from_key(key_hex: &str) -> Result<Algorithm, KeypairError> {
    let key = hex::decode(key_hex)?;
    keys::check_tagged_length("key", &key)?;
    match key[0] {
        ED25519_KEY_PREFIX => Ok(Algorithm::Ed25519),
        0x00 | 0x02 | 0x03 => Ok(Algorithm::Secp256k1),
        b => Err(KeypairError::UnknownKeyPrefix(format!("{:02X}", b))),
    }
}

/// Sign `message` with a hex private key of either family.
///
/// # Returns
/// Upper-case hex: DER for secp256k1, 64 raw bytes for Ed25519.
pub fn sign(message: &[u8], private_key_hex: &str) -> Result<String, KeypairError> {
    match algorithm_from_key(private_key_hex)? {
        Algorithm::Secp256k1 => secp256k1::sign(message, private_key_hex),
        Algorithm::Ed25519 => ed25519::sign(message, private_key_hex),
    }
}

/// Verify a hex signature over `message` with a hex public key of either
/// family.
pub fn verify(
    message: &[u8],
    signature_hex: &str,
    public_key_hex: &str,
) -> Result<bool, KeypairError> {
    match algorithm_from_key(public_key_hex)? {
        Algorithm::Secp256k1 => secp256k1::verify(message, signature_hex, public_key_hex),
        Algorithm::Ed25519 => ed25519::verify(message, signature_hex, public_key_hex),
    }
}

/// Classic address of a hex public key.
pub fn derive_classic_address(public_key_hex: &str) -> Result<String, KeypairError> {
    Ok(encode_classic_address_from_public_key_hex(public_key_hex)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrpl_primitives::ErrorKind;

    // -- generate_seed --

    #[test]
    fn test_generate_seed_from_entropy() {
        let entropy = b"setPasswordOverLen16";
        assert_eq!(
            generate_seed(Some(&entropy[..]), Algorithm::Ed25519).unwrap(),
            "sEdTuXdrgQobjDidph2oMDN36jGZX2U"
        );
        assert_eq!(
            generate_seed(Some(&entropy[..]), Algorithm::Secp256k1).unwrap(),
            "shJYdazRN9dvWbGqCehzHcBKWBaFR"
        );
    }

    #[test]
    fn test_generate_seed_fake_random_string() {
        assert_eq!(
            generate_seed(Some(&b"fakeRandomString"[..]), Algorithm::Secp256k1).unwrap(),
            "sh3pdwcaoo7vt5rtrEZJ7a75LnDo3"
        );
        assert_eq!(
            generate_seed(Some(&b"fakeRandomString"[..]), Algorithm::Ed25519).unwrap(),
            "sEdTjrdnJaPE2NNjmavQqXQdrf71NiH"
        );
    }

    #[test]
    fn test_generate_seed_rejects_short_entropy() {
        let err = generate_seed(Some(&b"short"[..]), Algorithm::Secp256k1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputLength);
    }

    #[test]
    fn test_generate_seed_random() {
        let a = generate_seed(None, Algorithm::Ed25519).unwrap();
        let b = generate_seed(None, Algorithm::Ed25519).unwrap();
        assert!(a.starts_with("sEd"));
        assert_ne!(a, b);
        assert_eq!(decode_seed(&a).unwrap().1, Algorithm::Ed25519);
    }

    // -- derive_keypair --

    #[test]
    fn test_derive_keypair_secp256k1() {
        let pair = derive_keypair("sh3pdwcaoo7vt5rtrEZJ7a75LnDo3", false).unwrap();
        assert_eq!(
            pair.private_key(),
            "00204795BCAB502D01C06B2C700936204B26C58D7048D3D4DBFE890BA05BA1D68D"
        );
        assert_eq!(
            pair.public_key(),
            "03A947D71477652C445B20F5226FAA4DF6CD716786E17D016E9A37FBA5379AF02B"
        );
    }

    #[test]
    fn test_derive_keypair_ed25519() {
        let pair = derive_keypair("sEdTjrdnJaPE2NNjmavQqXQdrf71NiH", false).unwrap();
        assert_eq!(
            pair.public_key(),
            "ED4924A9045FE5ED8B22BAA7B6229A72A287CCF3EA287AADD3A032A24C0F008FA6"
        );
    }

    #[test]
    fn test_derive_keypair_errors() {
        let err = derive_keypair("sEdTzRkEgPoxDG1mJ6WkSucHWnMkm1D", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
        let err = derive_keypair("sh3pdwcaoo7vt5rtrEZJ7a75LnDo3", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlgorithmMismatch);
    }

    #[test]
    fn test_check_keypair_rejects_mismatched_pair() {
        let a = derive_keypair("sh3pdwcaoo7vt5rtrEZJ7a75LnDo3", false).unwrap();
        let b = derive_keypair("shPSkLzQNWfyXjZ7bbwgCky6twagA", false).unwrap();
        let franken = KeyPair::new(a.private_key().to_string(), b.public_key().to_string());
        let err = check_keypair(&franken).unwrap_err();
        assert!(matches!(err, KeypairError::VerificationFailed));
        assert_eq!(err.kind(), ErrorKind::Verification);
    }

    // -- dispatch --

    #[test]
    fn test_algorithm_from_key() {
        assert_eq!(
            algorithm_from_key("ED4924A9045FE5ED8B22BAA7B6229A72A287CCF3EA287AADD3A032A24C0F008FA6")
                .unwrap(),
            Algorithm::Ed25519
        );
        assert_eq!(
            algorithm_from_key("03A947D71477652C445B20F5226FAA4DF6CD716786E17D016E9A37FBA5379AF02B")
                .unwrap(),
            Algorithm::Secp256k1
        );
        assert_eq!(
            algorithm_from_key("00204795BCAB502D01C06B2C700936204B26C58D7048D3D4DBFE890BA05BA1D68D")
                .unwrap(),
            Algorithm::Secp256k1
        );
        let err = algorithm_from_key(&format!("04{}", "A9".repeat(32))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlgorithmMismatch);
    }

    #[test]
    fn test_algorithm_from_key_rejects_mis_sized_keys() {
        let cases = [
            String::new(),
            "04A947".to_string(),
            // 32-byte key with a secp256k1 prefix.
            format!("03{}", "A9".repeat(31)),
            // 20-byte key with the Ed25519 tag.
            format!("ED{}", "49".repeat(19)),
            // Uncompressed SEC1.
            format!("04{}", "A9".repeat(64)),
        ];
        for key in &cases {
            let err = algorithm_from_key(key).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InputLength, "key {:?}", key);
        }
        let err = verify(b"msg", "3006020101020101", &cases[3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputLength);
    }

    #[test]
    fn test_sign_verify_dispatch() {
        for seed in ["sh3pdwcaoo7vt5rtrEZJ7a75LnDo3", "sEdTjrdnJaPE2NNjmavQqXQdrf71NiH"] {
            let pair = derive_keypair(seed, false).unwrap();
            let sig = sign(b"dispatch", pair.private_key()).unwrap();
            assert!(verify(b"dispatch", &sig, pair.public_key()).unwrap());
            assert!(!verify(b"dispatched", &sig, pair.public_key()).unwrap());
        }
    }

    #[test]
    fn test_derive_classic_address() {
        assert_eq!(
            derive_classic_address(
                "ED9434799226374926EDA3B54B1B461B4ABF7237962EAE18528FEA67595397FA32"
            )
            .unwrap(),
            "rDTXLQ7ZKZVKz33zJbHjgVShjsBnqMBhmN"
        );
    }
}
