//! Ed25519 key derivation and EdDSA signing.
//!
//! The secret key is SHA512Half(seed). Both keys carry the 0xED tag byte in
//! their hex form; signatures are the raw 64-byte EdDSA output over the
//! unhashed message.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroize;

use xrpl_primitives::constants::ED25519_KEY_PREFIX;
use xrpl_primitives::hash::sha512_half;

use crate::keys::{check_tagged_length, KeyPair};
use crate::KeypairError;

/// Derive the Ed25519 keypair of a 16-byte seed.
///
/// # Arguments
/// * `seed` - Seed entropy.
/// * `validator` - Validator keypairs are not supported and always fail.
///
/// # Returns
/// `ED`-tagged private and public key hex.
pub fn derive_keypair(seed: &[u8], validator: bool) -> Result<KeyPair, KeypairError> {
    if validator {
        return Err(KeypairError::ValidatorUnsupported);
    }
    let mut secret = sha512_half(seed);
    let signing_key = SigningKey::from_bytes(&secret);
    let pair = KeyPair::new(
        tagged_hex(&secret),
        tagged_hex(signing_key.verifying_key().as_bytes()),
    );
    secret.zeroize();
    Ok(pair)
}

/// Sign `message` with an `ED`-tagged private key.
///
/// # Returns
/// The 64-byte signature as 128 upper-case hex characters.
pub fn sign(message: &[u8], private_key_hex: &str) -> Result<String, KeypairError> {
    let mut secret = untag(private_key_hex, "private key", KeypairError::InvalidPrivateKey)?;
    let signing_key = SigningKey::from_bytes(&secret);
    secret.zeroize();
    Ok(hex::encode_upper(signing_key.sign(message).to_bytes()))
}

/// Verify an Ed25519 signature over `message`.
///
/// # Returns
/// `Ok(true)` if valid, `Ok(false)` if the signature does not verify, or an
/// error for a malformed key or a signature that is not 64 bytes.
pub fn verify(
    message: &[u8],
    signature_hex: &str,
    public_key_hex: &str,
) -> Result<bool, KeypairError> {
    let public_key = untag(public_key_hex, "public key", KeypairError::InvalidPublicKey)?;
    let verifying_key = VerifyingKey::from_bytes(&public_key)
        .map_err(|e| KeypairError::InvalidPublicKey(e.to_string()))?;
    let signature_bytes: [u8; 64] = hex::decode(signature_hex)?
        .as_slice()
        .try_into()
        .map_err(|_| KeypairError::InvalidSignature("expected 64 bytes".to_string()))?;
    let signature = Signature::from_bytes(&signature_bytes);
    Ok(verifying_key.verify(message, &signature).is_ok())
}

fn tagged_hex(key: &[u8; 32]) -> String {
    format!("{:02X}{}", ED25519_KEY_PREFIX, hex::encode_upper(key))
}

/// Strip the `ED` tag from a 33-byte hex key.
///
/// Any length other than 33 bytes is `InvalidLength`; a 33-byte key
/// without the tag is reported through `invalid`.
fn untag(
    key_hex: &str,
    field: &'static str,
    invalid: fn(String) -> KeypairError,
) -> Result<[u8; 32], KeypairError> {
    let mut bytes = hex::decode(key_hex)?;
    let result = check_tagged_length(field, &bytes).and_then(|()| match bytes.split_first() {
        Some((&ED25519_KEY_PREFIX, rest)) => {
            let mut key = [0u8; 32];
            key.copy_from_slice(rest);
            Ok(key)
        }
        _ => Err(invalid(format!("expected ED tag, got {:02X}", bytes[0]))),
    });
    bytes.zeroize();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrpl_primitives::seed::decode_seed;
    use xrpl_primitives::ErrorKind;

    #[test]
    fn test_derive_keypair_vector() {
        let (entropy, _) = decode_seed("sEdTjrdnJaPE2NNjmavQqXQdrf71NiH").unwrap();
        let pair = derive_keypair(&entropy, false).unwrap();
        assert_eq!(
            pair.public_key(),
            "ED4924A9045FE5ED8B22BAA7B6229A72A287CCF3EA287AADD3A032A24C0F008FA6"
        );
        assert_eq!(
            pair.private_key(),
            "EDBB3ECA8985E1484FA6A28C4B30FB0042A2CC5DF3EC8DC37B5F3D126DDFD3CA14"
        );
    }

    #[test]
    fn test_derive_keypair_rejects_validator() {
        assert!(matches!(
            derive_keypair(&[0u8; 16], true),
            Err(KeypairError::ValidatorUnsupported)
        ));
    }

    #[test]
    fn test_sign_verify() {
        let pair = derive_keypair(b"yurtyurtyurtyurt", false).unwrap();
        let sig = sign(b"Hello World", pair.private_key()).unwrap();
        assert_eq!(sig.len(), 128);
        assert!(verify(b"Hello World", &sig, pair.public_key()).unwrap());
        assert!(!verify(b"Hello World.", &sig, pair.public_key()).unwrap());
        // Deterministic.
        assert_eq!(sig, sign(b"Hello World", pair.private_key()).unwrap());
    }

    #[test]
    fn test_rejects_untagged_and_short_keys() {
        let pair = derive_keypair(b"yurtyurtyurtyurt", false).unwrap();
        let err = sign(b"msg", &pair.private_key()[2..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputLength);
        let retagged = format!("00{}", &pair.private_key()[2..]);
        assert!(matches!(
            sign(b"msg", &retagged),
            Err(KeypairError::InvalidPrivateKey(_))
        ));

        let sig = sign(b"msg", pair.private_key()).unwrap();
        assert!(matches!(
            verify(b"msg", &sig[..126], pair.public_key()),
            Err(KeypairError::InvalidSignature(_))
        ));
        let err = verify(b"msg", &sig, "ED00").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputLength);
        let short = &pair.public_key()[..42];
        let err = verify(b"msg", &sig, short).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputLength);
    }
}
