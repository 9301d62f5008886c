//! secp256k1 key derivation and ECDSA signing.
//!
//! Keys are derived from a seed by hashing it with an incrementing counter
//! until the first 32 bytes of the digest form a valid scalar. The account
//! key is the root scalar plus a second scalar derived from the root public
//! key, so anyone holding the root public key can derive the account public
//! key without the seed.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, ProjectivePoint, PublicKey, Scalar};

use xrpl_primitives::der;
use xrpl_primitives::hash::{sha512_half, sha512_half_parts};
use xrpl_primitives::PrimitivesError;

use crate::keys::{check_tagged_length, KeyPair, Secp256k1PrivateKey};
use crate::KeypairError;

/// Derive a scalar in `[1, n)` from `bytes` and an optional discriminant.
///
/// Computes SHA512Half(bytes || BE32(discriminant)? || BE32(i)) for
/// `i = 0, 1, ...` and returns the first digest that is a valid non-zero
/// scalar.
///
/// # Panics
/// If no counter value in `0..=u32::MAX` yields a valid scalar. The chance
/// of a single candidate failing is about 2^-128.
pub fn derive_scalar(bytes: &[u8], discriminant: Option<u32>) -> Scalar {
    let discriminant = discriminant.map(u32::to_be_bytes);
    for i in 0..=u32::MAX {
        let counter = i.to_be_bytes();
        let digest = match &discriminant {
            Some(d) => sha512_half_parts(&[bytes, &d[..], &counter[..]]),
            None => sha512_half_parts(&[bytes, &counter[..]]),
        };
        let candidate: Option<Scalar> = Scalar::from_repr(FieldBytes::from(digest)).into();
        if let Some(scalar) = candidate {
            if !bool::from(scalar.is_zero()) {
                return scalar;
            }
        }
    }
    panic!("scalar search exhausted the 32-bit counter space");
}

/// Root private generator of a seed.
pub fn derive_root_key(seed: &[u8]) -> Scalar {
    derive_scalar(seed, None)
}

/// Account private key of a seed: `derive_scalar(G·root, 0) + root (mod n)`.
pub fn derive_account_key(seed: &[u8]) -> Result<Secp256k1PrivateKey, KeypairError> {
    let private_gen = derive_root_key(seed);
    let public_gen = compress(&(ProjectivePoint::GENERATOR * private_gen));
    let account_scalar = derive_scalar(&public_gen, Some(0));
    Secp256k1PrivateKey::from_scalar(&(account_scalar + private_gen))
}

/// Derive the account keypair of a 16-byte seed.
///
/// # Arguments
/// * `seed` - Seed entropy.
/// * `validator` - Validator keypairs are not supported and always fail.
///
/// # Returns
/// `00`-prefixed private key hex and compressed public key hex.
pub fn derive_keypair(seed: &[u8], validator: bool) -> Result<KeyPair, KeypairError> {
    if validator {
        return Err(KeypairError::ValidatorUnsupported);
    }
    Ok(derive_account_key(seed)?.to_keypair())
}

/// Derive an account public key from a root public key (the public
/// generator) without access to the seed.
///
/// # Arguments
/// * `public_generator` - 33-byte compressed root public key.
///
/// # Returns
/// The compressed account public key, or `InvalidLength` if the generator
/// is not 33 bytes.
pub fn derive_public_key_from_public_generator(
    public_generator: &[u8],
) -> Result<[u8; 33], KeypairError> {
    check_tagged_length("public generator", public_generator)?;
    let root = PublicKey::from_sec1_bytes(public_generator)
        .map_err(|e| KeypairError::InvalidPublicKey(e.to_string()))?;
    let scalar = derive_scalar(public_generator, Some(0));
    let point = root.to_projective() + ProjectivePoint::GENERATOR * scalar;
    Ok(compress(&point))
}

/// Sign SHA512Half(`message`) with RFC6979 deterministic ECDSA.
///
/// # Arguments
/// * `message` - Raw message bytes.
/// * `private_key_hex` - `00`-prefixed (or bare) private key hex.
///
/// # Returns
/// The low-S, DER-encoded signature as upper-case hex.
pub fn sign(message: &[u8], private_key_hex: &str) -> Result<String, KeypairError> {
    let key = Secp256k1PrivateKey::from_hex(private_key_hex)?;
    let digest = sha512_half(message);
    let signature: Signature = key
        .signing_key()
        .sign_prehash(&digest)
        .map_err(|e| KeypairError::InvalidSignature(e.to_string()))?;
    let signature = signature.normalize_s().unwrap_or(signature);
    let (r, s) = signature.split_bytes();
    let der = der::encode(&r, &s).map_err(PrimitivesError::from)?;
    Ok(hex::encode_upper(der))
}

/// Verify a DER signature over SHA512Half(`message`).
///
/// # Returns
/// `Ok(true)` if the signature is valid for `public_key_hex`, `Ok(false)` if
/// it is well-formed but does not verify, or an error for a malformed key
/// or DER encoding. Public keys must be 33-byte compressed SEC1.
pub fn verify(
    message: &[u8],
    signature_hex: &str,
    public_key_hex: &str,
) -> Result<bool, KeypairError> {
    let public_key = hex::decode(public_key_hex)?;
    check_tagged_length("public key", &public_key)?;
    let verifying_key = VerifyingKey::from_sec1_bytes(&public_key)
        .map_err(|e| KeypairError::InvalidPublicKey(e.to_string()))?;
    let (r, s) = der::decode_hex(signature_hex)?;
    let signature = match signature_from_integers(&r, &s) {
        Some(signature) => signature,
        None => return Ok(false),
    };
    let digest = sha512_half(message);
    Ok(verifying_key.verify_prehash(&digest, &signature).is_ok())
}

/// Build a k256 signature from minimal big-endian integers.
fn signature_from_integers(r: &[u8], s: &[u8]) -> Option<Signature> {
    if r.len() > 32 || s.len() > 32 {
        return None;
    }
    let mut r_bytes = FieldBytes::default();
    let mut s_bytes = FieldBytes::default();
    r_bytes[32 - r.len()..].copy_from_slice(r);
    s_bytes[32 - s.len()..].copy_from_slice(s);
    Signature::from_scalars(r_bytes, s_bytes).ok()
}

fn compress(point: &ProjectivePoint) -> [u8; 33] {
    let encoded = point.to_affine().to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(encoded.as_bytes());
    out
}
