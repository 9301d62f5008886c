//! Keypair and private-key wrapper types.
//!
//! Key material leaves this crate as upper-case hex with a one-byte tag:
//! `ED` for Ed25519 keys, `00` for secp256k1 private keys (a display byte,
//! not part of the scalar) and the SEC1 `02`/`03` byte for secp256k1 public
//! keys.

use std::fmt;

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::Scalar;
use zeroize::Zeroize;

use xrpl_primitives::constants::{
    ACCOUNT_PUBLIC_KEY_LENGTH, PRIVATE_KEY_LENGTH, SECP256K1_PRIVATE_KEY_PREFIX,
};
use xrpl_primitives::PrimitivesError;

use crate::KeypairError;

/// Tagged keys (`ED` + 32 bytes, `00` + scalar, compressed SEC1) are 33 bytes.
pub(crate) fn check_tagged_length(field: &'static str, key: &[u8]) -> Result<(), KeypairError> {
    if key.len() != ACCOUNT_PUBLIC_KEY_LENGTH {
        return Err(PrimitivesError::InvalidLength {
            field,
            expected: ACCOUNT_PUBLIC_KEY_LENGTH,
            got: key.len(),
        }
        .into());
    }
    Ok(())
}

/// A derived `(private, public)` key pair in hex display form.
///
/// The private key string is zeroized on drop and redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key: String,
    public_key: String,
}

impl KeyPair {
    /// Build a key pair from its hex display forms.
    pub fn new(private_key: String, public_key: String) -> Self {
        KeyPair {
            private_key,
            public_key,
        }
    }

    /// Tagged upper-case private key hex.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Tagged upper-case public key hex.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// A secp256k1 private key: a non-zero scalar below the curve order.
///
/// The `00` display byte exists only in the hex form; [`to_hex`](Self::to_hex)
/// adds it and [`from_hex`](Self::from_hex) strips it.
#[derive(Clone)]
pub struct Secp256k1PrivateKey {
    inner: SigningKey,
}

impl Secp256k1PrivateKey {
    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(Secp256k1PrivateKey)`, or an error if the scalar is zero or not
    /// below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeypairError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(KeypairError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_LENGTH,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_bytes(bytes.into())
            .map_err(|e| KeypairError::InvalidPrivateKey(e.to_string()))?;
        Ok(Secp256k1PrivateKey { inner })
    }

    /// Create a private key from a k256 scalar.
    pub fn from_scalar(scalar: &Scalar) -> Result<Self, KeypairError> {
        Self::from_bytes(&scalar.to_bytes())
    }

    /// Parse a private key from hex.
    ///
    /// Accepts the 33-byte display form (`00` + scalar) or a bare 32-byte
    /// scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeypairError> {
        let mut bytes = hex::decode(hex_str)?;
        let result = match bytes.len() {
            33 if bytes[0] == SECP256K1_PRIVATE_KEY_PREFIX => Self::from_bytes(&bytes[1..]),
            33 => Err(KeypairError::UnknownKeyPrefix(format!("{:02X}", bytes[0]))),
            _ => Self::from_bytes(&bytes),
        };
        bytes.zeroize();
        result
    }

    /// Hex display form: `00` followed by the upper-case 32-byte scalar.
    pub fn to_hex(&self) -> String {
        let mut scalar = self.inner.to_bytes();
        let out = format!(
            "{:02X}{}",
            SECP256K1_PRIVATE_KEY_PREFIX,
            hex::encode_upper(&scalar)
        );
        scalar.as_mut_slice().zeroize();
        out
    }

    /// Compressed SEC1 public key.
    pub fn public_key(&self) -> [u8; 33] {
        let encoded = self.inner.verifying_key().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Upper-case hex of the compressed public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode_upper(self.public_key())
    }

    /// The underlying scalar, for BIP-32 style arithmetic.
    pub fn to_scalar(&self) -> Scalar {
        **self.inner.as_nonzero_scalar()
    }

    /// Both keys in hex display form.
    pub fn to_keypair(&self) -> KeyPair {
        KeyPair::new(self.to_hex(), self.public_key_hex())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl fmt::Debug for Secp256k1PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1PrivateKey")
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}
