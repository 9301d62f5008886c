//! The two signing algorithm families supported by the ledger.

use std::fmt;

use crate::constants::{ED25519_SEED_PREFIX, FAMILY_SEED_PREFIX};

/// Signing algorithm family of a seed or keypair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// ECDSA over secp256k1 (the ledger default).
    #[default]
    Secp256k1,
    /// EdDSA over Curve25519.
    Ed25519,
}

impl Algorithm {
    /// Base58Check version prefix used when encoding a family seed.
    pub fn seed_prefix(&self) -> &'static [u8] {
        match self {
            Algorithm::Secp256k1 => &FAMILY_SEED_PREFIX,
            Algorithm::Ed25519 => &ED25519_SEED_PREFIX,
        }
    }

    /// Lowercase name as used in ledger RPC (`key_type`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Secp256k1 => "secp256k1",
            Algorithm::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
