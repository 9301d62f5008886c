//! BIP-39 mnemonic wallets.
//!
//! The mnemonic's seed (empty passphrase) is walked down the BIP-32 path
//! `m/44'/144'/0'/0/0` to a secp256k1 account key.

use bip39::Mnemonic;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar};
use zeroize::Zeroize;

use xrpl_keypairs::{check_keypair, Secp256k1PrivateKey};
use xrpl_primitives::hash::sha512_hmac;

use crate::error::WalletError;
use crate::wallet::Wallet;

/// Offset of hardened child indices.
pub const HARDENED: u32 = 0x8000_0000;

/// `m/44'/144'/0'/0/0`.
pub const XRPL_DERIVATION_PATH: [u32; 5] = [44 | HARDENED, 144 | HARDENED, HARDENED, 0, 0];

const MASTER_KEY_SALT: &[u8] = b"Bitcoin seed";

/// A BIP-32 private node.
struct ExtendedKey {
    key: Secp256k1PrivateKey,
    chain_code: [u8; 32],
}

impl ExtendedKey {
    fn master(seed: &[u8]) -> Result<Self, WalletError> {
        let mut i = sha512_hmac(MASTER_KEY_SALT, seed);
        let key = Secp256k1PrivateKey::from_bytes(&i[..32])
            .map_err(|e| WalletError::KeyDerivation(e.to_string()));
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();
        Ok(ExtendedKey {
            key: key?,
            chain_code,
        })
    }

    fn derive_child(&self, index: u32) -> Result<Self, WalletError> {
        let parent = self.key.to_scalar();
        let mut data = Vec::with_capacity(37);
        if index >= HARDENED {
            data.push(0x00);
            data.extend_from_slice(&parent.to_bytes());
        } else {
            data.extend_from_slice(&self.key.public_key());
        }
        data.extend_from_slice(&index.to_be_bytes());

        let mut i = sha512_hmac(&self.chain_code, &data);
        data.zeroize();
        let tweak: Option<Scalar> =
            Scalar::from_repr(FieldBytes::clone_from_slice(&i[..32])).into();
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        i.zeroize();

        let tweak = tweak.ok_or_else(|| {
            WalletError::KeyDerivation(format!("child {} outside curve order", index))
        })?;
        let key = Secp256k1PrivateKey::from_scalar(&(tweak + parent))
            .map_err(|e| WalletError::KeyDerivation(e.to_string()))?;
        Ok(ExtendedKey { key, chain_code })
    }
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

/// Walk `path` from the master key of a BIP-39 seed.
pub fn derive_path(seed: &[u8], path: &[u32]) -> Result<Secp256k1PrivateKey, WalletError> {
    let mut node = ExtendedKey::master(seed)?;
    for &index in path {
        node = node.derive_child(index)?;
    }
    Ok(node.key.clone())
}

impl Wallet {
    /// Build a secp256k1 wallet from a BIP-39 mnemonic.
    ///
    /// # Arguments
    /// * `mnemonic` - English BIP-39 phrase; the seed uses an empty passphrase.
    /// * `master_address` - Account the keys act for, when they are a
    ///   regular key.
    pub fn from_mnemonic(mnemonic: &str, master_address: Option<&str>) -> Result<Self, WalletError> {
        let mnemonic =
            Mnemonic::parse(mnemonic).map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
        let mut seed = mnemonic.to_seed("");
        let key = derive_path(&seed, &XRPL_DERIVATION_PATH);
        seed.zeroize();

        let pair = key?.to_keypair();
        check_keypair(&pair)?;
        tracing::debug!("derived wallet from mnemonic");
        Wallet::from_keypair(&pair, None, master_address)
    }
}
