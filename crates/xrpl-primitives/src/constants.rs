//! Protocol constants: payload lengths, Base58Check version prefixes and
//! hash prefixes, as defined by the XRP Ledger.

/// Length of an AccountID (RIPEMD160(SHA256(pubkey))).
pub const ACCOUNT_ID_LENGTH: usize = 20;
/// Length of an account public key, including its algorithm tag byte.
pub const ACCOUNT_PUBLIC_KEY_LENGTH: usize = 33;
/// Length of family-seed entropy.
pub const FAMILY_SEED_LENGTH: usize = 16;
/// Length of a node (validator) public key.
pub const NODE_PUBLIC_KEY_LENGTH: usize = 33;
/// Length of a raw secp256k1 scalar or Ed25519 secret seed.
pub const PRIVATE_KEY_LENGTH: usize = 32;
/// Length of a Base58Check checksum.
pub const CHECKSUM_LENGTH: usize = 4;

/// Classic address version prefix (addresses start with `r`).
pub const ACCOUNT_ADDRESS_PREFIX: [u8; 1] = [0x00];
/// Account public key version prefix (encodings start with `a`).
pub const ACCOUNT_PUBLIC_KEY_PREFIX: [u8; 1] = [0x23];
/// secp256k1 family seed version prefix (seeds start with `s`).
pub const FAMILY_SEED_PREFIX: [u8; 1] = [0x21];
/// Ed25519 family seed version prefix (seeds start with `sEd`).
pub const ED25519_SEED_PREFIX: [u8; 3] = [0x01, 0xE1, 0x4B];
/// Node public key version prefix (encodings start with `n`).
pub const NODE_PUBLIC_KEY_PREFIX: [u8; 1] = [0x1C];

/// Tag byte in front of Ed25519 public and private keys.
pub const ED25519_KEY_PREFIX: u8 = 0xED;
/// Display byte in front of secp256k1 private key hex.
pub const SECP256K1_PRIVATE_KEY_PREFIX: u8 = 0x00;

/// Hash prefixes prepended to serialized data before hashing or signing.
pub mod hash_prefix {
    /// `TXN\0`: transaction ID of a serialized transaction.
    pub const TRANSACTION_ID: [u8; 4] = [0x54, 0x58, 0x4E, 0x00];
    /// `STX\0`: single-signature signing payload.
    pub const TRANSACTION_SIGN: [u8; 4] = [0x53, 0x54, 0x58, 0x00];
    /// `SMT\0`: multisignature signing payload.
    pub const TRANSACTION_MULTISIGN: [u8; 4] = [0x53, 0x4D, 0x54, 0x00];
    /// `BCH\0`: Batch signing payload.
    pub const BATCH: [u8; 4] = [0x42, 0x43, 0x48, 0x00];
}
