#![deny(missing_docs)]

//! XRPL SDK - Complete SDK.
//!
//! Re-exports the address codecs, key derivation and wallet crates for
//! convenient single-crate usage.

pub use xrpl_keypairs as keypairs;
pub use xrpl_primitives as primitives;
pub use xrpl_wallet as wallet;

pub use xrpl_keypairs::{derive_keypair, generate_seed, Algorithm, KeyPair};
pub use xrpl_wallet::{TransactionCodec, Wallet};
