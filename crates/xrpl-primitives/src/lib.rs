/// XRPL SDK - Encoding and hashing primitives.
///
/// This crate provides the foundational building blocks for the XRPL SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, SHA-512, SHA-512Half, HMAC)
/// - Base58 / Base58Check with the XRPL alphabet
/// - Classic address, node public key and account public key codecs
/// - Family seed codec and the signing algorithm enum
/// - DER encoding of ECDSA signatures
/// - Protocol constants and hash prefixes

pub mod address_codec;
pub mod algorithm;
pub mod base58;
pub mod constants;
pub mod der;
pub mod hash;
pub mod seed;

mod error;
pub use algorithm::Algorithm;
pub use error::{DerError, ErrorKind, PrimitivesError};
