/// XRPL SDK - Wallets, transaction signing and Batch co-signing.
///
/// Binary transaction serialization is supplied by the caller through the
/// [`TransactionCodec`] trait; transactions travel as JSON field maps.

mod error;
pub use error::WalletError;

pub mod batch;
pub mod codec;
pub mod hd;
pub mod multisign;
pub mod types;
pub mod wallet;

pub use batch::{combine_batch_signers, sign_multi_batch, SignMultiBatchOptions};
pub use codec::{hash_signed_tx, hash_tx, TransactionCodec, TxFields};
pub use multisign::combine_multisigned;
pub use types::{BatchSignable, BatchSigner, BatchSignerData, Signer, SignerData};
pub use wallet::{verify_transaction, Wallet};

#[cfg(test)]
mod test_codec;
