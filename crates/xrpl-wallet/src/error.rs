use xrpl_keypairs::KeypairError;
use xrpl_primitives::{ErrorKind, PrimitivesError};

/// Error types for wallet, signing and Batch operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
    #[error("keypair error: {0}")]
    Keypair(#[from] KeypairError),
    #[error("transaction codec error: {0}")]
    Codec(String),
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
    #[error("invalid `{field}` field: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("transaction must have at least one of TxnSignature, Signers, or SigningPubKey")]
    TransactionNotSigned,
    #[error("transaction must be a batch transaction")]
    NotBatchTransaction,
    #[error("batch account {0} not found in transaction")]
    BatchAccountNotFound(String),
    #[error("no transactions provided")]
    NoTransactionsProvided,
    #[error("transaction must include a batch signer")]
    MissingBatchSigner,
    #[error("transaction has already been signed")]
    TransactionAlreadySigned,
    #[error("inner batch transaction {0} must not be signed")]
    InnerTransactionSigned(usize),
    #[error("inner batch transaction {0} must not be a batch transaction")]
    NestedBatch(usize),
    #[error("batch signable is not equal")]
    BatchSignableMismatch,
    #[error("batch transactions differ outside BatchSigners")]
    BatchTransactionMismatch,
    #[error("multisigned transactions do not match")]
    MultisignMismatch,
}

impl WalletError {
    /// The taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::Primitives(e) => e.kind(),
            WalletError::Keypair(e) => e.kind(),
            WalletError::Codec(_) => ErrorKind::Collaborator,
            WalletError::InvalidMnemonic(_) | WalletError::InvalidField { .. } => {
                ErrorKind::Encoding
            }
            WalletError::KeyDerivation(_) | WalletError::TransactionNotSigned => {
                ErrorKind::Verification
            }
            WalletError::NotBatchTransaction
            | WalletError::BatchAccountNotFound(_)
            | WalletError::NoTransactionsProvided
            | WalletError::MissingBatchSigner
            | WalletError::TransactionAlreadySigned
            | WalletError::InnerTransactionSigned(_)
            | WalletError::NestedBatch(_)
            | WalletError::BatchSignableMismatch
            | WalletError::BatchTransactionMismatch
            | WalletError::MultisignMismatch => ErrorKind::BatchProtocol,
        }
    }
}

impl From<hex::FromHexError> for WalletError {
    fn from(e: hex::FromHexError) -> Self {
        WalletError::Primitives(e.into())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::InvalidField {
            field: "json",
            reason: e.to_string(),
        }
    }
}
