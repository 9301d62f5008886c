use xrpl_primitives::{ErrorKind, PrimitivesError};

/// Error types for key derivation, signing and verification.
#[derive(Debug, thiserror::Error)]
pub enum KeypairError {
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
    #[error("unknown key prefix: {0}")]
    UnknownKeyPrefix(String),
    #[error("validator keypairs are not supported")]
    ValidatorUnsupported,
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    #[error("derived keypair failed verification")]
    VerificationFailed,
    #[error("random number generator failed: {0}")]
    Rng(String),
}

impl KeypairError {
    /// The taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KeypairError::Primitives(e) => e.kind(),
            KeypairError::UnknownKeyPrefix(_) | KeypairError::ValidatorUnsupported => {
                ErrorKind::AlgorithmMismatch
            }
            KeypairError::InvalidPrivateKey(_)
            | KeypairError::InvalidPublicKey(_)
            | KeypairError::InvalidSignature(_) => ErrorKind::Encoding,
            KeypairError::VerificationFailed => ErrorKind::Verification,
            KeypairError::Rng(_) => ErrorKind::Collaborator,
        }
    }
}

impl From<hex::FromHexError> for KeypairError {
    fn from(e: hex::FromHexError) -> Self {
        KeypairError::Primitives(e.into())
    }
}
