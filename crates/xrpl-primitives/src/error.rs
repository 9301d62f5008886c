/// Error taxonomy shared by every crate in the SDK.
///
/// Each crate keeps its own error enum; `kind()` on those enums maps a variant
/// onto one of these categories so callers can branch without matching every
/// variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A fixed-width input (entropy, AccountID, public key) has the wrong size.
    InputLength,
    /// Bad hex, bad Base58 character, checksum or version-prefix mismatch.
    Encoding,
    /// Unrecognized key prefix, or a request the algorithm family refuses.
    AlgorithmMismatch,
    /// Structurally invalid DER signature.
    DerFormat,
    /// A derived keypair or signature failed verification.
    Verification,
    /// Batch or multisignature protocol violation.
    BatchProtocol,
    /// Failure reported by an external collaborator (e.g. the serializer).
    Collaborator,
}

/// Structural defects found while decoding a DER signature.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DerError {
    #[error("invalid DER sequence tag: expected 0x30, got {0:#04x}")]
    InvalidSequenceTag(u8),

    #[error("DER length mismatch: declared {declared}, remaining {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("not enough data for DER element")]
    NotEnoughData,

    #[error("invalid DER integer tag: expected 0x02, got {0:#04x}")]
    InvalidIntegerTag(u8),

    #[error("malformed DER integer: {0}")]
    MalformedInteger(String),

    #[error("{0} leftover bytes after DER signature")]
    LeftoverBytes(usize),
}

/// Unified error type for all primitives operations.
///
/// Covers hashing inputs, Base58Check codecs, seed codecs and DER signatures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    #[error("`{field}` length should be {expected} not {got}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("version prefix mismatch: expected {expected}, got {got}")]
    PrefixMismatch { expected: String, got: String },

    #[error("invalid seed; could not determine encoding algorithm")]
    InvalidSeed,

    #[error("`{0}` is an invalid classic address")]
    InvalidClassicAddress(String),

    #[error("invalid DER signature: {0}")]
    Der(#[from] DerError),
}

impl PrimitivesError {
    /// The taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrimitivesError::InvalidLength { .. } => ErrorKind::InputLength,
            PrimitivesError::InvalidHex(_)
            | PrimitivesError::InvalidBase58(_)
            | PrimitivesError::ChecksumMismatch
            | PrimitivesError::PrefixMismatch { .. }
            | PrimitivesError::InvalidSeed
            | PrimitivesError::InvalidClassicAddress(_) => ErrorKind::Encoding,
            PrimitivesError::Der(_) => ErrorKind::DerFormat,
        }
    }
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
