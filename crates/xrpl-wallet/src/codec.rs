//! The transaction serializer seam.
//!
//! Canonical binary serialization of transactions lives outside this crate.
//! Wallet operations take any [`TransactionCodec`] and work on transactions
//! as JSON field maps.

use serde_json::{Map, Value};

use xrpl_primitives::address_codec::AccountId;
use xrpl_primitives::hash::transaction_id;

use crate::error::WalletError;
use crate::types::BatchSignable;

/// A transaction as a map of field name to JSON value.
pub type TxFields = Map<String, Value>;

/// Binary transaction serializer.
///
/// Implementations map codec failures to [`WalletError::Codec`].
pub trait TransactionCodec {
    /// Serialize every field of a transaction.
    fn encode(&self, tx: &TxFields) -> Result<Vec<u8>, WalletError>;

    /// Parse a serialized transaction back into fields.
    fn decode(&self, blob: &[u8]) -> Result<TxFields, WalletError>;

    /// Single-signing payload: `STX\0` prefix plus the signing fields.
    fn encode_for_signing(&self, tx: &TxFields) -> Result<Vec<u8>, WalletError>;

    /// Multisigning payload: `SMT\0` prefix, the signing fields, then the
    /// signer's AccountID.
    fn encode_for_multisigning(
        &self,
        tx: &TxFields,
        signer: &AccountId,
    ) -> Result<Vec<u8>, WalletError>;

    /// Batch signing payload:
    /// `BCH\0 || BE32(flags) || BE32(count) || txID_1 .. txID_n`.
    fn encode_for_signing_batch(&self, batch: &BatchSignable) -> Result<Vec<u8>, WalletError> {
        batch.signing_payload()
    }
}

/// Transaction ID of a fully signed transaction blob.
///
/// # Arguments
/// * `blob_hex` - Hex-encoded signed transaction.
/// * `codec` - Decodes the blob to check it carries a signature field.
///
/// # Returns
/// Upper-case hex SHA512Half(`TXN\0` || blob), or `TransactionNotSigned` if
/// none of `TxnSignature`, `Signers` and `SigningPubKey` is present.
pub fn hash_signed_tx<C>(blob_hex: &str, codec: &C) -> Result<String, WalletError>
where
    C: TransactionCodec + ?Sized,
{
    let blob = hex::decode(blob_hex)?;
    let tx = codec.decode(&blob)?;
    let signed = ["TxnSignature", "Signers", "SigningPubKey"]
        .iter()
        .any(|field| tx.contains_key(*field));
    if !signed {
        return Err(WalletError::TransactionNotSigned);
    }
    Ok(hex::encode_upper(transaction_id(&blob)))
}

/// Transaction ID of a field map, as serialized by `codec`.
pub fn hash_tx<C>(tx: &TxFields, codec: &C) -> Result<String, WalletError>
where
    C: TransactionCodec + ?Sized,
{
    Ok(hex::encode_upper(transaction_id(&codec.encode(tx)?)))
}

pub(crate) fn str_field<'a>(
    tx: &'a TxFields,
    field: &'static str,
) -> Result<&'a str, WalletError> {
    match tx.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(WalletError::InvalidField {
            field,
            reason: format!("expected string, got {}", other),
        }),
        None => Err(WalletError::InvalidField {
            field,
            reason: "missing".to_string(),
        }),
    }
}

/// Whether `field` is present with a non-empty value.
pub(crate) fn has_value(tx: &TxFields, field: &str) -> bool {
    match tx.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(_) => true,
    }
}

pub(crate) fn is_batch(tx: &TxFields) -> bool {
    matches!(tx.get("TransactionType"), Some(Value::String(t)) if t == "Batch")
}
