//! Plain multisignature combination.

use serde_json::Value;

use crate::codec::{TransactionCodec, TxFields};
use crate::error::WalletError;
use crate::types::Signer;

/// Merge the `Signers` of several multisigned copies of one transaction.
///
/// Every blob must be the same transaction apart from its `Signers`. The
/// merged list is sorted by account descending.
///
/// # Returns
/// The first transaction with the merged list, encoded as upper-case hex.
pub fn combine_multisigned<C, S>(blobs: &[S], codec: &C) -> Result<String, WalletError>
where
    C: TransactionCodec + ?Sized,
    S: AsRef<str>,
{
    if blobs.is_empty() {
        return Err(WalletError::NoTransactionsProvided);
    }

    let mut base: Option<TxFields> = None;
    let mut keyed = Vec::new();
    for blob in blobs {
        let mut tx = codec.decode(&hex::decode(blob.as_ref())?)?;
        let signers: Vec<Signer> = match tx.remove("Signers") {
            Some(Value::Array(entries)) if !entries.is_empty() => {
                serde_json::from_value(Value::Array(entries))?
            }
            _ => {
                return Err(WalletError::InvalidField {
                    field: "Signers",
                    reason: "multisigned transaction has no signers".to_string(),
                })
            }
        };
        match &base {
            None => base = Some(tx),
            Some(first) if *first != tx => return Err(WalletError::MultisignMismatch),
            Some(_) => {}
        }
        for signer in signers {
            let canonical = serde_json::to_string(&signer)?;
            keyed.push((signer.signer.account.clone(), canonical, signer));
        }
    }
    keyed.sort_by(|a, b| (&b.0, &b.1).cmp(&(&a.0, &a.1)));
    let merged: Vec<Signer> = keyed.into_iter().map(|(_, _, signer)| signer).collect();
    tracing::debug!(inputs = blobs.len(), signers = merged.len(), "combined multisignatures");

    let mut tx = base.ok_or(WalletError::NoTransactionsProvided)?;
    tx.insert("Signers".to_string(), serde_json::to_value(merged)?);
    Ok(hex::encode_upper(codec.encode(&tx)?))
}
