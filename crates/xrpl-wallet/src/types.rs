//! Batch and multisignature types: the Batch signing payload and the
//! signer entries stored in `BatchSigners` and `Signers`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use xrpl_primitives::constants::hash_prefix;

use crate::codec::{has_value, is_batch, TransactionCodec, TxFields};
use crate::error::WalletError;

/// The payload every Batch participant signs: the outer transaction's
/// flags and the IDs of its inner transactions, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSignable {
    #[serde(rename = "Flags")]
    pub flags: u32,
    #[serde(rename = "TxIDs")]
    pub tx_ids: Vec<String>,
}

impl BatchSignable {
    /// Compute the signable of a Batch transaction.
    ///
    /// Each inner `RawTransaction` is hashed as a transaction ID over its
    /// `codec` serialization.
    ///
    /// # Errors
    /// `InnerTransactionSigned` if an inner transaction carries a
    /// `TxnSignature` or non-empty `Signers`; `NestedBatch` if an inner
    /// transaction is itself a Batch.
    pub fn from_batch_transaction<C>(tx: &TxFields, codec: &C) -> Result<Self, WalletError>
    where
        C: TransactionCodec + ?Sized,
    {
        let flags = flags_of(tx)?;
        let mut tx_ids = Vec::new();
        for (index, inner) in raw_transactions(tx)?.into_iter().enumerate() {
            if has_value(inner, "TxnSignature") || has_value(inner, "Signers") {
                return Err(WalletError::InnerTransactionSigned(index));
            }
            if is_batch(inner) {
                return Err(WalletError::NestedBatch(index));
            }
            tx_ids.push(crate::codec::hash_tx(inner, codec)?);
        }
        Ok(BatchSignable { flags, tx_ids })
    }

    /// Binary signing payload:
    /// `BCH\0 || BE32(flags) || BE32(count) || txID_1 .. txID_n`.
    pub fn signing_payload(&self) -> Result<Vec<u8>, WalletError> {
        let count = u32::try_from(self.tx_ids.len()).map_err(|_| WalletError::InvalidField {
            field: "TxIDs",
            reason: "too many transactions".to_string(),
        })?;
        let mut out = Vec::with_capacity(12 + 32 * self.tx_ids.len());
        out.extend_from_slice(&hash_prefix::BATCH);
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.extend_from_slice(&count.to_be_bytes());
        for id in &self.tx_ids {
            let bytes = hex::decode(id)?;
            if bytes.len() != 32 {
                return Err(WalletError::InvalidField {
                    field: "TxIDs",
                    reason: format!("expected 32-byte hash, got {} bytes", bytes.len()),
                });
            }
            out.extend_from_slice(&bytes);
        }
        Ok(out)
    }
}

/// One participant's contribution to a Batch, as stored in `BatchSigners`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSigner {
    #[serde(rename = "BatchSigner")]
    pub batch_signer: BatchSignerData,
}

/// Either a direct signature (`signing_pub_key` + `txn_signature`) or a
/// nested multisignature (`signers`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchSignerData {
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_pub_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txn_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signers: Option<Vec<Signer>>,
}

/// One multisignature entry, as stored in `Signers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    #[serde(rename = "Signer")]
    pub signer: SignerData,
}

/// A signer account with its public key and signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignerData {
    pub account: String,
    pub signing_pub_key: String,
    pub txn_signature: String,
}

impl BatchSigner {
    /// A direct single-key contribution.
    pub fn direct(account: String, signing_pub_key: String, txn_signature: String) -> Self {
        BatchSigner {
            batch_signer: BatchSignerData {
                account,
                signing_pub_key: Some(signing_pub_key),
                txn_signature: Some(txn_signature),
                signers: None,
            },
        }
    }

    /// A contribution made by one signer of a multisig batch account.
    pub fn nested(account: String, signer: SignerData) -> Self {
        BatchSigner {
            batch_signer: BatchSignerData {
                account,
                signing_pub_key: None,
                txn_signature: None,
                signers: Some(vec![Signer { signer }]),
            },
        }
    }
}

/// `Flags` of a transaction; absent means zero.
pub(crate) fn flags_of(tx: &TxFields) -> Result<u32, WalletError> {
    match tx.get("Flags") {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value
            .as_u64()
            .and_then(|f| u32::try_from(f).ok())
            .ok_or_else(|| WalletError::InvalidField {
                field: "Flags",
                reason: format!("expected u32, got {}", value),
            }),
    }
}

/// The inner transactions of a Batch (`RawTransactions[i].RawTransaction`).
pub(crate) fn raw_transactions(tx: &TxFields) -> Result<Vec<&TxFields>, WalletError> {
    let invalid = |reason: &str| WalletError::InvalidField {
        field: "RawTransactions",
        reason: reason.to_string(),
    };
    let entries = tx
        .get("RawTransactions")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("expected an array"))?;
    entries
        .iter()
        .map(|entry| {
            entry
                .get("RawTransaction")
                .and_then(Value::as_object)
                .ok_or_else(|| invalid("expected RawTransaction objects"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signing_payload_layout() {
        let signable = BatchSignable {
            flags: 0x0001_0000,
            tx_ids: vec!["AB".repeat(32), "CD".repeat(32)],
        };
        let payload = signable.signing_payload().unwrap();
        assert_eq!(payload.len(), 4 + 4 + 4 + 64);
        assert_eq!(&payload[..4], b"BCH\0");
        assert_eq!(&payload[4..8], &[0x00, 0x01, 0x00, 0x00]);
        assert_eq!(&payload[8..12], &[0, 0, 0, 2]);
        assert_eq!(&payload[12..44], &[0xAB; 32]);
        assert_eq!(&payload[44..], &[0xCD; 32]);
    }

    #[test]
    fn test_signing_payload_rejects_bad_ids() {
        let short = BatchSignable {
            flags: 0,
            tx_ids: vec!["AB".repeat(31)],
        };
        assert!(matches!(
            short.signing_payload(),
            Err(WalletError::InvalidField { field: "TxIDs", .. })
        ));
        let not_hex = BatchSignable {
            flags: 0,
            tx_ids: vec!["ZZ".repeat(32)],
        };
        assert!(not_hex.signing_payload().is_err());
    }

    #[test]
    fn test_batch_signer_serialization() {
        let direct = BatchSigner::direct("rA".into(), "ED01".into(), "AA".into());
        assert_eq!(
            serde_json::to_value(&direct).unwrap(),
            json!({"BatchSigner": {"Account": "rA", "SigningPubKey": "ED01", "TxnSignature": "AA"}})
        );

        let nested = BatchSigner::nested(
            "rA".into(),
            SignerData {
                account: "rB".into(),
                signing_pub_key: "ED02".into(),
                txn_signature: "BB".into(),
            },
        );
        assert_eq!(
            serde_json::to_value(&nested).unwrap(),
            json!({"BatchSigner": {"Account": "rA", "Signers": [
                {"Signer": {"Account": "rB", "SigningPubKey": "ED02", "TxnSignature": "BB"}}
            ]}})
        );
        let back: BatchSigner = serde_json::from_value(serde_json::to_value(&nested).unwrap()).unwrap();
        assert_eq!(back, nested);
    }

    #[test]
    fn test_flags_of() {
        let tx = json!({"Flags": 65536}).as_object().unwrap().clone();
        assert_eq!(flags_of(&tx).unwrap(), 65536);
        assert_eq!(flags_of(&TxFields::new()).unwrap(), 0);
        let bad = json!({"Flags": "x"}).as_object().unwrap().clone();
        assert!(flags_of(&bad).is_err());
    }

    #[test]
    fn test_raw_transactions() {
        let tx = json!({"RawTransactions": [
            {"RawTransaction": {"Account": "rA"}},
            {"RawTransaction": {"Account": "rB"}}
        ]})
        .as_object()
        .unwrap()
        .clone();
        let inner = raw_transactions(&tx).unwrap();
        assert_eq!(inner.len(), 2);
        assert_eq!(inner[1]["Account"], "rB");

        let missing = TxFields::new();
        assert!(raw_transactions(&missing).is_err());
    }
}
