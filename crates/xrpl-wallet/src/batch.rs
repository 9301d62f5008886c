//! Multi-account Batch co-signing.
//!
//! Each participant signs the outer transaction's [`BatchSignable`] with
//! [`sign_multi_batch`]; the submitter merges the copies with
//! [`combine_batch_signers`].

use serde_json::Value;

use crate::codec::{has_value, is_batch, TransactionCodec, TxFields};
use crate::error::WalletError;
use crate::types::{raw_transactions, BatchSignable, BatchSigner, SignerData};
use crate::wallet::Wallet;

/// Options for [`sign_multi_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignMultiBatchOptions {
    /// Inner-transaction account this signature authorizes. Defaults to the
    /// wallet's address.
    pub batch_account: Option<String>,
    /// Sign as a multisig member of the batch account, using the wallet's
    /// own address as the signer.
    pub multisign: bool,
    /// Sign as a multisig member under this signer address.
    pub multisign_account: Option<String>,
}

/// Add one `BatchSigners` entry to a Batch transaction.
///
/// # Arguments
/// * `wallet` - Signing wallet.
/// * `tx` - Outer Batch transaction; the entry is appended to its
///   `BatchSigners`.
/// * `opts` - Batch account and multisig selection.
/// * `codec` - Serializer used for inner transaction IDs and the payload.
///
/// # Errors
/// `NotBatchTransaction` if `tx` is not a Batch, and `BatchAccountNotFound`
/// if no inner transaction has the batch account as its `Account`.
pub fn sign_multi_batch<C>(
    wallet: &Wallet,
    tx: &mut TxFields,
    opts: &SignMultiBatchOptions,
    codec: &C,
) -> Result<(), WalletError>
where
    C: TransactionCodec + ?Sized,
{
    if !is_batch(tx) {
        return Err(WalletError::NotBatchTransaction);
    }
    let batch_account = opts
        .batch_account
        .clone()
        .unwrap_or_else(|| wallet.classic_address().to_string());
    let multisign_account = match &opts.multisign_account {
        Some(account) => Some(account.clone()),
        None if opts.multisign => Some(wallet.classic_address().to_string()),
        None => None,
    };

    let included = raw_transactions(tx)?
        .iter()
        .any(|inner| matches!(inner.get("Account"), Some(Value::String(a)) if *a == batch_account));
    if !included {
        return Err(WalletError::BatchAccountNotFound(batch_account));
    }

    let signable = BatchSignable::from_batch_transaction(tx, codec)?;
    let payload = codec.encode_for_signing_batch(&signable)?;
    let signature = xrpl_keypairs::sign(&payload, wallet.private_key())?;

    let entry = match multisign_account {
        Some(account) => BatchSigner::nested(
            batch_account,
            SignerData {
                account,
                signing_pub_key: wallet.public_key().to_string(),
                txn_signature: signature,
            },
        ),
        None => BatchSigner::direct(batch_account, wallet.public_key().to_string(), signature),
    };
    tracing::debug!(
        batch_account = %entry.batch_signer.account,
        nested = entry.batch_signer.signers.is_some(),
        inner_transactions = signable.tx_ids.len(),
        "signed batch"
    );

    let mut signers = batch_signers_of(tx)?;
    signers.push(entry);
    tx.insert("BatchSigners".to_string(), serde_json::to_value(signers)?);
    Ok(())
}

/// Merge the `BatchSigners` of several signed copies of one Batch.
///
/// Every copy must be the same transaction apart from `BatchSigners`.
/// Entries for the submitter (the outer `Account`) are dropped; the rest
/// are sorted by account ascending, ties broken by their JSON form.
///
/// # Errors
/// `BatchSignableMismatch` if the copies sign different inner transactions
/// or flags, and `BatchTransactionMismatch` if any other outer field
/// differs.
///
/// # Returns
/// The shared transaction with the merged list, encoded as upper-case hex.
pub fn combine_batch_signers<C>(batches: &[TxFields], codec: &C) -> Result<String, WalletError>
where
    C: TransactionCodec + ?Sized,
{
    let first = batches.first().ok_or(WalletError::NoTransactionsProvided)?;
    let submitter = first.get("Account").and_then(Value::as_str);

    let mut expected: Option<BatchSignable> = None;
    let base = without_batch_signers(first);
    let mut keyed = Vec::new();
    for tx in batches {
        let signers = batch_signers_of(tx)?;
        if signers.is_empty() {
            return Err(WalletError::MissingBatchSigner);
        }
        if has_value(tx, "TxnSignature") || has_value(tx, "Signers") {
            return Err(WalletError::TransactionAlreadySigned);
        }
        let signable = BatchSignable::from_batch_transaction(tx, codec)?;
        match &expected {
            None => expected = Some(signable),
            Some(prev) if *prev != signable => return Err(WalletError::BatchSignableMismatch),
            Some(_) => {}
        }
        if without_batch_signers(tx) != base {
            return Err(WalletError::BatchTransactionMismatch);
        }
        for signer in signers {
            if Some(signer.batch_signer.account.as_str()) == submitter {
                continue;
            }
            let canonical = serde_json::to_string(&signer)?;
            keyed.push((signer.batch_signer.account.clone(), canonical, signer));
        }
    }
    keyed.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    let merged: Vec<BatchSigner> = keyed.into_iter().map(|(_, _, signer)| signer).collect();
    tracing::debug!(
        inputs = batches.len(),
        signers = merged.len(),
        "combined batch signers"
    );

    let mut tx = base;
    tx.insert("BatchSigners".to_string(), serde_json::to_value(merged)?);
    Ok(hex::encode_upper(codec.encode(&tx)?))
}

fn without_batch_signers(tx: &TxFields) -> TxFields {
    let mut fields = tx.clone();
    fields.remove("BatchSigners");
    fields
}

/// The `BatchSigners` entries of a transaction; absent means none.
pub(crate) fn batch_signers_of(tx: &TxFields) -> Result<Vec<BatchSigner>, WalletError> {
    match tx.get("BatchSigners") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => Ok(serde_json::from_value(value.clone())?),
    }
}
