//! JSON stand-in for the binary transaction serializer.

use xrpl_primitives::address_codec::AccountId;
use xrpl_primitives::constants::hash_prefix;

use crate::codec::{TransactionCodec, TxFields};
use crate::error::WalletError;

/// Serializes field maps as sorted JSON. Signing payloads omit the
/// non-signing fields and carry the real hash prefixes.
pub(crate) struct JsonCodec;

fn signing_fields(tx: &TxFields) -> TxFields {
    let mut fields = tx.clone();
    fields.remove("TxnSignature");
    fields.remove("Signers");
    fields
}

impl TransactionCodec for JsonCodec {
    fn encode(&self, tx: &TxFields) -> Result<Vec<u8>, WalletError> {
        serde_json::to_vec(tx).map_err(|e| WalletError::Codec(e.to_string()))
    }

    fn decode(&self, blob: &[u8]) -> Result<TxFields, WalletError> {
        serde_json::from_slice(blob).map_err(|e| WalletError::Codec(e.to_string()))
    }

    fn encode_for_signing(&self, tx: &TxFields) -> Result<Vec<u8>, WalletError> {
        let mut out = hash_prefix::TRANSACTION_SIGN.to_vec();
        out.extend(self.encode(&signing_fields(tx))?);
        Ok(out)
    }

    fn encode_for_multisigning(
        &self,
        tx: &TxFields,
        signer: &AccountId,
    ) -> Result<Vec<u8>, WalletError> {
        let mut out = hash_prefix::TRANSACTION_MULTISIGN.to_vec();
        out.extend(self.encode(&signing_fields(tx))?);
        out.extend_from_slice(signer);
        Ok(out)
    }
}
