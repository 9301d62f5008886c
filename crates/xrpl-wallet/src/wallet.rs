//! XRPL wallet: a verified keypair bound to a classic address.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde_json::Value;
use zeroize::Zeroize;

use xrpl_keypairs::{derive_classic_address, derive_keypair, generate_seed, generate_seed_with_rng};
use xrpl_keypairs::{Algorithm, KeyPair};
use xrpl_primitives::address_codec::{decode_classic_address_to_account_id, is_valid_classic_address};
use xrpl_primitives::hash::transaction_id;
use xrpl_primitives::PrimitivesError;

use crate::codec::{str_field, TransactionCodec, TxFields};
use crate::error::WalletError;
use crate::types::{Signer, SignerData};

/// A keypair and the classic address it signs for.
///
/// Keys are upper-case hex in their tagged form: `ED` + 32 bytes for
/// Ed25519, `00` + 32 bytes (private) or compressed SEC1 (public) for
/// secp256k1. When built with a master address, `classic_address` is that
/// address rather than the one derived from the public key (regular keys).
#[derive(Clone, PartialEq, Eq)]
pub struct Wallet {
    public_key: String,
    private_key: String,
    classic_address: String,
    seed: Option<String>,
}

impl Wallet {
    /// Generate a wallet from a fresh random seed.
    pub fn generate(algorithm: Algorithm) -> Result<Self, WalletError> {
        Self::generate_with_rng(&mut OsRng, algorithm)
    }

    /// Generate a wallet from a seed drawn from `rng`.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(
        rng: &mut R,
        algorithm: Algorithm,
    ) -> Result<Self, WalletError> {
        let mut seed = generate_seed_with_rng(rng, algorithm)?;
        let wallet = Self::from_seed(&seed, None);
        seed.zeroize();
        wallet
    }

    /// Build a wallet from caller entropy (first 16 bytes).
    pub fn from_entropy(entropy: &[u8], algorithm: Algorithm) -> Result<Self, WalletError> {
        let mut seed = generate_seed(Some(entropy), algorithm)?;
        let wallet = Self::from_seed(&seed, None);
        seed.zeroize();
        wallet
    }

    /// Build a wallet from an encoded family seed.
    ///
    /// # Arguments
    /// * `seed` - `s...` or `sEd...` family seed.
    /// * `master_address` - Account the keys act for, when they are a
    ///   regular key. Must be a valid classic address.
    pub fn from_seed(seed: &str, master_address: Option<&str>) -> Result<Self, WalletError> {
        let pair = derive_keypair(seed, false)?;
        Self::from_keypair(&pair, Some(seed.to_string()), master_address)
    }

    /// Alias of [`Wallet::from_seed`] without a master address.
    pub fn from_secret(seed: &str) -> Result<Self, WalletError> {
        Self::from_seed(seed, None)
    }

    /// Wrap an already verified keypair.
    pub(crate) fn from_keypair(
        pair: &KeyPair,
        seed: Option<String>,
        master_address: Option<&str>,
    ) -> Result<Self, WalletError> {
        let classic_address = match master_address {
            Some(address) if is_valid_classic_address(address) => address.to_string(),
            Some(address) => {
                return Err(PrimitivesError::InvalidClassicAddress(address.to_string()).into())
            }
            None => derive_classic_address(pair.public_key())?,
        };
        tracing::debug!(
            address = %classic_address,
            regular_key = master_address.is_some(),
            "wallet constructed"
        );
        Ok(Wallet {
            public_key: pair.public_key().to_string(),
            private_key: pair.private_key().to_string(),
            classic_address,
            seed,
        })
    }

    /// The 33-byte public key as upper-case hex, `ED`-prefixed for Ed25519.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The 33-byte private key as upper-case hex, `ED`- or `00`-prefixed.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// The account address. With a regular key this is the master
    /// account, not the address derived from `public_key`.
    pub fn classic_address(&self) -> &str {
        &self.classic_address
    }

    /// The family seed, when the wallet was built from one.
    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    /// Sign a single-signed transaction.
    ///
    /// Sets `SigningPubKey`, signs the single-signing serialization, sets
    /// `TxnSignature` and serializes the result.
    ///
    /// # Returns
    /// `(blob, hash)`: the signed transaction and its transaction ID, both
    /// upper-case hex.
    pub fn sign<C>(&self, tx: &TxFields, codec: &C) -> Result<(String, String), WalletError>
    where
        C: TransactionCodec + ?Sized,
    {
        let mut tx = tx.clone();
        tx.insert(
            "SigningPubKey".to_string(),
            Value::String(self.public_key.clone()),
        );
        let payload = codec.encode_for_signing(&tx)?;
        let signature = xrpl_keypairs::sign(&payload, &self.private_key)?;
        tx.insert("TxnSignature".to_string(), Value::String(signature));
        let (blob, hash) = encode_with_hash(&tx, codec)?;
        tracing::debug!(address = %self.classic_address, hash = %hash, "signed transaction");
        Ok((blob, hash))
    }

    /// Contribute one multisignature to a transaction.
    ///
    /// `SigningPubKey` is set empty and `Signers` replaced by this wallet's
    /// single entry; merge contributions with
    /// [`combine_multisigned`](crate::combine_multisigned).
    ///
    /// # Returns
    /// `(blob, hash)` as upper-case hex.
    pub fn multisign<C>(&self, tx: &TxFields, codec: &C) -> Result<(String, String), WalletError>
    where
        C: TransactionCodec + ?Sized,
    {
        let mut tx = tx.clone();
        tx.insert("SigningPubKey".to_string(), Value::String(String::new()));
        tx.remove("TxnSignature");
        let signer = self.multisign_entry(&tx, codec)?;
        tx.insert(
            "Signers".to_string(),
            serde_json::to_value(vec![Signer { signer }])?,
        );
        let (blob, hash) = encode_with_hash(&tx, codec)?;
        tracing::debug!(address = %self.classic_address, hash = %hash, "multisigned transaction");
        Ok((blob, hash))
    }

    /// Sign the multisigning serialization of `tx` for this wallet's account.
    pub(crate) fn multisign_entry<C>(
        &self,
        tx: &TxFields,
        codec: &C,
    ) -> Result<SignerData, WalletError>
    where
        C: TransactionCodec + ?Sized,
    {
        let account_id = decode_classic_address_to_account_id(&self.classic_address)?;
        let payload = codec.encode_for_multisigning(tx, &account_id)?;
        Ok(SignerData {
            account: self.classic_address.clone(),
            signing_pub_key: self.public_key.clone(),
            txn_signature: xrpl_keypairs::sign(&payload, &self.private_key)?,
        })
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("classic_address", &self.classic_address)
            .field("seed", &self.seed.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Drop for Wallet {
    fn drop(&mut self) {
        self.private_key.zeroize();
        if let Some(seed) = self.seed.as_mut() {
            seed.zeroize();
        }
    }
}

/// Check a single-signed blob's `TxnSignature` against its `SigningPubKey`.
///
/// # Returns
/// `Ok(false)` if the signature does not verify; an error if either field
/// is missing or malformed.
pub fn verify_transaction<C>(blob_hex: &str, codec: &C) -> Result<bool, WalletError>
where
    C: TransactionCodec + ?Sized,
{
    let mut tx = codec.decode(&hex::decode(blob_hex)?)?;
    let public_key = str_field(&tx, "SigningPubKey")?.to_string();
    let signature = str_field(&tx, "TxnSignature")?.to_string();
    tx.remove("TxnSignature");
    let payload = codec.encode_for_signing(&tx)?;
    Ok(xrpl_keypairs::verify(&payload, &signature, &public_key)?)
}

pub(crate) fn encode_with_hash<C>(tx: &TxFields, codec: &C) -> Result<(String, String), WalletError>
where
    C: TransactionCodec + ?Sized,
{
    let blob = codec.encode(tx)?;
    Ok((
        hex::encode_upper(&blob),
        hex::encode_upper(transaction_id(&blob)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::hash_signed_tx;
    use crate::test_codec::JsonCodec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use xrpl_primitives::ErrorKind;

    fn payment() -> TxFields {
        json!({
            "TransactionType": "Payment",
            "Account": "rUAi7pipxGpYfPNg3LtPcf2ApiS8aw9A93",
            "Destination": "rPMh7Pi9ct699iZUTWaytJUoHcJ7cgyziK",
            "Amount": "1000000",
            "Fee": "12",
            "Flags": 0,
            "Sequence": 1
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_from_seed_ed25519() {
        let wallet = Wallet::from_seed("sEdTjrdnJaPE2NNjmavQqXQdrf71NiH", None).unwrap();
        assert_eq!(
            wallet.public_key(),
            "ED4924A9045FE5ED8B22BAA7B6229A72A287CCF3EA287AADD3A032A24C0F008FA6"
        );
        assert_eq!(wallet.seed(), Some("sEdTjrdnJaPE2NNjmavQqXQdrf71NiH"));
        assert!(is_valid_classic_address(wallet.classic_address()));
    }

    #[test]
    fn test_from_seed_secp256k1() {
        let wallet = Wallet::from_secret("sh3pdwcaoo7vt5rtrEZJ7a75LnDo3").unwrap();
        assert_eq!(
            wallet.private_key(),
            "00204795BCAB502D01C06B2C700936204B26C58D7048D3D4DBFE890BA05BA1D68D"
        );
        assert_eq!(
            wallet.public_key(),
            "03A947D71477652C445B20F5226FAA4DF6CD716786E17D016E9A37FBA5379AF02B"
        );
    }

    #[test]
    fn test_from_secret_vectors() {
        let cases = [
            (
                "sEd7io6yt5dFJrcePgRiFVHvmkJhJD1",
                "EDC9DA1AA7513D891B58B3C9BEBAE3EB12620AFF4ABBA806B23BB3FA62109CE87F",
                "EDE01A1644C9FDE0367A7A285CA69798066C131C1133E1128B170CA65AEA5C6D19",
                "rn5M6BQCmQAzBxms9A84qEpx1Fdn9y7jdD",
            ),
            (
                "sEdTLE1G6QVc8znymeRZD3s5oajQcY5",
                "ED676AD70576E126B46F6AF52D908FAB8F352F3A0BA05F48613DF017F6B83205B6",
                "ED31053AC2D97A74EA3A401CF23EEDA20400500CCFB82F442A8E0E6096A4150A9F",
                "r9D79PwpT5Z5xztgiQQgmxcYbF249PefnW",
            ),
            (
                "sEd71D6u2LkA36TMfJ5rApVsgZXQE9F",
                "ED0A8A14F3226B2109047662605898F96F61764A9269B7823453A04A7B4F524C0E",
                "ED2C0EAB27E1411DBB8FACC88D531A69967DA0E45AC7821A4041A5AEE24BB8FF29",
                "rs7cvHcsEF54DEs2y24Tpph3Xf71xUUrFu",
            ),
        ];
        for (seed, public_key, private_key, address) in cases {
            let wallet = Wallet::from_secret(seed).unwrap();
            assert_eq!(wallet.public_key(), public_key);
            assert_eq!(wallet.private_key(), private_key);
            assert_eq!(wallet.classic_address(), address);
        }
    }

    #[test]
    fn test_from_seed_with_master_address() {
        let master = "rUAi7pipxGpYfPNg3LtPcf2ApiS8aw9A93";
        let wallet = Wallet::from_seed("sh8i92YRnEjJy3fpFkL8txQSCVo79", Some(master)).unwrap();
        assert_eq!(wallet.classic_address(), master);
        assert_eq!(
            wallet.public_key(),
            "03AEEFE1E8ED4BBC009DE996AC03A8C6B5713B1554794056C66E5B8D1753C7DD0E"
        );
        assert_eq!(
            wallet.private_key(),
            "004265A28F3E18340A490421D47B2EB8DBC2C0BF2C24CEFEA971B61CED2CABD233"
        );

        let derived = Wallet::from_seed("sh8i92YRnEjJy3fpFkL8txQSCVo79", None).unwrap();
        assert_ne!(derived.classic_address(), master);
        assert_eq!(derived.public_key(), wallet.public_key());
    }

    #[test]
    fn test_from_seed_rejects_bad_master_address() {
        let err = Wallet::from_seed("sh8i92YRnEjJy3fpFkL8txQSCVo79", Some("rNotAnAddress"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_from_entropy_matches_seed() {
        let wallet = Wallet::from_entropy(b"fakeRandomString", Algorithm::Ed25519).unwrap();
        assert_eq!(wallet.seed(), Some("sEdTjrdnJaPE2NNjmavQqXQdrf71NiH"));
        assert_eq!(
            wallet.public_key(),
            "ED4924A9045FE5ED8B22BAA7B6229A72A287CCF3EA287AADD3A032A24C0F008FA6"
        );
        assert!(Wallet::from_entropy(b"short", Algorithm::Ed25519).is_err());
    }

    #[test]
    fn test_generate_with_rng_is_deterministic() {
        let a = Wallet::generate_with_rng(&mut StdRng::seed_from_u64(7), Algorithm::Secp256k1)
            .unwrap();
        let b = Wallet::generate_with_rng(&mut StdRng::seed_from_u64(7), Algorithm::Secp256k1)
            .unwrap();
        assert_eq!(a, b);
        assert!(a.public_key().starts_with("02") || a.public_key().starts_with("03"));

        let random = Wallet::generate(Algorithm::Ed25519).unwrap();
        assert!(random.public_key().starts_with("ED"));
        assert!(random.seed().unwrap().starts_with("sEd"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let wallet = Wallet::from_secret("sEdTjrdnJaPE2NNjmavQqXQdrf71NiH").unwrap();
        let debug = format!("{:?}", wallet);
        assert!(!debug.contains(wallet.private_key()));
        assert!(!debug.contains("sEdTjrdnJaPE2NNjmavQqXQdrf71NiH"));
    }

    #[test]
    fn test_sign_and_verify() {
        for seed in ["sEdTjrdnJaPE2NNjmavQqXQdrf71NiH", "sh3pdwcaoo7vt5rtrEZJ7a75LnDo3"] {
            let wallet = Wallet::from_secret(seed).unwrap();
            let (blob, hash) = wallet.sign(&payment(), &JsonCodec).unwrap();
            assert_eq!(blob, blob.to_uppercase());
            assert_eq!(hash.len(), 64);
            assert_eq!(hash_signed_tx(&blob, &JsonCodec).unwrap(), hash);
            assert!(verify_transaction(&blob, &JsonCodec).unwrap());

            let signed = JsonCodec.decode(&hex::decode(&blob).unwrap()).unwrap();
            assert_eq!(signed["SigningPubKey"], wallet.public_key());
        }
    }

    #[test]
    fn test_verify_transaction_detects_tampering() {
        let wallet = Wallet::from_secret("sEdTjrdnJaPE2NNjmavQqXQdrf71NiH").unwrap();
        let (blob, _) = wallet.sign(&payment(), &JsonCodec).unwrap();
        let mut tx = JsonCodec.decode(&hex::decode(&blob).unwrap()).unwrap();
        tx.insert("Amount".to_string(), json!("2000000"));
        let tampered = hex::encode_upper(JsonCodec.encode(&tx).unwrap());
        assert!(!verify_transaction(&tampered, &JsonCodec).unwrap());

        let unsigned = hex::encode_upper(JsonCodec.encode(&payment()).unwrap());
        assert!(verify_transaction(&unsigned, &JsonCodec).is_err());
    }

    #[test]
    fn test_hash_signed_tx_requires_signature() {
        let unsigned = hex::encode_upper(JsonCodec.encode(&payment()).unwrap());
        assert!(matches!(
            hash_signed_tx(&unsigned, &JsonCodec),
            Err(WalletError::TransactionNotSigned)
        ));
    }

    #[test]
    fn test_multisign_entry() {
        let wallet = Wallet::from_secret("sEdTjrdnJaPE2NNjmavQqXQdrf71NiH").unwrap();
        let (blob, _) = wallet.multisign(&payment(), &JsonCodec).unwrap();
        let tx = JsonCodec.decode(&hex::decode(&blob).unwrap()).unwrap();
        assert_eq!(tx["SigningPubKey"], "");
        let signers: Vec<Signer> = serde_json::from_value(tx["Signers"].clone()).unwrap();
        assert_eq!(signers.len(), 1);
        let entry = &signers[0].signer;
        assert_eq!(entry.account, wallet.classic_address());

        let mut unsigned = tx.clone();
        unsigned.remove("Signers");
        let account_id = decode_classic_address_to_account_id(wallet.classic_address()).unwrap();
        let payload = JsonCodec
            .encode_for_multisigning(&unsigned, &account_id)
            .unwrap();
        assert!(xrpl_keypairs::verify(&payload, &entry.txn_signature, &entry.signing_pub_key)
            .unwrap());
    }
}
