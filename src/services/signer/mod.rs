//! Solana signer implementation for caller-supplied private keys.
//!
//! The wallet key arrives base58-encoded with each request; `LocalSigner`
//! derives the keypair and public address from it. Signing a transaction
//! goes through `SignerRegistry`, a keyed lookup from public key to signing
//! capability. The registry holds exactly one entry per request today (the
//! fee payer), but the lookup shape leaves the interface open to
//! multi-signer use.

#[cfg(test)]
use mockall::automock;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignerError {
    /// Key material could not be decoded into a keypair
    #[error("Invalid key material: {0}")]
    KeyError(String),

    /// The underlying signing primitive failed
    #[error("Signing error: {0}")]
    SigningError(String),

    /// A required signer position has no registered key
    #[error("No signing key registered for {0}")]
    UnknownSigner(Pubkey),
}

/// Trait defining the signing operations used by the swap pipeline.
#[cfg_attr(test, automock)]
pub trait SolanaSignTrait: Send + Sync {
    /// Public key of this signer.
    fn pubkey(&self) -> Pubkey;

    /// Signs a serialized transaction message.
    fn sign(&self, message: &[u8]) -> Result<Signature, SignerError>;
}

/// Signer backed by an in-memory ed25519 keypair.
pub struct LocalSigner {
    keypair: Keypair,
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner").finish_non_exhaustive()
    }
}

impl LocalSigner {
    /// Decodes base58 key material into a keypair. The material must decode
    /// to the 64-byte secret+public form.
    pub fn from_base58(material: &str) -> Result<Self, SignerError> {
        let bytes = bs58::decode(material)
            .into_vec()
            .map_err(|e| SignerError::KeyError(format!("invalid base58: {e}")))?;
        let keypair = Keypair::try_from(bytes.as_slice())
            .map_err(|e| SignerError::KeyError(format!("invalid keypair bytes: {e}")))?;
        Ok(Self { keypair })
    }
}

impl SolanaSignTrait for LocalSigner {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn sign(&self, message: &[u8]) -> Result<Signature, SignerError> {
        self.keypair
            .try_sign_message(message)
            .map_err(|e| SignerError::SigningError(e.to_string()))
    }
}

/// Keyed lookup from public key to signing capability.
pub struct SignerRegistry<S: SolanaSignTrait> {
    signers: HashMap<Pubkey, S>,
}

impl<S: SolanaSignTrait> SignerRegistry<S> {
    /// Registry holding a single signer, keyed by its own public key.
    pub fn single(signer: S) -> Self {
        let mut signers = HashMap::new();
        signers.insert(signer.pubkey(), signer);
        Self { signers }
    }

    pub fn resolve(&self, pubkey: &Pubkey) -> Option<&S> {
        self.signers.get(pubkey)
    }

    /// Signs every required signer position of the transaction.
    ///
    /// Each account key within `num_required_signatures` must resolve to a
    /// registered signer; an unknown position refuses the whole signing
    /// step. Returns the signed transaction together with the fee payer's
    /// signature (position 0).
    pub fn sign_transaction(
        &self,
        mut transaction: Transaction,
    ) -> Result<(Transaction, Signature), SignerError> {
        let num_required = transaction.message.header.num_required_signatures as usize;
        let required_keys: Vec<Pubkey> = transaction
            .message
            .account_keys
            .iter()
            .take(num_required)
            .copied()
            .collect();
        if required_keys.is_empty() {
            return Err(SignerError::SigningError(
                "transaction requires no signatures".to_string(),
            ));
        }

        let message_data = transaction.message_data();
        transaction
            .signatures
            .resize(num_required, Signature::default());

        for (index, key) in required_keys.iter().enumerate() {
            let signer = self
                .resolve(key)
                .ok_or(SignerError::UnknownSigner(*key))?;
            transaction.signatures[index] = signer.sign(&message_data)?;
        }

        let fee_payer_signature = transaction.signatures[0];
        Ok((transaction, fee_payer_signature))
    }
}
