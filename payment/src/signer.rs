//! The signer contract — the only key-touching capability in the core.

use crate::canonical::signing_bytes;
use crate::payload::PaymentDraft;
use nelo_crypto::derive_wallet_id;
use nelo_types::{DeviceKeys, PublicKey, Signature, WalletId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("device key material unavailable")]
    KeyUnavailable,
}

/// Signs payment drafts with the device's private key.
///
/// Implementations never expose key material and never fall back to an
/// unsigned payload; a signer without usable keys fails with
/// [`SignerError::KeyUnavailable`].
pub trait Signer {
    fn sign(&self, draft: &PaymentDraft) -> Result<Signature, SignerError>;
}

/// A signer backed by the device key pair held in process memory.
///
/// Production deployments put a secure-element-backed implementation behind
/// the same trait; the core never sees the difference.
pub struct DeviceSigner {
    keys: DeviceKeys,
}

impl DeviceSigner {
    pub fn new(keys: DeviceKeys) -> Self {
        Self { keys }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keys.public
    }

    /// The wallet identity this signer signs for.
    pub fn wallet_id(&self) -> WalletId {
        derive_wallet_id(&self.keys.public)
    }
}

impl Signer for DeviceSigner {
    fn sign(&self, draft: &PaymentDraft) -> Result<Signature, SignerError> {
        Ok(nelo_crypto::sign_message(
            &signing_bytes(draft),
            &self.keys.private,
        ))
    }
}
