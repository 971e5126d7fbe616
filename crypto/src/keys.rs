//! Ed25519 device key generation.

use ed25519_dalek::SigningKey;
use nelo_types::{DeviceKeys, PrivateKey, PublicKey};
use rand::rngs::OsRng;

/// Generate a fresh device key pair from a secure random source.
///
/// Called once at wallet provisioning.
pub fn generate_device_keys() -> DeviceKeys {
    let signing_key = SigningKey::generate(&mut OsRng);
    let verifying_key = signing_key.verifying_key();
    DeviceKeys {
        public: PublicKey(verifying_key.to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&private.0);
    PublicKey(signing_key.verifying_key().to_bytes())
}

/// Reconstruct a full key pair from a private key.
pub fn device_keys_from_private(private: PrivateKey) -> DeviceKeys {
    let public = public_from_private(&private);
    DeviceKeys { public, private }
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn device_keys_from_seed(seed: &[u8; 32]) -> DeviceKeys {
    let signing_key = SigningKey::from_bytes(seed);
    let verifying_key = signing_key.verifying_key();
    DeviceKeys {
        public: PublicKey(verifying_key.to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}
