//! Cryptographic primitives for the Nelo wallet.
//!
//! - **Ed25519** for payload signing and verification
//! - **Blake2b** for identity checksums
//! - Wallet-id derivation with `nelo_` prefix and base32 encoding
//!
//! The wallet identity embeds the device's public key, so the merchant side
//! can recover the sender's verification key from the identity alone.

pub mod hash;
pub mod identity;
pub mod keys;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi};
pub use identity::{decode_wallet_id, derive_wallet_id, validate_wallet_id};
pub use keys::{
    device_keys_from_private, device_keys_from_seed, generate_device_keys, public_from_private,
};
pub use sign::{sign_message, verify_signature};
