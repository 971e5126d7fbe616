//! Ed25519 message signing and verification.
//!
//! These operate on raw byte messages; the canonical payload encoding that
//! feeds them lives in `nelo-payment` and must be shared by signer and
//! verifier.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use nelo_types::{PrivateKey, PublicKey, Signature};

/// Sign a message with a private key, returning the signature.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    let sig = signing_key.sign(message);
    Signature(sig.to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Returns `true` if the signature is valid, `false` otherwise.
/// Also rejects non-canonical signatures (malleability protection).
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &dalek_sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_device_keys;

    #[test]
    fn sign_and_verify() {
        let keys = generate_device_keys();
        let msg = b"offline payment payload bytes";
        let sig = sign_message(msg, &keys.private);
        assert!(verify_signature(msg, &sig, &keys.public));
    }

    #[test]
    fn wrong_message_fails() {
        let keys = generate_device_keys();
        let sig = sign_message(b"correct message", &keys.private);
        assert!(!verify_signature(b"wrong message", &sig, &keys.public));
    }

    #[test]
    fn wrong_key_fails() {
        let k1 = generate_device_keys();
        let k2 = generate_device_keys();
        let sig = sign_message(b"test", &k1.private);
        assert!(!verify_signature(b"test", &sig, &k2.public));
    }

    #[test]
    fn signature_deterministic() {
        let keys = crate::keys::device_keys_from_seed(&[99u8; 32]);
        let msg = b"deterministic test";
        let sig1 = sign_message(msg, &keys.private);
        let sig2 = sign_message(msg, &keys.private);
        assert_eq!(sig1.0, sig2.0);
    }

    #[test]
    fn invalid_public_key() {
        let keys = generate_device_keys();
        let sig = sign_message(b"test", &keys.private);
        let bad_key = PublicKey([0xFF; 32]);
        assert!(!verify_signature(b"test", &sig, &bad_key));
    }
}
