//! Wallet identity type with `nelo_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wallet identity, always prefixed with `nelo_`.
///
/// Derived from the device's public key via base32 encoding plus a Blake2b
/// checksum (see `nelo_crypto::identity`). The identity embeds the public
/// key, so a verifier can recover the sender's key from the identity alone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletId(String);

impl WalletId {
    /// The standard prefix for all Nelo wallet identities.
    pub const PREFIX: &'static str = "nelo_";

    /// Total identity length: 5 (prefix) + 52 (public key) + 8 (checksum).
    pub const LEN: usize = 65;

    /// Wrap a raw string. No validation beyond the prefix; use
    /// `nelo_crypto::validate_wallet_id` for a full checksum check.
    ///
    /// # Panics
    /// Panics if the string does not start with `nelo_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "identity must start with nelo_");
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Structural check: prefix and expected length.
    pub fn is_well_formed(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() == Self::LEN
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
