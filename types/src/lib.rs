//! Fundamental types for the Nelo offline payment core.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: amounts, currency codes, wallet identities, timestamps, key
//! material, and the configurable wallet parameters.

pub mod amount;
pub mod currency;
pub mod identity;
pub mod keys;
pub mod params;
pub mod time;

pub use amount::Amount;
pub use currency::CurrencyCode;
pub use identity::WalletId;
pub use keys::{DeviceKeys, PrivateKey, PublicKey, Signature};
pub use params::WalletParams;
pub use time::Timestamp;
