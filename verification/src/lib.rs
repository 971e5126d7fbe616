//! Merchant/reader-side verification of offline payments.
//!
//! The verifier holds the only state needed to detect replay — the last
//! accepted counter per payer identity — and checks exactly two things:
//! signature correctness over the canonical encoding, and strict counter
//! freshness. It is stateless with respect to amounts.

pub mod error;
pub mod verifier;

pub use error::VerifyError;
pub use verifier::{RejectReason, Verdict, Verifier};
