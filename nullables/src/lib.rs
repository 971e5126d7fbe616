//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies (storage, the proximity channel) are abstracted
//! behind traits; this crate provides implementations that are controlled
//! programmatically and never touch the filesystem or real hardware.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod channel;
pub mod store;

pub use channel::NullChannel;
pub use store::MemoryStore;
