//! Shared utilities for the Nelo wallet.

pub mod format;
pub mod logging;

pub use format::format_minor;
pub use logging::init_tracing;
