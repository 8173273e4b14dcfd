//! Utilities
//!
//! Shared helpers used across the library.

pub mod logging;

pub use logging::init_logging;
