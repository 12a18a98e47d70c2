//! Utility functions shared across the crate.
//!
//! - [`app_data`] - Config file and app data directory (per-OS locations)
//! - [`fold`] - ASCII case folding used by the index and matcher
//! - [`logging`] - File-backed `tracing` subscriber
//! - [`progress`] - Spinner that compiles to a no-op without the `progress` feature

pub mod app_data;
pub mod fold;
pub mod logging;
pub mod progress;

pub use app_data::*;
pub use fold::*;
pub use logging::*;
