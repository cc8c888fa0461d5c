//! System management for the Clearance runtime
//!
//! This module provides configuration loading and the bootstrap sequence
//! that seeds the stores.

pub mod bootstrap;
pub mod config;

// Re-export key types for convenience
pub use bootstrap::{BootstrapError, BootstrapPhase, BootstrapReport, System};
pub use config::{ConfigError, RuntimeConfig};
