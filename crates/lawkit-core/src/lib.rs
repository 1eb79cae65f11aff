//! Shared types for the lawkit bridge: the failure taxonomy and the
//! locator configuration model.

// Core modules
pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{BridgeConfig, LocatorConfig, LocatorMode};
pub use error::{FailureKind, LawkitError, Result};
