//! Global context for CLI commands

use anyhow::Result;
use lawkit_bridge::Bridge;
use lawkit_core::{BridgeConfig, LocatorMode};
use std::path::Path;

/// Bridge configured from file, environment and global flags
pub struct Context {
    pub bridge: Bridge,
    pub verbose: bool,
}

impl Context {
    /// Load configuration and build the bridge
    ///
    /// `--permissive` overrides whatever mode the file or environment chose.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or an
    /// environment override is invalid
    pub fn new(config_path: Option<&Path>, permissive: bool, verbose: bool) -> Result<Self> {
        let mut config = BridgeConfig::load(config_path)?;
        if permissive {
            config.locator.mode = LocatorMode::Permissive;
        }

        Ok(Self {
            bridge: Bridge::new(config),
            verbose,
        })
    }
}
