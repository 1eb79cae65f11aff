//! Constants shared by the bridge, its launcher and its tests.

/// Environment variables read by [`super::BridgeConfig::load`].
pub mod env {
    /// Overrides `locator.mode` ("strict" or "permissive").
    pub const LOCATOR_MODE: &str = "LAWKIT_LOCATOR_MODE";

    /// Overrides `locator.install_root`.
    pub const INSTALL_DIR: &str = "LAWKIT_INSTALL_DIR";
}

/// Name of the config file looked up under the user config directory.
pub const CONFIG_FILE_NAME: &str = "bridge.toml";

/// Directory (under the user config directory) holding [`CONFIG_FILE_NAME`].
pub const CONFIG_DIR_NAME: &str = "lawkit";

/// Directory below the install root holding the per-platform subdirectories.
pub const BIN_DIR_NAME: &str = "bin";

/// Exit status for failures that happened before a child process ran.
pub const PRE_SPAWN_EXIT_CODE: i32 = 1;
