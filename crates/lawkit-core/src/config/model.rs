use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::consts::{self, env};
use crate::error::{LawkitError, Result};

/// bridge.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BridgeConfig {
    #[serde(default)]
    pub locator: LocatorConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocatorConfig {
    #[serde(default)]
    pub mode: LocatorMode,
    /// Root holding `bin/<platform>/lawkit`. Defaults to the directory of
    /// the running executable.
    #[serde(default)]
    pub install_root: Option<PathBuf>,
}

/// Fallback policy of the executable locator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocatorMode {
    /// Only the bundled, platform-specific path is accepted.
    #[default]
    Strict,
    /// Bundled path first, then the executable name on `PATH`.
    Permissive,
}

impl fmt::Display for LocatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorMode::Strict => write!(f, "strict"),
            LocatorMode::Permissive => write!(f, "permissive"),
        }
    }
}

impl FromStr for LocatorMode {
    type Err = LawkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(LocatorMode::Strict),
            "permissive" => Ok(LocatorMode::Permissive),
            other => Err(LawkitError::ConfigInvalidValue {
                field: "locator.mode".to_string(),
                reason: format!("expected 'strict' or 'permissive', got '{other}'"),
            }),
        }
    }
}

impl BridgeConfig {
    /// Read bridge.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LawkitError::ConfigParseError(format!("{}: {e}", path.as_ref().display())))?;

        Ok(toml::from_str(&content)?)
    }

    /// Default config file location: `<config_dir>/lawkit/bridge.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(consts::CONFIG_DIR_NAME)
                .join(consts::CONFIG_FILE_NAME)
        })
    }

    /// Load configuration with the full precedence chain.
    ///
    /// defaults < file (`explicit`, or the default path when it exists) < environment
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` as the variable source.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(env::LOCATOR_MODE).filter(|v| !v.trim().is_empty()) {
            self.locator.mode = mode.parse()?;
        }

        if let Some(root) = lookup(env::INSTALL_DIR).filter(|v| !v.trim().is_empty()) {
            self.locator.install_root = Some(PathBuf::from(root));
        }

        Ok(())
    }

    /// The configured install root, or the directory of the running executable.
    pub fn install_root(&self) -> Result<PathBuf> {
        if let Some(root) = &self.locator.install_root {
            return Ok(root.clone());
        }

        let exe = std::env::current_exe()?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| LawkitError::ConfigInvalidValue {
                field: "locator.install_root".to_string(),
                reason: format!("cannot derive a directory from {}", exe.display()),
            })
    }
}
