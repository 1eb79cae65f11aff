use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::consts::PRE_SPAWN_EXIT_CODE;

#[derive(Error, Debug)]
pub enum LawkitError {
    // Platform / locator errors
    #[error("UNSUPPORTED_PLATFORM: unsupported platform {os}-{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error(
        "BINARY_NOT_FOUND: binary not found at {}. This might indicate a packaging issue. \
         Please report this at: https://github.com/kako-jun/lawkit/issues",
        path.display()
    )]
    BinaryNotFound {
        path: PathBuf,
        searched: Vec<String>,
    },

    // Process errors
    #[error("SPAWN_FAILED: failed to start {}: {source}", path.display())]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("NON_ZERO_EXIT: lawkit exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("OUTPUT_PARSE_FAILED: failed to parse JSON output: {reason}")]
    OutputParseFailed { reason: String },

    // Input errors
    #[error("INPUT_MATERIALIZE_FAILED: could not write temporary input: {0}")]
    InputMaterializeFailed(#[source] std::io::Error),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failure kinds callers can branch on without matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    UnsupportedPlatform,
    BinaryNotFound,
    SpawnFailed,
    NonZeroExit,
    OutputParseFailed,
    Input,
    Config,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::UnsupportedPlatform => "unsupported_platform",
            FailureKind::BinaryNotFound => "binary_not_found",
            FailureKind::SpawnFailed => "spawn_failed",
            FailureKind::NonZeroExit => "non_zero_exit",
            FailureKind::OutputParseFailed => "output_parse_failed",
            FailureKind::Input => "input",
            FailureKind::Config => "config",
            FailureKind::Io => "io",
        };
        f.write_str(name)
    }
}

impl LawkitError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LawkitError::UnsupportedPlatform { .. } => FailureKind::UnsupportedPlatform,
            LawkitError::BinaryNotFound { .. } => FailureKind::BinaryNotFound,
            LawkitError::SpawnFailed { .. } => FailureKind::SpawnFailed,
            LawkitError::NonZeroExit { .. } => FailureKind::NonZeroExit,
            LawkitError::OutputParseFailed { .. } => FailureKind::OutputParseFailed,
            LawkitError::InputMaterializeFailed(_) => FailureKind::Input,
            LawkitError::ConfigParseError(_) | LawkitError::ConfigInvalidValue { .. } => {
                FailureKind::Config
            }
            LawkitError::IoError(_) => FailureKind::Io,
        }
    }

    /// Exit status a launcher should mirror for this failure.
    ///
    /// The child's own code when it ran and failed, otherwise
    /// [`PRE_SPAWN_EXIT_CODE`].
    pub fn exit_code(&self) -> i32 {
        match self {
            LawkitError::NonZeroExit { code, .. } if *code > 0 => *code,
            _ => PRE_SPAWN_EXIT_CODE,
        }
    }

    /// Captured stderr of the failed child, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            LawkitError::NonZeroExit { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for LawkitError {
    fn from(err: toml::de::Error) -> Self {
        LawkitError::ConfigParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LawkitError>;
