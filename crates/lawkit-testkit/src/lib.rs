//! Test utilities for the lawkit bridge
//!
//! This crate provides shared testing utilities used across the lawkit workspace.

pub mod env;
pub mod fake;

pub use env::{ENV_LOCK, with_env_vars};
pub use fake::{FakeInstall, write_script};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the current directory
///
/// All test temporary files end up in one gitignored location that is easy
/// to clean up manually.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot
/// be created.
///
/// # Examples
///
/// ```rust
/// use lawkit_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("data.txt");
/// std::fs::write(&file_path, "1\n2\n3").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for callers that want to handle the error
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
