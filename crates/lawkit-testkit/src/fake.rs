//! Fake `lawkit` executables for bridge tests
//!
//! Fakes are `/bin/sh` scripts laid out exactly like a bundled install:
//! `<root>/bin/<platform-subdir>/<exe-name>`. They answer `--version` with
//! a fixed version line and run a caller-provided body for everything else.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Version reported by fakes created through [`FakeInstall::install`].
pub const FAKE_VERSION: &str = "2.2.0";

/// Script body printing every argument on its own line.
pub const ECHO_ARGS: &str = r#"for arg in "$@"; do
  printf '%s\n' "$arg"
done
exit 0
"#;

/// Script body printing the contents of the last argument (the input path).
pub const CAT_INPUT: &str = r#"for last in "$@"; do :; done
cat "$last"
exit 0
"#;

/// Script body printing the last argument (the input path) verbatim.
pub const PRINT_INPUT_PATH: &str = r#"for last in "$@"; do :; done
printf '%s' "$last"
exit 0
"#;

/// Script body that prints `body` to stdout and exits 0.
pub fn stdout_body(stdout: &str) -> String {
    format!("printf '%s' '{}'\nexit 0\n", stdout.replace('\'', r"'\''"))
}

/// Script body that prints `stderr` to stderr and exits with `code`.
pub fn failing_body(code: i32, stderr: &str) -> String {
    format!(
        "printf '%s' '{}' >&2\nexit {code}\n",
        stderr.replace('\'', r"'\''")
    )
}

/// Script body that writes `stdout` and `stderr` and exits 0.
pub fn warning_body(stdout: &str, stderr: &str) -> String {
    format!(
        "printf '%s' '{}'\nprintf '%s' '{}' >&2\nexit 0\n",
        stdout.replace('\'', r"'\''"),
        stderr.replace('\'', r"'\''")
    )
}

/// Write an executable `/bin/sh` script at `path`, creating parent directories.
pub fn write_script(path: &Path, body: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create script directory");
    }

    fs::write(path, format!("#!/bin/sh\n{body}")).expect("Failed to write script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).expect("Failed to set permissions");
    }

    path.to_path_buf()
}

/// A temporary install root holding fake executables.
pub struct FakeInstall {
    root: TempDir,
}

impl FakeInstall {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create fake install root"),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Path a fake would occupy for the given platform subdirectory.
    pub fn binary_path(&self, subdir: &str, exe_name: &str) -> PathBuf {
        self.root.path().join("bin").join(subdir).join(exe_name)
    }

    /// Install a fake that answers `--version` and otherwise runs `body`.
    pub fn install(&self, subdir: &str, exe_name: &str, body: &str) -> PathBuf {
        let script = format!(
            "if [ \"$1\" = \"--version\" ]; then\n  echo \"lawkit {FAKE_VERSION}\"\n  exit 0\nfi\n{body}"
        );
        write_script(&self.binary_path(subdir, exe_name), &script)
    }
}

impl Default for FakeInstall {
    fn default() -> Self {
        Self::new()
    }
}
