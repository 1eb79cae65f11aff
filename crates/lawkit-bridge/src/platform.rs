use lawkit_core::{LawkitError, Result};
use std::fmt;
use std::path::PathBuf;

use lawkit_core::config::consts::BIN_DIR_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    MacOS,
    Linux,
    Windows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
}

impl Os {
    /// Accepts Rust (`std::env::consts::OS`) and Node-style spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Some(Os::MacOS),
            "linux" => Some(Os::Linux),
            "windows" | "win32" => Some(Os::Windows),
            _ => None,
        }
    }
}

impl Arch {
    /// Accepts Rust (`std::env::consts::ARCH`) and Node-style spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "x86_64" | "x64" | "amd64" => Some(Arch::X86_64),
            "aarch64" | "arm64" => Some(Arch::Aarch64),
            _ => None,
        }
    }
}

/// Supported matrix: (os, arch, subdirectory, executable file name)
const SUPPORTED: &[(Os, Arch, &str, &str)] = &[
    (Os::Windows, Arch::X86_64, "win32-x64", "lawkit.exe"),
    (Os::MacOS, Arch::Aarch64, "darwin-arm64", "lawkit"),
    (Os::MacOS, Arch::X86_64, "darwin-x64", "lawkit"),
    (Os::Linux, Arch::Aarch64, "linux-arm64", "lawkit"),
    (Os::Linux, Arch::X86_64, "linux-x64", "lawkit"),
];

/// Where the bundled executable lives for one supported platform.
///
/// Only constructible through [`PlatformDescriptor::resolve`], so every
/// value corresponds to exactly one row of the supported matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformDescriptor {
    os: Os,
    arch: Arch,
    subdirectory: &'static str,
    executable_file_name: &'static str,
}

impl PlatformDescriptor {
    /// Map an `(os_family, architecture)` pair onto its descriptor.
    ///
    /// Pure: the caller supplies both values, nothing ambient is read.
    pub fn resolve(os_family: &str, architecture: &str) -> Result<Self> {
        let unsupported = || LawkitError::UnsupportedPlatform {
            os: os_family.to_string(),
            arch: architecture.to_string(),
        };

        let os = Os::parse(os_family).ok_or_else(unsupported)?;
        let arch = Arch::parse(architecture).ok_or_else(unsupported)?;

        SUPPORTED
            .iter()
            .find(|(o, a, _, _)| *o == os && *a == arch)
            .map(|&(os, arch, subdirectory, executable_file_name)| Self {
                os,
                arch,
                subdirectory,
                executable_file_name,
            })
            .ok_or_else(unsupported)
    }

    /// Descriptor for the platform this process was compiled for.
    pub fn current() -> Result<Self> {
        Self::resolve(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Every supported descriptor, in matrix order.
    pub fn supported() -> impl Iterator<Item = Self> {
        SUPPORTED
            .iter()
            .map(|&(os, arch, subdirectory, executable_file_name)| Self {
                os,
                arch,
                subdirectory,
                executable_file_name,
            })
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    pub fn subdirectory(&self) -> &'static str {
        self.subdirectory
    }

    pub fn executable_file_name(&self) -> &'static str {
        self.executable_file_name
    }

    /// `bin/<subdirectory>/<executable>` relative to an install root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(BIN_DIR_NAME)
            .join(self.subdirectory)
            .join(self.executable_file_name)
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdirectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_platform_resolves() {
        #[cfg(any(
            all(target_os = "linux", any(target_arch = "x86_64", target_arch = "aarch64")),
            all(target_os = "macos", any(target_arch = "x86_64", target_arch = "aarch64")),
            all(target_os = "windows", target_arch = "x86_64")
        ))]
        assert!(
            PlatformDescriptor::current().is_ok(),
            "current should succeed on a supported platform"
        );
    }

    #[test]
    fn test_resolve_windows_x64() {
        let d = PlatformDescriptor::resolve("windows", "x86_64").unwrap();
        assert_eq!(d.subdirectory(), "win32-x64");
        assert_eq!(d.executable_file_name(), "lawkit.exe");
    }

    #[test]
    fn test_resolve_macos_arm64() {
        let d = PlatformDescriptor::resolve("macos", "aarch64").unwrap();
        assert_eq!(d.subdirectory(), "darwin-arm64");
        assert_eq!(d.executable_file_name(), "lawkit");
    }

    #[test]
    fn test_resolve_macos_x64() {
        let d = PlatformDescriptor::resolve("macos", "x86_64").unwrap();
        assert_eq!(d.subdirectory(), "darwin-x64");
    }

    #[test]
    fn test_resolve_linux_arm64() {
        let d = PlatformDescriptor::resolve("linux", "aarch64").unwrap();
        assert_eq!(d.subdirectory(), "linux-arm64");
        assert_eq!(d.executable_file_name(), "lawkit");
    }

    #[test]
    fn test_resolve_linux_x64() {
        let d = PlatformDescriptor::resolve("linux", "x86_64").unwrap();
        assert_eq!(d.subdirectory(), "linux-x64");
    }

    #[test]
    fn test_resolve_accepts_node_spellings() {
        assert_eq!(
            PlatformDescriptor::resolve("win32", "x64").unwrap(),
            PlatformDescriptor::resolve("windows", "x86_64").unwrap()
        );
        assert_eq!(
            PlatformDescriptor::resolve("darwin", "arm64").unwrap(),
            PlatformDescriptor::resolve("macos", "aarch64").unwrap()
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        for d in PlatformDescriptor::supported() {
            let os = match d.os() {
                Os::MacOS => "macos",
                Os::Linux => "linux",
                Os::Windows => "windows",
            };
            let arch = match d.arch() {
                Arch::X86_64 => "x86_64",
                Arch::Aarch64 => "aarch64",
            };

            for _ in 0..3 {
                let again = PlatformDescriptor::resolve(os, arch).unwrap();
                assert_eq!(again, d);
                assert_eq!(again.relative_path(), d.relative_path());
            }
        }
    }

    #[test]
    fn test_supported_matrix_has_five_entries() {
        assert_eq!(PlatformDescriptor::supported().count(), 5);
    }

    #[test]
    fn test_unsupported_pairs_fail() {
        let cases = [
            ("windows", "aarch64"),
            ("freebsd", "x86_64"),
            ("linux", "riscv64"),
            ("linux", "x86"),
            ("", ""),
        ];

        for (os, arch) in cases {
            match PlatformDescriptor::resolve(os, arch) {
                Err(LawkitError::UnsupportedPlatform { os: o, arch: a }) => {
                    assert_eq!(o, os);
                    assert_eq!(a, arch);
                }
                other => panic!("expected UnsupportedPlatform for {os}-{arch}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_relative_path_layout() {
        let d = PlatformDescriptor::resolve("linux", "x86_64").unwrap();
        assert_eq!(
            d.relative_path(),
            PathBuf::from("bin").join("linux-x64").join("lawkit")
        );
    }
}
