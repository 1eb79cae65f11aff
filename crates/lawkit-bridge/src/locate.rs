use lawkit_core::{LawkitError, LocatorMode, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::info::{ExecutableSource, ResolvedExecutable};
use crate::platform::PlatformDescriptor;

/// Command name looked up on `PATH` in permissive mode.
pub const COMMAND_NAME: &str = "lawkit";

/// Filesystem capability used by the locator.
///
/// Injected so locator policy can be tested without touching the real
/// filesystem or `PATH`.
pub trait ExecutableProbe {
    /// Whether an executable file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Resolve `name` through the ambient search path.
    fn search_path(&self, name: &str) -> Option<PathBuf>;
}

/// Probe backed by the real filesystem and the `which` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl ExecutableProbe for SystemProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn search_path(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}

/// Expected bundled location: `{install_root}/bin/{subdir}/{exe}`
pub fn bundled_path(install_root: &Path, descriptor: &PlatformDescriptor) -> PathBuf {
    install_root.join(descriptor.relative_path())
}

/// Resolve the executable for `descriptor` under `install_root`.
///
/// Policy:
/// - [`LocatorMode::Strict`]: only the bundled path; absence is `BinaryNotFound`
///   naming that path.
/// - [`LocatorMode::Permissive`]: bundled path, then [`COMMAND_NAME`] on `PATH`.
///
/// Nothing is cached; every call consults `probe` again.
pub fn locate(
    descriptor: &PlatformDescriptor,
    install_root: &Path,
    mode: LocatorMode,
    probe: &impl ExecutableProbe,
) -> Result<ResolvedExecutable> {
    let bundled = std::path::absolute(bundled_path(install_root, descriptor))?;

    if probe.exists(&bundled) {
        debug!(path = %bundled.display(), "using bundled lawkit");
        return Ok(ResolvedExecutable {
            path: bundled,
            source: ExecutableSource::Bundled,
        });
    }

    let mut searched = vec![bundled.display().to_string()];

    if mode == LocatorMode::Permissive {
        if let Some(path) = probe.search_path(COMMAND_NAME) {
            debug!(path = %path.display(), "bundled lawkit missing, using PATH");
            return Ok(ResolvedExecutable {
                path,
                source: ExecutableSource::SystemPath,
            });
        }
        searched.push(format!("PATH:{COMMAND_NAME}"));
    }

    Err(LawkitError::BinaryNotFound {
        path: bundled,
        searched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashSet;

    /// In-memory probe; counts calls so tests can assert nothing is memoized.
    #[derive(Default)]
    struct FakeProbe {
        existing: HashSet<PathBuf>,
        on_path: Option<PathBuf>,
        exists_calls: Cell<usize>,
    }

    impl ExecutableProbe for FakeProbe {
        fn exists(&self, path: &Path) -> bool {
            self.exists_calls.set(self.exists_calls.get() + 1);
            self.existing.contains(path)
        }

        fn search_path(&self, name: &str) -> Option<PathBuf> {
            assert_eq!(name, COMMAND_NAME);
            self.on_path.clone()
        }
    }

    fn linux() -> PlatformDescriptor {
        PlatformDescriptor::resolve("linux", "x86_64").unwrap()
    }

    fn root() -> PathBuf {
        std::path::absolute("/pkg/lawkit").unwrap()
    }

    #[test]
    fn test_bundled_path_layout() {
        let path = bundled_path(Path::new("/pkg/lawkit"), &linux());
        assert_eq!(
            path,
            Path::new("/pkg/lawkit").join("bin").join("linux-x64").join("lawkit")
        );
    }

    #[test]
    fn test_strict_finds_bundled() {
        let expected = bundled_path(&root(), &linux());
        let probe = FakeProbe {
            existing: HashSet::from([expected.clone()]),
            ..Default::default()
        };

        let resolved = locate(&linux(), &root(), LocatorMode::Strict, &probe).unwrap();
        assert_eq!(resolved.path, expected);
        assert_eq!(resolved.source, ExecutableSource::Bundled);
    }

    #[test]
    fn test_strict_missing_names_expected_path() {
        let expected = bundled_path(&root(), &linux());
        let probe = FakeProbe {
            on_path: Some(PathBuf::from("/usr/bin/lawkit")),
            ..Default::default()
        };

        let err = locate(&linux(), &root(), LocatorMode::Strict, &probe).unwrap_err();
        match err {
            LawkitError::BinaryNotFound { path, searched } => {
                assert_eq!(path, expected);
                assert_eq!(searched, vec![expected.display().to_string()]);
            }
            other => panic!("expected BinaryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_never_consults_path() {
        struct PanicOnPath;
        impl ExecutableProbe for PanicOnPath {
            fn exists(&self, _path: &Path) -> bool {
                false
            }
            fn search_path(&self, _name: &str) -> Option<PathBuf> {
                panic!("strict mode must not search PATH");
            }
        }

        let result = locate(&linux(), &root(), LocatorMode::Strict, &PanicOnPath);
        assert!(result.is_err());
    }

    #[test]
    fn test_permissive_prefers_bundled() {
        let expected = bundled_path(&root(), &linux());
        let probe = FakeProbe {
            existing: HashSet::from([expected.clone()]),
            on_path: Some(PathBuf::from("/usr/bin/lawkit")),
            ..Default::default()
        };

        let resolved = locate(&linux(), &root(), LocatorMode::Permissive, &probe).unwrap();
        assert_eq!(resolved.path, expected);
        assert_eq!(resolved.source, ExecutableSource::Bundled);
    }

    #[test]
    fn test_permissive_falls_back_to_path() {
        let probe = FakeProbe {
            on_path: Some(PathBuf::from("/usr/bin/lawkit")),
            ..Default::default()
        };

        let resolved = locate(&linux(), &root(), LocatorMode::Permissive, &probe).unwrap();
        assert_eq!(resolved.path, PathBuf::from("/usr/bin/lawkit"));
        assert_eq!(resolved.source, ExecutableSource::SystemPath);
    }

    #[test]
    fn test_permissive_fails_when_neither_resolves() {
        let probe = FakeProbe::default();

        let err = locate(&linux(), &root(), LocatorMode::Permissive, &probe).unwrap_err();
        match err {
            LawkitError::BinaryNotFound { path, searched } => {
                assert_eq!(path, bundled_path(&root(), &linux()));
                assert_eq!(searched.len(), 2);
                assert_eq!(searched[1], "PATH:lawkit");
            }
            other => panic!("expected BinaryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_locate_is_not_memoized() {
        let probe = FakeProbe::default();
        let _ = locate(&linux(), &root(), LocatorMode::Strict, &probe);
        let _ = locate(&linux(), &root(), LocatorMode::Strict, &probe);
        assert_eq!(probe.exists_calls.get(), 2);
    }

    #[test]
    fn test_windows_descriptor_uses_exe_name() {
        let windows = PlatformDescriptor::resolve("windows", "x86_64").unwrap();
        let expected = bundled_path(&root(), &windows);
        assert!(expected.ends_with(Path::new("win32-x64").join("lawkit.exe")));
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let relative = Path::new("relative-root");
        let expected = std::path::absolute(bundled_path(relative, &linux())).unwrap();
        let probe = FakeProbe {
            existing: HashSet::from([expected.clone()]),
            ..Default::default()
        };

        let resolved = locate(&linux(), relative, LocatorMode::Strict, &probe).unwrap();
        assert!(resolved.path.is_absolute());
        assert_eq!(resolved.path, expected);
    }
}
