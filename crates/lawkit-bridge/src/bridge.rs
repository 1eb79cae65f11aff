use lawkit_core::{BridgeConfig, LawkitError, Result};
use semver::Version;
use std::path::Path;
use tracing::{debug, instrument, warn};

use crate::exec::{self, ExecutionOutcome};
use crate::info::ResolvedExecutable;
use crate::input::{InputData, ScopedInput};
use crate::locate::{self, ExecutableProbe, SystemProbe};
use crate::marshal::{marshal, set_fields};
use crate::normalize::{AnalysisResult, normalize};
use crate::options::{Law, LawkitOptions, Subcommand};
use crate::platform::PlatformDescriptor;

/// Typed front end to the `lawkit` executable.
///
/// A `Bridge` holds no mutable state. Every call resolves the platform and
/// the executable again, so one instance can serve any number of concurrent
/// invocations.
#[derive(Debug, Clone)]
pub struct Bridge<P = SystemProbe> {
    config: BridgeConfig,
    os: String,
    arch: String,
    probe: P,
}

impl Bridge<SystemProbe> {
    pub fn new(config: BridgeConfig) -> Self {
        Self::with_probe(config, SystemProbe)
    }

    /// Build from the default config file and `LAWKIT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config_file(None)
    }

    /// Like [`Bridge::from_env`], reading `path` instead of the default file.
    pub fn from_config_file(path: Option<&Path>) -> Result<Self> {
        Ok(Self::new(BridgeConfig::load(path)?))
    }
}

impl<P: ExecutableProbe> Bridge<P> {
    /// Bridge using `probe` for existence checks and `PATH` lookups.
    pub fn with_probe(config: BridgeConfig, probe: P) -> Self {
        Self {
            config,
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            probe,
        }
    }

    /// Override the platform the bridge resolves for.
    pub fn with_platform(mut self, os: impl Into<String>, arch: impl Into<String>) -> Self {
        self.os = os.into();
        self.arch = arch.into();
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn platform(&self) -> Result<PlatformDescriptor> {
        PlatformDescriptor::resolve(&self.os, &self.arch)
    }

    /// Which executable an invocation made now would run.
    pub fn locate(&self) -> Result<ResolvedExecutable> {
        let descriptor = self.platform()?;
        let install_root = self.config.install_root()?;
        locate::locate(
            &descriptor,
            &install_root,
            self.config.locator.mode,
            &self.probe,
        )
    }

    pub async fn benford(
        &self,
        data: impl Into<InputData>,
        options: &LawkitOptions,
    ) -> Result<AnalysisResult> {
        let data = data.into();
        self.invoke(Law::Benf.into(), Some(&data), options).await
    }

    pub async fn pareto(
        &self,
        data: impl Into<InputData>,
        options: &LawkitOptions,
    ) -> Result<AnalysisResult> {
        let data = data.into();
        self.invoke(Law::Pareto.into(), Some(&data), options).await
    }

    pub async fn zipf(
        &self,
        data: impl Into<InputData>,
        options: &LawkitOptions,
    ) -> Result<AnalysisResult> {
        let data = data.into();
        self.invoke(Law::Zipf.into(), Some(&data), options).await
    }

    pub async fn normal(
        &self,
        data: impl Into<InputData>,
        options: &LawkitOptions,
    ) -> Result<AnalysisResult> {
        let data = data.into();
        self.invoke(Law::Normal.into(), Some(&data), options).await
    }

    pub async fn poisson(
        &self,
        data: impl Into<InputData>,
        options: &LawkitOptions,
    ) -> Result<AnalysisResult> {
        let data = data.into();
        self.invoke(Law::Poisson.into(), Some(&data), options).await
    }

    /// Multi-law analysis. `options.laws` selects the laws.
    pub async fn analyze(
        &self,
        data: impl Into<InputData>,
        options: &LawkitOptions,
    ) -> Result<AnalysisResult> {
        let data = data.into();
        self.invoke(Subcommand::Analyze, Some(&data), options).await
    }

    pub async fn validate(
        &self,
        data: impl Into<InputData>,
        options: &LawkitOptions,
    ) -> Result<AnalysisResult> {
        let data = data.into();
        self.invoke(Subcommand::Validate, Some(&data), options).await
    }

    pub async fn diagnose(
        &self,
        data: impl Into<InputData>,
        options: &LawkitOptions,
    ) -> Result<AnalysisResult> {
        let data = data.into();
        self.invoke(Subcommand::Diagnose, Some(&data), options).await
    }

    /// Generate sample data following `law`. No input is read.
    pub async fn generate(&self, law: Law, options: &LawkitOptions) -> Result<AnalysisResult> {
        self.invoke(Subcommand::Generate(law), None, options).await
    }

    /// List the laws the executable supports.
    pub async fn list(&self, options: &LawkitOptions) -> Result<AnalysisResult> {
        self.invoke(Subcommand::List, None, options).await
    }

    /// Run the executable's built-in self test.
    pub async fn selftest(&self, options: &LawkitOptions) -> Result<AnalysisResult> {
        self.invoke(Subcommand::Selftest, None, options).await
    }

    /// Run any subcommand. Input is ignored for subcommands that take none,
    /// and required by those that do.
    pub async fn run(
        &self,
        subcommand: Subcommand,
        data: Option<InputData>,
        options: &LawkitOptions,
    ) -> Result<AnalysisResult> {
        if subcommand.takes_input() && data.is_none() {
            return Err(LawkitError::ConfigInvalidValue {
                field: "input".to_string(),
                reason: format!("'{subcommand}' requires input data"),
            });
        }
        let data = data.filter(|_| subcommand.takes_input());
        self.invoke(subcommand, data.as_ref(), options).await
    }

    /// Run the executable with `args` verbatim.
    ///
    /// A non-zero exit is returned as an outcome, not an error.
    pub async fn run_raw<I, S>(&self, args: I) -> Result<ExecutionOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let executable = self.locate()?;
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        exec::run(&executable.path, &args).await
    }

    /// Whether the executable can be located and answers `--version`.
    pub async fn is_available(&self) -> bool {
        match self.run_raw(["--version"]).await {
            Ok(outcome) => outcome.success(),
            Err(e) => {
                debug!(error = %e, "lawkit is not available");
                false
            }
        }
    }

    /// Version reported by `lawkit --version`.
    pub async fn version(&self) -> Result<Version> {
        let outcome = self.run_raw(["--version"]).await?;
        if !outcome.success() {
            return Err(LawkitError::NonZeroExit {
                code: outcome.exit_code,
                stderr: outcome.stderr,
            });
        }

        parse_version(&outcome.stdout).ok_or_else(|| LawkitError::OutputParseFailed {
            reason: format!("unrecognized version output: {}", outcome.stdout.trim()),
        })
    }

    /// Resolve, materialize, marshal, spawn, normalize.
    ///
    /// The scoped input is released before the outcome is inspected, and by
    /// its `Drop` on every path that leaves early, cancellation included.
    #[instrument(skip_all, fields(subcommand = %subcommand))]
    async fn invoke(
        &self,
        subcommand: Subcommand,
        data: Option<&InputData>,
        options: &LawkitOptions,
    ) -> Result<AnalysisResult> {
        let executable = self.locate()?;

        let mut input = data.map(ScopedInput::materialize).transpose()?;
        let spec = marshal(&subcommand, options, input.as_ref().map(|i| i.path()));
        debug!(options = ?set_fields(options), "marshalled options");

        let outcome = exec::run(&executable.path, &spec.argv).await;

        if let Some(Err(e)) = input.as_mut().map(ScopedInput::release) {
            warn!(error = %e, "failed to release temporary input");
        }

        normalize(outcome?, options.output_format())
    }
}

/// Extract the version from output like `lawkit 2.2.0` or `lawkit v2.2.0`.
pub fn parse_version(output: &str) -> Option<Version> {
    output.lines().map(str::trim).find_map(|line| {
        let mut parts = line.split_whitespace();
        if parts.next()? != locate::COMMAND_NAME {
            return None;
        }
        let version = parts.next()?.trim_start_matches('v');
        Version::parse(version).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawkit_core::{LocatorConfig, LocatorMode};
    use std::path::PathBuf;

    struct NothingExists;

    impl ExecutableProbe for NothingExists {
        fn exists(&self, _path: &Path) -> bool {
            false
        }

        fn search_path(&self, _name: &str) -> Option<PathBuf> {
            None
        }
    }

    fn config(mode: LocatorMode) -> BridgeConfig {
        BridgeConfig {
            locator: LocatorConfig {
                mode,
                install_root: Some(PathBuf::from("/opt/lawkit")),
            },
        }
    }

    #[test]
    fn test_parse_version_plain() {
        assert_eq!(parse_version("lawkit 2.2.0\n"), Some(Version::new(2, 2, 0)));
    }

    #[test]
    fn test_parse_version_with_v_prefix() {
        assert_eq!(parse_version("lawkit v1.10.3"), Some(Version::new(1, 10, 3)));
    }

    #[test]
    fn test_parse_version_skips_noise() {
        let output = "warning: something\nlawkit 0.9.1 (abcdef)\n";
        assert_eq!(parse_version(output), Some(Version::new(0, 9, 1)));
    }

    #[test]
    fn test_parse_version_rejects_garbage() {
        assert_eq!(parse_version(""), None);
        assert_eq!(parse_version("lawkit"), None);
        assert_eq!(parse_version("rustc 1.80.0"), None);
        assert_eq!(parse_version("lawkit dev"), None);
    }

    #[test]
    fn test_unsupported_platform_surfaces_from_locate() {
        let bridge = Bridge::with_probe(config(LocatorMode::Strict), NothingExists)
            .with_platform("freebsd", "x86_64");

        match bridge.locate() {
            Err(LawkitError::UnsupportedPlatform { os, arch }) => {
                assert_eq!(os, "freebsd");
                assert_eq!(arch, "x86_64");
            }
            other => panic!("expected UnsupportedPlatform, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_binary_fails_before_spawn() {
        let bridge = Bridge::with_probe(config(LocatorMode::Strict), NothingExists)
            .with_platform("linux", "x86_64");

        let err = bridge
            .benford(InputData::values([1, 2, 3]), &LawkitOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, LawkitError::BinaryNotFound { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_run_without_input_fails_before_locate() {
        let bridge = Bridge::with_probe(config(LocatorMode::Strict), NothingExists)
            .with_platform("linux", "x86_64");

        for subcommand in [Subcommand::Analysis(Law::Benf), Subcommand::Analyze] {
            let err = bridge
                .run(subcommand, None, &LawkitOptions::default())
                .await
                .unwrap_err();

            match &err {
                LawkitError::ConfigInvalidValue { field, .. } => assert_eq!(field, "input"),
                other => panic!("expected ConfigInvalidValue, got {other:?}"),
            }
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[tokio::test]
    async fn test_run_list_needs_no_input() {
        let bridge = Bridge::with_probe(config(LocatorMode::Strict), NothingExists)
            .with_platform("linux", "x86_64");

        let err = bridge
            .run(Subcommand::List, None, &LawkitOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LawkitError::BinaryNotFound { .. }));
    }

    #[tokio::test]
    async fn test_is_available_never_errors() {
        let bridge = Bridge::with_probe(config(LocatorMode::Permissive), NothingExists)
            .with_platform("linux", "x86_64");
        assert!(!bridge.is_available().await);
    }
}
