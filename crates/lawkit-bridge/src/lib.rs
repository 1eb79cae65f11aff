//! Typed, async access to the `lawkit` statistical-analysis executable.
//!
//! This crate does no statistics itself. It locates the platform-specific
//! `lawkit` binary, turns typed options into a stable argv, runs the binary
//! as a child process and classifies what comes back.
//!
//! # Architecture
//!
//! - [`platform`]: supported `(os, arch)` pairs and their bundled layout
//! - [`locate`]: bundled path lookup with optional `PATH` fallback
//! - [`input`]: in-memory values materialized as a scoped temporary file
//! - [`options`] / [`marshal`]: the option model and its argv table
//! - [`exec`]: child process execution with concurrent output capture
//! - [`normalize`]: exit-code and output classification
//! - [`bridge`]: the [`Bridge`] tying the above together
//!
//! # Invocation Flow
//!
//! ```text
//! Bridge::benford(data, options)
//!     ↓
//! 1. Resolve platform descriptor
//!     → UnsupportedPlatform
//!     ↓
//! 2. Locate executable
//!     → Search: {install_root}/bin/{platform}/lawkit
//!     → Permissive only: which("lawkit")
//!     → BinaryNotFound
//!     ↓
//! 3. Materialize input (values → {tmp}/lawkit-XXXX/data.txt)
//!     ↓
//! 4. Marshal argv: <subcommand> <flags in table order> <input>
//!     ↓
//! 5. Spawn and collect stdout/stderr
//!     → SpawnFailed
//!     ↓
//! 6. Release temporary input (also on drop)
//!     ↓
//! 7. Normalize
//!     → NonZeroExit / OutputParseFailed
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use lawkit_bridge::{Bridge, InputData, LawkitOptions, OutputFormat};
//!
//! # async fn demo() -> lawkit_core::Result<()> {
//! let bridge = Bridge::from_env()?;
//!
//! let options = LawkitOptions::default().with_format(OutputFormat::Json);
//! let result = bridge
//!     .benford(InputData::values([123, 456, 789, 1234]), &options)
//!     .await?;
//!
//! if let Some(json) = result.output.as_json() {
//!     println!("risk level: {}", json["risk_level"]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Bundled Layout
//!
//! - **Linux**: `{root}/bin/linux-x64/lawkit`, `{root}/bin/linux-arm64/lawkit`
//! - **macOS**: `{root}/bin/darwin-x64/lawkit`, `{root}/bin/darwin-arm64/lawkit`
//! - **Windows**: `{root}\bin\win32-x64\lawkit.exe`

// Core modules
pub mod bridge;
pub mod exec;
pub mod info;
pub mod input;
pub mod locate;
pub mod marshal;
pub mod normalize;
pub mod options;
pub mod platform;

// Re-export commonly used types
pub use bridge::{Bridge, parse_version};
pub use exec::ExecutionOutcome;
pub use info::{ExecutableSource, ResolvedExecutable};
pub use input::{InputData, ScopedInput};
pub use locate::{ExecutableProbe, SystemProbe};
pub use marshal::{CommandSpec, marshal};
pub use normalize::{AnalysisOutput, AnalysisResult};
pub use options::{Law, LawkitOptions, OutputFormat, Subcommand, ThresholdLevel};
pub use platform::PlatformDescriptor;

// Type alias for convenience
pub type Result<T> = lawkit_core::Result<T>;
