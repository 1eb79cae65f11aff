//! Turning a raw [`ExecutionOutcome`] into a caller-facing result.

use lawkit_core::{LawkitError, Result};
use serde::Serialize;
use serde_json::Value;

use crate::exec::ExecutionOutcome;
use crate::options::OutputFormat;

/// Standard output of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
    /// Raw stdout, for every format other than JSON.
    Text(String),
    /// Parsed JSON document.
    Structured(Value),
}

impl AnalysisOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnalysisOutput::Text(text) => Some(text),
            AnalysisOutput::Structured(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            AnalysisOutput::Structured(value) => Some(value),
            AnalysisOutput::Text(_) => None,
        }
    }
}

/// Output of a successful command plus whatever the child wrote to stderr.
///
/// Warnings on stderr do not make a run fail; they are handed back as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub output: AnalysisOutput,
    pub stderr: String,
    pub duration_ms: u64,
}

impl AnalysisResult {
    pub fn has_warnings(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

/// Classify an outcome as success or failure and decode stdout.
///
/// - exit code 0 and JSON requested: stdout must parse as JSON
/// - exit code 0 otherwise: stdout verbatim
/// - anything else: [`LawkitError::NonZeroExit`] carrying code and stderr
pub fn normalize(outcome: ExecutionOutcome, format: OutputFormat) -> Result<AnalysisResult> {
    if !outcome.success() {
        return Err(LawkitError::NonZeroExit {
            code: outcome.exit_code,
            stderr: outcome.stderr,
        });
    }

    let output = if format.is_structured() {
        let value = serde_json::from_str(&outcome.stdout).map_err(|e| {
            LawkitError::OutputParseFailed {
                reason: e.to_string(),
            }
        })?;
        AnalysisOutput::Structured(value)
    } else {
        AnalysisOutput::Text(outcome.stdout)
    };

    Ok(AnalysisResult {
        output,
        stderr: outcome.stderr,
        duration_ms: outcome.duration_ms,
    })
}
