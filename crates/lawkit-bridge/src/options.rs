//! Typed command and option model
//!
//! Every field of [`LawkitOptions`] is optional. Which flag a field becomes
//! is decided by the marshalling table in [`crate::marshal`].

use lawkit_core::LawkitError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A statistical law known to the executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Law {
    #[serde(alias = "benford")]
    Benf,
    Pareto,
    Zipf,
    Normal,
    Poisson,
}

impl Law {
    pub const ALL: [Law; 5] = [Law::Benf, Law::Pareto, Law::Zipf, Law::Normal, Law::Poisson];

    pub fn as_str(&self) -> &'static str {
        match self {
            Law::Benf => "benf",
            Law::Pareto => "pareto",
            Law::Zipf => "zipf",
            Law::Normal => "normal",
            Law::Poisson => "poisson",
        }
    }
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Law {
    type Err = LawkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benf" | "benford" => Ok(Law::Benf),
            "pareto" => Ok(Law::Pareto),
            "zipf" => Ok(Law::Zipf),
            "normal" => Ok(Law::Normal),
            "poisson" => Ok(Law::Poisson),
            other => Err(LawkitError::ConfigInvalidValue {
                field: "law".to_string(),
                reason: format!("unknown law '{other}'"),
            }),
        }
    }
}

/// The operation requested from the executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    Analysis(Law),
    Analyze,
    Validate,
    Diagnose,
    Generate(Law),
    List,
    Selftest,
}

impl Subcommand {
    /// Leading argv tokens for this subcommand.
    pub fn tokens(&self) -> Vec<&'static str> {
        match self {
            Subcommand::Analysis(law) => vec![law.as_str()],
            Subcommand::Analyze => vec!["analyze"],
            Subcommand::Validate => vec!["validate"],
            Subcommand::Diagnose => vec!["diagnose"],
            Subcommand::Generate(law) => vec!["generate", law.as_str()],
            Subcommand::List => vec!["list"],
            Subcommand::Selftest => vec!["selftest"],
        }
    }

    /// Whether the subcommand reads an input file (positional, last).
    pub fn takes_input(&self) -> bool {
        matches!(
            self,
            Subcommand::Analysis(_)
                | Subcommand::Analyze
                | Subcommand::Validate
                | Subcommand::Diagnose
        )
    }

    /// Multi-law subcommands, whose `--threshold` is numeric.
    pub fn is_integration(&self) -> bool {
        matches!(
            self,
            Subcommand::Analyze | Subcommand::Validate | Subcommand::Diagnose
        )
    }
}

impl From<Law> for Subcommand {
    fn from(law: Law) -> Self {
        Subcommand::Analysis(law)
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

impl FromStr for Subcommand {
    type Err = LawkitError;

    /// Parses `benf`, `analyze`, `generate:zipf`, `list`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if let Some(law) = s.strip_prefix("generate:") {
            return Ok(Subcommand::Generate(law.parse()?));
        }

        match s.as_str() {
            "analyze" => Ok(Subcommand::Analyze),
            "validate" => Ok(Subcommand::Validate),
            "diagnose" => Ok(Subcommand::Diagnose),
            "list" => Ok(Subcommand::List),
            "selftest" => Ok(Subcommand::Selftest),
            other => other
                .parse::<Law>()
                .map(Subcommand::Analysis)
                .map_err(|_| LawkitError::ConfigInvalidValue {
                    field: "command".to_string(),
                    reason: format!("unknown command '{other}'"),
                }),
        }
    }
}

/// Output encodings understood by `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
    Yaml,
    Toml,
    Xml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Toml => "toml",
            OutputFormat::Xml => "xml",
        }
    }

    /// Only JSON is parsed; everything else passes through as text.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Benford anomaly-detection threshold levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdLevel {
    Low,
    Medium,
    High,
    Critical,
    Auto,
}

impl ThresholdLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdLevel::Low => "low",
            ThresholdLevel::Medium => "medium",
            ThresholdLevel::High => "high",
            ThresholdLevel::Critical => "critical",
            ThresholdLevel::Auto => "auto",
        }
    }
}

/// Options for one invocation.
///
/// Deserializes from camelCase JSON (`{"minCount": 5}`); unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LawkitOptions {
    // Common
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
    pub filter: Option<String>,
    pub min_count: Option<u64>,

    // Integration
    #[serde(deserialize_with = "de_law_list")]
    pub laws: Option<Vec<Law>>,
    pub focus: Option<String>,
    pub threshold: Option<f64>,
    pub recommend: bool,
    pub report: Option<String>,
    pub consistency_check: bool,
    pub cross_validation: bool,
    pub confidence_level: Option<f64>,
    pub purpose: Option<String>,

    // Benford
    pub threshold_level: Option<ThresholdLevel>,
    pub confidence: Option<f64>,
    pub sample_size: Option<u64>,
    pub min_value: Option<f64>,

    // Pareto
    pub concentration: Option<f64>,
    pub gini_coefficient: bool,
    pub percentiles: Option<String>,
    pub business_analysis: bool,

    // Zipf
    pub text: bool,
    pub words: Option<u64>,
    pub vocabulary_size: Option<u64>,
    pub exponent: Option<f64>,

    // Normal
    pub test: Option<String>,
    pub outliers: bool,
    pub outlier_method: Option<String>,
    pub quality_control: bool,
    pub spec_limits: Option<String>,
    pub enable_timeseries: bool,
    pub timeseries_window: Option<u64>,
    pub mean: Option<f64>,
    pub stddev: Option<f64>,

    // Poisson
    pub predict: bool,
    pub max_events: Option<u64>,
    pub rare_events: bool,
    pub lambda: Option<f64>,
    pub time_series: bool,

    // Generation
    pub samples: Option<u64>,
    pub seed: Option<u64>,
    pub output_file: Option<PathBuf>,
    pub fraud_rate: Option<f64>,
    pub range: Option<String>,
    pub scale: Option<f64>,
}

impl LawkitOptions {
    /// Format used to interpret stdout; text when unset.
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Accepts `"benf,pareto"` or `["benf", "pareto"]`.
fn de_law_list<'de, D>(deserializer: D) -> Result<Option<Vec<Law>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Laws {
        Joined(String),
        List(Vec<Law>),
    }

    match Option::<Laws>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Laws::List(laws)) => Ok(Some(laws)),
        Some(Laws::Joined(joined)) => joined
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<Law>().map_err(serde::de::Error::custom))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
    }
}
