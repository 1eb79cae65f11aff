//! Options → argv marshalling
//!
//! The table below is the single source of flag names and emission order.
//! [`marshal`] is a pure function of its inputs: the same subcommand, options
//! and input path always produce the same argv.

use std::path::{Path, PathBuf};

use crate::options::{Law, LawkitOptions, OutputFormat, Subcommand, ThresholdLevel};

/// How a field turns into argv tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Emitted bare (`--quiet`) when true, omitted otherwise.
    Flag,
    /// Emitted as a flag followed by one value token.
    Valued,
}

/// Rendering of a field value as a single argv token.
///
/// `None` means the field is left off the command line.
trait ArgValue {
    fn to_arg(&self) -> Option<String>;
}

impl ArgValue for String {
    fn to_arg(&self) -> Option<String> {
        Some(self.clone()).filter(|s| !s.is_empty())
    }
}

impl ArgValue for u64 {
    fn to_arg(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// `NaN` and infinities have no decimal form the executable accepts.
impl ArgValue for f64 {
    fn to_arg(&self) -> Option<String> {
        self.is_finite().then(|| self.to_string())
    }
}

impl ArgValue for PathBuf {
    fn to_arg(&self) -> Option<String> {
        self.to_string_lossy().into_owned().to_arg()
    }
}

impl ArgValue for OutputFormat {
    fn to_arg(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}

impl ArgValue for ThresholdLevel {
    fn to_arg(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}

impl ArgValue for Vec<Law> {
    fn to_arg(&self) -> Option<String> {
        let joined: Vec<&str> = self.iter().map(Law::as_str).collect();
        joined.join(",").to_arg()
    }
}

#[derive(Clone, Copy)]
enum Extract {
    Flag(fn(&LawkitOptions) -> bool),
    Valued(fn(&LawkitOptions) -> Option<String>),
}

/// One row of the marshalling table.
#[derive(Clone, Copy)]
pub struct OptionSpec {
    /// camelCase field name, as accepted in JSON options.
    pub field: &'static str,
    pub flag: &'static str,
    extract: Extract,
}

impl std::fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionSpec")
            .field("field", &self.field)
            .field("flag", &self.flag)
            .field("shape", &self.shape())
            .finish()
    }
}

impl OptionSpec {
    pub fn shape(&self) -> Shape {
        match self.extract {
            Extract::Flag(_) => Shape::Flag,
            Extract::Valued(_) => Shape::Valued,
        }
    }

    pub fn is_set(&self, options: &LawkitOptions) -> bool {
        match self.extract {
            Extract::Flag(on) => on(options),
            Extract::Valued(value) => value(options).is_some(),
        }
    }

    /// Append this row's tokens to `argv`, if the field is set.
    fn emit(&self, options: &LawkitOptions, argv: &mut Vec<String>) {
        match self.extract {
            Extract::Flag(on) => {
                if on(options) {
                    argv.push(self.flag.to_string());
                }
            }
            Extract::Valued(value) => {
                if let Some(value) = value(options) {
                    argv.push(self.flag.to_string());
                    argv.push(value);
                }
            }
        }
    }
}

macro_rules! flag {
    ($field:literal, $flag:expr, $member:ident) => {
        OptionSpec {
            field: $field,
            flag: $flag,
            extract: Extract::Flag(|o| o.$member),
        }
    };
}

macro_rules! valued {
    ($field:literal, $flag:expr, $member:ident) => {
        OptionSpec {
            field: $field,
            flag: $flag,
            extract: Extract::Valued(|o| o.$member.as_ref().and_then(ArgValue::to_arg)),
        }
    };
}

/// Every marshalled field, in emission order.
pub const OPTION_TABLE: &[OptionSpec] = &[
    // Common
    valued!("format", "--format", format),
    flag!("quiet", "--quiet", quiet),
    flag!("verbose", "--verbose", verbose),
    flag!("noColor", "--no-color", no_color),
    valued!("filter", "--filter", filter),
    valued!("minCount", "--min-count", min_count),
    // Integration
    valued!("laws", "--laws", laws),
    valued!("focus", "--focus", focus),
    valued!("threshold", THRESHOLD_FLAG, threshold),
    flag!("recommend", "--recommend", recommend),
    valued!("report", "--report", report),
    flag!("consistencyCheck", "--consistency-check", consistency_check),
    flag!("crossValidation", "--cross-validation", cross_validation),
    valued!("confidenceLevel", "--confidence-level", confidence_level),
    valued!("purpose", "--purpose", purpose),
    // Benford
    valued!("thresholdLevel", THRESHOLD_FLAG, threshold_level),
    valued!("confidence", "--confidence", confidence),
    valued!("sampleSize", "--sample-size", sample_size),
    valued!("minValue", "--min-value", min_value),
    // Pareto
    valued!("concentration", "--concentration", concentration),
    flag!("giniCoefficient", "--gini-coefficient", gini_coefficient),
    valued!("percentiles", "--percentiles", percentiles),
    flag!("businessAnalysis", "--business-analysis", business_analysis),
    // Zipf
    flag!("text", "--text", text),
    valued!("words", "--words", words),
    valued!("vocabularySize", "--vocabulary-size", vocabulary_size),
    valued!("exponent", "--exponent", exponent),
    // Normal
    valued!("test", "--test", test),
    flag!("outliers", "--outliers", outliers),
    valued!("outlierMethod", "--outlier-method", outlier_method),
    flag!("qualityControl", "--quality-control", quality_control),
    valued!("specLimits", "--spec-limits", spec_limits),
    flag!("enableTimeseries", "--enable-timeseries", enable_timeseries),
    valued!("timeseriesWindow", "--timeseries-window", timeseries_window),
    valued!("mean", "--mean", mean),
    valued!("stddev", "--stddev", stddev),
    // Poisson
    flag!("predict", "--predict", predict),
    valued!("maxEvents", "--max-events", max_events),
    flag!("rareEvents", "--rare-events", rare_events),
    valued!("lambda", "--lambda", lambda),
    flag!("timeSeries", "--time-series", time_series),
    // Generation
    valued!("samples", "--samples", samples),
    valued!("seed", "--seed", seed),
    valued!("outputFile", "--output-file", output_file),
    valued!("fraudRate", "--fraud-rate", fraud_rate),
    valued!("range", "--range", range),
    valued!("scale", "--scale", scale),
];

const THRESHOLD_FLAG: &str = "--threshold";

/// A fully built invocation. `argv` excludes the program path.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub subcommand: Subcommand,
    pub argv: Vec<String>,
}

/// Field that owns `--threshold` for this invocation, if any.
///
/// Integration subcommands only understand a numeric threshold. Everything
/// else prefers the level and falls back to the number.
fn threshold_owner(subcommand: &Subcommand, options: &LawkitOptions) -> Option<&'static str> {
    if subcommand.is_integration() {
        return options.threshold.map(|_| "threshold");
    }
    match (options.threshold_level, options.threshold) {
        (Some(_), _) => Some("thresholdLevel"),
        (None, Some(_)) => Some("threshold"),
        (None, None) => None,
    }
}

/// Build the argv for one invocation.
///
/// Subcommand tokens come first, then set options in table order, then
/// `input` when the subcommand takes one. `input` is ignored otherwise.
pub fn marshal(
    subcommand: &Subcommand,
    options: &LawkitOptions,
    input: Option<&Path>,
) -> CommandSpec {
    let mut argv: Vec<String> = subcommand.tokens().into_iter().map(String::from).collect();
    let threshold_field = threshold_owner(subcommand, options);

    for spec in OPTION_TABLE {
        if spec.flag == THRESHOLD_FLAG && Some(spec.field) != threshold_field {
            continue;
        }

        spec.emit(options, &mut argv);
    }

    if let Some(path) = input.filter(|_| subcommand.takes_input()) {
        argv.push(path.to_string_lossy().into_owned());
    }

    CommandSpec {
        subcommand: *subcommand,
        argv,
    }
}

/// Table rows that are set in `options`, by camelCase name.
pub fn set_fields(options: &LawkitOptions) -> Vec<&'static str> {
    OPTION_TABLE
        .iter()
        .filter(|spec| spec.is_set(options))
        .map(|spec| spec.field)
        .collect()
}
