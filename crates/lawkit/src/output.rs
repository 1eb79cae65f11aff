use lawkit_bridge::{AnalysisOutput, AnalysisResult};
use std::io::{self, Write};

pub fn print_json(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

pub fn print_text(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

/// Print stdout of a bridge call and relay its stderr.
///
/// Text is written untouched; JSON is re-emitted pretty-printed.
pub fn print_result(result: &AnalysisResult) -> anyhow::Result<()> {
    match &result.output {
        AnalysisOutput::Text(text) => {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        AnalysisOutput::Structured(value) => print_json(&serde_json::to_string_pretty(value)?)?,
    }

    if !result.stderr.is_empty() {
        let mut err = io::stderr().lock();
        err.write_all(result.stderr.as_bytes())?;
    }

    Ok(())
}
