//! Check command - availability probe

use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CheckOutput {
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute `lawkit-bridge check` command
///
/// Always returns Ok(()) - problems are reported, not raised
pub async fn run(ctx: &Context, json: bool) -> Result<()> {
    let output = match ctx.bridge.locate() {
        Err(e) => CheckOutput {
            available: false,
            version: None,
            path: None,
            source: None,
            error: Some(e.to_string()),
        },
        Ok(resolved) => {
            let (version, error) = match ctx.bridge.version().await {
                Ok(version) => (Some(version.to_string()), None),
                Err(e) => (None, Some(e.to_string())),
            };
            CheckOutput {
                available: error.is_none(),
                version,
                path: Some(resolved.path.display().to_string()),
                source: Some(resolved.source.to_string()),
                error,
            }
        }
    };

    if json {
        print_json(&serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    if output.available {
        print_text(&format!(
            "{} lawkit {} available",
            "✓".green().bold(),
            output.version.as_deref().unwrap_or("unknown")
        ))?;
    } else {
        print_text(&format!("{} lawkit is not available", "✗".red().bold()))?;
    }
    if let (Some(path), Some(source)) = (&output.path, &output.source) {
        print_text(&format!("  Path:   {path}"))?;
        print_text(&format!("  Source: {source}"))?;
    }
    if let Some(error) = &output.error {
        print_text(&format!("  Error:  {error}"))?;
    }

    Ok(())
}
