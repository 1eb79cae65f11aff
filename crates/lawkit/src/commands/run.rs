//! Run command - one typed bridge invocation

use crate::context::Context;
use crate::output::print_result;
use anyhow::{Result, bail};
use colored::Colorize;
use lawkit_bridge::{InputData, Law, LawkitOptions, Subcommand};
use std::path::PathBuf;

/// Execute `lawkit-bridge run <COMMAND>` command
pub async fn run(
    ctx: &Context,
    command: &str,
    input: Option<PathBuf>,
    values: Vec<String>,
    options: Option<String>,
    law: Option<String>,
) -> Result<()> {
    let subcommand = parse_subcommand(command, law.as_deref())?;
    let options = parse_options(options.as_deref())?;

    let data = if !values.is_empty() {
        Some(InputData::Values(values))
    } else {
        input.map(InputData::Path)
    };

    if subcommand.takes_input() && data.is_none() {
        bail!("`{command}` needs an INPUT file or at least one --value");
    }

    let result = ctx.bridge.run(subcommand, data, &options).await?;
    print_result(&result)?;

    if ctx.verbose {
        eprintln!(
            "{} {} finished in {} ms",
            "✓".green().bold(),
            subcommand,
            result.duration_ms
        );
    }

    Ok(())
}

fn parse_subcommand(command: &str, law: Option<&str>) -> Result<Subcommand> {
    if command.eq_ignore_ascii_case("generate") {
        let Some(law) = law else {
            bail!("`generate` needs --law (one of benf, pareto, zipf, normal, poisson)");
        };
        return Ok(Subcommand::Generate(law.parse::<Law>()?));
    }

    Ok(command.parse()?)
}

fn parse_options(raw: Option<&str>) -> Result<LawkitOptions> {
    match raw {
        None => Ok(LawkitOptions::default()),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| anyhow::anyhow!("invalid --options JSON: {e}")),
    }
}
