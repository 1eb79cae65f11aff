//! Exec command - run lawkit with raw arguments

use crate::context::Context;
use anyhow::Result;
use std::io::{self, Write};

/// Execute `lawkit-bridge exec -- <ARGS>...`
///
/// Output is relayed verbatim and the process exits with lawkit's own code.
pub async fn run(ctx: &Context, args: Vec<String>) -> Result<()> {
    let outcome = ctx.bridge.run_raw(args).await?;

    io::stdout().lock().write_all(outcome.stdout.as_bytes())?;
    io::stderr().lock().write_all(outcome.stderr.as_bytes())?;
    io::stdout().flush()?;

    if outcome.exit_code != 0 {
        // Signal terminations have no code of their own
        std::process::exit(outcome.exit_code.max(1));
    }

    Ok(())
}
