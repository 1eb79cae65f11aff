//! Locate command - show the executable that would be used

use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LocateInfo {
    platform: String,
    mode: String,
    path: String,
    source: String,
}

/// Execute `lawkit-bridge locate` command
pub fn run(ctx: &Context, json: bool) -> Result<()> {
    let platform = ctx.bridge.platform()?;
    let resolved = ctx.bridge.locate()?;

    let info = LocateInfo {
        platform: platform.to_string(),
        mode: ctx.bridge.config().locator.mode.to_string(),
        path: resolved.path.display().to_string(),
        source: resolved.source.to_string(),
    };

    if json {
        print_json(&serde_json::to_string_pretty(&info)?)?;
    } else {
        print_text(&format!("Platform: {}", info.platform))?;
        print_text(&format!("Mode:     {}", info.mode))?;
        print_text(&format!("Path:     {}", info.path))?;
        print_text(&format!("Source:   {}", info.source))?;
    }

    Ok(())
}
