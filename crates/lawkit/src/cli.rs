//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lawkit-bridge")]
#[command(version, about = "Run the bundled lawkit executable", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log bridge activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to bridge.toml
    #[arg(long, global = true, env = "LAWKIT_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fall back to `lawkit` on PATH when the bundled binary is missing
    #[arg(long, global = true)]
    pub permissive: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute lawkit with arguments
    #[command(trailing_var_arg = true)]
    Exec {
        /// Arguments to pass to lawkit (after --)
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run one analysis command through the typed bridge
    Run {
        /// benf, pareto, zipf, normal, poisson, analyze, validate, diagnose,
        /// generate, list or selftest
        command: String,

        /// Input file for analysis commands
        input: Option<PathBuf>,

        /// In-memory value, may be repeated (replaces INPUT)
        #[arg(long = "value", conflicts_with = "input", allow_hyphen_values = true)]
        values: Vec<String>,

        /// Options as a camelCase JSON object, e.g. '{"format":"json"}'
        #[arg(long)]
        options: Option<String>,

        /// Law for `generate`
        #[arg(long)]
        law: Option<String>,
    },

    /// Show which lawkit executable would be used
    Locate {
        #[arg(long)]
        json: bool,
    },

    /// Check that lawkit can be run
    Check {
        #[arg(long)]
        json: bool,
    },
}
