mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use lawkit_core::LawkitError;
use lawkit_core::config::consts::PRE_SPAWN_EXIT_CODE;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match context::Context::new(cli.config.as_deref(), cli.permissive, cli.verbose) {
        Ok(ctx) => match cli.command {
            Commands::Exec { args } => commands::exec::run(&ctx, args).await,
            Commands::Run {
                command,
                input,
                values,
                options,
                law,
            } => commands::run::run(&ctx, &command, input, values, options, law).await,
            Commands::Locate { json } => commands::locate::run(&ctx, json),
            Commands::Check { json } => commands::check::run(&ctx, json).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Logs go to stderr so stdout stays exactly what lawkit printed.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("lawkit_bridge=debug,lawkit_core=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<LawkitError>()
        .map_or(PRE_SPAWN_EXIT_CODE, LawkitError::exit_code)
}
