// ============================================================================
// src/main.rs – process bootstrap and dispatch
// ============================================================================

mod api;
mod cli;
mod cmd;
mod config;
mod errors;
mod router;
mod session;
mod term;

use anyhow::{Context, Result};
use clap::Parser;
use cmd::ExitStatus;
use config::Config;
use session::Session;
use std::io::{self, Write};
use std::process;
use term::ReadWriter;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = cli::Cli::parse();
    match run(&cli) {
        Ok(status) => process::exit(status.code()),
        Err(err) => {
            // Diagnostics go to stderr; stdout belongs to the protocol.
            eprintln!("gateshell: {err:#}");
            process::exit(1);
        }
    }
}

fn run(cli: &cli::Cli) -> Result<ExitStatus> {
    let session = Session::from_env(cli.key_descriptor.as_deref())?;

    let config_path = cli.config_path();
    let config = Config::load(&config_path)
        .with_context(|| format!("load config: {}", config_path.display()))?;
    init_logging(&config.log.level);

    let route = router::resolve(&session.command, &config)?;
    tracing::info!(
        operation = route.op.token(),
        path = ?route.path,
        key_id = ?session.key_id,
        "dispatching forced command"
    );

    let client = api::Client::from_config(&config).context("build API client")?;
    let handler = cmd::build(route, client, session.key_id);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    let mut rw = ReadWriter::new(&mut input, &mut output);

    let status = handler.execute(&mut rw)?;
    rw.output.flush()?;
    Ok(status)
}

/// tracing to stderr only. GATESHELL_LOG overrides the configured level;
/// the default keeps the shell silent for interactive SSH users.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_env("GATESHELL_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
