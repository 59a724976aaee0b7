//! dynrpc-stubgen: synthesize activatable server stubs
//!
//! Run from the root of a services crate. Takes no arguments: settings come
//! from an optional `stubgen.toml` next to it, and the catalog and output
//! directory live at their conventional locations unless that file says
//! otherwise.
//!
//! Exits with status 1 and a diagnostic on any fatal condition. Set
//! `RUST_LOG=debug` to see which contracts were skipped and why.

use anyhow::Context as _;
use dynrpc_synth::StubgenConfig;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            // Printed unconditionally; RUST_LOG may filter out the event above.
            eprintln!("dynrpc-stubgen: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn run() -> anyhow::Result<()> {
    if std::env::args_os().len() > 1 {
        anyhow::bail!("dynrpc-stubgen takes no arguments; configure it with stubgen.toml");
    }

    let base_dir = std::env::current_dir().context("can't determine working directory")?;
    let config = StubgenConfig::load(&base_dir)?;
    let report = dynrpc_synth::run(&config, &base_dir).context("stub synthesis failed")?;

    for stub in &report.stubs {
        info!(stub = stub.as_str(), "generated");
    }
    Ok(())
}
