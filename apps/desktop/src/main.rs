use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use desktop_integration::SystemBrowserOpener;
use registry_core::Registry;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod console;
mod footprint;
mod screens;

use config::load_settings;
use console::Console;

/// Terminal front-end for the shared URL registry.
#[derive(Parser, Debug)]
#[command(name = "url-registry")]
struct Args {
    /// TOML settings file. Defaults to ./registry.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// tracing filter directive, e.g. `debug` or `registry_core=trace`.
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(filter) = args.log_filter {
        settings.log_filter = filter;
    }

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    info!(browser_command = ?settings.browser_command, "starting url registry");

    let opener = SystemBrowserOpener::new(settings.browser_command);
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut registry = Registry::new();
    screens::run(&mut registry, &mut console, &opener);
    Ok(())
}
