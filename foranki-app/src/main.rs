mod cli;
mod tui;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use cli::commands::{connect, run_cli};
use cli::opts::{Cli, Command};
use tui::app::TuiApp;

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(&args)?;

    match &args.cmd {
        // Run TUI on its own thread/runtime (no nested Tokio)
        Command::Tui => {
            let rt = Arc::new(Runtime::new()?);
            let http = connect(&args.api_url)?;
            let mut app = TuiApp::new(http, rt);
            app.run()
        }
        // Everything else uses a single runtime here
        _ => {
            let rt = Runtime::new()?;
            rt.block_on(run_cli(args))
        }
    }
}

fn init_logging(args: &Cli) -> Result<()> {
    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("foranki_app={level}").parse()?)
        .add_directive(format!("foranki_core={level}").parse()?)
        .add_directive(format!("foranki_http={level}").parse()?);

    // The terminal UI owns the screen; only log there when asked to.
    if matches!(args.cmd, Command::Tui) && args.verbose == 0 {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
