use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use midtrade::summary::format_output;
use midtrade::Session;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "midtrade",
    about = "Trade ties and joining behaviour in militarized interstate disputes"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/midtrade.toml")]
    config: PathBuf,

    /// MIDB participant CSV, overriding the configured path
    #[arg(long)]
    disputes: Option<PathBuf>,

    /// COW dyadic trade CSV, overriding the configured path
    #[arg(long)]
    trade: Option<PathBuf>,

    /// Analyze one conflict and exit instead of prompting
    #[arg(long)]
    conflict: Option<i64>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Skip writing SVG and DOT network files
    #[arg(long)]
    no_render: bool,
}

fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = midtrade::load_config(&cli.config)?;
    if let Some(path) = &cli.disputes {
        config.data.dispute_path = path.to_string_lossy().into_owned();
    }
    if let Some(path) = &cli.trade {
        config.data.trade_path = path.to_string_lossy().into_owned();
    }
    if cli.no_render {
        config.render.enabled = false;
    }

    let session = Session::open(config)?;

    let Some(conflict_id) = cli.conflict else {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return midtrade::repl::run_repl(&session, cli.json);
        }
        return midtrade::repl::run_lines(
            &session,
            stdin.lock(),
            cli.json,
            &mut std::io::stdout(),
            &mut std::io::stderr(),
        );
    };

    let report = session
        .analyze(conflict_id)
        .with_context(|| format!("Analysis of conflict {conflict_id} failed"))?
        .with_context(|| format!("Conflict {conflict_id} not found"))?;

    println!("{}", format_output(&report, cli.json)?);

    Ok(())
}
