use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use turnout_lookup::utils::logger;

/// Write an empty live-turnout dataset skeleton with a fresh UTC timestamp.
/// The publishing job fills in the kommuner as counts come in.
#[derive(Debug, Parser)]
#[command(name = "init-live")]
struct Args {
    #[arg(long, default_value = "data/live_turnout.json")]
    output: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose, false);

    let scaffold = serde_json::json!({
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        "kommuner": {},
    });

    if let Some(parent) = args.output.parent() {
        fs::create_dir_all(parent).context("creating output directory")?;
    }
    fs::write(&args.output, serde_json::to_string_pretty(&scaffold)?)
        .with_context(|| format!("writing {}", args.output.display()))?;

    tracing::info!(path = %args.output.display(), "wrote live dataset scaffold");
    println!("✅ Wrote live dataset scaffold to {}", args.output.display());
    Ok(())
}
