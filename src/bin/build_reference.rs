use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use reqwest::Client;
use std::path::PathBuf;
use turnout_lookup::ingest::statbank;
use turnout_lookup::utils::logger;

/// Fetch the 2021 local-election results from Statistics Denmark and write
/// the reference turnout dataset consumed by turnout-lookup.
#[derive(Debug, Parser)]
#[command(name = "build-reference")]
struct Args {
    #[arg(long, default_value = statbank::STATBANK_URL)]
    endpoint: String,

    #[arg(long, default_value = "2021")]
    year: String,

    #[arg(long, default_value = "data/kv2021_turnout.json")]
    output: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose, false);

    tracing::info!(started_at = %Utc::now().to_rfc3339(), "building reference dataset");

    let client = Client::new();
    let csv_text = statbank::fetch_statbank_csv(&client, &args.endpoint, &args.year)
        .await
        .context("fetching statbank CSV")?;

    let rows = statbank::parse_statbank_csv(&csv_text).context("parsing statbank CSV")?;
    if rows.is_empty() {
        anyhow::bail!("statbank answer contained no complete municipality rows");
    }

    statbank::write_reference_file(&args.output, &rows)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("✅ Wrote {} municipalities to {}", rows.len(), args.output.display());
    Ok(())
}
