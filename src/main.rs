use clap::Parser;
use turnout_lookup::utils::error::ErrorSeverity;
use turnout_lookup::utils::{logger, validation::Validate};
use turnout_lookup::{CliConfig, HttpTurnoutSource, LookupFlow};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.json_logs);

    tracing::info!("Starting turnout-lookup CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_message());
        std::process::exit(3);
    }

    let sources = match config.resolve_sources() {
        Ok(sources) => sources,
        Err(e) => {
            tracing::error!("❌ Source resolution failed: {}", e);
            eprintln!("❌ {}", e.user_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    let source = HttpTurnoutSource::new(sources);
    let mut flow = LookupFlow::new(source);

    let mut exit_code = 0;
    for query in &config.queries {
        match flow.lookup(query).await {
            Ok(report) => {
                println!("{}", report.render());
                println!();
            }
            Err(e) => {
                tracing::error!("❌ Lookup failed for {:?}: {}", query, e);
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", e.user_message());

                let code = match e.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                exit_code = exit_code.max(code);
            }
        }
    }

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
