pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;
use self::toml_config::TomlConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "turnout-lookup")]
#[command(about = "Look up municipal voter turnout against the 2021 local election")]
pub struct CliConfig {
    /// Municipality names to look up
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Endpoint serving the live turnout dataset (overrides the config file)
    #[arg(long)]
    pub live_endpoint: Option<String>,

    /// Endpoint serving the 2021 reference dataset (overrides the config file)
    #[arg(long)]
    pub reference_endpoint: Option<String>,

    /// Path to a TOML config file with a [sources] section
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// The resolved source endpoints the HTTP adapter runs with.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub live: String,
    pub reference: String,
}

impl ConfigProvider for SourceConfig {
    fn live_endpoint(&self) -> &str {
        &self.live
    }

    fn reference_endpoint(&self) -> &str {
        &self.reference
    }
}

impl CliConfig {
    /// Merge CLI flags over the optional config file. Flags win.
    pub fn resolve_sources(&self) -> Result<SourceConfig> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_path(path)?,
            None => TomlConfig::default(),
        };

        let live = self
            .live_endpoint
            .clone()
            .or(file.sources.live)
            .ok_or_else(|| LookupError::MissingConfig {
                field: "live_endpoint".to_string(),
            })?;
        let reference = self
            .reference_endpoint
            .clone()
            .or(file.sources.reference)
            .ok_or_else(|| LookupError::MissingConfig {
                field: "reference_endpoint".to_string(),
            })?;

        validate_url("live_endpoint", &live)?;
        validate_url("reference_endpoint", &reference)?;

        Ok(SourceConfig { live, reference })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for query in &self.queries {
            validate_non_empty_string("query", query)?;
        }
        Ok(())
    }
}
