pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod ingest;
pub mod utils;

pub use crate::adapters::http_source::HttpTurnoutSource;
pub use crate::config::{CliConfig, SourceConfig};
pub use crate::core::{flow::LookupFlow, session::TurnoutSession};
pub use crate::utils::error::{LookupError, Result};
