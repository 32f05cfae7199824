use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Optional config file carrying the source endpoints:
///
/// ```toml
/// [sources]
/// live = "https://example.org/data/live_turnout.json"
/// reference = "https://example.org/data/kv2021_turnout.json"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub sources: Sources,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sources {
    pub live: Option<String>,
    pub reference: Option<String>,
}

impl TomlConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(live) = &self.sources.live {
            validate_url("sources.live", live)?;
        }
        if let Some(reference) = &self.sources.reference {
            validate_url("sources.reference", reference)?;
        }
        Ok(())
    }
}
