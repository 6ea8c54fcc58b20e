//! Search configuration loading
//!
//! The config file is JSON; any field left out keeps its default. Command
//! line flags are applied on top by the caller.

use anyhow::{Context, Result};
use koplan_engine::SearchConfig;
use log::info;
use std::fs;
use std::path::Path;

/// Load a config file, or the defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<SearchConfig> {
    let Some(path) = path else {
        return Ok(SearchConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    info!("Loaded search config from {}", path.display());
    Ok(config)
}
