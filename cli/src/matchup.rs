//! Matchup files: a target HP pool and the candidate moves against it

use anyhow::{Context, Result};
use koplan_rank::MoveTable;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Contents of a matchup JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct Matchup {
    pub target_hp: u32,
    pub moves: Vec<MoveTable>,
}

impl Matchup {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read matchup {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse matchup {}", path.display()))
    }
}
