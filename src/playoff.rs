//! Playoff series bonus table.
//!
//! A hand-maintained CSV maps each series' visiting team to a bonus
//! (0-4 by convention) reflecting how interesting the series is. Only
//! consulted in playoff mode; a visitor with no row gets 0, not an error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct PlayoffRow {
    #[serde(rename = "Visitor")]
    visitor: String,
    #[serde(rename = "Playoff_pts")]
    bonus: u32,
}

#[derive(Debug, Default, Clone)]
pub struct PlayoffTable {
    bonuses: HashMap<String, u32>,
}

impl PlayoffTable {
    /// The table used outside playoff mode: every lookup yields 0.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening playoff table {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("reading playoff table {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut bonuses = HashMap::new();
        for row in csv_reader.deserialize() {
            let row: PlayoffRow = row?;
            bonuses.insert(row.visitor, row.bonus);
        }
        Ok(Self { bonuses })
    }

    pub fn bonus(&self, visitor_short_name: &str) -> u32 {
        self.bonuses.get(visitor_short_name).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }
}
