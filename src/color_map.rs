use crate::error::{ScoutError, ScoutResult};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub count: u32,
    pub highlight: String,
}

/// Maps how often a hero appears to a highlight token of the palette.
/// Index 1 is the first palette entry; counts past the palette reuse it.
#[derive(Debug, Clone)]
pub struct FrequencyColorMap {
    palette: Vec<String>,
    used_counts: BTreeSet<u32>,
}

impl FrequencyColorMap {
    pub fn new(palette: Vec<String>) -> ScoutResult<FrequencyColorMap> {
        if palette.is_empty() {
            return Err(ScoutError::Config("palette must not be empty".to_string()));
        }
        Ok(FrequencyColorMap {
            palette,
            used_counts: BTreeSet::new(),
        })
    }

    /// Token for `count` without recording it.
    pub fn token(&self, count: u32) -> &str {
        let index = count as usize;
        if index >= 1 && index <= self.palette.len() {
            &self.palette[index - 1]
        } else {
            &self.palette[0]
        }
    }

    /// Token for `count`, remembered for the legend.
    pub fn lookup(&mut self, count: u32) -> String {
        self.used_counts.insert(count);
        self.token(count).to_string()
    }

    pub fn used_counts(&self) -> &BTreeSet<u32> {
        &self.used_counts
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.used_counts
            .iter()
            .map(|&count| LegendEntry {
                count,
                highlight: self.token(count).to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.palette.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }
}
