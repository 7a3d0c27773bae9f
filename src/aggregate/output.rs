//! Derived region statistics and their text rendering

use serde::{Deserialize, Serialize};

use crate::aggregate::normalize::PercentEntry;

/// Rolled-up statistics of one region, rebuilt from scratch on every census
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedStatistics {
    pub total_population: u64,
    #[serde(default)]
    pub race_distribution: Vec<PercentEntry>,
    #[serde(default)]
    pub culture_distribution: Vec<PercentEntry>,
    #[serde(default)]
    pub language_distribution: Vec<PercentEntry>,
    #[serde(default)]
    pub terrain_breakdown: Vec<PercentEntry>,
    /// Terrain keys in `terrain_breakdown` order
    #[serde(default)]
    pub dominant_terrain: Vec<String>,
}

impl DerivedStatistics {
    /// True when nothing at all was found under the region
    pub fn is_empty(&self) -> bool {
        self.total_population == 0
            && self.race_distribution.is_empty()
            && self.culture_distribution.is_empty()
            && self.language_distribution.is_empty()
            && self.terrain_breakdown.is_empty()
    }

    /// Most common terrain, if any
    pub fn dominant_terrain_key(&self) -> Option<&str> {
        self.dominant_terrain.first().map(String::as_str)
    }

    /// Multi-line summary for an info panel
    pub fn summary(&self, limit: usize) -> String {
        format!(
            "Population: {}\nRaces: {}\nCultures: {}\nLanguages: {}\nTerrain: {}",
            self.total_population,
            format_distribution(&self.race_distribution, limit),
            format_distribution(&self.culture_distribution, limit),
            format_distribution(&self.language_distribution, limit),
            format_distribution(&self.terrain_breakdown, limit),
        )
    }
}

/// Render up to `limit` entries as `Elf 75.0%, Human 25.0%`.
/// Remaining entries are folded into `+N more`; an empty list renders as `-`.
pub fn format_distribution(entries: &[PercentEntry], limit: usize) -> String {
    if entries.is_empty() {
        return "-".to_string();
    }
    let mut parts: Vec<String> = entries
        .iter()
        .take(limit)
        .map(|e| format!("{} {:.1}%", e.key, e.percent()))
        .collect();
    if entries.len() > limit {
        parts.push(format!("+{} more", entries.len() - limit));
    }
    parts.join(", ")
}
