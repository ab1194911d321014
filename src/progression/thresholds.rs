use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{CareerError, Result, Tier};

/// Minimum cumulative streams for each tier, keyed by field name in config files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThresholdSettings {
    pub gold: u64,
    pub platinum: u64,
    pub two_times_platinum: u64,
    pub three_times_platinum: u64,
    pub four_times_platinum: u64,
    pub five_times_platinum: u64,
    pub diamond: u64,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            gold: 500_000,
            platinum: 1_000_000,
            two_times_platinum: 2_000_000,
            three_times_platinum: 3_000_000,
            four_times_platinum: 4_000_000,
            five_times_platinum: 5_000_000,
            diamond: 10_000_000,
        }
    }
}

/// Ordered (tier, threshold) pairs. Position in the list is the tier's rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    entries: Vec<(Tier, u64)>,
    index: HashMap<Tier, usize>,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ThresholdTable {
    pub fn standard() -> Self {
        Self::build(Self::pairs(&ThresholdSettings::default()))
    }

    /// Builds a table from configured thresholds. Every tier must be present
    /// and thresholds must strictly increase with rank.
    pub fn from_settings(settings: &ThresholdSettings) -> Result<Self> {
        Self::new(Self::pairs(settings))
    }

    pub fn new(entries: Vec<(Tier, u64)>) -> Result<Self> {
        if entries.len() != Tier::ALL.len() {
            return Err(CareerError::InvalidThresholds(format!(
                "expected {} tiers, got {}",
                Tier::ALL.len(),
                entries.len()
            )));
        }

        for (position, ((tier, _), expected)) in entries.iter().zip(Tier::ALL).enumerate() {
            if *tier != expected {
                return Err(CareerError::InvalidThresholds(format!(
                    "position {} holds {} but should hold {}",
                    position,
                    tier.as_str(),
                    expected.as_str()
                )));
            }
        }

        if entries[0].1 == 0 {
            return Err(CareerError::InvalidThresholds(
                "gold threshold must be above zero".to_string(),
            ));
        }

        for pair in entries.windows(2) {
            let ((lower, lower_min), (upper, upper_min)) = (pair[0], pair[1]);
            if upper_min <= lower_min {
                return Err(CareerError::InvalidThresholds(format!(
                    "{} ({}) must exceed {} ({})",
                    upper.as_str(),
                    upper_min,
                    lower.as_str(),
                    lower_min
                )));
            }
        }

        Ok(Self::build(entries))
    }

    fn build(entries: Vec<(Tier, u64)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(rank, (tier, _))| (*tier, rank))
            .collect();

        Self { entries, index }
    }

    fn pairs(settings: &ThresholdSettings) -> Vec<(Tier, u64)> {
        vec![
            (Tier::Gold, settings.gold),
            (Tier::Platinum, settings.platinum),
            (Tier::TwoTimesPlatinum, settings.two_times_platinum),
            (Tier::ThreeTimesPlatinum, settings.three_times_platinum),
            (Tier::FourTimesPlatinum, settings.four_times_platinum),
            (Tier::FiveTimesPlatinum, settings.five_times_platinum),
            (Tier::Diamond, settings.diamond),
        ]
    }

    pub fn entries(&self) -> &[(Tier, u64)] {
        &self.entries
    }

    pub fn rank(&self, tier: Tier) -> usize {
        self.index[&tier]
    }

    pub fn threshold(&self, tier: Tier) -> u64 {
        self.entries[self.rank(tier)].1
    }

    pub fn first(&self) -> (Tier, u64) {
        self.entries[0]
    }

    pub fn last(&self) -> (Tier, u64) {
        self.entries[self.entries.len() - 1]
    }

    /// The tier ranked directly above `tier`, or `None` at the top.
    pub fn after(&self, tier: Tier) -> Option<(Tier, u64)> {
        self.entries.get(self.rank(tier) + 1).copied()
    }

    /// Highest tier whose threshold `streams` reaches.
    pub fn tier_for_streams(&self, streams: u64) -> Option<Tier> {
        self.entries
            .iter()
            .rev()
            .find(|(_, min)| streams >= *min)
            .map(|(tier, _)| *tier)
    }
}
