use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AwardBody, CareerSnapshot, Tier};
use super::{group_by_category_and_year, tally_awards, AwardGroups, AwardTally, CertificationEngine, ReleaseProgress};

/// Everything the career dashboards show, derived from one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerReport {
    pub week: u32,
    pub releases: Vec<ReleaseProgress>,
    pub highest_tier: Option<Tier>,
    pub awards: AwardGroups,
    pub tally: BTreeMap<AwardBody, AwardTally>,
}

impl CareerReport {
    pub fn from_snapshot(engine: &CertificationEngine, snapshot: &CareerSnapshot) -> Self {
        Self {
            week: snapshot.week,
            releases: snapshot
                .releases
                .iter()
                .map(|r| engine.release_progress(r))
                .collect(),
            highest_tier: engine.highest_across_collection(&snapshot.releases),
            awards: group_by_category_and_year(&snapshot.awards),
            tally: tally_awards(&snapshot.awards),
        }
    }

    pub fn total_wins(&self) -> u32 {
        self.tally.values().map(|t| t.wins).sum()
    }

    pub fn total_nominations(&self) -> u32 {
        self.tally.values().map(|t| t.nominations).sum()
    }
}
