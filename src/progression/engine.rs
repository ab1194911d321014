use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Certification, NextTier, Release, Tier};
use super::ThresholdTable;

/// Where a single release stands on the certification ladder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReleaseProgress {
    pub release_id: String,
    pub title: String,
    pub streams: u64,
    pub current: Option<Tier>,
    pub next: NextTier,
    pub percent: f64,
    pub earned: Vec<Tier>,
}

/// Derives certification state from release data. Holds no state besides the
/// threshold table, so every call recomputes from the snapshot it is given.
#[derive(Debug, Clone, Default)]
pub struct CertificationEngine {
    table: ThresholdTable,
}

impl CertificationEngine {
    pub fn new(table: ThresholdTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    /// Tier of the certification with the highest recorded stream count.
    ///
    /// This reads the count stored on the certification, not the release's
    /// live count, so it trails reality until new certifications are issued.
    pub fn classify(&self, release: &Release) -> Option<Tier> {
        release
            .certifications
            .iter()
            .max_by(|a, b| {
                a.streams_at_award
                    .cmp(&b.streams_at_award)
                    .then_with(|| self.table.rank(a.tier).cmp(&self.table.rank(b.tier)))
            })
            .map(|c| c.tier)
    }

    /// Distinct tiers the release holds, lowest rank first.
    pub fn earned_tiers(&self, release: &Release) -> Vec<Tier> {
        let mut tiers: Vec<Tier> = release.certifications.iter().map(|c| c.tier).collect();
        tiers.sort_by_key(|t| self.table.rank(*t));
        tiers.dedup();
        tiers
    }

    pub fn next_tier(&self, release: &Release) -> NextTier {
        match self.classify(release) {
            None => NextTier::Tier(self.table.first().0),
            Some(current) => match self.table.after(current) {
                Some((next, _)) => NextTier::Tier(next),
                None => NextTier::MaxAchieved,
            },
        }
    }

    /// Percentage of the way from the current tier to the next, in [0, 100].
    pub fn progress_percent(&self, release: &Release) -> f64 {
        let streams = release.streams as f64;

        let current = match self.classify(release) {
            Some(tier) => tier,
            None => {
                let (_, gold) = self.table.first();
                return clamp_percent(streams / gold as f64 * 100.0);
            }
        };

        let Some((_, next)) = self.table.after(current) else {
            return 100.0;
        };
        let cur = self.table.threshold(current);

        if next <= cur {
            return 100.0;
        }

        clamp_percent((streams - cur as f64) / (next - cur) as f64 * 100.0)
    }

    pub fn highest_across_collection(&self, releases: &[Release]) -> Option<Tier> {
        releases
            .iter()
            .flat_map(|r| r.certifications.iter())
            .map(|c| c.tier)
            .max_by_key(|t| self.table.rank(*t))
    }

    pub fn release_progress(&self, release: &Release) -> ReleaseProgress {
        let progress = ReleaseProgress {
            release_id: release.id.clone(),
            title: release.title.clone(),
            streams: release.streams,
            current: self.classify(release),
            next: self.next_tier(release),
            percent: self.progress_percent(release),
            earned: self.earned_tiers(release),
        };

        debug!(
            "Release {} at {:?}, {:.1}% toward {}",
            release.id, progress.current, progress.percent, progress.next
        );

        progress
    }

    /// Tier the live stream count qualifies for, regardless of what has been awarded.
    pub fn live_tier(&self, streams: u64) -> Option<Tier> {
        self.table.tier_for_streams(streams)
    }

    /// Tiers above the release's current one that its live count has crossed.
    /// Lower tiers it skipped are never backfilled. Unreleased material is
    /// never eligible.
    pub fn pending_tiers(&self, release: &Release) -> Vec<Tier> {
        if !release.released {
            return Vec::new();
        }

        let floor = self.classify(release).map(|t| self.table.rank(t) + 1).unwrap_or(0);

        self.table
            .entries()
            .iter()
            .skip(floor)
            .take_while(|(_, min)| release.streams >= *min)
            .map(|(tier, _)| *tier)
            .filter(|tier| !release.holds(*tier))
            .collect()
    }

    /// Certification records for every pending tier. The caller appends them
    /// to the release; nothing here mutates it.
    pub fn issue_certifications(&self, release: &Release, week: u32, issuing_body: &str) -> Vec<Certification> {
        self.pending_tiers(release)
            .into_iter()
            .map(|tier| Certification::new(&release.id, tier, release.streams, week, issuing_body))
            .collect()
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
