use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::models::{Award, AwardBody};

pub type YearBuckets = BTreeMap<i32, Vec<Award>>;

/// Awards bucketed by awarding body, then year. Every known body is present,
/// empty or not, and years iterate in ascending order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct AwardGroups(BTreeMap<AwardBody, YearBuckets>);

impl<'de> Deserialize<'de> for AwardGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let groups = BTreeMap::<AwardBody, YearBuckets>::deserialize(deserializer)?;
        Ok(Self::seeded(groups))
    }
}

impl AwardGroups {
    /// Adds an empty year map for every body missing from `groups`.
    fn seeded(mut groups: BTreeMap<AwardBody, YearBuckets>) -> Self {
        for body in AwardBody::ALL {
            groups.entry(body).or_default();
        }
        Self(groups)
    }

    pub fn body(&self, body: AwardBody) -> &YearBuckets {
        &self.0[&body]
    }

    pub fn bucket(&self, body: AwardBody, year: i32) -> &[Award] {
        self.body(body).get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AwardBody, &YearBuckets)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.values().flat_map(|years| years.values()).map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates every bucket back into one list.
    pub fn flatten(&self) -> Vec<Award> {
        self.0
            .values()
            .flat_map(|years| years.values())
            .flat_map(|bucket| bucket.iter().cloned())
            .collect()
    }
}

pub fn group_by_category_and_year(awards: &[Award]) -> AwardGroups {
    let AwardGroups(seeded) = AwardGroups::seeded(BTreeMap::new());

    let grouped = awards.iter().fold(seeded, |mut groups, award| {
        groups
            .entry(award.body)
            .or_default()
            .entry(award.year)
            .or_default()
            .push(award.clone());
        groups
    });

    AwardGroups(grouped)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AwardTally {
    pub wins: u32,
    pub nominations: u32,
}

/// Wins and nominations per body. Every award record counts as a nomination.
pub fn tally_awards(awards: &[Award]) -> BTreeMap<AwardBody, AwardTally> {
    let mut tally: BTreeMap<AwardBody, AwardTally> = AwardBody::ALL
        .iter()
        .map(|body| (*body, AwardTally::default()))
        .collect();

    for award in awards {
        let entry = tally.entry(award.body).or_default();
        entry.nominations += 1;
        if award.is_winner {
            entry.wins += 1;
        }
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn award(id: &str, body: AwardBody, year: i32, won: bool) -> Award {
        Award::new(id, body, year, "Best New Artist", won)
    }

    #[test]
    fn test_grouping_scenario() {
        let awards = vec![
            award("a1", AwardBody::Grammy, 2025, false),
            award("a2", AwardBody::Grammy, 2025, true),
            award("a3", AwardBody::Bet, 2024, true),
        ];

        let groups = group_by_category_and_year(&awards);
        assert_eq!(groups.bucket(AwardBody::Grammy, 2025).len(), 2);
        assert_eq!(groups.bucket(AwardBody::Bet, 2024).len(), 1);
        assert!(groups.body(AwardBody::Vma).is_empty());
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_every_body_seeded() {
        let groups = group_by_category_and_year(&[]);
        assert!(groups.is_empty());
        for body in AwardBody::ALL {
            assert!(groups.body(body).is_empty());
        }
        assert_eq!(groups.iter().count(), AwardBody::ALL.len());
    }

    #[test]
    fn test_insertion_order_within_year() {
        let awards = vec![
            award("first", AwardBody::Ama, 2026, false),
            award("other-year", AwardBody::Ama, 2024, false),
            award("second", AwardBody::Ama, 2026, true),
        ];

        let groups = group_by_category_and_year(&awards);
        let ids: Vec<&str> = groups
            .bucket(AwardBody::Ama, 2026)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second"]);

        let years: Vec<i32> = groups.body(AwardBody::Ama).keys().copied().collect();
        assert_eq!(years, vec![2024, 2026]);
    }

    #[test]
    fn test_flatten_preserves_multiset() {
        let awards = vec![
            award("a1", AwardBody::Brit, 2023, false),
            award("a2", AwardBody::Grammy, 2025, true),
            award("a3", AwardBody::Brit, 2022, true),
            award("a4", AwardBody::Vma, 2025, false),
        ];

        let mut flattened: Vec<String> = group_by_category_and_year(&awards)
            .flatten()
            .into_iter()
            .map(|a| a.id)
            .collect();
        flattened.sort();

        let mut original: Vec<String> = awards.iter().map(|a| a.id.clone()).collect();
        original.sort();

        assert_eq!(flattened, original);
    }

    #[test]
    fn test_missing_bucket_is_empty() {
        let groups = group_by_category_and_year(&[award("a1", AwardBody::Bet, 2024, true)]);
        assert!(groups.bucket(AwardBody::Bet, 1999).is_empty());
    }

    #[test]
    fn test_tally() {
        let awards = vec![
            award("a1", AwardBody::Grammy, 2025, false),
            award("a2", AwardBody::Grammy, 2025, true),
            award("a3", AwardBody::Bet, 2024, true),
        ];

        let tally = tally_awards(&awards);
        assert_eq!(tally[&AwardBody::Grammy], AwardTally { wins: 1, nominations: 2 });
        assert_eq!(tally[&AwardBody::Bet], AwardTally { wins: 1, nominations: 1 });
        assert_eq!(tally[&AwardBody::Vma], AwardTally::default());
    }

    #[test]
    fn test_decoded_groups_cover_every_body() {
        let groups: AwardGroups = serde_json::from_str("{}").unwrap();
        for body in AwardBody::ALL {
            assert!(groups.body(body).is_empty());
        }
        assert!(groups.bucket(AwardBody::Grammy, 2025).is_empty());

        let partial: AwardGroups =
            serde_json::from_str(r#"{"bet": {"2024": [{"id": "a1", "body": "bet", "year": 2024}]}}"#).unwrap();
        assert_eq!(partial.bucket(AwardBody::Bet, 2024).len(), 1);
        assert!(partial.body(AwardBody::Vma).is_empty());
        assert_eq!(partial.iter().count(), AwardBody::ALL.len());
    }

    #[test]
    fn test_groups_serialize_by_label() {
        let groups = group_by_category_and_year(&[award("a1", AwardBody::Bet, 2024, true)]);
        let value = serde_json::to_value(&groups).unwrap();

        assert_eq!(value["bet"]["2024"][0]["id"], "a1");
        assert!(value["grammy"].as_object().unwrap().is_empty());
    }
}
