use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    #[serde(rename = "gold")]
    Gold,
    #[serde(rename = "platinum")]
    Platinum,
    #[serde(rename = "2x_platinum", alias = "2xPlatinum")]
    TwoTimesPlatinum,
    #[serde(rename = "3x_platinum", alias = "3xPlatinum")]
    ThreeTimesPlatinum,
    #[serde(rename = "4x_platinum", alias = "4xPlatinum")]
    FourTimesPlatinum,
    #[serde(rename = "5x_platinum", alias = "5xPlatinum")]
    FiveTimesPlatinum,
    #[serde(rename = "diamond")]
    Diamond,
}

impl Tier {
    /// Every tier, lowest rank first.
    pub const ALL: [Tier; 7] = [
        Tier::Gold,
        Tier::Platinum,
        Tier::TwoTimesPlatinum,
        Tier::ThreeTimesPlatinum,
        Tier::FourTimesPlatinum,
        Tier::FiveTimesPlatinum,
        Tier::Diamond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
            Tier::TwoTimesPlatinum => "2x_platinum",
            Tier::ThreeTimesPlatinum => "3x_platinum",
            Tier::FourTimesPlatinum => "4x_platinum",
            Tier::FiveTimesPlatinum => "5x_platinum",
            Tier::Diamond => "diamond",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::TwoTimesPlatinum => "2x Platinum",
            Tier::ThreeTimesPlatinum => "3x Platinum",
            Tier::FourTimesPlatinum => "4x Platinum",
            Tier::FiveTimesPlatinum => "5x Platinum",
            Tier::Diamond => "Diamond",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '×' { 'x' } else { c })
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();

        match normalized.as_str() {
            "gold" => Some(Tier::Gold),
            "platinum" | "1xplatinum" => Some(Tier::Platinum),
            "2xplatinum" | "doubleplatinum" => Some(Tier::TwoTimesPlatinum),
            "3xplatinum" | "tripleplatinum" => Some(Tier::ThreeTimesPlatinum),
            "4xplatinum" => Some(Tier::FourTimesPlatinum),
            "5xplatinum" => Some(Tier::FiveTimesPlatinum),
            "diamond" => Some(Tier::Diamond),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Label shown for a release or collection with no certification at all.
pub const NO_TIER_LABEL: &str = "none";

/// Label shown once the top tier has been reached.
pub const MAX_ACHIEVED_LABEL: &str = "max achieved";

/// What a release is working toward next.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NextTier {
    Tier(Tier),
    MaxAchieved,
}

impl NextTier {
    pub fn tier(&self) -> Option<Tier> {
        match self {
            NextTier::Tier(tier) => Some(*tier),
            NextTier::MaxAchieved => None,
        }
    }

    pub fn is_max(&self) -> bool {
        matches!(self, NextTier::MaxAchieved)
    }

    pub fn label(&self) -> &'static str {
        match self {
            NextTier::Tier(tier) => tier.as_str(),
            NextTier::MaxAchieved => MAX_ACHIEVED_LABEL,
        }
    }
}

impl fmt::Display for NextTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextTier::Tier(tier) => write!(f, "{}", tier),
            NextTier::MaxAchieved => f.write_str(MAX_ACHIEVED_LABEL),
        }
    }
}

/// Label for an optional tier, `"none"` when absent.
pub fn tier_label(tier: Option<Tier>) -> &'static str {
    tier.map(|t| t.as_str()).unwrap_or(NO_TIER_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parsing() {
        assert_eq!(Tier::from_str("gold"), Some(Tier::Gold));
        assert_eq!(Tier::from_str("Platinum"), Some(Tier::Platinum));
        assert_eq!(Tier::from_str("2x_platinum"), Some(Tier::TwoTimesPlatinum));
        assert_eq!(Tier::from_str("3x Platinum"), Some(Tier::ThreeTimesPlatinum));
        assert_eq!(Tier::from_str("5×platinum"), Some(Tier::FiveTimesPlatinum));
        assert_eq!(Tier::from_str("2× Platinum"), Some(Tier::TwoTimesPlatinum));
        assert_eq!(Tier::from_str("DIAMOND"), Some(Tier::Diamond));
        assert_eq!(Tier::from_str("silver"), None);
    }

    #[test]
    fn test_label_round_trip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_str(tier.as_str()), Some(tier));
        }
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&Tier::TwoTimesPlatinum).unwrap();
        assert_eq!(json, "\"2x_platinum\"");

        let tier: Tier = serde_json::from_str("\"diamond\"").unwrap();
        assert_eq!(tier, Tier::Diamond);
    }

    #[test]
    fn test_next_tier_labels() {
        assert_eq!(NextTier::Tier(Tier::Gold).label(), "gold");
        assert_eq!(NextTier::MaxAchieved.label(), "max achieved");
        assert_eq!(NextTier::MaxAchieved.to_string(), "max achieved");
        assert_eq!(tier_label(None), "none");
        assert_eq!(tier_label(Some(Tier::Platinum)), "platinum");
    }
}
