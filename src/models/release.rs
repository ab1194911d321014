use serde::{Deserialize, Serialize};

use super::Tier;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub tier: Tier,
    #[serde(alias = "streams")]
    pub streams_at_award: u64,
    #[serde(default)]
    pub week_awarded: u32,
    #[serde(default)]
    pub issuing_body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "totalStreams", alias = "streamCount")]
    pub streams: u64,
    #[serde(default)]
    pub released: bool,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

impl Release {
    pub fn new(id: impl Into<String>, title: impl Into<String>, streams: u64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            streams,
            released: true,
            certifications: Vec::new(),
        }
    }

    pub fn with_certification(mut self, certification: Certification) -> Self {
        self.certifications.push(certification);
        self
    }

    pub fn holds(&self, tier: Tier) -> bool {
        self.certifications.iter().any(|c| c.tier == tier)
    }

    pub fn is_certified(&self) -> bool {
        !self.certifications.is_empty()
    }
}

impl Certification {
    pub fn new(release_id: &str, tier: Tier, streams_at_award: u64, week_awarded: u32, issuing_body: &str) -> Self {
        Self {
            id: format!("{}-{}", release_id, tier.as_str()),
            tier,
            streams_at_award,
            week_awarded,
            issuing_body: issuing_body.to_string(),
        }
    }
}
