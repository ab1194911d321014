use serde::{Deserialize, Serialize};

use super::{Award, Release};

/// The slice of a serialized game state the progression engine reads.
/// Unknown fields are ignored and missing lists come back empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CareerSnapshot {
    #[serde(default, alias = "currentWeek")]
    pub week: u32,
    #[serde(default, alias = "songs")]
    pub releases: Vec<Release>,
    #[serde(default)]
    pub awards: Vec<Award>,
}

impl CareerSnapshot {
    pub fn from_json(state: &str) -> serde_json::Result<Self> {
        serde_json::from_str(state)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn release(&self, id: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.id == id)
    }
}
