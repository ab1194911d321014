use serde::{Deserialize, Serialize};
use std::fmt;

/// Award-granting bodies known to the game, in display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AwardBody {
    Grammy,
    Ama,
    Bbma,
    Vma,
    Bet,
    Brit,
}

impl AwardBody {
    pub const ALL: [AwardBody; 6] = [
        AwardBody::Grammy,
        AwardBody::Ama,
        AwardBody::Bbma,
        AwardBody::Vma,
        AwardBody::Bet,
        AwardBody::Brit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AwardBody::Grammy => "grammy",
            AwardBody::Ama => "ama",
            AwardBody::Bbma => "bbma",
            AwardBody::Vma => "vma",
            AwardBody::Bet => "bet",
            AwardBody::Brit => "brit",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AwardBody::Grammy => "Grammy Awards",
            AwardBody::Ama => "American Music Awards",
            AwardBody::Bbma => "Billboard Music Awards",
            AwardBody::Vma => "MTV Video Music Awards",
            AwardBody::Bet => "BET Awards",
            AwardBody::Brit => "BRIT Awards",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "grammy" | "grammys" => Some(AwardBody::Grammy),
            "ama" | "amas" => Some(AwardBody::Ama),
            "bbma" | "bbmas" | "billboard" => Some(AwardBody::Bbma),
            "vma" | "vmas" => Some(AwardBody::Vma),
            "bet" => Some(AwardBody::Bet),
            "brit" | "brits" => Some(AwardBody::Brit),
            _ => None,
        }
    }
}

impl fmt::Display for AwardBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwardSubject<'a> {
    Release(&'a str),
    Album(&'a str),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub id: String,
    #[serde(alias = "type")]
    pub body: AwardBody,
    pub year: i32,
    #[serde(default)]
    pub category: String,
    #[serde(default, alias = "won")]
    pub is_winner: bool,
    #[serde(default, alias = "songId", skip_serializing_if = "Option::is_none")]
    pub release_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
}

impl Award {
    pub fn new(id: impl Into<String>, body: AwardBody, year: i32, category: impl Into<String>, is_winner: bool) -> Self {
        Self {
            id: id.into(),
            body,
            year,
            category: category.into(),
            is_winner,
            release_id: None,
            album_id: None,
        }
    }

    /// The release or album an award was given for; a release link wins if both are set.
    pub fn subject(&self) -> Option<AwardSubject<'_>> {
        match (&self.release_id, &self.album_id) {
            (Some(id), _) => Some(AwardSubject::Release(id)),
            (None, Some(id)) => Some(AwardSubject::Album(id)),
            (None, None) => None,
        }
    }
}
