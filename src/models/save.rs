use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A stored save game. `game_state` is the serialized game as the client wrote it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveRecord {
    pub id: i64,
    pub user_id: String,
    pub save_slot: i64,
    pub game_state: String,
    pub last_saved: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSaveRecord {
    pub user_id: String,
    pub save_slot: i64,
    pub game_state: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SaveRecordUpdate {
    pub save_slot: Option<i64>,
    pub game_state: Option<String>,
    pub is_active: Option<bool>,
}

impl NewSaveRecord {
    pub fn new(user_id: impl Into<String>, save_slot: i64, game_state: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            save_slot,
            game_state: game_state.into(),
            is_active: true,
        }
    }
}

impl SaveRecordUpdate {
    pub fn game_state(state: impl Into<String>) -> Self {
        Self {
            game_state: Some(state.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.save_slot.is_none() && self.game_state.is_none() && self.is_active.is_none()
    }

    /// Applies the set fields onto `record` and stamps it with `now`.
    pub fn apply_to(&self, record: &mut SaveRecord, now: DateTime<Utc>) {
        if let Some(slot) = self.save_slot {
            record.save_slot = slot;
        }
        if let Some(state) = &self.game_state {
            record.game_state = state.clone();
        }
        if let Some(active) = self.is_active {
            record.is_active = active;
        }
        record.last_saved = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_partial_update() {
        let saved_at = Utc::now();
        let mut record = SaveRecord {
            id: 1,
            user_id: "player".to_string(),
            save_slot: 1,
            game_state: "{}".to_string(),
            last_saved: saved_at,
            is_active: true,
        };

        let update = SaveRecordUpdate {
            is_active: Some(false),
            ..SaveRecordUpdate::default()
        };
        let later = saved_at + chrono::Duration::seconds(30);
        update.apply_to(&mut record, later);

        assert!(!record.is_active);
        assert_eq!(record.game_state, "{}");
        assert_eq!(record.save_slot, 1);
        assert_eq!(record.last_saved, later);
    }

    #[test]
    fn test_empty_update() {
        assert!(SaveRecordUpdate::default().is_empty());
        assert!(!SaveRecordUpdate::game_state("{}").is_empty());
    }
}
