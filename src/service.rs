use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{CareerError, CareerSnapshot, NewSaveRecord, Result, SaveRecord, SaveRecordUpdate};
use crate::progression::{CareerReport, CertificationEngine};
use crate::store::SaveStore;

/// Reads save games out of a store and runs the progression engine over them.
pub struct CareerService {
    store: Arc<dyn SaveStore>,
    engine: CertificationEngine,
}

impl CareerService {
    pub fn new(store: Arc<dyn SaveStore>, engine: CertificationEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> &CertificationEngine {
        &self.engine
    }

    pub async fn load_snapshot(&self, user_id: &str, slot: i64) -> Result<CareerSnapshot> {
        let record = match self.store.get_by_slot(user_id, slot).await? {
            Some(record) => record,
            None => {
                warn!("No save in slot {} for {}", slot, user_id);
                return Err(CareerError::NotFound(format!("{} slot {}", user_id, slot)));
            }
        };

        let snapshot = CareerSnapshot::from_json(&record.game_state)?;
        info!(
            "Loaded save {} for {}: week {}, {} releases, {} awards",
            record.id,
            user_id,
            snapshot.week,
            snapshot.releases.len(),
            snapshot.awards.len()
        );

        Ok(snapshot)
    }

    pub async fn report(&self, user_id: &str, slot: i64) -> Result<CareerReport> {
        let snapshot = self.load_snapshot(user_id, slot).await?;
        Ok(CareerReport::from_snapshot(&self.engine, &snapshot))
    }

    /// Write a snapshot into a slot, updating the slot's save if one exists.
    pub async fn save_snapshot(&self, user_id: &str, slot: i64, snapshot: &CareerSnapshot) -> Result<SaveRecord> {
        let state = snapshot.to_json()?;

        if let Some(existing) = self.store.get_by_slot(user_id, slot).await? {
            let updated = self
                .store
                .update(existing.id, SaveRecordUpdate::game_state(state))
                .await?
                .ok_or_else(|| CareerError::NotFound(existing.id.to_string()))?;
            info!("Updated save {} for {} in slot {}", updated.id, user_id, slot);
            return Ok(updated);
        }

        let created = self.store.create(NewSaveRecord::new(user_id, slot, state)).await?;
        info!("Created save {} for {} in slot {}", created.id, user_id, slot);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Award, AwardBody, Certification, Release, Tier};
    use crate::store::{MemorySaveStore, MockSaveStore};
    use chrono::Utc;

    fn snapshot() -> CareerSnapshot {
        CareerSnapshot {
            week: 12,
            releases: vec![Release::new("s1", "Afterglow", 750_000)
                .with_certification(Certification::new("s1", Tier::Gold, 500_000, 8, "RIAA"))],
            awards: vec![Award::new("a1", AwardBody::Bet, 2024, "Best New Artist", true)],
        }
    }

    #[tokio::test]
    async fn test_save_then_report() {
        let store = Arc::new(MemorySaveStore::new());
        let service = CareerService::new(store.clone(), CertificationEngine::default());

        let first = service.save_snapshot("player", 1, &snapshot()).await.unwrap();
        let second = service.save_snapshot("player", 1, &snapshot()).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.len(), 1);

        let report = service.report("player", 1).await.unwrap();
        assert_eq!(report.week, 12);
        assert_eq!(report.highest_tier, Some(Tier::Gold));
        assert_eq!(report.releases[0].percent, 50.0);
        assert_eq!(report.awards.bucket(AwardBody::Bet, 2024).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_slot_is_not_found() {
        let mut store = MockSaveStore::new();
        store.expect_get_by_slot().returning(|_, _| Ok(None));

        let service = CareerService::new(Arc::new(store), CertificationEngine::default());
        let err = service.report("player", 4).await.unwrap_err();

        assert!(matches!(err, CareerError::NotFound(_)));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_corrupt_state_is_serialization_error() {
        let mut store = MockSaveStore::new();
        store.expect_get_by_slot().returning(|user_id, slot| {
            Ok(Some(SaveRecord {
                id: 3,
                user_id: user_id.to_string(),
                save_slot: slot,
                game_state: "{not json".to_string(),
                last_saved: Utc::now(),
                is_active: true,
            }))
        });

        let service = CareerService::new(Arc::new(store), CertificationEngine::default());
        let err = service.load_snapshot("player", 1).await.unwrap_err();

        assert!(matches!(err, CareerError::SerializationError(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_save_creates_when_slot_empty() {
        let mut store = MockSaveStore::new();
        store.expect_get_by_slot().times(1).returning(|_, _| Ok(None));
        store.expect_update().never();
        store.expect_create().times(1).returning(|record| {
            Ok(SaveRecord {
                id: 10,
                user_id: record.user_id,
                save_slot: record.save_slot,
                game_state: record.game_state,
                last_saved: Utc::now(),
                is_active: record.is_active,
            })
        });

        let service = CareerService::new(Arc::new(store), CertificationEngine::default());
        let saved = service.save_snapshot("player", 2, &snapshot()).await.unwrap();

        assert_eq!(saved.id, 10);
        assert_eq!(CareerSnapshot::from_json(&saved.game_state).unwrap(), snapshot());
    }
}
