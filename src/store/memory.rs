use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use crate::models::{CareerError, NewSaveRecord, Result, SaveRecord, SaveRecordUpdate};
use super::SaveStore;

/// Save store held entirely in memory. Used by tests and the offline CLI paths.
#[derive(Debug)]
pub struct MemorySaveStore {
    records: Arc<RwLock<HashMap<i64, SaveRecord>>>,
    next_id: AtomicI64,
}

impl Default for MemorySaveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.write() {
            records.clear();
        }
    }
}

fn poisoned() -> CareerError {
    CareerError::StoreError("save store lock poisoned".to_string())
}

#[async_trait]
impl SaveStore for MemorySaveStore {
    async fn create(&self, record: NewSaveRecord) -> Result<SaveRecord> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let saved = SaveRecord {
            id,
            user_id: record.user_id,
            save_slot: record.save_slot,
            game_state: record.game_state,
            last_saved: Utc::now(),
            is_active: record.is_active,
        };

        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(id, saved.clone());
        Ok(saved)
    }

    async fn get(&self, id: i64) -> Result<Option<SaveRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(&id).cloned())
    }

    async fn get_by_slot(&self, user_id: &str, slot: i64) -> Result<Option<SaveRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records
            .values()
            .filter(|r| r.user_id == user_id && r.save_slot == slot)
            .max_by_key(|r| (r.last_saved, r.id))
            .cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<SaveRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        let mut saves: Vec<SaveRecord> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        saves.sort_by_key(|r| (r.save_slot, r.id));
        Ok(saves)
    }

    async fn update(&self, id: i64, update: SaveRecordUpdate) -> Result<Option<SaveRecord>> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };

        update.apply_to(record, Utc::now());
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        Ok(records.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemorySaveStore::new();
        let saved = store.create(NewSaveRecord::new("player", 1, "{}")).await.unwrap();

        assert_eq!(saved.id, 1);
        assert!(saved.is_active);
        assert_eq!(store.get(1).await.unwrap(), Some(saved));
        assert_eq!(store.get(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_slots_and_listing() {
        let store = MemorySaveStore::new();
        store.create(NewSaveRecord::new("player", 3, "{\"week\":3}")).await.unwrap();
        store.create(NewSaveRecord::new("player", 1, "{\"week\":1}")).await.unwrap();
        store.create(NewSaveRecord::new("rival", 1, "{}")).await.unwrap();

        let slot = store.get_by_slot("player", 3).await.unwrap().unwrap();
        assert_eq!(slot.game_state, "{\"week\":3}");
        assert!(store.get_by_slot("player", 2).await.unwrap().is_none());

        let saves = store.list_by_user("player").await.unwrap();
        let slots: Vec<i64> = saves.iter().map(|s| s.save_slot).collect();
        assert_eq!(slots, vec![1, 3]);
        assert!(store.list_by_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_slot_returns_latest_save() {
        let store = MemorySaveStore::new();
        let older = store.create(NewSaveRecord::new("player", 1, "{\"week\":1}")).await.unwrap();
        let newer = store.create(NewSaveRecord::new("player", 1, "{\"week\":2}")).await.unwrap();

        let slot = store.get_by_slot("player", 1).await.unwrap().unwrap();
        assert_eq!(slot.id, newer.id);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store
            .update(older.id, SaveRecordUpdate::game_state("{\"week\":3}"))
            .await
            .unwrap();

        let slot = store.get_by_slot("player", 1).await.unwrap().unwrap();
        assert_eq!(slot.id, older.id);
        assert_eq!(store.list_by_user("player").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemorySaveStore::new();
        let saved = store.create(NewSaveRecord::new("player", 1, "{}")).await.unwrap();

        let updated = store
            .update(saved.id, SaveRecordUpdate::game_state("{\"week\":9}"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.game_state, "{\"week\":9}");
        assert!(updated.last_saved >= saved.last_saved);

        assert!(store.update(99, SaveRecordUpdate::default()).await.unwrap().is_none());

        assert!(store.delete(saved.id).await.unwrap());
        assert!(!store.delete(saved.id).await.unwrap());
        assert!(store.is_empty());
    }
}
