pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::models::{CareerError, NewSaveRecord, Result, SaveRecord, SaveRecordUpdate};

pub use memory::MemorySaveStore;
pub use sqlite::SqliteSaveStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaveStore: Send + Sync {
    /// Persist a new save and return it with its assigned id.
    async fn create(&self, record: NewSaveRecord) -> Result<SaveRecord>;

    async fn get(&self, id: i64) -> Result<Option<SaveRecord>>;

    /// Most recently saved record in a user's slot.
    async fn get_by_slot(&self, user_id: &str, slot: i64) -> Result<Option<SaveRecord>>;

    /// All saves for a user, ordered by slot.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<SaveRecord>>;

    /// Apply a partial update. Returns `None` when no record has that id.
    async fn update(&self, id: i64, update: SaveRecordUpdate) -> Result<Option<SaveRecord>>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Parse a save id as it arrives from a path segment or command line.
pub fn parse_save_id(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CareerError::InvalidId(raw.to_string())),
    }
}
