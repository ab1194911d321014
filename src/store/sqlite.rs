use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DatabaseSettings;
use crate::models::{NewSaveRecord, Result, SaveRecord, SaveRecordUpdate};
use super::SaveStore;

const SELECT_COLUMNS: &str = "SELECT id, user_id, save_slot, game_state, last_saved, is_active FROM save_games";

/// Save store backed by a SQLite database through a sqlx pool.
#[derive(Debug, Clone)]
pub struct SqliteSaveStore {
    pool: SqlitePool,
}

impl SqliteSaveStore {
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.connect_timeout_seconds))
            .connect(&settings.url)
            .await?;

        info!("Opened save database: {}", settings.url);

        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    /// Wrap an existing pool, creating the schema if needed.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    async fn create_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS save_games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                save_slot INTEGER NOT NULL,
                game_state TEXT NOT NULL,
                last_saved TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_save_games_user_slot ON save_games (user_id, save_slot)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Fixed-width UTC text so `ORDER BY last_saved` sorts chronologically.
fn saved_at_text(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time at the precision stored in the `last_saved` column.
fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn record_from_row(row: &SqliteRow) -> std::result::Result<SaveRecord, sqlx::Error> {
    Ok(SaveRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        save_slot: row.try_get("save_slot")?,
        game_state: row.try_get("game_state")?,
        last_saved: row.try_get::<DateTime<Utc>, _>("last_saved")?,
        is_active: row.try_get("is_active")?,
    })
}

#[async_trait]
impl SaveStore for SqliteSaveStore {
    async fn create(&self, record: NewSaveRecord) -> Result<SaveRecord> {
        let now = now_micros();
        let result = sqlx::query(
            "INSERT INTO save_games (user_id, save_slot, game_state, last_saved, is_active) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.user_id)
        .bind(record.save_slot)
        .bind(&record.game_state)
        .bind(saved_at_text(now))
        .bind(record.is_active)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Created save {} for {} in slot {}", id, record.user_id, record.save_slot);

        Ok(SaveRecord {
            id,
            user_id: record.user_id,
            save_slot: record.save_slot,
            game_state: record.game_state,
            last_saved: now,
            is_active: record.is_active,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<SaveRecord>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(record_from_row).transpose()?)
    }

    async fn get_by_slot(&self, user_id: &str, slot: i64) -> Result<Option<SaveRecord>> {
        let row = sqlx::query(&format!(
            "{} WHERE user_id = ? AND save_slot = ? ORDER BY last_saved DESC, id DESC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .bind(slot)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(record_from_row).transpose()?)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<SaveRecord>> {
        let rows = sqlx::query(&format!("{} WHERE user_id = ? ORDER BY save_slot, id", SELECT_COLUMNS))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(record_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn update(&self, id: i64, update: SaveRecordUpdate) -> Result<Option<SaveRecord>> {
        let Some(mut record) = self.get(id).await? else {
            return Ok(None);
        };

        update.apply_to(&mut record, now_micros());

        sqlx::query(
            "UPDATE save_games SET save_slot = ?, game_state = ?, last_saved = ?, is_active = ? WHERE id = ?",
        )
        .bind(record.save_slot)
        .bind(&record.game_state)
        .bind(saved_at_text(record.last_saved))
        .bind(record.is_active)
        .bind(id)
        .execute(&self.pool)
        .await?;

        debug!("Updated save {}", id);
        Ok(Some(record))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM save_games WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
