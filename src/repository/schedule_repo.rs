// ==========================================
// 周课表排课系统 - 课表快照仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 存储: kv_store 表, 固定逻辑名 lastSchedule, 只保留最近一次运行
// ==========================================

use crate::db::init_schema;
use crate::domain::schedule::ScheduleGrid;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// 最近一次课表在 kv_store 中的固定键
pub const SCHEDULE_STORAGE_KEY: &str = "lastSchedule";

/// 已保存的课表快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSchedule {
    pub run_id: String,
    pub generated_at: NaiveDateTime,
    pub grid: ScheduleGrid,
}

// ==========================================
// ScheduleStore - 课表快照持久化能力
// ==========================================
pub trait ScheduleStore: Send + Sync {
    fn load_latest(&self) -> RepositoryResult<Option<StoredSchedule>>;

    fn save_latest(&self, schedule: &StoredSchedule) -> RepositoryResult<()>;

    fn clear(&self) -> RepositoryResult<()>;
}

// ==========================================
// SqliteScheduleRepository
// ==========================================
pub struct SqliteScheduleRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteScheduleRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            init_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl ScheduleStore for SqliteScheduleRepository {
    fn load_latest(&self) -> RepositoryResult<Option<StoredSchedule>> {
        let conn = self.get_conn()?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![SCHEDULE_STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        value
            .map(|json| {
                serde_json::from_str(&json).map_err(|e| RepositoryError::CorruptPayload {
                    key: SCHEDULE_STORAGE_KEY.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    fn save_latest(&self, schedule: &StoredSchedule) -> RepositoryResult<()> {
        let json = serde_json::to_string(schedule)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![SCHEDULE_STORAGE_KEY, json],
        )?;
        Ok(())
    }

    fn clear(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "DELETE FROM kv_store WHERE key = ?1",
            params![SCHEDULE_STORAGE_KEY],
        )?;
        Ok(())
    }
}
