// ==========================================
// 周课表排课系统 - 名册数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 存储: kv_store 表, 固定逻辑名 schoolTeachers, 值为整份名册 JSON
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::staff::StaffMember;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// 名册在 kv_store 中的固定键
pub const ROSTER_STORAGE_KEY: &str = "schoolTeachers";

// ==========================================
// Roster - 名册持久化能力
// ==========================================
/// 整份读写: 不提供逐条增删, 编辑规则在 API 层完成后整体保存
pub trait Roster: Send + Sync {
    /// 读取名册 (键不存在时返回空名册)
    fn load(&self) -> RepositoryResult<Vec<StaffMember>>;

    /// 覆盖保存整份名册
    fn save(&self, roster: &[StaffMember]) -> RepositoryResult<()>;

    /// 删除整份名册
    fn clear(&self) -> RepositoryResult<()>;
}

// ==========================================
// SqliteRosterRepository - SQLite 名册仓储
// ==========================================
pub struct SqliteRosterRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRosterRepository {
    /// 打开数据库文件并初始化 schema
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例 (与 ConfigManager 共享连接)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            init_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl Roster for SqliteRosterRepository {
    fn load(&self) -> RepositoryResult<Vec<StaffMember>> {
        let conn = self.get_conn()?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![ROSTER_STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(json) = value else {
            return Ok(Vec::new());
        };

        let roster: Vec<StaffMember> =
            serde_json::from_str(&json).map_err(|e| RepositoryError::CorruptPayload {
                key: ROSTER_STORAGE_KEY.to_string(),
                message: e.to_string(),
            })?;

        debug!(count = roster.len(), "名册已读取");
        Ok(roster)
    }

    fn save(&self, roster: &[StaffMember]) -> RepositoryResult<()> {
        let json = serde_json::to_string(roster)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![ROSTER_STORAGE_KEY, json],
        )?;

        debug!(count = roster.len(), "名册已保存");
        Ok(())
    }

    fn clear(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "DELETE FROM kv_store WHERE key = ?1",
            params![ROSTER_STORAGE_KEY],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::staff::SubjectOffering;
    use crate::domain::subject::Subject;
    use crate::domain::types::{Level, Stream, Weekday};

    fn repo() -> SqliteRosterRepository {
        let conn = Connection::open_in_memory().unwrap();
        SqliteRosterRepository::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_missing_key_loads_empty_roster() {
        assert!(repo().load().unwrap().is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let repo = repo();
        let first = vec![StaffMember::new(
            1,
            "Nakato",
            vec![SubjectOffering::new(Subject::Kiswahili, vec![Level::S5], vec![Stream::A])],
            vec![Weekday::Friday],
        )];
        repo.save(&first).unwrap();
        repo.save(&[]).unwrap();
        assert!(repo.load().unwrap().is_empty());

        repo.save(&first).unwrap();
        assert_eq!(repo.load().unwrap(), first);
    }

    #[test]
    fn test_corrupt_value_reported() {
        let repo = repo();
        {
            let conn = repo.get_conn().unwrap();
            conn.execute(
                "INSERT INTO kv_store (key, value) VALUES (?1, 'not json')",
                params![ROSTER_STORAGE_KEY],
            )
            .unwrap();
        }
        assert!(matches!(
            repo.load(),
            Err(RepositoryError::CorruptPayload { .. })
        ));
    }
}
