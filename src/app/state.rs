// ==========================================
// 周课表排课系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 所有仓储共享同一个 SQLite 连接
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{ConfigApi, RosterApi, TimetableApi};
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::grid::GridModel;
use crate::repository::{SqliteRosterRepository, SqliteScheduleRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 共享连接
    pub conn: Arc<Mutex<Connection>>,

    /// 名册API
    pub roster_api: Arc<RosterApi>,

    /// 课表生成/导出API
    pub timetable_api: Arc<TimetableApi>,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,
}

impl AppState {
    /// 使用标准网格创建AppState
    pub fn new(db_path: String) -> Result<Self, String> {
        Self::with_grid(db_path, GridModel::canonical())
    }

    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - grid: 排课网格 (星期 × 节次 × 班级)
    ///
    /// # 返回
    /// - Err(String): 初始化错误
    pub fn with_grid(db_path: String, grid: GridModel) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("无法初始化数据库结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let roster_repo = Arc::new(
            SqliteRosterRepository::from_connection(conn.clone())
                .map_err(|e| format!("无法创建SqliteRosterRepository: {}", e))?,
        );
        let schedule_repo = Arc::new(
            SqliteScheduleRepository::from_connection(conn.clone())
                .map_err(|e| format!("无法创建SqliteScheduleRepository: {}", e))?,
        );

        // 配置管理器
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================
        let roster_api = Arc::new(RosterApi::new(roster_repo.clone()));
        let timetable_api = Arc::new(TimetableApi::new(
            roster_repo,
            schedule_repo,
            config_manager.clone(),
            grid,
        ));
        let config_api = Arc::new(ConfigApi::new(config_manager));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            conn,
            roster_api,
            timetable_api,
            config_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 TIMETABLE_ALLOCATOR_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("TIMETABLE_ALLOCATOR_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./timetable_allocator.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("timetable-allocator");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("timetable_allocator.db");
        }
    }

    path.to_string_lossy().to_string()
}
