// ==========================================
// 周课表排课系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::engine_config::{CategoryPolicyMode, EngineConfig};
use crate::config::engine_config_trait::EngineConfigReader;
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        crate::db::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA 与建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
            crate::db::init_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 读取并解析配置值；缺失或格式错误时返回默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: FromStr + Copy + std::fmt::Display,
    {
        let value = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %value,
                    default = %default,
                    "配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 写入 global 配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 在排课结果旁记录当次使用的配置
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 此方法会覆盖现有的global配置
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, Box<dyn Error>> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            let affected = tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
            count += affected;
        }

        tx.commit()?;
        Ok(count)
    }
}

// ==========================================
// EngineConfigReader Trait 实现
// ==========================================
impl EngineConfigReader for ConfigManager {
    fn get_overload_tolerance(&self) -> Result<f64, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::OVERLOAD_TOLERANCE,
            EngineConfig::default().overload_tolerance,
        )
    }

    fn get_daily_period_cap(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::DAILY_PERIOD_CAP,
            EngineConfig::default().daily_period_cap,
        )
    }

    fn get_simultaneous_load_ratio(&self) -> Result<f64, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::SIMULTANEOUS_LOAD_RATIO,
            EngineConfig::default().simultaneous_load_ratio,
        )
    }

    fn get_general_paper_quadrals_per_week(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::GENERAL_PAPER_QUADRALS,
            EngineConfig::default().general_paper_quadrals_per_week,
        )
    }

    fn get_subsidiary_quadrals_per_week(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::SUBSIDIARY_QUADRALS,
            EngineConfig::default().subsidiary_quadrals_per_week,
        )
    }

    fn get_subsidiary_periods_per_week(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::SUBSIDIARY_PERIODS,
            EngineConfig::default().subsidiary_periods_per_week,
        )
    }

    fn get_pe_earliest_period(&self) -> Result<u8, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::PE_EARLIEST_PERIOD,
            EngineConfig::default().pe_earliest_period,
        )
    }

    fn get_humanities_earliest_period(&self) -> Result<u8, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::HUMANITIES_EARLIEST_PERIOD,
            EngineConfig::default().humanities_earliest_period,
        )
    }

    fn get_block_period_limit(&self) -> Result<u8, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::BLOCK_PERIOD_LIMIT,
            EngineConfig::default().block_period_limit,
        )
    }

    fn get_policy_mode(&self) -> Result<CategoryPolicyMode, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::POLICY_MODE, CategoryPolicyMode::Gating)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 负载约束
    pub const OVERLOAD_TOLERANCE: &str = "overload_tolerance";
    pub const DAILY_PERIOD_CAP: &str = "daily_period_cap";
    pub const SIMULTANEOUS_LOAD_RATIO: &str = "simultaneous_load_ratio";

    // 块节配额
    pub const GENERAL_PAPER_QUADRALS: &str = "general_paper_quadrals_per_week";
    pub const SUBSIDIARY_QUADRALS: &str = "subsidiary_quadrals_per_week";
    pub const SUBSIDIARY_PERIODS: &str = "subsidiary_periods_per_week";

    // 节次窗口
    pub const PE_EARLIEST_PERIOD: &str = "pe_earliest_period";
    pub const HUMANITIES_EARLIEST_PERIOD: &str = "humanities_earliest_period";
    pub const BLOCK_PERIOD_LIMIT: &str = "block_period_limit";

    // 策略
    pub const POLICY_MODE: &str = "policy_mode";

    /// 全部可覆写的键
    pub const ALL: [&str; 10] = [
        OVERLOAD_TOLERANCE,
        DAILY_PERIOD_CAP,
        SIMULTANEOUS_LOAD_RATIO,
        GENERAL_PAPER_QUADRALS,
        SUBSIDIARY_QUADRALS,
        SUBSIDIARY_PERIODS,
        PE_EARLIEST_PERIOD,
        HUMANITIES_EARLIEST_PERIOD,
        BLOCK_PERIOD_LIMIT,
        POLICY_MODE,
    ];
}
