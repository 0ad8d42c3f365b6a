// ==========================================
// 周课表排课系统 - 配置管理 API
// ==========================================
// 职责: 引擎配置查询、单项覆写 (写入前校验)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{config_keys, CategoryPolicyMode, ConfigManager, EngineConfig, EngineConfigReader};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// 配置项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub key: String,
    pub value: String,
}

pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// 当前生效的引擎配置 (默认值 + 覆写)
    pub fn get_engine_config(&self) -> ApiResult<EngineConfig> {
        self.config_manager
            .load_engine_config()
            .map_err(|e| ApiError::ConfigError(e.to_string()))
    }

    /// 已写入的覆写项 (按键排序)
    pub fn list_overrides(&self) -> ApiResult<Vec<ConfigItem>> {
        let snapshot = self
            .config_manager
            .get_config_snapshot()
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        let map: BTreeMap<String, String> = serde_json::from_str(&snapshot)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;

        Ok(map
            .into_iter()
            .map(|(key, value)| ConfigItem { key, value })
            .collect())
    }

    /// 覆写单个配置项
    ///
    /// 先在当前配置上试算并校验, 校验通过才落库
    pub fn set_value(&self, key: &str, value: &str) -> ApiResult<EngineConfig> {
        let mut config = self.get_engine_config()?;
        apply_override(&mut config, key, value).map_err(ApiError::InvalidInput)?;
        config.validate().map_err(ApiError::ConfigError)?;

        self.config_manager
            .set_global_config_value(key, value.trim())
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        info!(key, value, "配置已更新");
        Ok(config)
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| format!("配置 {} 的值 {} 无效: {}", key, value, e))
}

/// 将单项覆写应用到配置
pub fn apply_override(config: &mut EngineConfig, key: &str, value: &str) -> Result<(), String> {
    match key {
        config_keys::OVERLOAD_TOLERANCE => config.overload_tolerance = parse_value(key, value)?,
        config_keys::DAILY_PERIOD_CAP => config.daily_period_cap = parse_value(key, value)?,
        config_keys::SIMULTANEOUS_LOAD_RATIO => {
            config.simultaneous_load_ratio = parse_value(key, value)?
        }
        config_keys::GENERAL_PAPER_QUADRALS => {
            config.general_paper_quadrals_per_week = parse_value(key, value)?
        }
        config_keys::SUBSIDIARY_QUADRALS => {
            config.subsidiary_quadrals_per_week = parse_value(key, value)?
        }
        config_keys::SUBSIDIARY_PERIODS => {
            config.subsidiary_periods_per_week = parse_value(key, value)?
        }
        config_keys::PE_EARLIEST_PERIOD => config.pe_earliest_period = parse_value(key, value)?,
        config_keys::HUMANITIES_EARLIEST_PERIOD => {
            config.humanities_earliest_period = parse_value(key, value)?
        }
        config_keys::BLOCK_PERIOD_LIMIT => config.block_period_limit = parse_value(key, value)?,
        config_keys::POLICY_MODE => config.policy_mode = parse_value::<CategoryPolicyMode>(key, value)?,
        _ => {
            return Err(format!(
                "未知配置键: {} (可选: {})",
                key,
                config_keys::ALL.join(", ")
            ))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn api() -> ConfigApi {
        let conn = Connection::open_in_memory().unwrap();
        let manager = ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap();
        ConfigApi::new(Arc::new(manager))
    }

    #[test]
    fn test_set_value_persists_override() {
        let api = api();
        let config = api.set_value(config_keys::POLICY_MODE, "ADVISORY").unwrap();
        assert_eq!(config.policy_mode, CategoryPolicyMode::Advisory);
        assert_eq!(
            api.list_overrides().unwrap(),
            vec![ConfigItem {
                key: "policy_mode".to_string(),
                value: "ADVISORY".to_string()
            }]
        );
    }

    #[test]
    fn test_invalid_value_not_persisted() {
        let api = api();
        assert!(matches!(
            api.set_value(config_keys::DAILY_PERIOD_CAP, "0"),
            Err(ApiError::ConfigError(_))
        ));
        assert!(matches!(
            api.set_value("max_teachers", "3"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(api.list_overrides().unwrap().is_empty());
    }
}
