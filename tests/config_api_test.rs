// ==========================================
// ConfigApi 集成测试
// ==========================================
// 测试范围:
// 1. 配置查询: 默认值 + 覆写
// 2. 配置更新: 合法值落库, 非法值拒绝
// 3. 配置快照: 导出 / 恢复
// ==========================================

mod test_helpers;

use std::sync::Arc;
use test_helpers::*;
use timetable_allocator::api::{ApiError, ConfigApi};
use timetable_allocator::config::{config_keys, CategoryPolicyMode, ConfigManager, EngineConfig};

#[test]
fn test_get_engine_config_初始状态() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let config = env.state.config_api.get_engine_config().unwrap();
    assert_eq!(config, EngineConfig::default());
    assert!(env.state.config_api.list_overrides().unwrap().is_empty());
}

#[test]
fn test_set_value_合法值() {
    let env = ApiTestEnv::new().unwrap();
    let api = &env.state.config_api;

    api.set_value(config_keys::OVERLOAD_TOLERANCE, "1.5").unwrap();
    api.set_value(config_keys::POLICY_MODE, "advisory").unwrap();

    let config = api.get_engine_config().unwrap();
    assert_eq!(config.overload_tolerance, 1.5);
    assert_eq!(config.policy_mode, CategoryPolicyMode::Advisory);

    let keys: Vec<String> = api
        .list_overrides()
        .unwrap()
        .into_iter()
        .map(|item| item.key)
        .collect();
    assert_eq!(keys, vec!["overload_tolerance", "policy_mode"]);
}

#[test]
fn test_set_value_非法值() {
    let env = ApiTestEnv::new().unwrap();
    let api = &env.state.config_api;

    assert!(matches!(
        api.set_value(config_keys::SIMULTANEOUS_LOAD_RATIO, "1.5"),
        Err(ApiError::ConfigError(_))
    ));
    assert!(matches!(
        api.set_value(config_keys::DAILY_PERIOD_CAP, "four"),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.set_value(config_keys::POLICY_MODE, "strict"),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(api.list_overrides().unwrap().is_empty());
}

#[test]
fn test_config_snapshot_restore() {
    let (_dir, db_path) = create_test_db().unwrap();
    let manager = Arc::new(ConfigManager::new(&db_path).unwrap());
    let api = ConfigApi::new(manager.clone());

    api.set_value(config_keys::PE_EARLIEST_PERIOD, "4").unwrap();
    let snapshot = manager.get_config_snapshot().unwrap();

    let (_other_dir, other_path) = create_test_db().unwrap();
    let restored = Arc::new(ConfigManager::new(&other_path).unwrap());
    assert_eq!(restored.restore_config_from_snapshot(&snapshot).unwrap(), 1);

    let config = ConfigApi::new(restored).get_engine_config().unwrap();
    assert_eq!(config.pe_earliest_period, 4);
}
