// ==========================================
// 周课表排课系统 - 配置层
// ==========================================
// 职责: 引擎参数定义与覆写管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod engine_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use engine_config::{CategoryPolicyMode, EngineConfig};
pub use engine_config_trait::EngineConfigReader;
