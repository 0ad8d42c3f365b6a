// ==========================================
// 周课表排课系统 - 应用层
// ==========================================
// 职责: 组装仓储、配置与 API 实例, 供命令行入口使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
