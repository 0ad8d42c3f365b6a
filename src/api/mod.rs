// ==========================================
// 周课表排课系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供命令行入口调用
// ==========================================

pub mod config_api;
pub mod error;
pub mod roster_api;
pub mod timetable_api;
pub mod validator;

// 重导出核心类型
pub use config_api::{ConfigApi, ConfigItem};
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use roster_api::{merge_draft, ImportSummary, RosterApi, RosterChange};
pub use timetable_api::TimetableApi;
pub use validator::RosterDraftValidator;
