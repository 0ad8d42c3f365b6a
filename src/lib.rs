// ==========================================
// 周课表排课系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 一次性贪心排课 (名册 + 网格 -> 周课表)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 排课规则
pub mod engine;

// 导入层 - 名册文件
pub mod importer;

// 导出层 - 单班课表
pub mod report;

// 配置层 - 引擎参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CollisionClass, GridModel, Group, Level, Period, ScheduleGrid, StaffMember, Stream, Subject,
    SubjectCategory, SubjectOffering, Weekday,
};

// 引擎
pub use engine::{AllocationError, AllocationOutcome, TimetableAllocator};

// 配置
pub use config::{CategoryPolicyMode, EngineConfig};

// API
pub use api::{ConfigApi, RosterApi, TimetableApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "周课表排课系统";
