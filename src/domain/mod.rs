// ==========================================
// 周课表排课系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、学科分类、网格坐标
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod grid;
pub mod schedule;
pub mod staff;
pub mod subject;
pub mod types;

// 重导出核心类型
pub use grid::{GridError, GridModel, Group, Period};
pub use schedule::{
    CellAssignment, GroupTimetable, ScheduleCell, ScheduleGrid, TimetableRow, TimetableSlot,
    UNASSIGNED_SUBJECT, UNASSIGNED_TEACHER,
};
pub use staff::{DraftOffering, StaffDraft, StaffMember, SubjectOffering};
pub use subject::{CollisionClass, Subject, SubjectCategory, SubjectParseError};
pub use types::{DomainParseError, Level, Stream, Weekday};
