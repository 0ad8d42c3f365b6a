// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、API 测试环境、名册构造
// ==========================================

#![allow(dead_code)]

use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use tempfile::TempDir;

use timetable_allocator::app::AppState;
use timetable_allocator::domain::{
    GridModel, Group, Level, ScheduleGrid, StaffMember, Stream, Subject, SubjectOffering, Weekday,
};
use timetable_allocator::engine::AllocationOutcome;

/// 创建临时测试数据库路径
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(TempDir, String), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("timetable.db").to_string_lossy().to_string();
    Ok((dir, db_path))
}

// ==========================================
// API测试环境
// ==========================================
pub struct ApiTestEnv {
    pub state: AppState,
    dir: TempDir,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::with_grid(GridModel::canonical())
    }

    pub fn with_grid(grid: GridModel) -> Result<Self, Box<dyn Error>> {
        let (dir, db_path) = create_test_db()?;
        let state = AppState::with_grid(db_path, grid)?;
        Ok(Self { state, dir })
    }

    /// 临时目录下的文件路径 (导入/导出用)
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }
}

// ==========================================
// 名册构造
// ==========================================

pub fn all_days() -> Vec<Weekday> {
    vec![
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ]
}

pub fn lower(subject: Subject, levels: &[Level]) -> SubjectOffering {
    SubjectOffering::new(subject, levels.to_vec(), vec![])
}

pub fn upper(subject: Subject, levels: &[Level], streams: &[Stream]) -> SubjectOffering {
    SubjectOffering::new(subject, levels.to_vec(), streams.to_vec())
}

pub fn teacher(
    id: i64,
    name: &str,
    subjects: Vec<SubjectOffering>,
    days: Vec<Weekday>,
) -> StaffMember {
    StaffMember::new(id, name, subjects, days)
}

/// 覆盖初中部与高中部各类学科的名册
pub fn sample_roster() -> Vec<StaffMember> {
    use Level::*;
    use Stream::*;

    vec![
        teacher(1, "Nakato", vec![lower(Subject::English, &[S1, S2, S3, S4])], all_days()),
        teacher(
            2,
            "Okello",
            vec![
                lower(Subject::Mathematics, &[S1, S2]),
                upper(Subject::Mathematics, &[S5, S6], &[B]),
            ],
            all_days(),
        ),
        teacher(
            3,
            "Achieng",
            vec![
                lower(Subject::Physics, &[S3, S4]),
                lower(Subject::Chemistry, &[S3, S4]),
            ],
            vec![Weekday::Monday, Weekday::Tuesday, Weekday::Thursday],
        ),
        teacher(
            4,
            "Ssempala",
            vec![
                lower(Subject::History, &[S1, S2, S3]),
                upper(Subject::History, &[S5, S6], &[A]),
            ],
            all_days(),
        ),
        teacher(
            5,
            "Namuli",
            vec![lower(Subject::PhysicalEducation, &[S1, S2, S3, S4])],
            all_days(),
        ),
        teacher(
            6,
            "Mukasa",
            vec![upper(Subject::GeneralPaper, &[S5, S6], &[A, B])],
            all_days(),
        ),
        teacher(
            7,
            "Kato",
            vec![upper(Subject::SubMath, &[S5, S6], &[A, B])],
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday],
        ),
        teacher(
            8,
            "Babirye",
            vec![upper(Subject::Entrepreneurship, &[S5, S6], &[A, B])],
            all_days(),
        ),
        teacher(
            9,
            "Ssali",
            vec![
                upper(Subject::Luganda, &[S5, S6], &[A, B]),
                lower(Subject::Luganda, &[S1, S2]),
            ],
            all_days(),
        ),
        teacher(
            10,
            "Hassan",
            vec![upper(Subject::Islam, &[S5, S6], &[A, B])],
            vec![Weekday::Tuesday, Weekday::Thursday],
        ),
        teacher(
            11,
            "Apio",
            vec![
                upper(Subject::Cre, &[S5, S6], &[A, B]),
                lower(Subject::Cre, &[S3, S4]),
            ],
            all_days(),
        ),
        teacher(
            12,
            "Wasswa",
            vec![lower(Subject::Geography, &[S1, S2, S3, S4])],
            vec![Weekday::Wednesday, Weekday::Friday, Weekday::Saturday],
        ),
    ]
}

/// 每位教师每天计入日上限的节数
///
/// 取自运行状态而非单元格: 同时开课组的提交在网格上也标记为镜像
pub fn daily_periods(outcome: &AllocationOutcome) -> HashMap<(i64, Weekday), u32> {
    outcome
        .loads
        .iter()
        .flat_map(|load| {
            load.daily_periods
                .iter()
                .map(move |(day, count)| ((load.staff_id, *day), *count))
        })
        .collect()
}

/// 每位教师每天在每个班级出现的单元格数
pub fn cells_per_group_day(schedule: &ScheduleGrid) -> HashMap<(i64, Group, Weekday), u32> {
    let mut counts = HashMap::new();
    for (group, day, _, cell) in schedule.iter() {
        if let Some(assignment) = &cell.assignment {
            *counts.entry((assignment.staff_id, *group, day)).or_insert(0) += 1;
        }
    }
    counts
}
