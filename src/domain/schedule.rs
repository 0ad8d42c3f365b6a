// ==========================================
// 周课表排课系统 - 课表网格
// ==========================================
// 职责: (班级, 星期, 节次) -> 单元格
// 约束: 每次排课构造全新网格, 运行期间不删除单元格
// ==========================================

use crate::domain::grid::{Group, GridModel};
use crate::domain::subject::Subject;
use crate::domain::types::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 未分配单元格的教师显示值
pub const UNASSIGNED_TEACHER: &str = "Unassigned";

/// 未分配单元格的学科显示值
pub const UNASSIGNED_SUBJECT: &str = "-";

// ==========================================
// CellAssignment - 单元格分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellAssignment {
    pub staff_id: i64,
    pub teacher: String,
    pub subject: Subject,
    /// 是否由镜像规则写入 (非本班主选)
    #[serde(default)]
    pub mirrored: bool,
}

// ==========================================
// ScheduleCell - 课表单元格
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCell {
    pub assignment: Option<CellAssignment>,
    pub time: String,
}

impl ScheduleCell {
    pub fn unassigned(time: impl Into<String>) -> Self {
        Self {
            assignment: None,
            time: time.into(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    pub fn subject(&self) -> Option<Subject> {
        self.assignment.as_ref().map(|a| a.subject)
    }

    /// 教师显示值 ("Unassigned" 或教师姓名)
    pub fn teacher_label(&self) -> &str {
        self.assignment
            .as_ref()
            .map(|a| a.teacher.as_str())
            .unwrap_or(UNASSIGNED_TEACHER)
    }

    /// 学科显示值 ("-" 或学科名)
    pub fn subject_label(&self) -> &str {
        self.assignment
            .as_ref()
            .map(|a| a.subject.name())
            .unwrap_or(UNASSIGNED_SUBJECT)
    }
}

// ==========================================
// ScheduleGrid - 周课表
// ==========================================
// 结构: 班级 -> 星期 -> 节次 -> 单元格
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    cells: BTreeMap<Group, BTreeMap<Weekday, BTreeMap<u8, ScheduleCell>>>,
}

impl ScheduleGrid {
    /// 按网格模型构造全空课表 (每个坐标一个未分配单元格)
    pub fn empty(grid: &GridModel) -> Self {
        let mut cells = BTreeMap::new();
        for group in grid.groups() {
            let mut by_day = BTreeMap::new();
            for day in grid.days() {
                let by_period: BTreeMap<u8, ScheduleCell> = grid
                    .periods()
                    .iter()
                    .map(|p| (p.id, ScheduleCell::unassigned(p.time.clone())))
                    .collect();
                by_day.insert(*day, by_period);
            }
            cells.insert(*group, by_day);
        }
        Self { cells }
    }

    pub fn cell(&self, group: &Group, day: Weekday, period_id: u8) -> Option<&ScheduleCell> {
        self.cells.get(group)?.get(&day)?.get(&period_id)
    }

    pub fn cell_mut(
        &mut self,
        group: &Group,
        day: Weekday,
        period_id: u8,
    ) -> Option<&mut ScheduleCell> {
        self.cells.get_mut(group)?.get_mut(&day)?.get_mut(&period_id)
    }

    /// 写入单元格分配 (坐标不存在时返回 false)
    pub fn assign(
        &mut self,
        group: &Group,
        day: Weekday,
        period_id: u8,
        assignment: CellAssignment,
    ) -> bool {
        match self.cell_mut(group, day, period_id) {
            Some(cell) => {
                cell.assignment = Some(assignment);
                true
            }
            None => false,
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.cells.keys()
    }

    /// 遍历所有单元格: (班级, 星期, 节次, 单元格)
    pub fn iter(&self) -> impl Iterator<Item = (&Group, Weekday, u8, &ScheduleCell)> {
        self.cells.iter().flat_map(|(group, by_day)| {
            by_day.iter().flat_map(move |(day, by_period)| {
                by_period
                    .iter()
                    .map(move |(period_id, cell)| (group, *day, *period_id, cell))
            })
        })
    }

    pub fn cell_count(&self) -> usize {
        self.iter().count()
    }

    pub fn assigned_count(&self) -> usize {
        self.iter().filter(|(_, _, _, cell)| cell.is_assigned()).count()
    }

    /// 构造单个班级的报表数据 (节次行 × 星期列, 顺序按网格模型)
    pub fn group_timetable(&self, grid: &GridModel, group: &Group) -> Option<GroupTimetable> {
        let by_day = self.cells.get(group)?;

        let rows = grid
            .periods()
            .iter()
            .map(|period| {
                let slots = grid
                    .days()
                    .iter()
                    .map(|day| {
                        let cell = by_day.get(day).and_then(|p| p.get(&period.id));
                        TimetableSlot {
                            day: *day,
                            teacher: cell
                                .map(|c| c.teacher_label().to_string())
                                .unwrap_or_else(|| UNASSIGNED_TEACHER.to_string()),
                            subject: cell
                                .map(|c| c.subject_label().to_string())
                                .unwrap_or_else(|| UNASSIGNED_SUBJECT.to_string()),
                        }
                    })
                    .collect();

                TimetableRow {
                    period_id: period.id,
                    time: period.time.clone(),
                    slots,
                }
            })
            .collect();

        Some(GroupTimetable {
            group: *group,
            days: grid.days().to_vec(),
            rows,
        })
    }
}

// ==========================================
// 报表数据 (Report Renderer 边界)
// ==========================================

/// 单个班级的周课表 (报表输入)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTimetable {
    pub group: Group,
    pub days: Vec<Weekday>,
    pub rows: Vec<TimetableRow>,
}

/// 一个节次行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRow {
    pub period_id: u8,
    pub time: String,
    pub slots: Vec<TimetableSlot>,
}

/// 一个星期列中的单元格显示值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableSlot {
    pub day: Weekday,
    pub teacher: String,
    pub subject: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(name: &str, subject: Subject) -> CellAssignment {
        CellAssignment {
            staff_id: 1,
            teacher: name.to_string(),
            subject,
            mirrored: false,
        }
    }

    #[test]
    fn test_empty_grid_has_every_coordinate_unassigned() {
        let grid = GridModel::canonical();
        let schedule = ScheduleGrid::empty(&grid);

        assert_eq!(schedule.cell_count(), 16 * 6 * 6);
        assert_eq!(schedule.assigned_count(), 0);

        let cell = schedule
            .cell(&"S5A".parse().unwrap(), Weekday::Monday, 1)
            .unwrap();
        assert_eq!(cell.teacher_label(), UNASSIGNED_TEACHER);
        assert_eq!(cell.subject_label(), UNASSIGNED_SUBJECT);
        assert_eq!(cell.time, "7:20 AM - 8:40 AM");
    }

    #[test]
    fn test_assign_outside_grid_is_rejected() {
        let grid = GridModel::canonical();
        let mut schedule = ScheduleGrid::empty(&grid);

        let ok = schedule.assign(
            &"S1A".parse().unwrap(),
            Weekday::Tuesday,
            3,
            assignment("Achieng", Subject::English),
        );
        assert!(ok);
        assert!(!schedule.assign(
            &"S1A".parse().unwrap(),
            Weekday::Sunday,
            3,
            assignment("Achieng", Subject::English),
        ));
        assert_eq!(schedule.assigned_count(), 1);
    }

    #[test]
    fn test_group_timetable_rows_follow_grid_order() {
        let grid = GridModel::canonical();
        let mut schedule = ScheduleGrid::empty(&grid);
        let group = "S2B".parse().unwrap();
        schedule.assign(&group, Weekday::Wednesday, 2, assignment("Mugisha", Subject::Luganda));

        let table = schedule.group_timetable(&grid, &group).unwrap();
        assert_eq!(table.rows.len(), 6);
        assert_eq!(table.days.len(), 6);

        let row = &table.rows[1];
        assert_eq!(row.period_id, 2);
        assert_eq!(row.slots[2].day, Weekday::Wednesday);
        assert_eq!(row.slots[2].teacher, "Mugisha");
        assert_eq!(row.slots[2].subject, "Luganda");
        assert_eq!(row.slots[0].teacher, UNASSIGNED_TEACHER);
    }

    #[test]
    fn test_grid_serializes_with_string_keys() {
        let grid = GridModel::new(
            vec![Weekday::Monday],
            vec![crate::domain::grid::Period::new(1, "8:00")],
            vec!["S3A".parse().unwrap()],
        )
        .unwrap();
        let schedule = ScheduleGrid::empty(&grid);
        let json = serde_json::to_value(&schedule).unwrap();
        assert!(json["cells"]["S3A"]["Monday"]["1"]["assignment"].is_null());
    }
}
