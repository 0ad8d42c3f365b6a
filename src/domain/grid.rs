// ==========================================
// 周课表排课系统 - 网格模型
// ==========================================
// 职责: 定义问题坐标空间
// - 有序星期列表
// - 有序节次列表 (含显示时间)
// - 封闭的班级枚举
// 红线: 所有班级共享同一节次集合
// ==========================================

use crate::domain::types::{DomainParseError, Level, Stream, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 网格构造错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("网格为空: {0}")]
    Empty(&'static str),

    #[error("重复的坐标项: {0}")]
    Duplicate(String),
}

// ==========================================
// 班级 (Group)
// ==========================================
// 序列化格式: "S5A" (可作为 JSON map 键)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Group {
    pub level: Level,
    pub stream: Stream,
}

impl Group {
    pub fn new(level: Level, stream: Stream) -> Self {
        Self { level, stream }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.level, self.stream)
    }
}

impl FromStr for Group {
    type Err = DomainParseError;

    /// 解析 "S5A" 形式的班级标识
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 3 || !trimmed.is_ascii() {
            return Err(DomainParseError::UnknownGroup(s.to_string()));
        }
        let (level, stream) = trimmed.split_at(2);
        let level = level
            .parse::<Level>()
            .map_err(|_| DomainParseError::UnknownGroup(s.to_string()))?;
        let stream = stream
            .parse::<Stream>()
            .map_err(|_| DomainParseError::UnknownGroup(s.to_string()))?;
        Ok(Self { level, stream })
    }
}

impl TryFrom<String> for Group {
    type Error = DomainParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Group> for String {
    fn from(group: Group) -> Self {
        group.to_string()
    }
}

// ==========================================
// 节次 (Period)
// ==========================================
// id 从 1 开始; 奇偶与大小编码了排课策略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub id: u8,
    pub time: String,
}

impl Period {
    pub fn new(id: u8, time: impl Into<String>) -> Self {
        Self {
            id,
            time: time.into(),
        }
    }

    /// 奇数节 (双节/四节块所在节次)
    pub fn is_odd(&self) -> bool {
        self.id % 2 == 1
    }
}

// ==========================================
// GridModel - 网格模型
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    days: Vec<Weekday>,
    periods: Vec<Period>,
    groups: Vec<Group>,
}

impl GridModel {
    /// 构造自定义网格
    ///
    /// # 错误
    /// - 任一维度为空
    /// - 星期/节次/班级重复
    pub fn new(
        days: Vec<Weekday>,
        periods: Vec<Period>,
        groups: Vec<Group>,
    ) -> Result<Self, GridError> {
        if days.is_empty() {
            return Err(GridError::Empty("days"));
        }
        if periods.is_empty() {
            return Err(GridError::Empty("periods"));
        }
        if groups.is_empty() {
            return Err(GridError::Empty("groups"));
        }

        for (i, day) in days.iter().enumerate() {
            if days[..i].contains(day) {
                return Err(GridError::Duplicate(day.to_string()));
            }
        }
        for (i, period) in periods.iter().enumerate() {
            if periods[..i].iter().any(|p| p.id == period.id) {
                return Err(GridError::Duplicate(format!("period {}", period.id)));
            }
        }
        for (i, group) in groups.iter().enumerate() {
            if groups[..i].contains(group) {
                return Err(GridError::Duplicate(group.to_string()));
            }
        }

        Ok(Self {
            days,
            periods,
            groups,
        })
    }

    /// 学校标准网格: 周一至周六, 每天 6 节, S1-S4 三个班, S5-S6 两个班
    pub fn canonical() -> Self {
        let days = vec![
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
        ];

        let periods = vec![
            Period::new(1, "7:20 AM - 8:40 AM"),
            Period::new(2, "8:40 AM - 10:00 AM"),
            Period::new(3, "10:20 AM - 11:40 AM"),
            Period::new(4, "11:40 AM - 1:00 PM"),
            Period::new(5, "2:00 PM - 3:20 PM"),
            Period::new(6, "3:20 PM - 4:40 PM"),
        ];

        let mut groups = Vec::new();
        for level in [Level::S1, Level::S2, Level::S3, Level::S4] {
            for stream in [Stream::A, Stream::B, Stream::C] {
                groups.push(Group::new(level, stream));
            }
        }
        for level in [Level::S5, Level::S6] {
            for stream in [Stream::A, Stream::B] {
                groups.push(Group::new(level, stream));
            }
        }

        Self {
            days,
            periods,
            groups,
        }
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn contains_group(&self, group: &Group) -> bool {
        self.groups.contains(group)
    }

    /// 每周总节数 = |days| × |periods|
    pub fn total_periods_per_week(&self) -> u32 {
        (self.days.len() * self.periods.len()) as u32
    }

    /// 每位教师的目标节数 = floor(总节数 / 教师数)
    ///
    /// 名册为空时返回 None (调用方必须拒绝运行)
    pub fn target_periods_per_teacher(&self, staff_count: usize) -> Option<u32> {
        if staff_count == 0 {
            return None;
        }
        Some(self.total_periods_per_week() / staff_count as u32)
    }

    /// 同年级的另一个流向 (仅当该年级恰好有两个流向时)
    pub fn sibling_of(&self, group: &Group) -> Option<Group> {
        let same_level: Vec<&Group> = self
            .groups
            .iter()
            .filter(|g| g.level == group.level)
            .collect();

        if same_level.len() != 2 || !same_level.contains(&group) {
            return None;
        }

        same_level.into_iter().find(|g| *g != group).copied()
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_grid_shape() {
        let grid = GridModel::canonical();
        assert_eq!(grid.days().len(), 6);
        assert_eq!(grid.periods().len(), 6);
        assert_eq!(grid.groups().len(), 16);
        assert_eq!(grid.total_periods_per_week(), 36);
        assert_eq!(grid.groups()[0].to_string(), "S1A");
        assert_eq!(grid.groups()[15].to_string(), "S6B");
    }

    #[test]
    fn test_target_periods_floor_division() {
        let grid = GridModel::canonical();
        assert_eq!(grid.target_periods_per_teacher(0), None);
        assert_eq!(grid.target_periods_per_teacher(1), Some(36));
        assert_eq!(grid.target_periods_per_teacher(5), Some(7));
        assert_eq!(grid.target_periods_per_teacher(40), Some(0));
    }

    #[test]
    fn test_sibling_only_for_two_stream_levels() {
        let grid = GridModel::canonical();
        let s5a: Group = "S5A".parse().unwrap();
        let s5b: Group = "S5B".parse().unwrap();
        let s3a: Group = "S3A".parse().unwrap();

        assert_eq!(grid.sibling_of(&s5a), Some(s5b));
        assert_eq!(grid.sibling_of(&s5b), Some(s5a));
        assert_eq!(grid.sibling_of(&s3a), None);
    }

    #[test]
    fn test_group_parse() {
        let group: Group = "s6b".parse().unwrap();
        assert_eq!(group, Group::new(Level::S6, Stream::B));
        assert!("S7A".parse::<Group>().is_err());
        assert!("S5".parse::<Group>().is_err());
    }

    #[test]
    fn test_custom_grid_rejects_empty_and_duplicates() {
        let periods = vec![Period::new(1, "8:00")];
        let groups = vec![Group::new(Level::S3, Stream::A)];

        assert_eq!(
            GridModel::new(vec![], periods.clone(), groups.clone()),
            Err(GridError::Empty("days"))
        );
        assert!(matches!(
            GridModel::new(vec![Weekday::Monday, Weekday::Monday], periods, groups),
            Err(GridError::Duplicate(_))
        ));
    }
}
