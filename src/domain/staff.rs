// ==========================================
// 周课表排课系统 - 教师名册实体
// ==========================================
// 职责: 教师身份 / 任教能力 / 可用星期
// 存储格式: camelCase JSON (与名册键值存储一致)
// ==========================================

use crate::domain::grid::Group;
use crate::domain::subject::Subject;
use crate::domain::types::{Level, Stream, Weekday};
use serde::{Deserialize, Serialize};

// ==========================================
// SubjectOffering - 任教能力
// ==========================================
// 一门学科 + 可教年级 + 可教流向 (仅 S5/S6 使用)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectOffering {
    pub subject: Subject,
    #[serde(rename = "classes")]
    pub levels: Vec<Level>,
    #[serde(default)]
    pub streams: Vec<Stream>,
}

impl SubjectOffering {
    pub fn new(subject: Subject, levels: Vec<Level>, streams: Vec<Stream>) -> Self {
        Self {
            subject,
            levels,
            streams,
        }
    }

    /// 是否可教该班级
    ///
    /// 规则:
    /// - 年级必须在 levels 中
    /// - S5/S6 还必须匹配流向
    pub fn covers(&self, group: &Group) -> bool {
        if !self.levels.contains(&group.level) {
            return false;
        }
        !group.level.is_upper() || self.streams.contains(&group.stream)
    }

    /// 是否包含高中部年级
    pub fn has_upper_level(&self) -> bool {
        self.levels.iter().any(Level::is_upper)
    }
}

// ==========================================
// StaffMember - 教师
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: i64,
    pub name: String,
    pub subjects: Vec<SubjectOffering>,
    pub available_days: Vec<Weekday>,
    /// 最近一次排课的总节数 (仅用于显示)
    #[serde(default)]
    pub periods_assigned: u32,
}

impl StaffMember {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        subjects: Vec<SubjectOffering>,
        available_days: Vec<Weekday>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            subjects,
            available_days,
            periods_assigned: 0,
        }
    }

    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.available_days.contains(&day)
    }

    /// 可教该班级的任教能力 (保持名册录入顺序)
    pub fn offerings_for<'a>(
        &'a self,
        group: &'a Group,
    ) -> impl Iterator<Item = &'a SubjectOffering> + 'a {
        self.subjects.iter().filter(move |o| o.covers(group))
    }

    /// 是否可教该学科 + 班级 (同时开课伴随教师检索用)
    pub fn teaches(&self, subject: Subject, group: &Group) -> bool {
        self.subjects
            .iter()
            .any(|o| o.subject == subject && o.covers(group))
    }

    /// 检查结构不变量, 返回首个违反原因
    ///
    /// - 姓名非空
    /// - 至少一门任教学科
    /// - 可用星期非空
    /// - S5/S6 任教必须声明流向
    pub fn invariant_violation(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("教师姓名为空".to_string());
        }
        if self.subjects.is_empty() {
            return Some("未声明任教学科".to_string());
        }
        if self.available_days.is_empty() {
            return Some("未声明可用星期".to_string());
        }
        for offering in &self.subjects {
            if offering.has_upper_level() && offering.streams.is_empty() {
                return Some(format!(
                    "学科 {} 任教 S5/S6 但未声明流向",
                    offering.subject
                ));
            }
        }
        None
    }
}

// ==========================================
// StaffDraft - 编辑表单 / 导入行提交的教师草稿
// ==========================================
// 尚未分配 id, 学科可能未选择 (由 API 层校验)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDraft {
    pub name: String,
    pub subjects: Vec<DraftOffering>,
    pub available_days: Vec<Weekday>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOffering {
    pub subject: Option<Subject>,
    #[serde(rename = "classes", default)]
    pub levels: Vec<Level>,
    #[serde(default)]
    pub streams: Vec<Stream>,
}

impl DraftOffering {
    pub fn new(subject: Subject, levels: Vec<Level>, streams: Vec<Stream>) -> Self {
        Self {
            subject: Some(subject),
            levels,
            streams,
        }
    }

    /// 校验通过后转换为正式任教能力
    pub fn to_offering(&self) -> Option<SubjectOffering> {
        self.subject.map(|subject| SubjectOffering {
            subject,
            levels: self.levels.clone(),
            streams: self.streams.clone(),
        })
    }
}

impl StaffDraft {
    pub fn new(
        name: impl Into<String>,
        subjects: Vec<DraftOffering>,
        available_days: Vec<Weekday>,
    ) -> Self {
        Self {
            name: name.into(),
            subjects,
            available_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s5_physics(streams: Vec<Stream>) -> SubjectOffering {
        SubjectOffering::new(Subject::Physics, vec![Level::S5], streams)
    }

    #[test]
    fn test_lower_level_ignores_stream() {
        let offering = SubjectOffering::new(Subject::English, vec![Level::S2], vec![]);
        assert!(offering.covers(&"S2C".parse().unwrap()));
        assert!(!offering.covers(&"S3A".parse().unwrap()));
    }

    #[test]
    fn test_upper_level_requires_stream_match() {
        let offering = s5_physics(vec![Stream::B]);
        assert!(offering.covers(&"S5B".parse().unwrap()));
        assert!(!offering.covers(&"S5A".parse().unwrap()));
    }

    #[test]
    fn test_invariant_upper_level_without_stream() {
        let staff = StaffMember::new(1, "Okello", vec![s5_physics(vec![])], vec![Weekday::Monday]);
        let reason = staff.invariant_violation().unwrap();
        assert!(reason.contains("Physics"));
    }

    #[test]
    fn test_invariant_empty_days() {
        let staff = StaffMember::new(1, "Okello", vec![s5_physics(vec![Stream::A])], vec![]);
        assert!(staff.invariant_violation().is_some());

        let ok = StaffMember::new(
            1,
            "Okello",
            vec![s5_physics(vec![Stream::A])],
            vec![Weekday::Friday],
        );
        assert_eq!(ok.invariant_violation(), None);
    }

    #[test]
    fn test_json_shape_uses_roster_field_names() {
        let staff = StaffMember::new(
            3,
            "Nakato",
            vec![SubjectOffering::new(Subject::Ict, vec![Level::S5], vec![Stream::A])],
            vec![Weekday::Monday],
        );
        let json = serde_json::to_value(&staff).unwrap();
        assert_eq!(json["availableDays"][0], "Monday");
        assert_eq!(json["periodsAssigned"], 0);
        assert_eq!(json["subjects"][0]["subject"], "ICT");
        assert_eq!(json["subjects"][0]["classes"][0], "S5");
    }
}
