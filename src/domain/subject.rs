// ==========================================
// 周课表排课系统 - 学科分类
// ==========================================
// 职责: 学科名称 -> 时间策略类别 / 冲突类别 / 配对关系
// 红线: 分类是纯函数且完备, 未知学科名是配置错误
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 学科名称解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知学科: {0}")]
pub struct SubjectParseError(pub String);

// ==========================================
// 学科 (Subject)
// ==========================================
// 序列化格式: 显示名 (与名册存储一致, 如 "P.E" / "General Paper")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Subject {
    Mathematics,
    Physics,
    Chemistry,
    Biology,
    English,
    History,
    Geography,
    PhysicalEducation,
    Ict,
    Entrepreneurship,
    Arabic,
    Kiswahili,
    Luganda,
    Literature,
    Art,
    Theology,
    GeneralPaper,
    Economics,
    SubMath,
    Islam,
    Divinity,
    Agriculture,
    Cre,
}

impl Subject {
    /// 全部学科 (名册编辑器下拉顺序)
    pub const ALL: [Subject; 23] = [
        Subject::Mathematics,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::English,
        Subject::History,
        Subject::Geography,
        Subject::PhysicalEducation,
        Subject::Ict,
        Subject::Entrepreneurship,
        Subject::Arabic,
        Subject::Kiswahili,
        Subject::Luganda,
        Subject::Literature,
        Subject::Art,
        Subject::Theology,
        Subject::GeneralPaper,
        Subject::Economics,
        Subject::SubMath,
        Subject::Islam,
        Subject::Divinity,
        Subject::Agriculture,
        Subject::Cre,
    ];

    /// 显示名
    pub fn name(&self) -> &'static str {
        match self {
            Subject::Mathematics => "Mathematics",
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Biology => "Biology",
            Subject::English => "English",
            Subject::History => "History",
            Subject::Geography => "Geography",
            Subject::PhysicalEducation => "P.E",
            Subject::Ict => "ICT",
            Subject::Entrepreneurship => "ENT",
            Subject::Arabic => "Arabic",
            Subject::Kiswahili => "Kiswahili",
            Subject::Luganda => "Luganda",
            Subject::Literature => "Literature",
            Subject::Art => "ART",
            Subject::Theology => "Theology",
            Subject::GeneralPaper => "General Paper",
            Subject::Economics => "Economics",
            Subject::SubMath => "SubMath",
            Subject::Islam => "Islam",
            Subject::Divinity => "Divinity",
            Subject::Agriculture => "Agriculture",
            Subject::Cre => "CRE",
        }
    }

    /// 主类别 (时间策略)
    ///
    /// 同时属于必修集合与专项类别的学科取专项类别:
    /// 理科 -> Science, 史地 -> Humanities, English -> Compulsory
    pub fn category(&self) -> SubjectCategory {
        match self {
            Subject::Mathematics | Subject::Physics | Subject::Chemistry | Subject::Biology => {
                SubjectCategory::Science
            }
            Subject::History | Subject::Geography => SubjectCategory::Humanities,
            Subject::English => SubjectCategory::Compulsory,
            Subject::PhysicalEducation => SubjectCategory::PhysicalEducation,
            Subject::GeneralPaper => SubjectCategory::GeneralizedStudies,
            Subject::SubMath | Subject::Ict => SubjectCategory::SubsidiaryPair,
            Subject::Islam | Subject::Entrepreneurship => SubjectCategory::SimultaneousGroup,
            Subject::Arabic
            | Subject::Kiswahili
            | Subject::Luganda
            | Subject::Literature
            | Subject::Art
            | Subject::Theology
            | Subject::Economics
            | Subject::Divinity
            | Subject::Agriculture
            | Subject::Cre => SubjectCategory::Optional,
        }
    }

    /// 冲突类别 (单元格占用规则)
    pub fn collision_class(&self) -> CollisionClass {
        match self {
            Subject::Mathematics
            | Subject::Physics
            | Subject::Chemistry
            | Subject::Biology
            | Subject::English
            | Subject::History
            | Subject::Geography => CollisionClass::Compulsory,
            Subject::GeneralPaper | Subject::SubMath => CollisionClass::Exempt,
            _ => CollisionClass::Optional,
        }
    }

    /// 辅修配对中的另一门 (SubMath <-> ICT)
    pub fn subsidiary_partner(&self) -> Option<Subject> {
        match self {
            Subject::SubMath => Some(Subject::Ict),
            Subject::Ict => Some(Subject::SubMath),
            _ => None,
        }
    }

    /// 同时开课组的伴随学科 (仅主学科有值)
    pub fn simultaneous_partners(&self) -> &'static [Subject] {
        match self {
            Subject::Islam => &[Subject::Cre],
            Subject::Entrepreneurship => &[
                Subject::Luganda,
                Subject::Arabic,
                Subject::Ict,
                Subject::Art,
                Subject::Kiswahili,
            ],
            _ => &[],
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Subject {
    type Err = SubjectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Subject::ALL
            .iter()
            .copied()
            .find(|subject| subject.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SubjectParseError(s.to_string()))
    }
}

impl TryFrom<String> for Subject {
    type Error = SubjectParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.name().to_string()
    }
}

// ==========================================
// 学科类别 (Subject Category)
// ==========================================
// 顺序即策略优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectCategory {
    Compulsory,
    Optional,
    PhysicalEducation,
    Science,
    Humanities,
    GeneralizedStudies,
    SubsidiaryPair,
    SimultaneousGroup,
}

impl fmt::Display for SubjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectCategory::Compulsory => write!(f, "COMPULSORY"),
            SubjectCategory::Optional => write!(f, "OPTIONAL"),
            SubjectCategory::PhysicalEducation => write!(f, "PHYSICAL_EDUCATION"),
            SubjectCategory::Science => write!(f, "SCIENCE"),
            SubjectCategory::Humanities => write!(f, "HUMANITIES"),
            SubjectCategory::GeneralizedStudies => write!(f, "GENERALIZED_STUDIES"),
            SubjectCategory::SubsidiaryPair => write!(f, "SUBSIDIARY_PAIR"),
            SubjectCategory::SimultaneousGroup => write!(f, "SIMULTANEOUS_GROUP"),
        }
    }
}

// ==========================================
// 冲突类别 (Collision Class)
// ==========================================
// Compulsory: 只能写入空单元格
// Optional:   可写入空单元格或覆盖另一门选修
// Exempt:     不检查占用 (后写覆盖)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollisionClass {
    Compulsory,
    Optional,
    Exempt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subject_round_trips_through_its_name() {
        for subject in Subject::ALL {
            assert_eq!(subject.name().parse::<Subject>().unwrap(), subject);
        }
    }

    #[test]
    fn test_unknown_subject_is_rejected() {
        let err = "Astrology".parse::<Subject>().unwrap_err();
        assert_eq!(err, SubjectParseError("Astrology".to_string()));
    }

    #[test]
    fn test_category_assignment() {
        assert_eq!(Subject::Mathematics.category(), SubjectCategory::Science);
        assert_eq!(Subject::Geography.category(), SubjectCategory::Humanities);
        assert_eq!(Subject::English.category(), SubjectCategory::Compulsory);
        assert_eq!(Subject::PhysicalEducation.category(), SubjectCategory::PhysicalEducation);
        assert_eq!(Subject::GeneralPaper.category(), SubjectCategory::GeneralizedStudies);
        assert_eq!(Subject::Ict.category(), SubjectCategory::SubsidiaryPair);
        assert_eq!(Subject::Entrepreneurship.category(), SubjectCategory::SimultaneousGroup);
        assert_eq!(Subject::Cre.category(), SubjectCategory::Optional);
    }

    #[test]
    fn test_collision_class() {
        assert_eq!(Subject::Biology.collision_class(), CollisionClass::Compulsory);
        assert_eq!(Subject::SubMath.collision_class(), CollisionClass::Exempt);
        assert_eq!(Subject::GeneralPaper.collision_class(), CollisionClass::Exempt);
        assert_eq!(Subject::Ict.collision_class(), CollisionClass::Optional);
    }

    #[test]
    fn test_pair_relations() {
        assert_eq!(Subject::SubMath.subsidiary_partner(), Some(Subject::Ict));
        assert_eq!(Subject::Ict.subsidiary_partner(), Some(Subject::SubMath));
        assert_eq!(Subject::Islam.simultaneous_partners(), &[Subject::Cre]);
        assert_eq!(Subject::Entrepreneurship.simultaneous_partners().len(), 5);
        assert!(Subject::Cre.simultaneous_partners().is_empty());
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Subject::GeneralPaper).unwrap();
        assert_eq!(json, "\"General Paper\"");
        let parsed: Subject = serde_json::from_str("\"P.E\"").unwrap();
        assert_eq!(parsed, Subject::PhysicalEducation);
        assert!(serde_json::from_str::<Subject>("\"Alchemy\"").is_err());
    }
}
