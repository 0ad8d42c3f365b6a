// ==========================================
// 周课表排课系统 - 领域类型定义
// ==========================================
// 职责: 星期 / 年级 / 班级流向 等基础值类型
// 红线: 所有类型必须可排序 (网格迭代顺序确定)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 基础值类型解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainParseError {
    #[error("未知星期: {0}")]
    UnknownWeekday(String),

    #[error("未知年级: {0}")]
    UnknownLevel(String),

    #[error("未知班级流向: {0}")]
    UnknownStream(String),

    #[error("未知班级: {0}")]
    UnknownGroup(String),
}

// ==========================================
// 星期 (Weekday)
// ==========================================
// 顺序: Monday < Tuesday < ... < Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Weekday {
    type Err = DomainParseError;

    /// 接受全称或三字母缩写，大小写不敏感
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" => Ok(Weekday::Thursday),
            "friday" | "fri" => Ok(Weekday::Friday),
            "saturday" | "sat" => Ok(Weekday::Saturday),
            "sunday" | "sun" => Ok(Weekday::Sunday),
            _ => Err(DomainParseError::UnknownWeekday(s.to_string())),
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

// ==========================================
// 年级 (Level)
// ==========================================
// S1-S4: 初中部, 教师资格只看年级
// S5-S6: 高中部, 教师资格必须匹配流向
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
}

impl Level {
    /// 是否为高中部 (S5/S6)
    pub fn is_upper(&self) -> bool {
        matches!(self, Level::S5 | Level::S6)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::S1 => write!(f, "S1"),
            Level::S2 => write!(f, "S2"),
            Level::S3 => write!(f, "S3"),
            Level::S4 => write!(f, "S4"),
            Level::S5 => write!(f, "S5"),
            Level::S6 => write!(f, "S6"),
        }
    }
}

impl FromStr for Level {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "S1" => Ok(Level::S1),
            "S2" => Ok(Level::S2),
            "S3" => Ok(Level::S3),
            "S4" => Ok(Level::S4),
            "S5" => Ok(Level::S5),
            "S6" => Ok(Level::S6),
            _ => Err(DomainParseError::UnknownLevel(s.to_string())),
        }
    }
}

// ==========================================
// 班级流向 (Stream)
// ==========================================
// S5/S6: A = 文科, B = 理科
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stream {
    A,
    B,
    C,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::A => write!(f, "A"),
            Stream::B => write!(f, "B"),
            Stream::C => write!(f, "C"),
        }
    }
}

impl FromStr for Stream {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Stream::A),
            "B" => Ok(Stream::B),
            "C" => Ok(Stream::C),
            _ => Err(DomainParseError::UnknownStream(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parse_accepts_short_and_full_names() {
        assert_eq!("Mon".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("saturday".parse::<Weekday>().unwrap(), Weekday::Saturday);
        assert!("Funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_weekday_order_follows_week() {
        assert!(Weekday::Monday < Weekday::Tuesday);
        assert!(Weekday::Saturday < Weekday::Sunday);
        assert_eq!(Weekday::from(chrono::Weekday::Fri), Weekday::Friday);
    }

    #[test]
    fn test_level_upper() {
        assert!(Level::S5.is_upper());
        assert!(Level::S6.is_upper());
        assert!(!Level::S4.is_upper());
        assert_eq!("s3".parse::<Level>().unwrap(), Level::S3);
    }
}
