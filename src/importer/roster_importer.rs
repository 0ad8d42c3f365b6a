// ==========================================
// 周课表排课系统 - 名册导入器
// ==========================================
// 输入列: name, subject, levels, streams, days
// 列表字段以 ';' 或 ',' 分隔, 大小写不敏感
// 每一行产生一个只含一门学科的教师草稿, 同名教师由合并规则归并
// ==========================================

use crate::domain::staff::{DraftOffering, StaffDraft};
use crate::domain::subject::Subject;
use crate::domain::types::{Level, Stream, Weekday};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument};

/// 列名
pub mod columns {
    pub const NAME: &str = "name";
    pub const SUBJECT: &str = "subject";
    pub const LEVELS: &str = "levels";
    pub const STREAMS: &str = "streams";
    pub const DAYS: &str = "days";

    /// 必需列 (streams 可省略)
    pub const REQUIRED: [&str; 4] = [NAME, SUBJECT, LEVELS, DAYS];
}

/// 带物理行号的草稿 (合并校验失败时定位到行)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedDraft {
    pub row: usize,
    pub draft: StaffDraft,
}

// ==========================================
// RosterImporter - 名册导入器
// ==========================================
pub struct RosterImporter {
    parser: UniversalFileParser,
}

impl Default for RosterImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterImporter {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
        }
    }

    /// 读取文件并映射为草稿列表 (保持文件行顺序)
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn read_drafts<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<ImportedDraft>> {
        let records = self.parser.parse(file_path.as_ref())?;
        if records.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        for column in columns::REQUIRED {
            if !records[0].fields.contains_key(column) {
                return Err(ImportError::MissingColumn(column.to_string()));
            }
        }

        let drafts = records
            .iter()
            .map(|record| {
                Ok(ImportedDraft {
                    row: record.row,
                    draft: map_record(record)?,
                })
            })
            .collect::<ImportResult<Vec<_>>>()?;

        info!(rows = drafts.len(), "名册文件解析完成");
        Ok(drafts)
    }
}

/// 单行映射
///
/// subject 为空时保留为 None, 交由草稿校验拒绝
pub fn map_record(record: &RawRecord) -> ImportResult<StaffDraft> {
    let subject_text = record.get(columns::SUBJECT);
    let subject = if subject_text.is_empty() {
        None
    } else {
        Some(parse_field::<Subject>(record, columns::SUBJECT, subject_text)?)
    };

    let levels = parse_list::<Level>(record, columns::LEVELS)?;
    let streams = parse_list::<Stream>(record, columns::STREAMS)?;
    let available_days = parse_list::<Weekday>(record, columns::DAYS)?;

    Ok(StaffDraft {
        name: record.get(columns::NAME).to_string(),
        subjects: vec![DraftOffering {
            subject,
            levels,
            streams,
        }],
        available_days,
    })
}

fn parse_field<T>(record: &RawRecord, field: &str, text: &str) -> ImportResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>().map_err(|e| ImportError::FieldValueError {
        row: record.row,
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_list<T>(record: &RawRecord, field: &str) -> ImportResult<Vec<T>>
where
    T: FromStr + PartialEq,
    T::Err: std::fmt::Display,
{
    let mut items = Vec::new();
    for part in record.get(field).split([';', ',']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let item = parse_field::<T>(record, field, part)?;
        if !items.contains(&item) {
            items.push(item);
        }
    }
    Ok(items)
}
