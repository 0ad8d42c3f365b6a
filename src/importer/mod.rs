// ==========================================
// 周课表排课系统 - 名册导入模块
// ==========================================
// 职责: 读取 CSV / Excel 名册文件, 映射为教师草稿
// 红线: 导入器不写库, 合并与保存由 API 层完成
// ==========================================

pub mod error;
pub mod file_parser;
pub mod roster_importer;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use roster_importer::{map_record, ImportedDraft, RosterImporter};
