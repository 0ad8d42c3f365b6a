// ==========================================
// 周课表排课系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx) / CSV (.csv)
// 输出: 原始行记录 (表头小写 -> 单元格文本) + 物理行号
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 物理行号 (表头为第 1 行)
    pub row: usize,
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    /// 读取字段 (缺失视为空串)
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

/// 表头统一为小写去空白
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        let path = file_path;
        ensure_exists(path)?;

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut fields = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    fields.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(RawRecord {
                row: row_idx + 2,
                fields,
            });
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        let path = file_path;
        ensure_exists(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("xlsx") {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let Some(sheet_name) = sheet_names.first().cloned() else {
            return Err(ImportError::ExcelParseError(
                "Excel 文件无工作表".to_string(),
            ));
        };
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows.next().ok_or(ImportError::EmptyFile)?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| normalize_header(&cell.to_string()))
            .collect();

        let mut records = Vec::new();
        for (row_idx, data_row) in rows.enumerate() {
            let mut fields = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    fields.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(RawRecord {
                row: row_idx + 2,
                fields,
            });
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRecord>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" => ExcelParser.parse_to_raw_records(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Name,Subject,Levels").unwrap();
        writeln!(temp_file, "Okello,English,S1;S2").unwrap();
        writeln!(temp_file, "Akello,Physics,S3").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("name"), "Okello");
        assert_eq!(records[0].get("levels"), "S1;S2");
        assert_eq!(records[1].row, 3);
        assert_eq!(records[1].get("streams"), "");
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows_keeps_row_numbers() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name,subject").unwrap();
        writeln!(temp_file, "Okello,English").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "Akello,Physics").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].row, 4);
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse("roster.pdf");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
