// ==========================================
// 周课表排课系统 - 报表模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("报表格式不支持: {0}（仅支持 .csv/.txt）")]
    UnsupportedFormat(String),

    #[error("报表模板错误: {0}")]
    InvalidTemplate(String),

    #[error("报表写入失败: {0}")]
    WriteError(String),

    #[error("CSV 生成失败: {0}")]
    CsvError(String),
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::WriteError(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::CsvError(err.to_string())
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
