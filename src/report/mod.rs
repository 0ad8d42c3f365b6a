// ==========================================
// 周课表排课系统 - 报表模块
// ==========================================
// 职责: 将单个班级的周课表渲染为可输出的文档
// 红线: 只读 GroupTimetable, 不访问引擎或仓储
// ==========================================

pub mod csv_renderer;
pub mod error;
pub mod template;
pub mod text_renderer;

pub use csv_renderer::CsvReportRenderer;
pub use error::{ReportError, ReportResult};
pub use template::ReportTemplate;
pub use text_renderer::TextReportRenderer;

use crate::domain::schedule::GroupTimetable;
use std::path::Path;

// ==========================================
// ReportRenderer Trait
// ==========================================
pub trait ReportRenderer {
    /// 输出文件扩展名 (不含点)
    fn file_extension(&self) -> &'static str;

    fn render(&self, timetable: &GroupTimetable, template: &ReportTemplate) -> ReportResult<Vec<u8>>;

    /// 渲染并写入文件
    fn render_to_file(
        &self,
        timetable: &GroupTimetable,
        template: &ReportTemplate,
        path: &Path,
    ) -> ReportResult<()> {
        let bytes = self.render(timetable, template)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// 按输出文件扩展名选择渲染器
pub fn renderer_for_path(path: &Path) -> ReportResult<Box<dyn ReportRenderer>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(Box::new(CsvReportRenderer)),
        "txt" => Ok(Box::new(TextReportRenderer)),
        _ => Err(ReportError::UnsupportedFormat(ext)),
    }
}
