// ==========================================
// 周课表排课系统 - CSV 报表
// ==========================================
// 表头: Period, Time, <星期...>; 单元格: "教师 / 学科"
// ==========================================

use crate::domain::schedule::GroupTimetable;
use crate::report::error::{ReportError, ReportResult};
use crate::report::template::ReportTemplate;
use crate::report::ReportRenderer;
use csv::WriterBuilder;

pub struct CsvReportRenderer;

impl ReportRenderer for CsvReportRenderer {
    fn file_extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, timetable: &GroupTimetable, _template: &ReportTemplate) -> ReportResult<Vec<u8>> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(Vec::new());

        let mut header = vec!["Period".to_string(), "Time".to_string()];
        header.extend(timetable.days.iter().map(|d| d.to_string()));
        wtr.write_record(&header)?;

        for row in &timetable.rows {
            let mut record = vec![row.period_id.to_string(), row.time.clone()];
            record.extend(
                row.slots
                    .iter()
                    .map(|slot| format!("{} / {}", slot.teacher, slot.subject)),
            );
            wtr.write_record(&record)?;
        }

        wtr.into_inner()
            .map_err(|e| ReportError::CsvError(e.to_string()))
    }
}
