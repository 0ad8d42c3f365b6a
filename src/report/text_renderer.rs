// ==========================================
// 周课表排课系统 - 分页文本报表
// ==========================================
// 每页: 页眉模板 + 班级标题 + 表格 + 页脚 (Generated on / Page i of n)
// 页与页之间以换页符 (\x0c) 分隔
// ==========================================

use crate::domain::schedule::{GroupTimetable, TimetableRow};
use crate::report::error::{ReportError, ReportResult};
use crate::report::template::ReportTemplate;
use crate::report::ReportRenderer;

const PAGE_BREAK: char = '\u{0C}';
const FIRST_COLUMN: &str = "Time/Day";

pub struct TextReportRenderer;

impl ReportRenderer for TextReportRenderer {
    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, timetable: &GroupTimetable, template: &ReportTemplate) -> ReportResult<Vec<u8>> {
        if template.rows_per_page == 0 {
            return Err(ReportError::InvalidTemplate(
                "rows_per_page 必须 >= 1".to_string(),
            ));
        }

        let widths = column_widths(timetable);
        let table_width = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);

        let pages: Vec<&[TimetableRow]> = if timetable.rows.is_empty() {
            vec![&timetable.rows[..]]
        } else {
            timetable.rows.chunks(template.rows_per_page).collect()
        };
        let page_count = pages.len();

        let mut out = String::new();
        for (index, rows) in pages.iter().enumerate() {
            if index > 0 {
                out.push(PAGE_BREAK);
            }
            write_header(&mut out, template, timetable, table_width);
            write_table(&mut out, timetable, rows, &widths);
            write_footer(&mut out, template, index + 1, page_count, table_width);
        }

        Ok(out.into_bytes())
    }
}

fn cell_text(teacher: &str, subject: &str) -> String {
    format!("{} ({})", teacher, subject)
}

/// 列宽: 首列为时间, 其余为各星期
fn column_widths(timetable: &GroupTimetable) -> Vec<usize> {
    let mut widths = Vec::with_capacity(timetable.days.len() + 1);

    let time_width = timetable
        .rows
        .iter()
        .map(|r| r.time.chars().count())
        .max()
        .unwrap_or(0)
        .max(FIRST_COLUMN.len());
    widths.push(time_width);

    for (col, day) in timetable.days.iter().enumerate() {
        let width = timetable
            .rows
            .iter()
            .filter_map(|r| r.slots.get(col))
            .map(|s| cell_text(&s.teacher, &s.subject).chars().count())
            .max()
            .unwrap_or(0)
            .max(day.to_string().len());
        widths.push(width);
    }

    widths
}

fn write_header(out: &mut String, template: &ReportTemplate, timetable: &GroupTimetable, width: usize) {
    out.push_str(&format!("{:^width$}\n", template.school_name, width = width));
    out.push_str(&format!("{:^width$}\n", template.campus, width = width));
    for line in &template.contact_lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&"=".repeat(width));
    out.push('\n');
    out.push_str(&format!("Class {} - Weekly Schedule\n\n", timetable.group));
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn write_table(out: &mut String, timetable: &GroupTimetable, rows: &[TimetableRow], widths: &[usize]) {
    let mut header = vec![FIRST_COLUMN.to_string()];
    header.extend(timetable.days.iter().map(|d| d.to_string()));
    write_row(out, &header, widths);

    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    out.push_str(&rule);
    out.push('\n');

    for row in rows {
        let mut cells = vec![row.time.clone()];
        cells.extend(
            row.slots
                .iter()
                .map(|slot| cell_text(&slot.teacher, &slot.subject)),
        );
        write_row(out, &cells, widths);
    }
}

fn write_footer(out: &mut String, template: &ReportTemplate, page: usize, page_count: usize, width: usize) {
    let left = format!("Generated on: {}", template.generated_on.format("%Y-%m-%d"));
    let right = format!("Page {} of {}", page, page_count);
    let gap = width.saturating_sub(left.len() + right.len()).max(1);
    out.push('\n');
    out.push_str(&left);
    out.push_str(&" ".repeat(gap));
    out.push_str(&right);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::GridModel;
    use crate::domain::schedule::{CellAssignment, ScheduleGrid};
    use crate::domain::subject::Subject;
    use crate::domain::types::Weekday;
    use chrono::NaiveDate;

    fn timetable() -> GroupTimetable {
        let grid = GridModel::canonical();
        let mut schedule = ScheduleGrid::empty(&grid);
        let group = "S4A".parse().unwrap();
        schedule.assign(
            &group,
            Weekday::Tuesday,
            3,
            CellAssignment {
                staff_id: 1,
                teacher: "Kato".to_string(),
                subject: Subject::Geography,
                mirrored: false,
            },
        );
        schedule.group_timetable(&grid, &group).unwrap()
    }

    fn template() -> ReportTemplate {
        ReportTemplate::school_default(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    #[test]
    fn test_single_page_layout() {
        let text = String::from_utf8(TextReportRenderer.render(&timetable(), &template()).unwrap()).unwrap();

        assert!(text.contains("KINAAWA HIGH SCHOOL"));
        assert!(text.contains("Class S4A - Weekly Schedule"));
        assert!(text.contains("Kato (Geography)"));
        assert!(text.contains("Unassigned (-)"));
        assert!(text.contains("Generated on: 2026-03-02"));
        assert!(text.contains("Page 1 of 1"));
        assert!(!text.contains(PAGE_BREAK));
    }

    #[test]
    fn test_pagination_footer_on_every_page() {
        let template = template().with_rows_per_page(4);
        let text = String::from_utf8(TextReportRenderer.render(&timetable(), &template).unwrap()).unwrap();

        let pages: Vec<&str> = text.split(PAGE_BREAK).collect();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("Page 1 of 2"));
        assert!(pages[1].contains("Page 2 of 2"));
        assert!(pages[1].contains("Class S4A - Weekly Schedule"));
        assert!(pages[1].contains("2:00 PM - 3:20 PM"));
        assert!(!pages[1].contains("7:20 AM - 8:40 AM"));
    }

    #[test]
    fn test_zero_rows_per_page_rejected() {
        let template = template().with_rows_per_page(0);
        assert!(matches!(
            TextReportRenderer.render(&timetable(), &template),
            Err(ReportError::InvalidTemplate(_))
        ));
    }
}
