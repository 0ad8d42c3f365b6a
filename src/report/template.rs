// ==========================================
// 周课表排课系统 - 报表页眉模板
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 报表页眉与分页参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTemplate {
    pub school_name: String,
    pub campus: String,
    /// 页眉地址/联系方式行
    pub contact_lines: Vec<String>,
    pub generated_on: NaiveDate,
    /// 每页节次行数
    pub rows_per_page: usize,
}

impl ReportTemplate {
    /// 学校默认页眉
    pub fn school_default(generated_on: NaiveDate) -> Self {
        Self {
            school_name: "KINAAWA HIGH SCHOOL".to_string(),
            campus: "KAWEMPE CAMPUS".to_string(),
            contact_lines: vec![
                "P.O. Box 9093, Kampala-Uganda".to_string(),
                "Bombo Road - Kawempe Ttula".to_string(),
                "Tel: +256(0)772 431975 / +256(0)759 137103".to_string(),
            ],
            generated_on,
            rows_per_page: 6,
        }
    }

    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }
}
