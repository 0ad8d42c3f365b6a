// ==========================================
// 周课表排课系统 - 名册草稿校验器
// ==========================================
// 职责: 编辑表单 / 导入行提交前的结构校验
// 规则:
// 1) 姓名非空
// 2) 每条任教能力都选择了学科 (且至少一条)
// 3) 至少一个可用星期
// 4) 任教 S5/S6 必须声明流向
// ==========================================

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::staff::StaffDraft;
use crate::domain::types::Level;

pub struct RosterDraftValidator;

impl RosterDraftValidator {
    /// 校验草稿
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(ApiError::DraftValidationError): 首个违规项作为 reason, 全部违规项随附
    pub fn validate(draft: &StaffDraft) -> ApiResult<()> {
        let violations = Self::collect_violations(draft);

        match violations.first() {
            None => Ok(()),
            Some(first) => Err(ApiError::DraftValidationError {
                reason: first.reason.clone(),
                violations,
            }),
        }
    }

    pub fn collect_violations(draft: &StaffDraft) -> Vec<ValidationViolation> {
        let mut violations = Vec::new();

        if draft.name.trim().is_empty() {
            violations.push(violation("EMPTY_NAME", "name", "请输入教师姓名"));
        }

        if draft.subjects.is_empty() || draft.subjects.iter().any(|o| o.subject.is_none()) {
            violations.push(violation(
                "MISSING_SUBJECT",
                "subjects",
                "每条任教记录都必须选择学科",
            ));
        }

        if draft.available_days.is_empty() {
            violations.push(violation(
                "NO_AVAILABLE_DAY",
                "availableDays",
                "至少选择一个可用星期",
            ));
        }

        let missing_stream = draft.subjects.iter().any(|o| {
            o.levels.iter().any(Level::is_upper) && o.streams.is_empty()
        });
        if missing_stream {
            violations.push(violation(
                "MISSING_STREAM",
                "streams",
                "任教 S5/S6 必须至少选择一个流向",
            ));
        }

        violations
    }
}

fn violation(violation_type: &str, field: &str, reason: &str) -> ValidationViolation {
    ValidationViolation {
        violation_type: violation_type.to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::staff::DraftOffering;
    use crate::domain::subject::Subject;
    use crate::domain::types::{Stream, Weekday};

    fn valid() -> StaffDraft {
        StaffDraft::new(
            "Namuli",
            vec![DraftOffering::new(Subject::Literature, vec![Level::S6], vec![Stream::A])],
            vec![Weekday::Thursday],
        )
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(RosterDraftValidator::validate(&valid()).is_ok());
    }

    #[test]
    fn test_first_violation_is_reason() {
        let mut draft = valid();
        draft.name = "  ".to_string();
        draft.available_days.clear();

        match RosterDraftValidator::validate(&draft) {
            Err(ApiError::DraftValidationError { reason, violations }) => {
                assert_eq!(reason, "请输入教师姓名");
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[1].violation_type, "NO_AVAILABLE_DAY");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_subject_and_stream() {
        let mut draft = valid();
        draft.subjects.push(DraftOffering {
            subject: None,
            levels: vec![Level::S2],
            streams: vec![],
        });
        draft.subjects[0].streams.clear();

        let types: Vec<String> = RosterDraftValidator::collect_violations(&draft)
            .into_iter()
            .map(|v| v.violation_type)
            .collect();
        assert_eq!(types, vec!["MISSING_SUBJECT", "MISSING_STREAM"]);
    }
}
