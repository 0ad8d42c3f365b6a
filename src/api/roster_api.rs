// ==========================================
// 周课表排课系统 - 名册 API
// ==========================================
// 职责: 名册编辑 (新增或合并 / 删除 / 清空 / 列表) 与文件导入
// 合并规则 (按姓名匹配):
// - 同一学科: 追加年级与流向 (去重)
// - 新学科: 追加到任教列表末尾
// - 可用星期: 取并集, 按星期顺序排列
// 新教师: id = 当前最大 id + 1, periods_assigned = 0
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::RosterDraftValidator;
use crate::domain::staff::{DraftOffering, StaffDraft, StaffMember, SubjectOffering};
use crate::importer::RosterImporter;
use crate::repository::Roster;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// 单个草稿的落地结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RosterChange {
    Added(i64),
    Merged(i64),
}

/// 导入汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub rows: usize,
    pub added: usize,
    pub merged: usize,
    pub roster_size: usize,
}

// ==========================================
// 合并规则 (纯函数)
// ==========================================

fn push_unique<T: PartialEq + Copy>(target: &mut Vec<T>, items: &[T]) {
    for item in items {
        if !target.contains(item) {
            target.push(*item);
        }
    }
}

fn merge_offerings(target: &mut Vec<SubjectOffering>, drafts: &[DraftOffering]) {
    for draft in drafts {
        let Some(offering) = draft.to_offering() else {
            continue;
        };
        match target.iter_mut().find(|o| o.subject == offering.subject) {
            Some(existing) => {
                push_unique(&mut existing.levels, &offering.levels);
                push_unique(&mut existing.streams, &offering.streams);
            }
            None => target.push(offering),
        }
    }
}

/// 将已校验的草稿并入名册
///
/// 调用方负责先执行 `RosterDraftValidator::validate`
pub fn merge_draft(roster: &mut Vec<StaffMember>, draft: &StaffDraft) -> RosterChange {
    let name = draft.name.trim();

    if let Some(existing) = roster.iter_mut().find(|m| m.name == name) {
        merge_offerings(&mut existing.subjects, &draft.subjects);
        push_unique(&mut existing.available_days, &draft.available_days);
        existing.available_days.sort();
        return RosterChange::Merged(existing.id);
    }

    let id = roster.iter().map(|m| m.id).max().unwrap_or(0) + 1;
    let mut subjects = Vec::new();
    merge_offerings(&mut subjects, &draft.subjects);
    let mut available_days = Vec::new();
    push_unique(&mut available_days, &draft.available_days);
    available_days.sort();

    roster.push(StaffMember::new(id, name, subjects, available_days));
    RosterChange::Added(id)
}

// ==========================================
// RosterApi
// ==========================================
pub struct RosterApi {
    roster: Arc<dyn Roster>,
    importer: RosterImporter,
}

impl RosterApi {
    pub fn new(roster: Arc<dyn Roster>) -> Self {
        Self {
            roster,
            importer: RosterImporter::new(),
        }
    }

    pub fn list(&self) -> ApiResult<Vec<StaffMember>> {
        Ok(self.roster.load()?)
    }

    /// 新增或合并单个教师草稿
    pub fn add_or_merge(&self, draft: &StaffDraft) -> ApiResult<RosterChange> {
        RosterDraftValidator::validate(draft)?;

        let mut roster = self.roster.load()?;
        let change = merge_draft(&mut roster, draft);
        self.roster.save(&roster)?;

        info!(name = %draft.name.trim(), change = ?change, "名册已更新");
        Ok(change)
    }

    /// 按 id 删除
    pub fn remove(&self, id: i64) -> ApiResult<StaffMember> {
        let mut roster = self.roster.load()?;
        let index = roster
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("教师(id={})不存在", id)))?;

        let removed = roster.remove(index);
        self.roster.save(&roster)?;
        info!(id, name = %removed.name, "教师已删除");
        Ok(removed)
    }

    pub fn clear(&self) -> ApiResult<()> {
        self.roster.clear()?;
        info!("名册已清空");
        Ok(())
    }

    /// 从 CSV / Excel 文件导入
    ///
    /// 全部行校验通过后一次性保存; 任一行失败则名册保持不变
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ApiResult<ImportSummary> {
        let drafts = self.importer.read_drafts(file_path)?;

        let mut roster = self.roster.load()?;
        let mut summary = ImportSummary {
            rows: drafts.len(),
            ..ImportSummary::default()
        };

        for imported in &drafts {
            RosterDraftValidator::validate(&imported.draft).map_err(|e| {
                ApiError::ImportError(format!("行 {}: {}", imported.row, e))
            })?;

            match merge_draft(&mut roster, &imported.draft) {
                RosterChange::Added(_) => summary.added += 1,
                RosterChange::Merged(_) => summary.merged += 1,
            }
        }

        self.roster.save(&roster)?;
        summary.roster_size = roster.len();
        info!(
            rows = summary.rows,
            added = summary.added,
            merged = summary.merged,
            "名册导入完成"
        );
        Ok(summary)
    }
}
