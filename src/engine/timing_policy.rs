// ==========================================
// 周课表排课系统 - 学科时间策略引擎
// ==========================================
// 职责: 按学科类别判定某节次是否适合该学科, 并选出任教学科
// 规则:
// - 占用规则 (冲突类别) 永远是硬约束
// - 时间规则在 GATING 模式下剔除候选, 在 ADVISORY 模式下只影响排序
// ==========================================

use crate::config::{CategoryPolicyMode, EngineConfig};
use crate::domain::schedule::ScheduleCell;
use crate::domain::subject::{CollisionClass, Subject, SubjectCategory};
use crate::engine::allocation_state::AllocationState;
use crate::engine::eligibility::SlotContext;

/// 学科选择结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferingChoice {
    pub subject: Subject,
    /// 是否满足时间策略 (ADVISORY 模式下可能为 false)
    pub policy_satisfied: bool,
}

// ==========================================
// TimingPolicy - 学科时间策略引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct TimingPolicy {
    config: EngineConfig,
}

impl TimingPolicy {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// 为候选教师选出本坐标的任教学科
    ///
    /// 按名册录入顺序检查可教该班级的学科:
    /// 1) 第一门同时满足占用规则与时间规则的学科
    /// 2) ADVISORY 模式下退而取第一门满足占用规则的学科
    /// 3) 否则 None (候选被剔除)
    pub fn choose_offering(
        &self,
        state: &AllocationState<'_>,
        slot: &SlotContext<'_>,
        cell: &ScheduleCell,
    ) -> Option<OfferingChoice> {
        let mut fallback: Option<Subject> = None;

        for offering in state.staff.offerings_for(&slot.group) {
            if !Self::occupancy_allows(offering.subject, cell) {
                continue;
            }
            if self.timing_allows(offering.subject, state, slot) {
                return Some(OfferingChoice {
                    subject: offering.subject,
                    policy_satisfied: true,
                });
            }
            if fallback.is_none() {
                fallback = Some(offering.subject);
            }
        }

        match self.config.policy_mode {
            CategoryPolicyMode::Gating => None,
            CategoryPolicyMode::Advisory => fallback.map(|subject| OfferingChoice {
                subject,
                policy_satisfied: false,
            }),
        }
    }

    /// 占用规则
    ///
    /// - 必修: 只能写入空单元格 (必修之间不允许冲突)
    /// - 选修: 空单元格, 或覆盖另一门选修
    /// - 豁免 (General Paper / SubMath): 不检查
    pub fn occupancy_allows(subject: Subject, cell: &ScheduleCell) -> bool {
        let occupant = match cell.subject() {
            Some(s) => s,
            None => return true,
        };

        match subject.collision_class() {
            CollisionClass::Compulsory => false,
            CollisionClass::Optional => occupant.collision_class() == CollisionClass::Optional,
            CollisionClass::Exempt => true,
        }
    }

    /// 时间规则 (按主类别)
    pub fn timing_allows(
        &self,
        subject: Subject,
        state: &AllocationState<'_>,
        slot: &SlotContext<'_>,
    ) -> bool {
        let period_id = slot.period.id;
        let odd = slot.period.is_odd();
        let block = self.config.is_block_period(period_id);

        match subject.category() {
            SubjectCategory::Compulsory | SubjectCategory::Optional => true,
            SubjectCategory::PhysicalEducation => period_id >= self.config.pe_earliest_period,
            SubjectCategory::Science => odd,
            SubjectCategory::Humanities => period_id >= self.config.humanities_earliest_period,
            SubjectCategory::GeneralizedStudies => {
                // 只约束高中部, 初中部无时间限制
                !slot.group.level.is_upper()
                    || (state.quadrals_assigned < self.config.general_paper_quadrals_per_week
                        && block)
            }
            SubjectCategory::SubsidiaryPair => {
                (state.quadrals_assigned < self.config.subsidiary_quadrals_per_week && block)
                    || (state.periods_assigned < self.config.subsidiary_periods_per_week && odd)
            }
            SubjectCategory::SimultaneousGroup => {
                (state.periods_assigned as f64)
                    < slot.target_periods as f64 * self.config.simultaneous_load_ratio
            }
        }
    }
}
