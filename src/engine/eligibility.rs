// ==========================================
// 周课表排课系统 - 教师准入引擎
// ==========================================
// 红线: 硬约束, 任一不满足即剔除
// ==========================================
// 职责: 单个坐标上的候选教师过滤
// 输入: AllocationState + SlotContext
// 输出: 准入 / 剔除原因
// ==========================================

use crate::config::EngineConfig;
use crate::domain::grid::{Group, Period};
use crate::domain::types::Weekday;
use crate::engine::allocation_state::AllocationState;
use std::fmt;

// ==========================================
// SlotContext - 当前坐标
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct SlotContext<'p> {
    pub group: Group,
    pub day: Weekday,
    pub period: &'p Period,
    /// 每位教师的目标节数
    pub target_periods: u32,
}

// ==========================================
// 剔除原因
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// 无可教该班级 (年级/流向) 的学科
    NoMatchingOffering,
    /// 超过目标节数 × 容忍系数
    Overloaded,
    /// 当天节数已达上限
    DailyCapReached,
    /// 当天不可用
    Unavailable,
    /// 当天已给该班级上过课
    GroupAlreadyTaughtToday,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoMatchingOffering => write!(f, "NO_MATCHING_OFFERING"),
            Rejection::Overloaded => write!(f, "OVERLOADED"),
            Rejection::DailyCapReached => write!(f, "DAILY_CAP_REACHED"),
            Rejection::Unavailable => write!(f, "UNAVAILABLE"),
            Rejection::GroupAlreadyTaughtToday => write!(f, "GROUP_ALREADY_TAUGHT_TODAY"),
        }
    }
}

// ==========================================
// EligibilityEngine - 教师准入引擎
// ==========================================
// 红线: 不修改状态, 只判定
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    overload_tolerance: f64,
    daily_period_cap: u32,
}

impl EligibilityEngine {
    /// 创建新的 EligibilityEngine 实例
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            overload_tolerance: config.overload_tolerance,
            daily_period_cap: config.daily_period_cap,
        }
    }

    /// 评估单个候选
    ///
    /// 判定顺序:
    /// 1) 有可教该班级的学科 (S5/S6 需匹配流向)
    /// 2) periods_assigned < target × tolerance
    /// 3) 当天节数 < 上限
    /// 4) 当天可用
    /// 5) 当天未教过该班级
    pub fn evaluate(
        &self,
        state: &AllocationState<'_>,
        slot: &SlotContext<'_>,
    ) -> Result<(), Rejection> {
        if state.staff.offerings_for(&slot.group).next().is_none() {
            return Err(Rejection::NoMatchingOffering);
        }

        if !self.under_overload_cap(state, slot.target_periods) {
            return Err(Rejection::Overloaded);
        }

        self.check_hard_slot_constraints(state, slot.day, &slot.group)
    }

    /// 与学科无关的当天硬约束 (同时开课伴随教师检索也复用)
    pub fn check_hard_slot_constraints(
        &self,
        state: &AllocationState<'_>,
        day: Weekday,
        group: &Group,
    ) -> Result<(), Rejection> {
        if state.daily_count(day) >= self.daily_period_cap {
            return Err(Rejection::DailyCapReached);
        }

        if !state.staff.is_available_on(day) {
            return Err(Rejection::Unavailable);
        }

        if state.has_taught_today(day, group) {
            return Err(Rejection::GroupAlreadyTaughtToday);
        }

        Ok(())
    }

    /// 软超载上限: 目标节数的 tolerance 倍
    pub fn under_overload_cap(&self, state: &AllocationState<'_>, target_periods: u32) -> bool {
        (state.periods_assigned as f64) < target_periods as f64 * self.overload_tolerance
    }
}
