// ==========================================
// 周课表排课系统 - 引擎配置项
// ==========================================
// 职责: 排课引擎的全部可调参数及其默认值
// 来源: ConfigManager (config_kv 覆写) 或 Default
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 类别策略模式 (Category Policy Mode)
// ==========================================
// Gating:   不满足时间策略的候选被剔除
// Advisory: 不剔除, 只排在满足策略的候选之后
// 单元格占用规则在两种模式下都是硬约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryPolicyMode {
    #[default]
    Gating,
    Advisory,
}

impl fmt::Display for CategoryPolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryPolicyMode::Gating => write!(f, "GATING"),
            CategoryPolicyMode::Advisory => write!(f, "ADVISORY"),
        }
    }
}

impl std::str::FromStr for CategoryPolicyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GATING" => Ok(CategoryPolicyMode::Gating),
            "ADVISORY" => Ok(CategoryPolicyMode::Advisory),
            other => Err(format!("未知策略模式: {}", other)),
        }
    }
}

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 超载容忍系数: periods_assigned < target × tolerance
    pub overload_tolerance: f64,
    /// 每位教师每天最多节数
    pub daily_period_cap: u32,
    /// 同时开课主学科的负载系数: periods_assigned < target × ratio
    pub simultaneous_load_ratio: f64,
    /// General Paper 每周块节配额
    pub general_paper_quadrals_per_week: u32,
    /// SubMath/ICT 每周块节配额
    pub subsidiary_quadrals_per_week: u32,
    /// SubMath/ICT 每周单节配额
    pub subsidiary_periods_per_week: u32,
    /// 体育最早节次 (下午)
    pub pe_earliest_period: u8,
    /// 史地最早节次 (课间休息后)
    pub humanities_earliest_period: u8,
    /// 块节上限: 奇数节且 id < limit 才计为块节
    pub block_period_limit: u8,
    /// 类别策略模式
    pub policy_mode: CategoryPolicyMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overload_tolerance: 1.2,
            daily_period_cap: 4,
            simultaneous_load_ratio: 0.7,
            general_paper_quadrals_per_week: 1,
            subsidiary_quadrals_per_week: 2,
            subsidiary_periods_per_week: 1,
            pe_earliest_period: 5,
            humanities_earliest_period: 3,
            block_period_limit: 6,
            policy_mode: CategoryPolicyMode::Gating,
        }
    }
}

impl EngineConfig {
    /// 校验配置取值范围
    ///
    /// # 返回
    /// - Err(String): 首个越界项的说明
    pub fn validate(&self) -> Result<(), String> {
        if !self.overload_tolerance.is_finite() || self.overload_tolerance <= 0.0 {
            return Err(format!(
                "overload_tolerance 必须为正数, 实际 {}",
                self.overload_tolerance
            ));
        }
        if self.daily_period_cap == 0 {
            return Err("daily_period_cap 必须 >= 1".to_string());
        }
        if !self.simultaneous_load_ratio.is_finite()
            || self.simultaneous_load_ratio <= 0.0
            || self.simultaneous_load_ratio > 1.0
        {
            return Err(format!(
                "simultaneous_load_ratio 必须在 (0, 1] 内, 实际 {}",
                self.simultaneous_load_ratio
            ));
        }
        Ok(())
    }

    /// 是否为块节 (奇数节且在块节上限之前)
    pub fn is_block_period(&self, period_id: u8) -> bool {
        period_id % 2 == 1 && period_id < self.block_period_limit
    }
}
