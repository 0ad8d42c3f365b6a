// ==========================================
// 周课表排课系统 - 引擎配置读取 Trait
// ==========================================
// 职责: 定义排课引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::engine_config::{CategoryPolicyMode, EngineConfig};
use std::error::Error;

// ==========================================
// EngineConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait EngineConfigReader: Send + Sync {
    // ===== 负载约束 =====

    /// 超载容忍系数
    ///
    /// # 默认值
    /// - 1.2
    fn get_overload_tolerance(&self) -> Result<f64, Box<dyn Error>>;

    /// 每日节数上限
    ///
    /// # 默认值
    /// - 4
    fn get_daily_period_cap(&self) -> Result<u32, Box<dyn Error>>;

    /// 同时开课主学科负载系数
    ///
    /// # 默认值
    /// - 0.7
    fn get_simultaneous_load_ratio(&self) -> Result<f64, Box<dyn Error>>;

    // ===== 块节配额 =====

    fn get_general_paper_quadrals_per_week(&self) -> Result<u32, Box<dyn Error>>;

    fn get_subsidiary_quadrals_per_week(&self) -> Result<u32, Box<dyn Error>>;

    fn get_subsidiary_periods_per_week(&self) -> Result<u32, Box<dyn Error>>;

    // ===== 节次窗口 =====

    fn get_pe_earliest_period(&self) -> Result<u8, Box<dyn Error>>;

    fn get_humanities_earliest_period(&self) -> Result<u8, Box<dyn Error>>;

    fn get_block_period_limit(&self) -> Result<u8, Box<dyn Error>>;

    // ===== 策略 =====

    /// 类别策略模式
    ///
    /// # 默认值
    /// - GATING
    fn get_policy_mode(&self) -> Result<CategoryPolicyMode, Box<dyn Error>>;

    /// 汇总为完整 EngineConfig 并校验
    fn load_engine_config(&self) -> Result<EngineConfig, Box<dyn Error>> {
        let config = EngineConfig {
            overload_tolerance: self.get_overload_tolerance()?,
            daily_period_cap: self.get_daily_period_cap()?,
            simultaneous_load_ratio: self.get_simultaneous_load_ratio()?,
            general_paper_quadrals_per_week: self.get_general_paper_quadrals_per_week()?,
            subsidiary_quadrals_per_week: self.get_subsidiary_quadrals_per_week()?,
            subsidiary_periods_per_week: self.get_subsidiary_periods_per_week()?,
            pe_earliest_period: self.get_pe_earliest_period()?,
            humanities_earliest_period: self.get_humanities_earliest_period()?,
            block_period_limit: self.get_block_period_limit()?,
            policy_mode: self.get_policy_mode()?,
        };
        config.validate()?;
        Ok(config)
    }
}
