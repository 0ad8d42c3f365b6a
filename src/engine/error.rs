// ==========================================
// 周课表排课系统 - 引擎错误类型
// ==========================================
// 红线: 错误只在主循环之前同步检测, 失败时不返回部分课表
// 说明: 无人可排的单元格不是错误, 以未分配形式留在结果中
// ==========================================

use crate::domain::grid::GridError;
use thiserror::Error;

/// 排课引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// 名册为空, 目标节数无法计算
    #[error("名册为空: 至少需要一位教师才能排课")]
    EmptyRoster,

    /// 名册条目违反结构不变量
    #[error("名册配置错误 (id={staff_id}, name={name}): {reason}")]
    Configuration {
        staff_id: i64,
        name: String,
        reason: String,
    },

    /// 网格模型不可用 (维度为空/重复/节次编号从 0 开始)
    #[error("网格模型错误: {0}")]
    InvalidGrid(String),

    /// 引擎参数越界
    #[error("引擎配置错误: {0}")]
    InvalidConfig(String),
}

impl From<GridError> for AllocationError {
    fn from(err: GridError) -> Self {
        AllocationError::InvalidGrid(err.to_string())
    }
}

/// Result 类型别名
pub type AllocationResult<T> = Result<T, AllocationError>;
