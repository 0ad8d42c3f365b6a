// ==========================================
// 周课表排课系统 - 引擎层
// ==========================================
// 职责: 实现排课规则引擎, 不拼 SQL, 不做 IO
// 红线: 同一名册 + 同一网格 + 同一配置 => 同一课表
// ==========================================

pub mod allocation_state;
pub mod allocator;
pub mod eligibility;
pub mod error;
pub mod load_balancer;
pub mod mirroring;
pub mod timing_policy;

// 重导出核心引擎
pub use allocation_state::AllocationState;
pub use allocator::{AllocationOutcome, RunStats, StaffLoad, TimetableAllocator};
pub use eligibility::{EligibilityEngine, Rejection, SlotContext};
pub use error::{AllocationError, AllocationResult};
pub use load_balancer::{Candidate, LoadBalancer};
pub use mirroring::MirrorPropagator;
pub use timing_policy::{OfferingChoice, TimingPolicy};
