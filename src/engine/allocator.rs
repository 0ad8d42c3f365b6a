// ==========================================
// 周课表排课系统 - 排课编排器
// ==========================================
// 用途: 协调准入/时间策略/负载均衡/镜像四个引擎, 逐坐标贪心分配
// 迭代顺序: 班级 -> 星期 -> 节次 (均按网格模型顺序, 结果完全确定)
// 红线: 运行前同步校验, 校验失败不产生任何课表
// ==========================================

use crate::config::EngineConfig;
use crate::domain::grid::{Group, GridModel, Period};
use crate::domain::schedule::{CellAssignment, ScheduleCell, ScheduleGrid};
use crate::domain::staff::StaffMember;
use crate::domain::types::Weekday;
use crate::engine::allocation_state::AllocationState;
use crate::engine::eligibility::{EligibilityEngine, SlotContext};
use crate::engine::error::{AllocationError, AllocationResult};
use crate::engine::load_balancer::{Candidate, LoadBalancer};
use crate::engine::mirroring::MirrorPropagator;
use crate::engine::timing_policy::TimingPolicy;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, instrument};

// ==========================================
// AllocationOutcome - 排课结果
// ==========================================

/// 单个教师的本次运行节数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffLoad {
    pub staff_id: i64,
    pub name: String,
    pub periods_assigned: u32,
    /// 每天计入日上限的节数 (主分配 + 同时开课组提交)
    pub daily_periods: BTreeMap<Weekday, u32>,
}

/// 运行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    /// 最终已分配单元格数 (含镜像写入)
    pub filled: usize,
    /// 最终未分配单元格数
    pub unfilled: usize,
    /// 镜像写入次数 (同一单元格被覆盖时重复计数)
    pub mirrored_writes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOutcome {
    pub run_id: String,
    pub generated_at: NaiveDateTime,
    pub target_periods_per_teacher: u32,
    pub grid: ScheduleGrid,
    /// 名册顺序
    pub loads: Vec<StaffLoad>,
    pub stats: RunStats,
}

impl AllocationOutcome {
    /// 将本次运行的节数写回名册 (按 id 匹配, 未出现的教师不变)
    pub fn apply_to_roster(&self, roster: &mut [StaffMember]) {
        let by_id: HashMap<i64, u32> = self
            .loads
            .iter()
            .map(|load| (load.staff_id, load.periods_assigned))
            .collect();

        for member in roster.iter_mut() {
            if let Some(periods) = by_id.get(&member.id) {
                member.periods_assigned = *periods;
            }
        }
    }

    pub fn load_of(&self, staff_id: i64) -> Option<u32> {
        self.loads
            .iter()
            .find(|load| load.staff_id == staff_id)
            .map(|load| load.periods_assigned)
    }
}

// ==========================================
// TimetableAllocator - 排课编排器
// ==========================================

#[derive(Debug, Clone)]
pub struct TimetableAllocator {
    grid: GridModel,
    config: EngineConfig,
    eligibility: EligibilityEngine,
    policy: TimingPolicy,
    balancer: LoadBalancer,
    mirror: MirrorPropagator,
}

impl TimetableAllocator {
    /// 使用默认引擎参数
    pub fn new(grid: GridModel) -> Self {
        Self::with_config(grid, EngineConfig::default())
    }

    pub fn with_config(grid: GridModel, config: EngineConfig) -> Self {
        Self {
            eligibility: EligibilityEngine::new(&config),
            policy: TimingPolicy::new(&config),
            balancer: LoadBalancer::new(),
            mirror: MirrorPropagator::new(&config),
            grid,
            config,
        }
    }

    /// 由原始维度构造 (网格校验失败时返回 InvalidGrid)
    pub fn from_parts(
        days: Vec<Weekday>,
        periods: Vec<Period>,
        groups: Vec<Group>,
        config: EngineConfig,
    ) -> AllocationResult<Self> {
        let grid = GridModel::new(days, periods, groups)?;
        Ok(Self::with_config(grid, config))
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 执行一次完整排课
    ///
    /// 每次运行从名册新建状态 (名册中的 periods_assigned 不参与计算),
    /// 名册本身不被修改, 调用方通过 `AllocationOutcome::apply_to_roster` 写回
    ///
    /// # 错误
    /// - EmptyRoster: 名册为空
    /// - InvalidConfig: 引擎参数越界
    /// - InvalidGrid: 节次编号不是从 1 开始
    /// - Configuration: 名册条目违反结构不变量 / id 重复
    #[instrument(skip(self, roster), fields(
        staff_count = roster.len(),
        groups = self.grid.groups().len(),
        policy_mode = %self.config.policy_mode
    ))]
    pub fn run(&self, roster: &[StaffMember]) -> AllocationResult<AllocationOutcome> {
        self.validate(roster)?;

        let target = self
            .grid
            .target_periods_per_teacher(roster.len())
            .ok_or(AllocationError::EmptyRoster)?;

        info!(
            target_periods = target,
            total_periods = self.grid.total_periods_per_week(),
            "开始执行排课"
        );

        let mut states: Vec<AllocationState> = roster.iter().map(AllocationState::new).collect();
        let mut schedule = ScheduleGrid::empty(&self.grid);
        let mut mirrored_writes = 0;

        for group in self.grid.groups() {
            for &day in self.grid.days() {
                for period in self.grid.periods() {
                    let slot = SlotContext {
                        group: *group,
                        day,
                        period,
                        target_periods: target,
                    };

                    // 平行班的单元格可能已被镜像写入, 占用规则按当前内容判定
                    let cell = schedule
                        .cell(group, day, period.id)
                        .cloned()
                        .unwrap_or_else(|| ScheduleCell::unassigned(period.time.clone()));

                    let candidates = self.collect_candidates(&states, &slot, &cell);
                    let Some(picked) = self.balancer.pick(candidates) else {
                        debug!(group = %group, day = %day, period = period.id, "无可用教师, 单元格保持未分配");
                        continue;
                    };

                    let state = &mut states[picked.index];
                    state.commit(
                        day,
                        *group,
                        period.is_odd(),
                        self.config.is_block_period(period.id),
                    );
                    schedule.assign(
                        group,
                        day,
                        period.id,
                        CellAssignment {
                            staff_id: state.staff.id,
                            teacher: state.staff.name.clone(),
                            subject: picked.subject,
                            mirrored: false,
                        },
                    );

                    mirrored_writes += self.mirror.propagate(
                        &self.grid,
                        &mut schedule,
                        &mut states,
                        &slot,
                        picked.index,
                        picked.subject,
                    );
                }
            }
        }

        let filled = schedule.assigned_count();
        let stats = RunStats {
            filled,
            unfilled: schedule.cell_count() - filled,
            mirrored_writes,
        };

        let loads = states
            .iter()
            .map(|state| StaffLoad {
                staff_id: state.staff.id,
                name: state.staff.name.clone(),
                periods_assigned: state.periods_assigned,
                daily_periods: state.daily_assignments.clone(),
            })
            .collect();

        info!(
            filled = stats.filled,
            unfilled = stats.unfilled,
            mirrored_writes = stats.mirrored_writes,
            "排课完成"
        );

        Ok(AllocationOutcome {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Local::now().naive_local(),
            target_periods_per_teacher: target,
            grid: schedule,
            loads,
            stats,
        })
    }

    /// 准入 + 学科选择, 保留名册顺序
    fn collect_candidates(
        &self,
        states: &[AllocationState<'_>],
        slot: &SlotContext<'_>,
        cell: &ScheduleCell,
    ) -> Vec<Candidate> {
        states
            .iter()
            .enumerate()
            .filter_map(|(index, state)| {
                self.eligibility.evaluate(state, slot).ok()?;
                let choice = self.policy.choose_offering(state, slot, cell)?;
                Some(Candidate {
                    index,
                    subject: choice.subject,
                    policy_satisfied: choice.policy_satisfied,
                    load: state.load_on(slot.day),
                })
            })
            .collect()
    }

    fn validate(&self, roster: &[StaffMember]) -> AllocationResult<()> {
        if roster.is_empty() {
            return Err(AllocationError::EmptyRoster);
        }

        self.config
            .validate()
            .map_err(AllocationError::InvalidConfig)?;

        // 奇偶判定以 1 为首节
        if self.grid.periods().iter().any(|p| p.id == 0) {
            return Err(AllocationError::InvalidGrid(
                "节次编号必须从 1 开始".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for member in roster {
            if let Some(reason) = member.invariant_violation() {
                return Err(AllocationError::Configuration {
                    staff_id: member.id,
                    name: member.name.clone(),
                    reason,
                });
            }
            if !seen.insert(member.id) {
                return Err(AllocationError::Configuration {
                    staff_id: member.id,
                    name: member.name.clone(),
                    reason: "教师 id 重复".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::staff::SubjectOffering;
    use crate::domain::subject::Subject;
    use crate::domain::types::{Level, Stream};

    fn all_days() -> Vec<Weekday> {
        vec![
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
        ]
    }

    fn english_teacher(id: i64, name: &str, levels: Vec<Level>) -> StaffMember {
        StaffMember::new(
            id,
            name,
            vec![SubjectOffering::new(Subject::English, levels, vec![])],
            all_days(),
        )
    }

    #[test]
    fn test_empty_roster_rejected() {
        let allocator = TimetableAllocator::new(GridModel::canonical());
        assert_eq!(allocator.run(&[]).unwrap_err(), AllocationError::EmptyRoster);
    }

    #[test]
    fn test_upper_level_offering_without_streams_rejected() {
        let allocator = TimetableAllocator::new(GridModel::canonical());
        let roster = vec![StaffMember::new(
            4,
            "Atim",
            vec![SubjectOffering::new(Subject::Economics, vec![Level::S6], vec![])],
            all_days(),
        )];

        match allocator.run(&roster) {
            Err(AllocationError::Configuration { staff_id, .. }) => assert_eq!(staff_id, 4),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let allocator = TimetableAllocator::new(GridModel::canonical());
        let roster = vec![
            english_teacher(1, "A", vec![Level::S1]),
            english_teacher(1, "B", vec![Level::S2]),
        ];
        assert!(matches!(
            allocator.run(&roster),
            Err(AllocationError::Configuration { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            daily_period_cap: 0,
            ..EngineConfig::default()
        };
        let allocator = TimetableAllocator::with_config(GridModel::canonical(), config);
        let roster = vec![english_teacher(1, "A", vec![Level::S1])];
        assert!(matches!(
            allocator.run(&roster),
            Err(AllocationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_based_period_ids_rejected() {
        let allocator = TimetableAllocator::from_parts(
            vec![Weekday::Monday],
            vec![Period::new(0, "t")],
            vec!["S1A".parse().unwrap()],
            EngineConfig::default(),
        )
        .unwrap();
        let roster = vec![english_teacher(1, "A", vec![Level::S1])];
        assert!(matches!(
            allocator.run(&roster),
            Err(AllocationError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_empty_grid_dimension_rejected() {
        let result = TimetableAllocator::from_parts(
            vec![],
            vec![Period::new(1, "t")],
            vec!["S1A".parse().unwrap()],
            EngineConfig::default(),
        );
        assert!(matches!(result, Err(AllocationError::InvalidGrid(_))));
    }

    #[test]
    fn test_every_cell_initialized_and_loads_in_roster_order() {
        let allocator = TimetableAllocator::new(GridModel::canonical());
        let roster = vec![
            english_teacher(10, "Okello", vec![Level::S1, Level::S2]),
            english_teacher(11, "Akello", vec![Level::S3, Level::S4]),
        ];

        let outcome = allocator.run(&roster).unwrap();
        assert_eq!(outcome.grid.cell_count(), 16 * 6 * 6);
        assert_eq!(outcome.stats.filled + outcome.stats.unfilled, 16 * 6 * 6);
        assert_eq!(outcome.loads[0].staff_id, 10);
        assert_eq!(outcome.loads[1].staff_id, 11);
        assert_eq!(outcome.target_periods_per_teacher, 288);
    }

    #[test]
    fn test_roster_not_mutated_until_applied() {
        let allocator = TimetableAllocator::new(GridModel::canonical());
        let mut roster = vec![english_teacher(1, "Okello", vec![Level::S1])];
        roster[0].periods_assigned = 99;

        let outcome = allocator.run(&roster).unwrap();
        assert_eq!(roster[0].periods_assigned, 99);

        outcome.apply_to_roster(&mut roster);
        assert_eq!(roster[0].periods_assigned, outcome.load_of(1).unwrap());
        assert!(roster[0].periods_assigned > 0);
    }

    #[test]
    fn test_lowest_load_teacher_wins_slot() {
        let allocator = TimetableAllocator::from_parts(
            vec![Weekday::Monday],
            vec![Period::new(1, "7:20 AM - 8:40 AM")],
            vec!["S1A".parse().unwrap(), "S1B".parse().unwrap()],
            EngineConfig::default(),
        )
        .unwrap();
        let roster = vec![
            english_teacher(1, "Okello", vec![Level::S1]),
            english_teacher(2, "Akello", vec![Level::S1]),
        ];

        let outcome = allocator.run(&roster).unwrap();
        let a = outcome.grid.cell(&"S1A".parse().unwrap(), Weekday::Monday, 1).unwrap();
        let b = outcome.grid.cell(&"S1B".parse().unwrap(), Weekday::Monday, 1).unwrap();
        assert_eq!(a.teacher_label(), "Okello");
        assert_eq!(b.teacher_label(), "Akello");
    }

    #[test]
    fn test_mirrored_general_paper_counts_once() {
        let allocator = TimetableAllocator::new(GridModel::canonical());
        let roster = vec![StaffMember::new(
            1,
            "Mukasa",
            vec![SubjectOffering::new(
                Subject::GeneralPaper,
                vec![Level::S5],
                vec![Stream::A, Stream::B],
            )],
            all_days(),
        )];

        let outcome = allocator.run(&roster).unwrap();
        // 只有一个块节配额: S5A 第一天第 1 节, 镜像到 S5B
        assert_eq!(outcome.load_of(1), Some(1));
        assert_eq!(outcome.stats.mirrored_writes, 1);
        let s5b = outcome.grid.cell(&"S5B".parse().unwrap(), Weekday::Monday, 1).unwrap();
        assert!(s5b.assignment.as_ref().unwrap().mirrored);
    }
}
