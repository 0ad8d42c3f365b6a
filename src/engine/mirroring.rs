// ==========================================
// 周课表排课系统 - 平行班镜像引擎
// ==========================================
// 职责: 高中部 (S5/S6) 主选提交后的三条镜像规则
// 1) 同时开课组: 检索伴随学科教师, 提交并写入同一单元格
// 2) General Paper: 同一教师同一学科写入平行班同一坐标
// 3) SubMath/ICT: 同一教师 + 配对的另一门写入平行班同一坐标
// 约束: 镜像写入不重新走排序, 后写覆盖 (按网格迭代顺序)
// ==========================================

use crate::config::EngineConfig;
use crate::domain::grid::GridModel;
use crate::domain::schedule::{CellAssignment, ScheduleGrid};
use crate::domain::subject::Subject;
use crate::engine::allocation_state::AllocationState;
use crate::engine::eligibility::{EligibilityEngine, SlotContext};
use tracing::debug;

// ==========================================
// MirrorPropagator - 平行班镜像引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct MirrorPropagator {
    eligibility: EligibilityEngine,
    config: EngineConfig,
}

impl MirrorPropagator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            eligibility: EligibilityEngine::new(config),
            config: config.clone(),
        }
    }

    /// 执行镜像规则
    ///
    /// # 参数
    /// - primary_index: 主选教师在 states 中的下标
    /// - subject: 主选学科
    ///
    /// # 返回
    /// 镜像写入的单元格数
    pub fn propagate(
        &self,
        grid: &GridModel,
        schedule: &mut ScheduleGrid,
        states: &mut [AllocationState<'_>],
        slot: &SlotContext<'_>,
        primary_index: usize,
        subject: Subject,
    ) -> usize {
        if !slot.group.level.is_upper() {
            return 0;
        }

        let mut written = 0;
        written += self.mirror_simultaneous(schedule, states, slot, subject);

        if subject == Subject::GeneralPaper {
            written += self.mirror_to_sibling(grid, schedule, states, slot, primary_index, subject);
        }

        if let Some(partner) = subject.subsidiary_partner() {
            written += self.mirror_to_sibling(grid, schedule, states, slot, primary_index, partner);
        }

        written
    }

    /// 同时开课组: 每门伴随学科按名册顺序检索第一位可用教师
    ///
    /// 检索不经过排序与时间策略, 但遵守当天硬约束 (可用/日上限/同班一次)
    fn mirror_simultaneous(
        &self,
        schedule: &mut ScheduleGrid,
        states: &mut [AllocationState<'_>],
        slot: &SlotContext<'_>,
        subject: Subject,
    ) -> usize {
        let mut written = 0;

        for &partner in subject.simultaneous_partners() {
            let found = states.iter().position(|state| {
                state.staff.teaches(partner, &slot.group)
                    && self
                        .eligibility
                        .check_hard_slot_constraints(state, slot.day, &slot.group)
                        .is_ok()
            });

            let Some(index) = found else {
                debug!(
                    group = %slot.group,
                    day = %slot.day,
                    period = slot.period.id,
                    partner = %partner,
                    "同时开课伴随学科无可用教师"
                );
                continue;
            };

            let state = &mut states[index];
            state.commit(
                slot.day,
                slot.group,
                slot.period.is_odd(),
                self.config.is_block_period(slot.period.id),
            );

            schedule.assign(
                &slot.group,
                slot.day,
                slot.period.id,
                CellAssignment {
                    staff_id: state.staff.id,
                    teacher: state.staff.name.clone(),
                    subject: partner,
                    mirrored: true,
                },
            );
            written += 1;
        }

        written
    }

    /// 写入平行班同一坐标 (同一教师, 不增加节数, 记录当天授课班级)
    ///
    /// 教师当天已在平行班授课时跳过, 同班每天一次对镜像写入同样成立
    fn mirror_to_sibling(
        &self,
        grid: &GridModel,
        schedule: &mut ScheduleGrid,
        states: &mut [AllocationState<'_>],
        slot: &SlotContext<'_>,
        primary_index: usize,
        subject: Subject,
    ) -> usize {
        let Some(sibling) = grid.sibling_of(&slot.group) else {
            return 0;
        };

        let state = &mut states[primary_index];
        if state.has_taught_today(slot.day, &sibling) {
            debug!(
                teacher = %state.staff.name,
                to = %sibling,
                day = %slot.day,
                period = slot.period.id,
                "当天已在平行班授课, 跳过镜像"
            );
            return 0;
        }

        let assignment = CellAssignment {
            staff_id: state.staff.id,
            teacher: state.staff.name.clone(),
            subject,
            mirrored: true,
        };

        if !schedule.assign(&sibling, slot.day, slot.period.id, assignment) {
            return 0;
        }
        state.record_group(slot.day, sibling);

        debug!(
            from = %slot.group,
            to = %sibling,
            day = %slot.day,
            period = slot.period.id,
            subject = %subject,
            "镜像写入平行班"
        );
        1
    }
}
