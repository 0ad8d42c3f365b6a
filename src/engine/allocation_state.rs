// ==========================================
// 周课表排课系统 - 教师运行期状态
// ==========================================
// 职责: 包装 StaffMember, 记录单次排课运行的计数器
// 生命周期: 每次运行从名册新建 (计数清零), 运行结束只保留 periods_assigned
// ==========================================

use crate::domain::grid::Group;
use crate::domain::staff::StaffMember;
use crate::domain::types::Weekday;
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// AllocationState - 教师运行期状态
// ==========================================
#[derive(Debug, Clone)]
pub struct AllocationState<'a> {
    pub staff: &'a StaffMember,
    /// 本次运行已分配总节数
    pub periods_assigned: u32,
    /// 每天已分配节数 (稀疏)
    pub daily_assignments: BTreeMap<Weekday, u32>,
    /// 每天已授课班级 (同一天同一班级只能上一次)
    pub daily_class_assignments: BTreeMap<Weekday, BTreeSet<Group>>,
    /// 块节计数 (奇数节且在块节上限之前)
    pub quadrals_assigned: u32,
    /// 奇数节计数
    pub doubles_assigned: u32,
}

impl<'a> AllocationState<'a> {
    /// 从名册条目新建 (忽略名册中残留的 periods_assigned)
    pub fn new(staff: &'a StaffMember) -> Self {
        Self {
            staff,
            periods_assigned: 0,
            daily_assignments: BTreeMap::new(),
            daily_class_assignments: BTreeMap::new(),
            quadrals_assigned: 0,
            doubles_assigned: 0,
        }
    }

    pub fn daily_count(&self, day: Weekday) -> u32 {
        self.daily_assignments.get(&day).copied().unwrap_or(0)
    }

    pub fn has_taught_today(&self, day: Weekday, group: &Group) -> bool {
        self.daily_class_assignments
            .get(&day)
            .map(|groups| groups.contains(group))
            .unwrap_or(false)
    }

    /// 排序键: 累计节数 + 当天节数
    pub fn load_on(&self, day: Weekday) -> u32 {
        self.periods_assigned + self.daily_count(day)
    }

    /// 提交一次分配, 更新全部计数器
    ///
    /// # 参数
    /// - odd_period: 奇数节
    /// - block_period: 块节 (奇数节且在块节上限之前)
    pub fn commit(&mut self, day: Weekday, group: Group, odd_period: bool, block_period: bool) {
        self.periods_assigned += 1;
        *self.daily_assignments.entry(day).or_insert(0) += 1;
        self.record_group(day, group);
        if block_period {
            self.quadrals_assigned += 1;
        }
        if odd_period {
            self.doubles_assigned += 1;
        }
    }

    /// 只记录当天授课班级, 不计节数 (镜像到平行班时使用)
    pub fn record_group(&mut self, day: Weekday, group: Group) {
        self.daily_class_assignments
            .entry(day)
            .or_default()
            .insert(group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::staff::SubjectOffering;
    use crate::domain::subject::Subject;
    use crate::domain::types::Level;

    fn staff() -> StaffMember {
        let mut member = StaffMember::new(
            1,
            "Ssemwogerere",
            vec![SubjectOffering::new(Subject::Biology, vec![Level::S3], vec![])],
            vec![Weekday::Monday],
        );
        member.periods_assigned = 17;
        member
    }

    #[test]
    fn test_new_state_ignores_persisted_counter() {
        let member = staff();
        let state = AllocationState::new(&member);
        assert_eq!(state.periods_assigned, 0);
        assert_eq!(state.daily_count(Weekday::Monday), 0);
    }

    #[test]
    fn test_commit_updates_every_counter() {
        let member = staff();
        let mut state = AllocationState::new(&member);
        let group: Group = "S3A".parse().unwrap();

        state.commit(Weekday::Monday, group, true, true);
        state.commit(Weekday::Monday, "S3B".parse().unwrap(), false, false);

        assert_eq!(state.periods_assigned, 2);
        assert_eq!(state.daily_count(Weekday::Monday), 2);
        assert_eq!(state.quadrals_assigned, 1);
        assert_eq!(state.doubles_assigned, 1);
        assert!(state.has_taught_today(Weekday::Monday, &group));
        assert!(!state.has_taught_today(Weekday::Tuesday, &group));
        assert_eq!(state.load_on(Weekday::Monday), 4);
        assert_eq!(state.load_on(Weekday::Tuesday), 2);
    }

    #[test]
    fn test_record_group_does_not_count_periods() {
        let member = staff();
        let mut state = AllocationState::new(&member);
        let group: Group = "S3C".parse().unwrap();

        state.record_group(Weekday::Monday, group);
        assert_eq!(state.periods_assigned, 0);
        assert!(state.has_taught_today(Weekday::Monday, &group));
    }
}
