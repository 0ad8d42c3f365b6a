// ==========================================
// 周课表排课系统 - 负载均衡排序引擎
// ==========================================
// 职责: 对通过准入的候选教师排序, 取负载最低者
// 排序键:
// 1) 满足时间策略优先 (仅 ADVISORY 模式下有差异)
// 2) periods_assigned + 当天节数 升序
// 3) 名册顺序 (稳定排序, 不引入随机性)
// ==========================================

use crate::domain::subject::Subject;
use std::cmp::Ordering;

// ==========================================
// Candidate - 候选教师
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// 在运行期状态列表中的下标 (即名册顺序)
    pub index: usize,
    pub subject: Subject,
    pub policy_satisfied: bool,
    /// 累计节数 + 当天节数
    pub load: u32,
}

// ==========================================
// LoadBalancer - 负载均衡排序引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct LoadBalancer {
    // 无状态引擎
}

impl LoadBalancer {
    pub fn new() -> Self {
        Self {}
    }

    /// 排序候选列表 (稳定排序)
    pub fn rank(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.sort_by(|a, b| self.compare(a, b));
        candidates
    }

    /// 选出负载最低的候选
    pub fn pick(&self, candidates: Vec<Candidate>) -> Option<Candidate> {
        self.rank(candidates).into_iter().next()
    }

    fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        b.policy_satisfied
            .cmp(&a.policy_satisfied)
            .then_with(|| a.load.cmp(&b.load))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: usize, load: u32, policy_satisfied: bool) -> Candidate {
        Candidate {
            index,
            subject: Subject::English,
            policy_satisfied,
            load,
        }
    }

    #[test]
    fn test_lowest_load_wins() {
        let balancer = LoadBalancer::new();
        let picked = balancer
            .pick(vec![candidate(0, 5, true), candidate(1, 2, true), candidate(2, 3, true)])
            .unwrap();
        assert_eq!(picked.index, 1);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let balancer = LoadBalancer::new();
        let ranked = balancer.rank(vec![
            candidate(3, 1, true),
            candidate(0, 1, true),
            candidate(2, 0, true),
        ]);
        let order: Vec<usize> = ranked.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![2, 3, 0]);
    }

    #[test]
    fn test_policy_satisfied_ranks_first() {
        let balancer = LoadBalancer::new();
        let picked = balancer
            .pick(vec![candidate(0, 0, false), candidate(1, 9, true)])
            .unwrap();
        assert_eq!(picked.index, 1);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(LoadBalancer::new().pick(vec![]), None);
    }
}
