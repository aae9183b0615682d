// ==========================================
// 值班排班系统 - 候选人选择
// ==========================================
// 职责: 单个席位的候选过滤与排序
// 输入: 候选池 + 日期 + 已选席位1 + 运行状态
// 输出: 选中的志愿者（可能为空）
// ==========================================
// 管线顺序（不可调换）:
// 1) 排除席位1已选者
// 2) 不可用日期过滤
// 3) 防重复过滤（全部被过滤时回退）
// 4) 覆盖优先（未指派者优先）
// 5) 次数升序（稳定排序）
// 6) 取第一个
// ==========================================

use crate::config::policy::{AssignmentPolicy, RepetitionWindow};
use crate::domain::types::DayMonth;
use crate::domain::volunteer::Volunteer;
use crate::engine::run_state::RunState;
use tracing::{debug, info};

/// 单次选择请求
#[derive(Debug, Clone, Copy)]
pub struct SeatRequest<'a> {
    pub role: &'a str,
    pub date: DayMonth,
    pub exclude: Option<&'a str>,
}

/// 单次选择结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub picked: Option<String>,
    /// 防重复过滤是否回退到未过滤集合
    pub repetition_fallback: bool,
}

// ==========================================
// CandidateSelector - 候选人选择器
// ==========================================
pub struct CandidateSelector<'c> {
    policy: &'c AssignmentPolicy,
    window: &'c RepetitionWindow,
}

impl<'c> CandidateSelector<'c> {
    pub fn new(policy: &'c AssignmentPolicy, window: &'c RepetitionWindow) -> Self {
        Self { policy, window }
    }

    /// 为一个席位选人
    ///
    /// # 参数
    /// - `pool`: 候选池（保持名册顺序）
    /// - `request`: 岗位、日期、需排除的席位1人选
    /// - `state`: 运行状态（只读）
    pub fn select<'v>(
        &self,
        pool: &[&'v Volunteer],
        request: SeatRequest<'_>,
        state: &RunState,
    ) -> Selection {
        // 1-2) 硬过滤
        let candidates: Vec<&'v Volunteer> = pool
            .iter()
            .copied()
            .filter(|v| request.exclude != Some(v.name.as_str()))
            .filter(|v| !(self.policy.respect_unavailability && v.is_unavailable_on(request.date)))
            .collect();

        if candidates.is_empty() {
            debug!(
                role = request.role,
                date = %request.date,
                "无可用候选人，席位留空"
            );
            return Selection::default();
        }

        // 3) 防重复（严格优先，必要时回退）
        let (candidates, repetition_fallback) = if self.policy.avoid_back_to_back {
            self.filter_repetition(candidates, request, state)
        } else {
            (candidates, false)
        };

        // 4) 覆盖优先
        let mut candidates = if self.policy.coverage_guarantee {
            Self::prefer_unassigned(candidates, request.role, state)
        } else {
            candidates
        };

        // 5) 次数升序
        if self.policy.fair_distribution {
            candidates.sort_by_key(|v| state.count(&v.name));
        }

        // 6) 取第一个
        Selection {
            picked: candidates.first().map(|v| v.name.clone()),
            repetition_fallback,
        }
    }

    fn filter_repetition<'v>(
        &self,
        candidates: Vec<&'v Volunteer>,
        request: SeatRequest<'_>,
        state: &RunState,
    ) -> (Vec<&'v Volunteer>, bool) {
        let strict: Vec<&'v Volunteer> = candidates
            .iter()
            .copied()
            .filter(|v| match state.last_assigned(&v.name) {
                Some(last) => !self.window.is_near(last, request.date),
                None => true,
            })
            .collect();

        if strict.is_empty() {
            info!(
                role = request.role,
                date = %request.date,
                candidates = candidates.len(),
                "所有候选人均在防重复窗口内，回退使用全部可用候选人"
            );
            (candidates, true)
        } else {
            (strict, false)
        }
    }

    fn prefer_unassigned<'v>(
        candidates: Vec<&'v Volunteer>,
        role: &str,
        state: &RunState,
    ) -> Vec<&'v Volunteer> {
        let fresh: Vec<&'v Volunteer> = candidates
            .iter()
            .copied()
            .filter(|v| state.is_unassigned(role, &v.name))
            .collect();

        if fresh.is_empty() {
            candidates
        } else {
            fresh
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const ROLE: &str = "attendant";

    fn dm(day: u32, month: u32) -> DayMonth {
        DayMonth::new(day, month).unwrap()
    }

    fn state_for(pool: &[&Volunteer]) -> RunState {
        let mut pools = BTreeMap::new();
        pools.insert(ROLE.to_string(), pool.to_vec());
        RunState::new(&pools)
    }

    fn request(date: DayMonth, exclude: Option<&str>) -> SeatRequest<'_> {
        SeatRequest {
            role: ROLE,
            date,
            exclude,
        }
    }

    #[test]
    fn test_excludes_first_seat() {
        let a = Volunteer::new("A").with_role(ROLE);
        let b = Volunteer::new("B").with_role(ROLE);
        let pool = vec![&a, &b];
        let state = state_for(&pool);
        let policy = AssignmentPolicy::default();
        let window = RepetitionWindow::default();
        let selector = CandidateSelector::new(&policy, &window);

        let selection = selector.select(&pool, request(dm(4, 1), Some("A")), &state);
        assert_eq!(selection.picked.as_deref(), Some("B"));
    }

    #[test]
    fn test_unavailability_filter_can_empty_seat() {
        let date = dm(4, 1);
        let a = Volunteer::new("A").with_role(ROLE).unavailable_on(date);
        let pool = vec![&a];
        let state = state_for(&pool);
        let policy = AssignmentPolicy::default();
        let window = RepetitionWindow::default();
        let selector = CandidateSelector::new(&policy, &window);

        assert_eq!(selector.select(&pool, request(date, None), &state), Selection::default());

        let relaxed = AssignmentPolicy {
            respect_unavailability: false,
            ..AssignmentPolicy::default()
        };
        let selector = CandidateSelector::new(&relaxed, &window);
        let selection = selector.select(&pool, request(date, None), &state);
        assert_eq!(selection.picked.as_deref(), Some("A"));
    }

    #[test]
    fn test_repetition_prefers_rested_candidate() {
        let a = Volunteer::new("A").with_role(ROLE);
        let b = Volunteer::new("B").with_role(ROLE);
        let pool = vec![&a, &b];
        let mut state = state_for(&pool);
        state.record(ROLE, "A", dm(1, 1));
        state.record(ROLE, "B", dm(1, 1));
        state.record(ROLE, "B", dm(20, 1));

        let policy = AssignmentPolicy::default();
        let window = RepetitionWindow::default();
        let selector = CandidateSelector::new(&policy, &window);

        // B 次数更多但 A 在窗口内
        let selection = selector.select(&pool, request(dm(3, 1), None), &state);
        assert_eq!(selection.picked.as_deref(), Some("B"));
        assert!(!selection.repetition_fallback);
    }

    #[test]
    fn test_repetition_falls_back_when_everyone_is_near() {
        let a = Volunteer::new("A").with_role(ROLE);
        let b = Volunteer::new("B").with_role(ROLE);
        let pool = vec![&a, &b];
        let mut state = state_for(&pool);
        state.record(ROLE, "A", dm(1, 1));
        state.record(ROLE, "B", dm(1, 1));
        state.record(ROLE, "B", dm(2, 1));

        let policy = AssignmentPolicy::default();
        let window = RepetitionWindow::default();
        let selector = CandidateSelector::new(&policy, &window);

        let selection = selector.select(&pool, request(dm(3, 1), None), &state);
        assert!(selection.repetition_fallback);
        assert_eq!(selection.picked.as_deref(), Some("A"));
    }

    #[test]
    fn test_coverage_prefers_unassigned_over_fair_order() {
        let a = Volunteer::new("A").with_role(ROLE);
        let b = Volunteer::new("B").with_role(ROLE);
        let pool = vec![&a, &b];
        let mut state = state_for(&pool);
        // B 在其他岗位已有两次，但在本岗位仍未指派
        state.record("roving_mic", "B", dm(1, 1));
        state.record("roving_mic", "B", dm(10, 1));
        state.record(ROLE, "A", dm(1, 1));

        let policy = AssignmentPolicy {
            avoid_back_to_back: false,
            ..AssignmentPolicy::default()
        };
        let window = RepetitionWindow::default();
        let selector = CandidateSelector::new(&policy, &window);

        let selection = selector.select(&pool, request(dm(20, 1), None), &state);
        assert_eq!(selection.picked.as_deref(), Some("B"));

        let no_coverage = AssignmentPolicy {
            coverage_guarantee: false,
            ..policy
        };
        let selector = CandidateSelector::new(&no_coverage, &window);
        let selection = selector.select(&pool, request(dm(20, 1), None), &state);
        assert_eq!(selection.picked.as_deref(), Some("A"));
    }

    #[test]
    fn test_without_fair_distribution_keeps_roster_order() {
        let a = Volunteer::new("A").with_role(ROLE);
        let b = Volunteer::new("B").with_role(ROLE);
        let pool = vec![&a, &b];
        let mut state = state_for(&pool);
        state.record(ROLE, "A", dm(1, 1));
        state.record(ROLE, "A", dm(8, 1));

        let policy = AssignmentPolicy::none();
        let window = RepetitionWindow::default();
        let selector = CandidateSelector::new(&policy, &window);

        let selection = selector.select(&pool, request(dm(9, 1), None), &state);
        assert_eq!(selection.picked.as_deref(), Some("A"));
    }
}
