// ==========================================
// 值班排班系统 - 自动指派引擎
// ==========================================
// 职责: 为一个月的空岗位指派两名志愿者
// 输入: 空岗位列表 + 名册 + 配置
// 输出: 填写席位后的岗位 + 指派报告
// ==========================================
// 红线: 单次遍历、不回溯；无候选不是错误，席位留空并计入报告
// 红线: 无 I/O，运行状态每次新建
// ==========================================

use crate::config::EngineConfig;
use crate::domain::slot::{Seat, Slot};
use crate::domain::types::{DayMonth, SkillTier};
use crate::domain::volunteer::Volunteer;
use crate::engine::candidate::{CandidateSelector, SeatRequest};
use crate::engine::run_state::RunState;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument, warn};

// ==========================================
// AssignmentReport - 指派报告
// ==========================================

/// 未能填写的席位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfilledSeat {
    pub date: DayMonth,
    pub role: String,
    pub seat: Seat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentReport {
    pub slots_processed: usize,
    pub seats_filled: usize,
    pub unfilled: Vec<UnfilledSeat>,
    /// 防重复过滤回退次数
    pub repetition_fallbacks: usize,
    /// 候选池为空（无人具备资格）的岗位
    pub empty_pool_roles: BTreeSet<String>,
    /// 本次运行的指派次数
    pub assignment_counts: BTreeMap<String, u32>,
}

impl AssignmentReport {
    /// 至少有一个空席位的岗位数
    pub fn unfilled_slot_count(&self) -> usize {
        self.unfilled
            .iter()
            .map(|u| (u.date, u.role.as_str()))
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn is_complete(&self) -> bool {
        self.unfilled.is_empty()
    }
}

// ==========================================
// AssignmentEngine - 自动指派引擎
// ==========================================
pub struct AssignmentEngine {
    config: EngineConfig,
}

impl AssignmentEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - `config`: 引擎配置（规则开关 / 防重复窗口 / 分级岗位）
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成指派
    ///
    /// 规则：
    /// 1) 按日期升序（month*100+day）处理，同日期保持输入顺序
    /// 2) 每个岗位先选席位1再选席位2
    /// 3) 分级岗位按星期标签选用技能等级子集，子集为空时回退全池
    ///
    /// # 参数
    /// - `slots`: 同一排班表的岗位（席位会被写入）
    /// - `roster`: 名册（只读）
    ///
    /// # 返回
    /// 指派报告
    #[instrument(skip_all, fields(slots_count = slots.len(), roster_count = roster.len()))]
    pub fn generate_assignments(&self, slots: &mut [Slot], roster: &[Volunteer]) -> AssignmentReport {
        let mut report = AssignmentReport::default();

        if let Some(first) = slots.first() {
            let schedule_id = first.schedule_id;
            if slots.iter().any(|s| s.schedule_id != schedule_id) {
                warn!(%schedule_id, "岗位来自多个排班表，仍按单次运行处理");
            }
        }

        let pools = build_pools(slots, roster);
        for (role, pool) in &pools {
            if pool.is_empty() {
                report.empty_pool_roles.insert(role.clone());
            }
        }

        let mut state = RunState::new(&pools);
        let selector = CandidateSelector::new(&self.config.policy, &self.config.repetition_window);

        for (date, indices) in group_by_date(slots) {
            debug!(date = %date, slots = indices.len(), "处理日期");

            for idx in indices {
                let slot = &mut slots[idx];
                report.slots_processed += 1;

                let pool = pools.get(&slot.role).map(Vec::as_slice).unwrap_or(&[]);
                if pool.is_empty() {
                    debug!(date = %slot.date, role = %slot.role, "岗位无候选池，跳过");
                    for seat in [Seat::First, Seat::Second] {
                        report.unfilled.push(UnfilledSeat {
                            date: slot.date,
                            role: slot.role.clone(),
                            seat,
                        });
                    }
                    continue;
                }

                let mut picks: [Option<String>; 2] = [None, None];
                for (pos, seat) in [Seat::First, Seat::Second].into_iter().enumerate() {
                    let tier = self.seat_tier(slot, seat);
                    let seat_pool = tier_subset(pool, &slot.role, tier);
                    let request = SeatRequest {
                        role: &slot.role,
                        date: slot.date,
                        exclude: picks[0].as_deref(),
                    };

                    let selection = selector.select(&seat_pool, request, &state);
                    if selection.repetition_fallback {
                        report.repetition_fallbacks += 1;
                    }

                    match selection.picked {
                        Some(name) => {
                            state.record(&slot.role, &name, slot.date);
                            report.seats_filled += 1;
                            picks[pos] = Some(name);
                        }
                        None => report.unfilled.push(UnfilledSeat {
                            date: slot.date,
                            role: slot.role.clone(),
                            seat,
                        }),
                    }
                }

                let [first, second] = picks;
                if first.is_some() || second.is_some() {
                    slot.first = first;
                    slot.second = second;
                }
            }
        }

        report.assignment_counts = state.counts_snapshot();

        info!(
            slots_processed = report.slots_processed,
            seats_filled = report.seats_filled,
            unfilled_seats = report.unfilled.len(),
            repetition_fallbacks = report.repetition_fallbacks,
            "自动指派完成"
        );

        report
    }

    /// 席位的技能等级偏好（未启用分级或未配置时为 None）
    fn seat_tier(&self, slot: &Slot, seat: Seat) -> Option<SkillTier> {
        if !self.config.policy.tiered_role_rule {
            return None;
        }
        self.config
            .tiering
            .preference(&slot.role, &slot.weekday)
            .and_then(|pref| pref.for_seat(seat))
    }
}

/// 每个岗位的候选池：在岗且具备资格，保持名册顺序
fn build_pools<'v>(slots: &[Slot], roster: &'v [Volunteer]) -> BTreeMap<String, Vec<&'v Volunteer>> {
    let mut pools = BTreeMap::new();
    for slot in slots {
        if pools.contains_key(&slot.role) {
            continue;
        }
        let pool: Vec<&Volunteer> = roster
            .iter()
            .filter(|v| v.active && v.is_qualified_for(&slot.role))
            .collect();
        pools.insert(slot.role.clone(), pool);
    }
    pools
}

/// 按日期分组，组内保持输入顺序
fn group_by_date(slots: &[Slot]) -> BTreeMap<DayMonth, Vec<usize>> {
    let mut grouped: BTreeMap<DayMonth, Vec<usize>> = BTreeMap::new();
    for (idx, slot) in slots.iter().enumerate() {
        grouped.entry(slot.date).or_default().push(idx);
    }
    grouped
}

/// 技能等级子集；子集为空时回退全池
fn tier_subset<'v>(pool: &[&'v Volunteer], role: &str, tier: Option<SkillTier>) -> Vec<&'v Volunteer> {
    let Some(tier) = tier else {
        return pool.to_vec();
    };

    let subset: Vec<&'v Volunteer> = pool
        .iter()
        .copied()
        .filter(|v| v.tier_for(role) == Some(tier))
        .collect();

    if subset.is_empty() {
        debug!(role, %tier, "技能等级子集为空，回退全池");
        pool.to_vec()
    } else {
        subset
    }
}
