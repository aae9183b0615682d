// ==========================================
// 值班排班系统 - 指派运行状态
// ==========================================
// 职责: 单次指派运行内的计数、最近指派日期、未指派集合
// 红线: 每次运行新建，运行结束即丢弃，不跨运行共享
// ==========================================

use crate::domain::types::DayMonth;
use crate::domain::volunteer::Volunteer;
use std::collections::{BTreeMap, HashMap, HashSet};

// ==========================================
// RunState - 运行状态
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RunState {
    counts: HashMap<String, u32>,
    last_assigned: HashMap<String, DayMonth>,
    unassigned: HashMap<String, HashSet<String>>,
}

impl RunState {
    /// 根据岗位候选池初始化
    ///
    /// # 参数
    /// - `pools`: 岗位 -> 该岗位的在岗且具备资格的志愿者
    pub fn new(pools: &BTreeMap<String, Vec<&Volunteer>>) -> Self {
        let mut counts = HashMap::new();
        let mut unassigned = HashMap::new();

        for (role, pool) in pools {
            let names: HashSet<String> = pool.iter().map(|v| v.name.clone()).collect();
            for name in &names {
                counts.entry(name.clone()).or_insert(0);
            }
            unassigned.insert(role.clone(), names);
        }

        Self {
            counts,
            last_assigned: HashMap::new(),
            unassigned,
        }
    }

    /// 本次运行中的指派次数（跨岗位累计）
    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn last_assigned(&self, name: &str) -> Option<DayMonth> {
        self.last_assigned.get(name).copied()
    }

    /// 是否仍在该岗位的“未指派”集合中
    pub fn is_unassigned(&self, role: &str, name: &str) -> bool {
        self.unassigned
            .get(role)
            .map(|names| names.contains(name))
            .unwrap_or(false)
    }

    pub fn unassigned_in(&self, role: &str) -> usize {
        self.unassigned.get(role).map(HashSet::len).unwrap_or(0)
    }

    /// 记录一次指派
    pub fn record(&mut self, role: &str, name: &str, date: DayMonth) {
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
        self.last_assigned.insert(name.to_string(), date);
        if let Some(names) = self.unassigned.get_mut(role) {
            names.remove(name);
        }
    }

    /// 导出计数快照（按姓名排序）
    pub fn counts_snapshot(&self) -> BTreeMap<String, u32> {
        self.counts
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect()
    }
}
