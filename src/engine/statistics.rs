// ==========================================
// 值班排班系统 - 指派统计
// ==========================================
// 职责: 从已填写的岗位汇总每人次数、各岗位未覆盖人员、空席位数
// 红线: 只读，不修改岗位
// ==========================================

use crate::domain::slot::Slot;
use crate::domain::volunteer::Volunteer;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentStatistics {
    /// 每人指派次数（在岗志愿者即使为 0 也列出）
    pub counts: BTreeMap<String, u32>,
    /// 岗位 -> 具备资格但本月未指派的志愿者
    pub uncovered_by_role: BTreeMap<String, Vec<String>>,
    pub unfilled_seats: usize,
    pub unfilled_slots: usize,
}

impl AssignmentStatistics {
    pub fn from_slots(slots: &[Slot], roster: &[Volunteer]) -> Self {
        let mut counts: BTreeMap<String, u32> = roster
            .iter()
            .filter(|v| v.active)
            .map(|v| (v.name.clone(), 0))
            .collect();

        let mut served: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut unfilled_seats = 0;
        let mut unfilled_slots = 0;

        for slot in slots {
            let empty = slot.empty_seats().len();
            unfilled_seats += empty;
            if empty > 0 {
                unfilled_slots += 1;
            }

            let role_served = served.entry(slot.role.as_str()).or_default();
            for name in slot.assignees() {
                *counts.entry(name.to_string()).or_insert(0) += 1;
                role_served.insert(name);
            }
        }

        let uncovered_by_role = served
            .iter()
            .map(|(role, names)| {
                let missing: Vec<String> = roster
                    .iter()
                    .filter(|v| v.active && v.is_qualified_for(role))
                    .filter(|v| !names.contains(v.name.as_str()))
                    .map(|v| v.name.clone())
                    .collect();
                (role.to_string(), missing)
            })
            .collect();

        Self {
            counts,
            uncovered_by_role,
            unfilled_seats,
            unfilled_slots,
        }
    }

    /// 次数差（最大 - 最小），只统计给定姓名
    pub fn spread<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> u32 {
        let values: Vec<u32> = names
            .into_iter()
            .map(|n| self.counts.get(n).copied().unwrap_or(0))
            .collect();
        match (values.iter().max(), values.iter().min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DayMonth;
    use uuid::Uuid;

    #[test]
    fn test_counts_and_uncovered() {
        let roster = vec![
            Volunteer::new("A").with_role("attendant"),
            Volunteer::new("B").with_role("attendant"),
            Volunteer::new("C").with_role("attendant"),
            Volunteer::new("Z").with_role("attendant").inactive(),
        ];

        let mut s1 = Slot::new(Uuid::nil(), DayMonth::new(4, 1).unwrap(), "Sunday", "attendant");
        s1.first = Some("A".to_string());
        s1.second = Some("B".to_string());
        let mut s2 = Slot::new(Uuid::nil(), DayMonth::new(8, 1).unwrap(), "Thursday", "attendant");
        s2.first = Some("A".to_string());

        let stats = AssignmentStatistics::from_slots(&[s1, s2], &roster);

        assert_eq!(stats.counts.get("A"), Some(&2));
        assert_eq!(stats.counts.get("C"), Some(&0));
        assert!(!stats.counts.contains_key("Z"));
        assert_eq!(stats.uncovered_by_role.get("attendant"), Some(&vec!["C".to_string()]));
        assert_eq!(stats.unfilled_seats, 1);
        assert_eq!(stats.unfilled_slots, 1);
        assert_eq!(stats.spread(["A", "B", "C"]), 2);
    }
}
