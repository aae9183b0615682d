// ==========================================
// 值班排班系统 - 分级岗位配置
// ==========================================
// 结构: 岗位 -> { 星期标签 -> (席位1等级偏好, 席位2等级偏好) }
// 未列出的岗位/星期: 不分级
// ==========================================

use crate::domain::slot::Seat;
use crate::domain::types::SkillTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 默认分级岗位
pub const AUDIO_VIDEO_ROLE: &str = "audio_video";
/// 周中聚会标签
pub const MIDWEEK_LABEL: &str = "Thursday";
/// 周末聚会标签
pub const WEEKEND_LABEL: &str = "Sunday";

// ==========================================
// TierPreference - 单个星期的席位等级偏好
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierPreference {
    #[serde(default)]
    pub first: Option<SkillTier>,
    #[serde(default)]
    pub second: Option<SkillTier>,
}

impl TierPreference {
    pub fn new(first: Option<SkillTier>, second: Option<SkillTier>) -> Self {
        Self { first, second }
    }

    pub fn for_seat(&self, seat: Seat) -> Option<SkillTier> {
        match seat {
            Seat::First => self.first,
            Seat::Second => self.second,
        }
    }
}

// ==========================================
// TieringConfig - 分级岗位规则表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TieringConfig {
    pub rules: BTreeMap<String, BTreeMap<String, TierPreference>>,
}

impl Default for TieringConfig {
    /// 默认规则：
    /// - 周四: 两名培训中
    /// - 周日: 一名熟练 + 一名培训中
    fn default() -> Self {
        let mut weekdays = BTreeMap::new();
        weekdays.insert(
            MIDWEEK_LABEL.to_string(),
            TierPreference::new(Some(SkillTier::Training), Some(SkillTier::Training)),
        );
        weekdays.insert(
            WEEKEND_LABEL.to_string(),
            TierPreference::new(Some(SkillTier::Experienced), Some(SkillTier::Training)),
        );

        let mut rules = BTreeMap::new();
        rules.insert(AUDIO_VIDEO_ROLE.to_string(), weekdays);
        Self { rules }
    }
}

impl TieringConfig {
    /// 查询岗位+星期的等级偏好；None 表示不分级
    pub fn preference(&self, role: &str, weekday: &str) -> Option<TierPreference> {
        self.rules.get(role)?.get(weekday).copied()
    }

    pub fn is_tiered_role(&self, role: &str) -> bool {
        self.rules.contains_key(role)
    }
}
