// ==========================================
// 值班排班系统 - 志愿者领域模型
// ==========================================
// 职责: 志愿者身份、岗位资格、技能等级、不可用日期
// 红线: 引擎只读，不修改志愿者数据
// ==========================================

use crate::domain::types::{DayMonth, SkillTier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// Volunteer - 志愿者
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub name: String, // 名册内唯一
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub roles: BTreeSet<String>, // 岗位资格
    #[serde(default)]
    pub skill_tiers: BTreeMap<String, SkillTier>, // 岗位 -> 技能等级
    #[serde(default)]
    pub unavailable_dates: BTreeSet<DayMonth>, // 不可用日期（不含年份）
}

fn default_active() -> bool {
    true
}

impl Volunteer {
    /// 创建在岗志愿者（无岗位、无等级、无不可用日期）
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            roles: BTreeSet::new(),
            skill_tiers: BTreeMap::new(),
            unavailable_dates: BTreeSet::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn with_tier(mut self, role: impl Into<String>, tier: SkillTier) -> Self {
        self.skill_tiers.insert(role.into(), tier);
        self
    }

    pub fn unavailable_on(mut self, date: DayMonth) -> Self {
        self.unavailable_dates.insert(date);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// 是否具备岗位资格
    ///
    /// 记录了某岗位技能等级的志愿者，隐含具备该岗位资格。
    pub fn is_qualified_for(&self, role: &str) -> bool {
        self.roles.contains(role) || self.skill_tiers.contains_key(role)
    }

    pub fn tier_for(&self, role: &str) -> Option<SkillTier> {
        self.skill_tiers.get(role).copied()
    }

    pub fn is_unavailable_on(&self, date: DayMonth) -> bool {
        self.unavailable_dates.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_implies_qualification() {
        let v = Volunteer::new("Ricardo").with_tier("audio_video", SkillTier::Experienced);
        assert!(v.is_qualified_for("audio_video"));
        assert!(!v.is_qualified_for("attendant"));
        assert_eq!(v.tier_for("audio_video"), Some(SkillTier::Experienced));
    }

    #[test]
    fn test_unavailable_on() {
        let date = DayMonth::new(11, 1).unwrap();
        let v = Volunteer::new("Edgar").with_role("attendant").unavailable_on(date);
        assert!(v.is_unavailable_on(date));
        assert!(!v.is_unavailable_on(DayMonth::new(18, 1).unwrap()));
    }

    #[test]
    fn test_deserialize_defaults() {
        let v: Volunteer = serde_json::from_str(r#"{"name":"Ivo","roles":["roving_mic"]}"#).unwrap();
        assert!(v.active);
        assert!(v.skill_tiers.is_empty());
        assert!(v.is_qualified_for("roving_mic"));
    }
}
