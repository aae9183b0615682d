// ==========================================
// 值班排班系统 - 指派策略开关
// ==========================================
// 职责: 指派规则开关 + 防重复窗口定义
// 默认: 全部开关为 true
// ==========================================

use crate::domain::types::DayMonth;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

// ==========================================
// AssignmentPolicy - 指派规则开关
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPolicy {
    /// 不在不可用日期指派
    #[serde(default = "default_true", alias = "respectUnavailability")]
    pub respect_unavailability: bool,

    /// 避免相邻日期重复指派
    #[serde(default = "default_true", alias = "avoidBackToBack")]
    pub avoid_back_to_back: bool,

    /// 优先指派次数较少者
    #[serde(default = "default_true", alias = "fairDistribution")]
    pub fair_distribution: bool,

    /// 同岗位内优先指派尚未指派者
    #[serde(default = "default_true", alias = "coverageGuarantee")]
    pub coverage_guarantee: bool,

    /// 分级岗位按技能等级选人
    #[serde(default = "default_true", alias = "tieredRoleRule")]
    pub tiered_role_rule: bool,
}

impl Default for AssignmentPolicy {
    fn default() -> Self {
        Self {
            respect_unavailability: true,
            avoid_back_to_back: true,
            fair_distribution: true,
            coverage_guarantee: true,
            tiered_role_rule: true,
        }
    }
}

impl AssignmentPolicy {
    /// 全部关闭（测试/对比用）
    pub fn none() -> Self {
        Self {
            respect_unavailability: false,
            avoid_back_to_back: false,
            fair_distribution: false,
            coverage_guarantee: false,
            tiered_role_rule: false,
        }
    }
}

// ==========================================
// NearnessMode - 相邻判定方式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NearnessMode {
    /// |(month*100+day) 差值| <= days，跨月/跨年不回绕
    NumericEncoding,
    /// 按日历天数计算（闰年参考年，跨年回绕）
    Calendar,
}

impl Default for NearnessMode {
    fn default() -> Self {
        NearnessMode::NumericEncoding
    }
}

// ==========================================
// RepetitionWindow - 防重复窗口
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepetitionWindow {
    #[serde(default = "default_window_days")]
    pub days: u32,
    #[serde(default)]
    pub mode: NearnessMode,
}

fn default_window_days() -> u32 {
    4
}

impl Default for RepetitionWindow {
    fn default() -> Self {
        Self {
            days: default_window_days(),
            mode: NearnessMode::default(),
        }
    }
}

// 闰年参考年，保证 29/02 可表示
const REFERENCE_LEAP_YEAR: i32 = 2000;
const REFERENCE_YEAR_DAYS: u32 = 366;

impl RepetitionWindow {
    /// 判断两个日期是否“相邻”
    pub fn is_near(&self, last: DayMonth, target: DayMonth) -> bool {
        match self.mode {
            NearnessMode::NumericEncoding => numeric_distance(last, target) <= self.days,
            NearnessMode::Calendar => match (ordinal(last), ordinal(target)) {
                (Some(a), Some(b)) => {
                    let diff = a.abs_diff(b);
                    diff.min(REFERENCE_YEAR_DAYS - diff) <= self.days
                }
                // 非法日历日期（如 31/02）退回数值编码
                _ => numeric_distance(last, target) <= self.days,
            },
        }
    }
}

fn numeric_distance(a: DayMonth, b: DayMonth) -> u32 {
    a.order_key().abs_diff(b.order_key())
}

fn ordinal(date: DayMonth) -> Option<u32> {
    NaiveDate::from_ymd_opt(REFERENCE_LEAP_YEAR, date.month, date.day).map(|d| d.ordinal())
}
