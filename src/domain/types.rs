// ==========================================
// 值班排班系统 - 领域类型定义
// ==========================================
// 红线: 日期只记录日/月，不含年份
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// 日/月日期 (DayMonth)
// ==========================================
// 序列化格式: "DD/MM" (与排班表一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayMonth {
    pub day: u32,
    pub month: u32,
}

/// 日期解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DayMonthParseError {
    #[error("日期格式错误: 期望 DD/MM，实际 {0}")]
    Format(String),

    #[error("日期超出范围: day={day}, month={month}")]
    OutOfRange { day: u32, month: u32 },
}

impl DayMonth {
    /// 构造日期（校验范围）
    pub fn new(day: u32, month: u32) -> Result<Self, DayMonthParseError> {
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
            return Err(DayMonthParseError::OutOfRange { day, month });
        }
        Ok(Self { day, month })
    }

    /// 数值编码: month*100 + day
    ///
    /// 排序与“相邻”判断都基于此编码，跨年时不回绕。
    pub fn order_key(&self) -> u32 {
        self.month * 100 + self.day
    }
}

impl Ord for DayMonth {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl PartialOrd for DayMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.day, self.month)
    }
}

impl FromStr for DayMonth {
    type Err = DayMonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (day, month) = trimmed
            .split_once('/')
            .ok_or_else(|| DayMonthParseError::Format(trimmed.to_string()))?;

        let day = day
            .trim()
            .parse::<u32>()
            .map_err(|_| DayMonthParseError::Format(trimmed.to_string()))?;
        let month = month
            .trim()
            .parse::<u32>()
            .map_err(|_| DayMonthParseError::Format(trimmed.to_string()))?;

        DayMonth::new(day, month)
    }
}

impl TryFrom<String> for DayMonth {
    type Error = DayMonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayMonth> for String {
    fn from(value: DayMonth) -> Self {
        value.to_string()
    }
}

// ==========================================
// 技能等级 (Skill Tier)
// ==========================================
// 只对分级岗位有意义（默认: audio_video）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTier {
    Experienced, // 熟练
    Training,    // 培训中
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillTier::Experienced => write!(f, "experienced"),
            SkillTier::Training => write!(f, "training"),
        }
    }
}

impl FromStr for SkillTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "experienced" | "experiente" => Ok(SkillTier::Experienced),
            "training" | "treinando" => Ok(SkillTier::Training),
            other => Err(format!("未知技能等级: {}", other)),
        }
    }
}

// ==========================================
// 排班表状态 (Schedule Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Draft,     // 草稿
    Published, // 已发布
    Archived,  // 已归档
}

impl Default for ScheduleStatus {
    fn default() -> Self {
        ScheduleStatus::Draft
    }
}

impl ScheduleStatus {
    /// 状态流转: DRAFT -> PUBLISHED -> ARCHIVED；草稿也可直接归档
    pub fn can_transition_to(self, next: ScheduleStatus) -> bool {
        matches!(
            (self, next),
            (ScheduleStatus::Draft, ScheduleStatus::Published)
                | (ScheduleStatus::Draft, ScheduleStatus::Archived)
                | (ScheduleStatus::Published, ScheduleStatus::Archived)
        )
    }

    /// 只有草稿允许重新生成指派
    pub fn is_editable(self) -> bool {
        self == ScheduleStatus::Draft
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Draft => write!(f, "DRAFT"),
            ScheduleStatus::Published => write!(f, "PUBLISHED"),
            ScheduleStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}
