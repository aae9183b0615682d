// ==========================================
// 值班排班系统 - 值班岗位 / 排班表领域模型
// ==========================================
// 职责: 定义 Slot（日期+岗位，两个席位）与 ScheduleInstance（月度排班表）
// 红线: 引擎只写入 first/second 两个席位字段
// ==========================================

use crate::domain::types::{DayMonth, ScheduleStatus};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// Seat - 席位
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    First,
    Second,
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::First => write!(f, "first"),
            Seat::Second => write!(f, "second"),
        }
    }
}

// ==========================================
// Slot - 值班岗位
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub schedule_id: Uuid,
    pub date: DayMonth,
    pub weekday: String, // 星期标签（如 Sunday / Thursday）
    pub role: String,
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub second: Option<String>,
}

impl Slot {
    /// 创建空岗位
    pub fn new(
        schedule_id: Uuid,
        date: DayMonth,
        weekday: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            schedule_id,
            date,
            weekday: weekday.into(),
            role: role.into(),
            first: None,
            second: None,
        }
    }

    pub fn seat(&self, seat: Seat) -> Option<&str> {
        match seat {
            Seat::First => self.first.as_deref(),
            Seat::Second => self.second.as_deref(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// 已指派人员（按席位顺序）
    pub fn assignees(&self) -> impl Iterator<Item = &str> {
        self.first.as_deref().into_iter().chain(self.second.as_deref())
    }

    pub fn empty_seats(&self) -> Vec<Seat> {
        [Seat::First, Seat::Second]
            .into_iter()
            .filter(|seat| self.seat(*seat).is_none())
            .collect()
    }

    pub fn clear(&mut self) {
        self.first = None;
        self.second = None;
    }
}

// ==========================================
// ScheduleInstance - 月度排班表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInstance {
    pub id: Uuid,
    pub month: u32,
    pub year: i32,
    pub title: String,
    pub status: ScheduleStatus,
    pub created_at: chrono::DateTime<Utc>,
}

const MONTH_NAMES: [&str; 12] = [
    "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE", "JULY", "AUGUST", "SEPTEMBER",
    "OCTOBER", "NOVEMBER", "DECEMBER",
];

impl ScheduleInstance {
    /// 创建草稿排班表
    ///
    /// # 参数
    /// - `month`: 月份（1..=12，由调用方校验）
    /// - `year`: 年份
    pub fn new(month: u32, year: i32) -> Self {
        let month_name = month
            .checked_sub(1)
            .and_then(|idx| MONTH_NAMES.get(idx as usize))
            .copied()
            .unwrap_or("UNKNOWN");

        Self {
            id: Uuid::new_v4(),
            month,
            year,
            title: format!("Duty Roster {} {}", month_name, year),
            status: ScheduleStatus::Draft,
            created_at: Utc::now(),
        }
    }
}
