// ==========================================
// 值班排班系统 - 月度岗位模板
// ==========================================
// 职责: 按月份生成空岗位（聚会日 × 岗位）
// 输出: 按日期升序、同日按岗位配置顺序的空岗位
// ==========================================

use crate::domain::slot::Slot;
use crate::domain::types::DayMonth;
use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("无效的月份/年份: month={month}, year={year}")]
    InvalidMonth { month: u32, year: i32 },
}

/// 星期标签（英文全称）
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ==========================================
// SlotTemplateGenerator - 岗位模板生成器
// ==========================================
pub struct SlotTemplateGenerator<'a> {
    roles: &'a [String],
    meeting_days: &'a [String],
}

impl<'a> SlotTemplateGenerator<'a> {
    pub fn new(roles: &'a [String], meeting_days: &'a [String]) -> Self {
        Self {
            roles,
            meeting_days,
        }
    }

    /// 生成某月的空岗位
    ///
    /// # 参数
    /// - `schedule_id`: 所属排班表
    /// - `month`: 月份（1..=12）
    /// - `year`: 年份（决定每天是星期几）
    pub fn generate(&self, schedule_id: Uuid, month: u32, year: i32) -> Result<Vec<Slot>, TemplateError> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(TemplateError::InvalidMonth { month, year })?;

        let mut slots = Vec::new();
        let days = first_day
            .iter_days()
            .take_while(|d| d.month() == month && d.year() == year);

        for date in days {
            let label = weekday_label(date.weekday());
            if !self.meeting_days.iter().any(|d| d == label) {
                continue;
            }

            let day_month = DayMonth {
                day: date.day(),
                month,
            };
            for role in self.roles {
                slots.push(Slot::new(schedule_id, day_month, label, role.clone()));
            }
        }

        Ok(slots)
    }
}
