// ==========================================
// 值班排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod slot;
pub mod types;
pub mod volunteer;

// 重导出核心类型
pub use slot::{ScheduleInstance, Seat, Slot};
pub use types::{DayMonth, DayMonthParseError, ScheduleStatus, SkillTier};
pub use volunteer::Volunteer;
