// ==========================================
// 值班排班系统 - API 层
// ==========================================
// 职责: 编排仓储与引擎（创建排班表、重新生成、统计）
// ==========================================

pub mod error;
pub mod schedule_api;

pub use error::{ApiError, ApiResult};
pub use schedule_api::{ScheduleApi, ScheduleOutcome};
