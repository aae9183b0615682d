// ==========================================
// 值班排班系统 - 数据仓储层
// ==========================================
// 职责: 名册与排班表的数据访问接口
// 说明: 持久化由外部实现，这里只提供 trait 与内存实现
// ==========================================

pub mod error;
pub mod roster_repo;
pub mod schedule_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use roster_repo::{InMemoryRosterRepository, RosterRepository};
pub use schedule_repo::{InMemoryScheduleRepository, ScheduleRepository};
