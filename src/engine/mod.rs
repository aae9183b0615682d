// ==========================================
// 值班排班系统 - 引擎层
// ==========================================
// 职责: 自动指派、岗位模板、指派统计
// 红线: Engine 不做 I/O，无候选不是错误
// ==========================================

pub mod assigner;
pub mod candidate;
pub mod run_state;
pub mod statistics;
pub mod template;

// 重导出核心引擎
pub use assigner::{AssignmentEngine, AssignmentReport, UnfilledSeat};
pub use candidate::{CandidateSelector, SeatRequest, Selection};
pub use run_state::RunState;
pub use statistics::AssignmentStatistics;
pub use template::{weekday_label, SlotTemplateGenerator, TemplateError};
