// ==========================================
// 值班排班系统 - 核心库
// ==========================================
// 系统定位: 月度值班表自动指派（人工最终确认）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 规则开关与分级岗位
pub mod config;

// 引擎层 - 自动指派
pub mod engine;

// 导入层 - 名册 / 岗位文件
pub mod importer;

// 数据仓储层 - 外部协作方接口
pub mod repository;

// API 层 - 编排
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{AssignmentPolicy, ConfigManager, EngineConfig, NearnessMode, TieringConfig};
pub use domain::{DayMonth, ScheduleInstance, ScheduleStatus, Seat, SkillTier, Slot, Volunteer};
pub use engine::{AssignmentEngine, AssignmentReport, AssignmentStatistics, SlotTemplateGenerator};
pub use api::{ApiError, ScheduleApi, ScheduleOutcome};

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "值班排班系统";
