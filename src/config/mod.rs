// ==========================================
// 值班排班系统 - 配置层
// ==========================================
// 职责: 指派规则开关、防重复窗口、分级岗位规则、模板岗位
// 存储: JSON 文件
// ==========================================

pub mod config_manager;
pub mod policy;
pub mod tiering;

// 重导出核心配置
pub use config_manager::{ConfigError, ConfigManager, ConfigResult, EngineConfig, CONFIG_PATH_ENV};
pub use policy::{AssignmentPolicy, NearnessMode, RepetitionWindow};
pub use tiering::{TierPreference, TieringConfig};
