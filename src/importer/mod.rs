// ==========================================
// 值班排班系统 - 导入层
// ==========================================
// 职责: 名册 CSV 导入、岗位 JSON 读写
// ==========================================

pub mod error;
pub mod roster_csv;
pub mod slot_json;

pub use error::{ImportError, ImportResult};
pub use roster_csv::RosterCsvImporter;
pub use slot_json::SlotJsonLoader;
