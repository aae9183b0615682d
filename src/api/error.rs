// ==========================================
// 值班排班系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换仓储/模板错误为用户可读消息
// 说明: 候选人不足不是错误，由指派报告返回
// ==========================================

use crate::domain::types::ScheduleStatus;
use crate::engine::template::TemplateError;
use crate::repository::error::RepositoryError;
use thiserror::Error;
use uuid::Uuid;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("排班表已存在: month={month}, year={year}")]
    ScheduleExists { month: u32, year: i32 },

    #[error("排班表正在生成中: {0}")]
    ScheduleBusy(Uuid),

    #[error("排班表状态不允许该操作: {from} -> {to}")]
    InvalidStatus { from: ScheduleStatus, to: ScheduleStatus },

    #[error("排班表状态为 {0}，不能重新生成")]
    NotEditable(ScheduleStatus),

    #[error("内部错误: {0}")]
    Internal(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("数据访问失败: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
