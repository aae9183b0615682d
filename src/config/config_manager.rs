// ==========================================
// 值班排班系统 - 配置管理器
// ==========================================
// 职责: 引擎配置加载、校验
// 存储: JSON 文件（路径可由环境变量 DUTY_ROSTER_CONFIG 指定）
// ==========================================

use crate::config::policy::{AssignmentPolicy, RepetitionWindow};
use crate::config::tiering::{TieringConfig, AUDIO_VIDEO_ROLE, MIDWEEK_LABEL, WEEKEND_LABEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "DUTY_ROSTER_CONFIG";

// 窗口超过一个月没有意义
const MAX_WINDOW_DAYS: u32 = 31;

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败 ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置无效: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub policy: AssignmentPolicy,

    #[serde(default)]
    pub repetition_window: RepetitionWindow,

    #[serde(default)]
    pub tiering: TieringConfig,

    /// 每个聚会日生成的岗位（模板顺序）
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,

    /// 聚会日星期标签
    #[serde(default = "default_meeting_days")]
    pub meeting_days: Vec<String>,
}

fn default_roles() -> Vec<String> {
    vec![
        "roving_mic".to_string(),
        "attendant".to_string(),
        AUDIO_VIDEO_ROLE.to_string(),
    ]
}

fn default_meeting_days() -> Vec<String> {
    vec![WEEKEND_LABEL.to_string(), MIDWEEK_LABEL.to_string()]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: AssignmentPolicy::default(),
            repetition_window: RepetitionWindow::default(),
            tiering: TieringConfig::default(),
            roles: default_roles(),
            meeting_days: default_meeting_days(),
        }
    }
}

impl EngineConfig {
    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.repetition_window.days > MAX_WINDOW_DAYS {
            return Err(ConfigError::Invalid(format!(
                "repetition_window.days={} 超过上限 {}",
                self.repetition_window.days, MAX_WINDOW_DAYS
            )));
        }

        if self.roles.iter().any(|r| r.trim().is_empty()) {
            return Err(ConfigError::Invalid("roles 中存在空岗位".to_string()));
        }

        if self.meeting_days.iter().any(|d| d.trim().is_empty()) {
            return Err(ConfigError::Invalid("meeting_days 中存在空星期标签".to_string()));
        }

        for (role, weekdays) in &self.tiering.rules {
            if role.trim().is_empty() {
                return Err(ConfigError::Invalid("tiering 中存在空岗位".to_string()));
            }
            if weekdays.keys().any(|w| w.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "tiering 岗位 {} 存在空星期标签",
                    role
                )));
            }
        }

        Ok(())
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: EngineConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用默认配置
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
            source: None,
        }
    }

    /// 从 JSON 文件加载配置（缺省字段使用默认值）
    ///
    /// # 参数
    /// - path: 配置文件路径
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: EngineConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        info!(path = %path.display(), "配置文件加载完成");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 从环境变量指定的路径加载；未设置时使用默认配置
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => {
                debug!("未设置 {}，使用默认配置", CONFIG_PATH_ENV);
                Ok(Self::with_defaults())
            }
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// 配置来源文件（默认配置时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 获取配置快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        serde_json::to_string(&self.config).map_err(|source| ConfigError::Parse {
            path: self.source.clone().unwrap_or_default(),
            source,
        })
    }
}
