use crate::error::{AppResult, ConfigError};
use crate::utils::logging::LogConfig;
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- Terra / Firecloud 配置 ---
    /// Orchestration API 根地址
    pub terra_api_root: String,
    /// Bearer token（`gcloud auth print-access-token`）
    pub terra_access_token: Option<String>,
    /// HTTP 请求超时（秒）
    pub http_timeout_secs: u64,
    // --- GCS 配置 ---
    /// 服务账号 JSON 文件路径，为空时使用默认凭证
    pub gcs_service_account_path: Option<String>,
    // --- 邮件通知配置 ---
    pub sendgrid_api_key: Option<String>,
    pub sender_email: Option<String>,
    pub sendgrid_api_base_url: String,
    // --- 日志配置 ---
    pub log_level: String,
    pub log_file: Option<String>,
    pub log_ansi: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terra_api_root: "https://api.firecloud.org/api".to_string(),
            terra_access_token: None,
            http_timeout_secs: 60,
            gcs_service_account_path: None,
            sendgrid_api_key: None,
            sender_email: None,
            sendgrid_api_base_url: "https://api.sendgrid.com".to_string(),
            log_level: "debug".to_string(),
            log_file: None,
            log_ansi: true,
        }
    }
}

/// 邮件通知所需的显式配置
#[derive(Clone, Debug)]
pub struct NotificationConfig {
    pub api_key: String,
    pub sender_email: String,
    pub api_base_url: String,
    /// HTTP 请求超时（秒），与 Terra 客户端共用 `http_timeout_secs`
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            terra_api_root: std::env::var("TERRA_API_ROOT").unwrap_or(default.terra_api_root),
            terra_access_token: std::env::var("TERRA_ACCESS_TOKEN").ok().or(default.terra_access_token),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.http_timeout_secs),
            gcs_service_account_path: std::env::var("GOOGLE_SERVICE_ACCOUNT_PATH").ok().or(default.gcs_service_account_path),
            sendgrid_api_key: std::env::var("SENDGRID_API_KEY").ok().or(default.sendgrid_api_key),
            sender_email: std::env::var("SENDER_EMAIL").ok().or(default.sender_email),
            sendgrid_api_base_url: std::env::var("SENDGRID_API_BASE_URL").unwrap_or(default.sendgrid_api_base_url),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(default.log_level),
            log_file: std::env::var("LOG_FILE").ok().or(default.log_file),
            log_ansi: std::env::var("LOG_ANSI").ok().and_then(|v| v.parse().ok()).unwrap_or(default.log_ansi),
        }
    }

    /// 从 TOML 文件加载配置，缺失字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let invalid = |reason: String| ConfigError::InvalidFile {
            path: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config = toml::from_str(content).map_err(|e| ConfigError::InvalidFile {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// 构建邮件通知配置
    ///
    /// API key 与发件人地址均为必填
    pub fn notification_config(&self) -> AppResult<NotificationConfig> {
        let api_key = self.sendgrid_api_key.clone().ok_or_else(|| ConfigError::EnvVarNotFound {
            var_name: "SENDGRID_API_KEY".to_string(),
        })?;
        let sender_email = self.sender_email.clone().ok_or_else(|| ConfigError::EnvVarNotFound {
            var_name: "SENDER_EMAIL".to_string(),
        })?;
        Ok(NotificationConfig {
            api_key,
            sender_email,
            api_base_url: self.sendgrid_api_base_url.clone(),
            timeout_secs: self.http_timeout_secs,
        })
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            file: self.log_file.clone(),
            ansi: self.log_ansi,
        }
    }
}
