//! 日志工具模块
//!
//! 提供显式构造的日志句柄，以及日志格式化的辅助函数。
//! 句柄不会修改全局状态，除非调用方主动 `install_global`。

use crate::error::{AppError, AppResult, ConfigError};
use std::fs::OpenOptions;
use std::future::Future;
use std::sync::Mutex;
use tracing::instrument::{WithDispatch, WithSubscriber};
use tracing::{info, Dispatch};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// 日志配置
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// `EnvFilter` 语法的过滤规则，如 `debug` 或 `lrma_cloud_utils=info`
    pub level: String,
    /// 额外写入的日志文件（追加模式）
    pub file: Option<String>,
    /// 终端输出是否带颜色
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            file: None,
            ansi: true,
        }
    }
}

/// 日志句柄
///
/// 持有一个独立的 `Dispatch`，由调用方决定作用范围：
/// - `scope` 同步代码块
/// - `instrument` 异步任务
/// - `install_global` 设为进程默认
#[derive(Clone, Debug)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    /// 根据配置构造日志句柄
    ///
    /// # 参数
    /// - `config`: 日志配置
    ///
    /// # 返回
    /// 过滤规则非法或日志文件无法打开时返回配置错误
    pub fn new(config: &LogConfig) -> AppResult<Self> {
        let filter = EnvFilter::try_new(&config.level)
            .map_err(|e| ConfigError::Logging(format!("无效的日志级别 '{}': {}", config.level, e)))?;

        let file_layer = match &config.file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| ConfigError::Logging(format!("无法打开日志文件 {}: {}", path, e)))?;
                Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            }
            None => None,
        };

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(config.ansi)
                    .with_target(false),
            )
            .with(file_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
        })
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// 在该句柄下执行同步代码
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// 让异步任务的日志输出到该句柄
    pub fn instrument<F: Future>(&self, fut: F) -> WithDispatch<F> {
        fut.with_subscriber(self.dispatch.clone())
    }

    /// 设为进程级默认日志，只能成功一次
    pub fn install_global(&self) -> AppResult<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|e| AppError::Config(ConfigError::Logging(e.to_string())))
    }
}

/// 记录一次批量操作的汇总
///
/// # 参数
/// - `operation`: 操作名称
/// - `success`: 成功数量
/// - `failed`: 失败数量
pub fn log_summary(operation: &str, success: usize, failed: usize) {
    info!("{}", "─".repeat(60));
    info!(
        operation = %operation,
        success = success,
        failed = failed,
        "📊 {} 完成: 成功 {}/{}",
        operation,
        success,
        success + failed
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
