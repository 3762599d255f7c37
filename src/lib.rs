//! # LRMA Cloud Utils
//!
//! 长读长测序分析（LRMA）日常云端操作的工具库：
//! GCS 对象检查与上传、Terra 工作流提交与方法配置管理、邮件通知。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有 HTTP / 对象存储句柄，只暴露原始调用
//! - `TerraClient` - Orchestration API，实现 `WorkspaceApi`
//! - `SendGridClient` - 邮件发送 API
//! - `GcsClient` - 按 bucket 缓存的 `ObjectStore`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `reanalysis` - 根据提交历史判断哪些实体需要（再次）分析
//! - `ConfigService` - 修改方法配置（输入、版本、根实体类型）
//! - `StorageService` - gs:// 路径检查与上传
//! - `NotificationService` - 给一组收件人发送邮件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一批实体"的提交流程
//! - `SubmissionCtx` - 上下文封装（工作空间 + 工作流 + 实体类型）
//! - `SubmissionFlow` - 流程编排（拉历史 → 筛选 → 逐个 / 批量提交）
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{GcsClient, MailApi, SendGridClient, TerraClient, WorkspaceApi};
pub use config::{Config, NotificationConfig};
pub use error::{AppError, AppResult};
pub use models::{GcsPath, MethodConfig, SubmissionRecord, Workspace};
pub use services::{ConfigService, NotificationService, StorageService};
pub use utils::logging::{LogConfig, Logger};
pub use workflow::{SubmissionCtx, SubmissionFlow, SubmissionReport};
