//! 提交上下文
//!
//! 封装"往哪个工作空间、用哪个工作流、提交哪种实体"这一信息

use crate::models::Workspace;
use std::fmt::Display;

/// 提交上下文
#[derive(Debug, Clone)]
pub struct SubmissionCtx {
    /// 目标工作空间
    pub workspace: Workspace,

    /// 方法配置名称（配置命名空间与工作空间命名空间相同）
    pub workflow_name: String,

    /// 实体类型，如 `sample`、`flowcell`
    pub entity_type: String,

    /// 是否启用 call-caching
    pub use_call_cache: bool,
}

impl SubmissionCtx {
    /// 创建新的提交上下文
    pub fn new(
        workspace: Workspace,
        workflow_name: impl Into<String>,
        entity_type: impl Into<String>,
        use_call_cache: bool,
    ) -> Self {
        Self {
            workspace,
            workflow_name: workflow_name.into(),
            entity_type: entity_type.into(),
            use_call_cache,
        }
    }

    /// 方法配置所在的命名空间
    pub fn config_namespace(&self) -> &str {
        &self.workspace.namespace
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[工作空间 {} 工作流 {} 实体类型 {}]",
            self.workspace, self.workflow_name, self.entity_type
        )
    }
}
