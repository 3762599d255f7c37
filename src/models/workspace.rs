use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Terra 工作空间标识（namespace + name）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Workspace {
    /// 计费项目 / 命名空间
    pub namespace: String,
    /// 工作空间名称
    pub name: String,
}

impl Workspace {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// API 路径片段：`workspaces/{namespace}/{name}`
    pub fn api_path(&self) -> String {
        format!("workspaces/{}/{}", self.namespace, self.name)
    }
}

impl Display for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
