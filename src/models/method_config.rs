use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Display;

/// 方法版本：Agora 快照号或 Dockstore 分支 / 标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodVersion {
    Snapshot(u64),
    Tag(String),
}

impl Display for MethodVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MethodVersion::Snapshot(id) => write!(f, "{}", id),
            MethodVersion::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

/// 方法来源描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRepoMethod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_uri: Option<String>,
    pub method_version: MethodVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 工作空间中的方法配置
///
/// 未建模的字段保存在 `extra` 中，写回时原样带上。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodConfig {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
    #[serde(default)]
    pub outputs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_entity_type: Option<String>,
    pub method_repo_method: MethodRepoMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_config_version: Option<u64>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MethodConfig {
    /// 切换方法版本
    ///
    /// 纯数字视为 Agora 快照号；`methodUri` 最后一段同步替换为新版本。
    pub fn set_version(&mut self, version: &str) {
        self.method_repo_method.method_version = match version.parse::<u64>() {
            Ok(snapshot) => MethodVersion::Snapshot(snapshot),
            Err(_) => MethodVersion::Tag(version.to_string()),
        };

        if let Some(uri) = self.method_repo_method.method_uri.as_mut() {
            let scheme_end = uri.find("://").map(|p| p + 3).unwrap_or(0);
            if let Some(slash) = uri.rfind('/').filter(|&idx| idx >= scheme_end) {
                uri.truncate(slash + 1);
                uri.push_str(version);
            }
        }
    }

    /// 合并输入表达式，已有的键会被覆盖
    pub fn merge_inputs(&mut self, new_inputs: BTreeMap<String, String>) {
        self.inputs.extend(new_inputs);
    }
}
