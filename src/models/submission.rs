use crate::models::entity::EntityRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 提交的整体状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Accepted,
    Evaluating,
    Submitting,
    Submitted,
    Aborting,
    Aborted,
    Done,
    /// 未识别的状态值
    #[serde(other)]
    Unknown,
}

/// 单个工作流的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowStatus {
    Queued,
    Submitted,
    Launching,
    Running,
    Aborting,
    Aborted,
    Failed,
    Succeeded,
}

impl WorkflowStatus {
    /// API 中使用的名称
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStatus::Queued => "Queued",
            WorkflowStatus::Submitted => "Submitted",
            WorkflowStatus::Launching => "Launching",
            WorkflowStatus::Running => "Running",
            WorkflowStatus::Aborting => "Aborting",
            WorkflowStatus::Aborted => "Aborted",
            WorkflowStatus::Failed => "Failed",
            WorkflowStatus::Succeeded => "Succeeded",
        }
    }
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `GET workspaces/{ns}/{ws}/submissions` 返回的一条提交记录
///
/// `workflowStatuses` 是 状态 → 数量 的映射，只关心出现了哪些状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(default)]
    pub submission_id: String,
    pub method_configuration_name: String,
    #[serde(default)]
    pub method_configuration_namespace: String,
    pub submission_entity: EntityRef,
    pub status: SubmissionStatus,
    pub workflow_statuses: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_date: Option<DateTime<Utc>>,
}

impl SubmissionRecord {
    /// 该提交产生的工作流中是否出现过某个状态
    pub fn has_workflow_status(&self, status: WorkflowStatus) -> bool {
        self.workflow_statuses.contains_key(status.as_str())
    }

    pub fn entity_type(&self) -> &str {
        &self.submission_entity.entity_type
    }

    pub fn entity_name(&self) -> &str {
        &self.submission_entity.entity_name
    }
}

/// `POST workspaces/{ns}/{ws}/submissions` 请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub method_configuration_namespace: String,
    pub method_configuration_name: String,
    pub entity_type: String,
    pub entity_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    pub use_call_cache: bool,
}

/// 创建提交后的响应，只保留需要的字段
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub submission_id: String,
}
