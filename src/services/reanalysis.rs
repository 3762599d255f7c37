//! 重新分析判定 - 业务能力层
//!
//! 根据历史提交记录，决定哪些实体需要（再次）提交。
//! 这里只有纯函数，不做任何网络调用。

use crate::models::{SubmissionRecord, SubmissionStatus, WorkflowStatus};
use std::collections::HashSet;

/// 判断一条提交记录对应的实体是否"尚未成功分析"
///
/// - `Submitted`：有 Running 则不需要；否则有 Failed 则需要
/// - `Done`：没有 Succeeded 则需要
/// - 其他状态（包括 Submitted 既无 Running 也无 Failed）一律不需要
///
/// 判定只看状态，不看实体身份。
pub fn needs_reanalysis(record: &SubmissionRecord) -> bool {
    match record.status {
        SubmissionStatus::Submitted => {
            !record.has_workflow_status(WorkflowStatus::Running)
                && record.has_workflow_status(WorkflowStatus::Failed)
        }
        SubmissionStatus::Done => !record.has_workflow_status(WorkflowStatus::Succeeded),
        _ => false,
    }
}

/// 从候选实体中筛出需要提交的部分
///
/// 结果 = 从未以该工作流提交过的候选 ∪ 提交过但被判定为需要重新分析的候选。
///
/// # 参数
/// - `records`: 工作空间的全部提交记录
/// - `workflow_name`: 方法配置名称
/// - `entity_type`: 实体类型（候选实体都属于这一类型）
/// - `candidates`: 候选实体名称
///
/// # 返回
/// 按候选顺序返回、去重后的实体名称；不会包含候选之外的名称
pub fn analyzable_entities(
    records: &[SubmissionRecord],
    workflow_name: &str,
    entity_type: &str,
    candidates: &[String],
) -> Vec<String> {
    let relevant = records.iter().filter(|record| {
        record.method_configuration_name == workflow_name && record.entity_type() == entity_type
    });

    let mut seen: HashSet<&str> = HashSet::new();
    let mut failed: HashSet<&str> = HashSet::new();
    for record in relevant {
        seen.insert(record.entity_name());
        if needs_reanalysis(record) {
            failed.insert(record.entity_name());
        }
    }

    let mut emitted: HashSet<&str> = HashSet::new();
    let mut selected = Vec::new();
    for name in candidates.iter().map(String::as_str) {
        if (!seen.contains(name) || failed.contains(name)) && emitted.insert(name) {
            selected.push(name.to_string());
        }
    }
    selected
}
