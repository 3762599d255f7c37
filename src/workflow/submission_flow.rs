//! 提交流程 - 流程层
//!
//! 核心职责：定义"一批实体"的提交流程
//!
//! 流程顺序：
//! 1. 拉取工作空间的提交历史
//! 2. 筛出从未提交或尚未成功的实体
//! 3. 逐个提交，或者打包成一个集合实体后一次提交
//!
//! 错误策略：提交之前的步骤（拉历史、建集合）失败直接返回错误；
//! 每一次提交的成败都记入 `SubmissionReport`，由调用方决定如何处理。

use crate::clients::WorkspaceApi;
use crate::error::{AppResult, ValidationError};
use crate::models::{EntityUpsert, SubmissionRequest};
use crate::services::reanalysis;
use crate::utils::logging::log_summary;
use crate::workflow::submission_ctx::SubmissionCtx;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// 提交成功的实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedEntity {
    pub entity_name: String,
    pub submission_id: String,
}

/// 提交失败的实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedEntity {
    pub entity_name: String,
    pub reason: String,
}

/// 批量提交时创建的集合实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSet {
    pub set_name: String,
    pub set_type: String,
    pub members: Vec<String>,
}

/// 一次提交流程的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub submitted: Vec<SubmittedEntity>,
    pub failed: Vec<FailedEntity>,
    /// 仅批量提交时存在
    pub batch: Option<BatchSet>,
}

impl SubmissionReport {
    /// 没有任何提交失败
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// 是否什么都没有提交（没有需要分析的实体）
    pub fn is_empty(&self) -> bool {
        self.submitted.is_empty() && self.failed.is_empty()
    }
}

/// 提交流程
///
/// - 编排"拉历史 → 筛选 → 提交"
/// - 只依赖 `WorkspaceApi` 能力
pub struct SubmissionFlow {
    api: Arc<dyn WorkspaceApi>,
}

impl SubmissionFlow {
    /// 创建新的提交流程
    pub fn new(api: Arc<dyn WorkspaceApi>) -> Self {
        Self { api }
    }

    /// 返回需要（再次）分析的实体
    ///
    /// # 参数
    /// - `ctx`: 提交上下文
    /// - `entity_names`: 候选实体名称（同一类型）
    ///
    /// # 返回
    /// 从未提交过或尚未成功分析的实体；拉取提交历史失败时返回错误
    pub async fn analyzable_entities(
        &self,
        ctx: &SubmissionCtx,
        entity_names: &[String],
    ) -> AppResult<Vec<String>> {
        let records = self.api.list_submissions(&ctx.workspace).await?;
        let selected = reanalysis::analyzable_entities(
            &records,
            &ctx.workflow_name,
            &ctx.entity_type,
            entity_names,
        );

        info!(
            "{} 🔍 历史提交 {} 条，候选 {} 个，需要分析 {} 个",
            ctx,
            records.len(),
            entity_names.len(),
            selected.len()
        );
        Ok(selected)
    }

    /// 逐个提交尚未分析的实体
    ///
    /// # 参数
    /// - `ctx`: 提交上下文
    /// - `entity_names`: 候选实体名称
    ///
    /// # 返回
    /// 每个实体的提交结果
    pub async fn verify_before_submit(
        &self,
        ctx: &SubmissionCtx,
        entity_names: &[String],
    ) -> AppResult<SubmissionReport> {
        let eligible = self.analyzable_entities(ctx, entity_names).await?;
        let mut report = SubmissionReport::default();

        for entity in eligible {
            let request = SubmissionRequest {
                method_configuration_namespace: ctx.config_namespace().to_string(),
                method_configuration_name: ctx.workflow_name.clone(),
                entity_type: ctx.entity_type.clone(),
                entity_name: entity.clone(),
                expression: None,
                use_call_cache: ctx.use_call_cache,
            };
            self.submit(ctx, request, &mut report).await;
        }

        log_summary(&format!("{} 提交", ctx.workflow_name), report.submitted.len(), report.failed.len());
        Ok(report)
    }

    /// 把尚未分析的实体打包成一个集合，一次提交
    ///
    /// 集合类型为 `{entity_type}_set`，名称为 `{workflow}_{UTC 时间戳}`。
    ///
    /// # 参数
    /// - `ctx`: 提交上下文
    /// - `entity_names`: 候选实体名称
    /// - `expression`: 从集合展开到成员的表达式，如 `this.samples`
    ///
    /// # 返回
    /// 没有需要分析的实体时返回空报告，不创建集合
    pub async fn verify_before_batch_submit(
        &self,
        ctx: &SubmissionCtx,
        entity_names: &[String],
        expression: &str,
    ) -> AppResult<SubmissionReport> {
        if expression.trim().is_empty() {
            return Err(ValidationError::EmptyField("expression").into());
        }

        let eligible = self.analyzable_entities(ctx, entity_names).await?;
        let mut report = SubmissionReport::default();
        if eligible.is_empty() {
            info!("{} 没有需要分析的实体，跳过批量提交", ctx);
            return Ok(report);
        }

        let set_name = format!(
            "{}_{}",
            ctx.workflow_name,
            Utc::now().format("%Y%m%d_%H%M%S")
        );
        let upsert = EntityUpsert::set_of(set_name.clone(), &ctx.entity_type, &eligible);
        let set_type = upsert.entity_type.clone();

        self.api
            .upsert_entities(&ctx.workspace, std::slice::from_ref(&upsert))
            .await?;
        info!(
            "{} 📦 已创建集合 {} ({} 个成员)",
            ctx,
            set_name,
            eligible.len()
        );

        let request = SubmissionRequest {
            method_configuration_namespace: ctx.config_namespace().to_string(),
            method_configuration_name: ctx.workflow_name.clone(),
            entity_type: set_type.clone(),
            entity_name: set_name.clone(),
            expression: Some(expression.to_string()),
            use_call_cache: ctx.use_call_cache,
        };
        self.submit(ctx, request, &mut report).await;

        report.batch = Some(BatchSet {
            set_name,
            set_type,
            members: eligible,
        });
        log_summary(&format!("{} 批量提交", ctx.workflow_name), report.submitted.len(), report.failed.len());
        Ok(report)
    }

    /// 发起一次提交并把结果记入报告
    async fn submit(&self, ctx: &SubmissionCtx, request: SubmissionRequest, report: &mut SubmissionReport) {
        match self.api.create_submission(&ctx.workspace, &request).await {
            Ok(response) => {
                info!(
                    "✓ Submitted {} for analysis with {} (submission {})",
                    request.entity_name, ctx.workflow_name, response.submission_id
                );
                report.submitted.push(SubmittedEntity {
                    entity_name: request.entity_name,
                    submission_id: response.submission_id,
                });
            }
            Err(e) => {
                warn!(
                    "⚠️ Failed to submit {} for analysis with {} due to: {}",
                    request.entity_name, ctx.workflow_name, e
                );
                report.failed.push(FailedEntity {
                    entity_name: request.entity_name,
                    reason: e.to_string(),
                });
            }
        }
    }
}
