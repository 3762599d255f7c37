/// Terra / Firecloud Orchestration API 客户端
///
/// 封装所有与工作空间 API 相关的调用逻辑
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    EntityUpsert, MethodConfig, SubmissionRecord, SubmissionRequest, SubmissionResponse,
    Workspace,
};
use crate::utils::logging::truncate_text;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// 错误响应体在日志 / 错误信息中保留的最大长度
const MAX_ERROR_BODY_CHARS: usize = 500;

/// 工作空间 API 能力
///
/// 服务层只依赖这个 trait，测试时可以替换为内存实现。
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// 列出工作空间的全部提交记录
    async fn list_submissions(&self, workspace: &Workspace) -> AppResult<Vec<SubmissionRecord>>;

    /// 创建一次提交
    async fn create_submission(
        &self,
        workspace: &Workspace,
        request: &SubmissionRequest,
    ) -> AppResult<SubmissionResponse>;

    /// 批量创建 / 更新实体
    async fn upsert_entities(&self, workspace: &Workspace, entities: &[EntityUpsert])
        -> AppResult<()>;

    /// 获取方法配置
    async fn get_method_config(
        &self,
        workspace: &Workspace,
        config_namespace: &str,
        config_name: &str,
    ) -> AppResult<MethodConfig>;

    /// 覆盖写入方法配置
    async fn update_method_config(
        &self,
        workspace: &Workspace,
        config: &MethodConfig,
    ) -> AppResult<()>;
}

/// Terra API 客户端
pub struct TerraClient {
    http: reqwest::Client,
    api_root: String,
    access_token: Option<String>,
}

impl TerraClient {
    /// 创建新的 Terra 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed(&config.terra_api_root, e))?;

        Ok(Self {
            http,
            api_root: config.terra_api_root.trim_end_matches('/').to_string(),
            access_token: config.terra_access_token.clone(),
        })
    }

    /// 构建请求（自动附带 Bearer token）
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.api_root, path);
        let builder = self.http.request(method, url);
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// 发送请求并返回响应体，非 2xx 视为错误
    async fn send(&self, builder: RequestBuilder, endpoint: &str) -> AppResult<String> {
        debug!("调用 Terra API: {}", endpoint);

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        if !status.is_success() {
            let body = truncate_text(&body, MAX_ERROR_BODY_CHARS);
            warn!("Terra API 返回错误 ({}): {} {}", endpoint, status, body);
            return Err(AppError::bad_response(endpoint, status.as_u16(), body));
        }

        debug!("Terra API 调用成功 ({}): {}", endpoint, status);
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: &str,
    ) -> AppResult<T> {
        let body = self.send(builder, endpoint).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn method_config_path(workspace: &Workspace, config_namespace: &str, config_name: &str) -> String {
        format!(
            "{}/method_configs/{}/{}",
            workspace.api_path(),
            config_namespace,
            config_name
        )
    }
}

#[async_trait]
impl WorkspaceApi for TerraClient {
    async fn list_submissions(&self, workspace: &Workspace) -> AppResult<Vec<SubmissionRecord>> {
        let path = format!("{}/submissions", workspace.api_path());
        self.send_json(self.request(Method::GET, &path), &path).await
    }

    async fn create_submission(
        &self,
        workspace: &Workspace,
        request: &SubmissionRequest,
    ) -> AppResult<SubmissionResponse> {
        let path = format!("{}/submissions", workspace.api_path());
        let builder = self.request(Method::POST, &path).json(request);
        self.send_json(builder, &path).await
    }

    async fn upsert_entities(
        &self,
        workspace: &Workspace,
        entities: &[EntityUpsert],
    ) -> AppResult<()> {
        let path = format!("{}/entities/batchUpsert", workspace.api_path());
        let builder = self.request(Method::POST, &path).json(entities);
        self.send(builder, &path).await?;
        Ok(())
    }

    async fn get_method_config(
        &self,
        workspace: &Workspace,
        config_namespace: &str,
        config_name: &str,
    ) -> AppResult<MethodConfig> {
        let path = Self::method_config_path(workspace, config_namespace, config_name);
        self.send_json(self.request(Method::GET, &path), &path).await
    }

    async fn update_method_config(
        &self,
        workspace: &Workspace,
        config: &MethodConfig,
    ) -> AppResult<()> {
        let path = Self::method_config_path(workspace, &config.namespace, &config.name);
        let builder = self.request(Method::POST, &path).json(config);
        self.send(builder, &path).await?;
        Ok(())
    }
}
