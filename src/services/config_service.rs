//! 方法配置服务 - 业务能力层
//!
//! 读取、修改并写回工作空间中的方法配置

use crate::clients::WorkspaceApi;
use crate::error::{AppResult, ValidationError};
use crate::models::{MethodConfig, Workspace};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// 方法配置服务
///
/// 配置命名空间默认与工作空间命名空间相同。
pub struct ConfigService {
    api: Arc<dyn WorkspaceApi>,
}

impl ConfigService {
    /// 创建新的配置服务
    pub fn new(api: Arc<dyn WorkspaceApi>) -> Self {
        Self { api }
    }

    /// 获取方法配置
    pub async fn get_config(&self, workspace: &Workspace, config_name: &str) -> AppResult<MethodConfig> {
        self.api
            .get_method_config(workspace, &workspace.namespace, config_name)
            .await
    }

    /// 覆盖写入方法配置
    pub async fn update_config(&self, workspace: &Workspace, config: &MethodConfig) -> AppResult<()> {
        self.api.update_method_config(workspace, config).await?;
        info!("✓ 方法配置 {}/{} 已更新 ({})", config.namespace, config.name, workspace);
        Ok(())
    }

    /// 合并新的输入表达式并写回
    ///
    /// # 参数
    /// - `workspace`: 工作空间
    /// - `config_name`: 方法配置名称
    /// - `new_inputs`: 输入名 → 表达式，已有的键会被覆盖
    ///
    /// # 返回
    /// 返回写回后的配置
    pub async fn update_inputs(
        &self,
        workspace: &Workspace,
        config_name: &str,
        new_inputs: BTreeMap<String, String>,
    ) -> AppResult<MethodConfig> {
        self.modify(workspace, config_name, |config| config.merge_inputs(new_inputs))
            .await
    }

    /// 切换方法版本（分支 / 标签 / 快照号）
    pub async fn change_workflow_version(
        &self,
        workspace: &Workspace,
        config_name: &str,
        version: &str,
    ) -> AppResult<MethodConfig> {
        if version.trim().is_empty() {
            return Err(ValidationError::EmptyField("version").into());
        }
        self.modify(workspace, config_name, |config| config.set_version(version))
            .await
    }

    /// 修改根实体类型
    pub async fn set_root_entity_type(
        &self,
        workspace: &Workspace,
        config_name: &str,
        entity_type: &str,
    ) -> AppResult<MethodConfig> {
        if entity_type.trim().is_empty() {
            return Err(ValidationError::EmptyField("root_entity_type").into());
        }
        self.modify(workspace, config_name, |config| {
            config.root_entity_type = Some(entity_type.to_string())
        })
        .await
    }

    async fn modify(
        &self,
        workspace: &Workspace,
        config_name: &str,
        change: impl FnOnce(&mut MethodConfig),
    ) -> AppResult<MethodConfig> {
        let mut config = self.get_config(workspace, config_name).await?;
        change(&mut config);
        self.update_config(workspace, &config).await?;
        Ok(config)
    }
}
