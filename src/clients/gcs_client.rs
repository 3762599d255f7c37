//! GCS 客户端 - 基础设施层
//!
//! 按 bucket 持有 `ObjectStore` 句柄，只暴露"拿到某个 bucket 的存储"这一能力

use crate::config::Config;
use crate::error::{AppError, AppResult};
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::ObjectStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// GCS 客户端
pub struct GcsClient {
    service_account_path: Option<String>,
    stores: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl GcsClient {
    /// 创建新的 GCS 客户端
    ///
    /// 未配置服务账号时使用环境中的默认凭证
    pub fn new(config: &Config) -> Self {
        Self {
            service_account_path: config.gcs_service_account_path.clone(),
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// 为某个 bucket 指定存储实现（用于测试）
    pub fn with_bucket_store(self, bucket: impl Into<String>, store: Arc<dyn ObjectStore>) -> Self {
        self.stores
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(bucket.into(), store);
        self
    }

    /// 获取 bucket 对应的存储句柄，首次访问时创建并缓存
    pub fn store(&self, bucket: &str) -> AppResult<Arc<dyn ObjectStore>> {
        let mut stores = self
            .stores
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(store) = stores.get(bucket) {
            return Ok(Arc::clone(store));
        }

        debug!("创建 GCS 存储句柄: gs://{}", bucket);
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);
        if let Some(path) = &self.service_account_path {
            builder = builder.with_service_account_path(path);
        }
        let store: Arc<dyn ObjectStore> = Arc::new(
            builder
                .build()
                .map_err(|e| AppError::object_store(format!("gs://{}", bucket), e))?,
        );

        stores.insert(bucket.to_string(), Arc::clone(&store));
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    #[test]
    fn injected_store_is_reused() {
        let memory: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let client = GcsClient::new(&Config::default()).with_bucket_store("lrma", memory.clone());

        let first = client.store("lrma").unwrap();
        let second = client.store("lrma").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &memory));
    }
}
