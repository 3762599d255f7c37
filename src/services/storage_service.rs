//! GCS 存储服务 - 业务能力层
//!
//! 判断 gs:// 路径是否存在、是文件还是"模拟目录"，查询大小，上传本地文件

use crate::clients::GcsClient;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::GcsPath;
use futures::StreamExt;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// GCS 存储服务
pub struct StorageService {
    client: GcsClient,
}

impl StorageService {
    /// 创建新的存储服务
    pub fn new(client: GcsClient) -> Self {
        Self { client }
    }

    fn store(&self, path: &GcsPath) -> AppResult<Arc<dyn ObjectStore>> {
        self.client.store(&path.bucket)
    }

    /// 路径是否存在（文件或模拟目录）
    pub async fn exists(&self, path: &GcsPath) -> AppResult<bool> {
        Ok(self.is_file(path).await? || self.is_emulated_dir(path).await?)
    }

    /// 路径是否恰好是一个对象
    pub async fn is_file(&self, path: &GcsPath) -> AppResult<bool> {
        let name = path.object_name();
        if name.is_empty() {
            return Ok(false);
        }

        let location = Self::object_path(path)?;
        match self.store(path)?.head(&location).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(AppError::object_store(path.to_string(), e)),
        }
    }

    /// 路径不是对象，但下面至少有一个对象
    pub async fn is_emulated_dir(&self, path: &GcsPath) -> AppResult<bool> {
        if self.is_file(path).await? {
            return Ok(false);
        }

        let store = self.store(path)?;
        let prefix = Self::dir_prefix(path)?;
        let mut listing = store.list(prefix.as_ref());
        match listing.next().await {
            Some(Ok(_)) => Ok(true),
            Some(Err(e)) => Err(AppError::object_store(path.to_string(), e)),
            None => Ok(false),
        }
    }

    /// 对象大小（字节），对象不存在时为 0
    pub async fn size(&self, path: &GcsPath) -> AppResult<u64> {
        let name = path.object_name();
        if name.is_empty() {
            return Ok(0);
        }

        let location = Self::object_path(path)?;
        match self.store(path)?.head(&location).await {
            Ok(meta) => Ok(meta.size as u64),
            Err(object_store::Error::NotFound { .. }) => Ok(0),
            Err(e) => Err(AppError::object_store(path.to_string(), e)),
        }
    }

    /// 列出模拟目录下的全部对象名（递归）
    pub async fn list(&self, path: &GcsPath) -> AppResult<Vec<String>> {
        let store = self.store(path)?;
        let prefix = Self::dir_prefix(path)?;

        let mut names = Vec::new();
        let mut listing = store.list(prefix.as_ref());
        while let Some(item) = listing.next().await {
            let meta = item.map_err(|e| AppError::object_store(path.to_string(), e))?;
            names.push(meta.location.to_string());
        }

        debug!("{} 下共有 {} 个对象", path, names.len());
        Ok(names)
    }

    /// 上传本地文件到 bucket
    ///
    /// # 参数
    /// - `bucket_name`: bucket 名称
    /// - `source_file_name`: 本地文件路径
    /// - `destination_blob_name`: bucket 内的对象名
    pub async fn upload_blob(
        &self,
        bucket_name: &str,
        source_file_name: &Path,
        destination_blob_name: &str,
    ) -> AppResult<()> {
        let bytes = tokio::fs::read(source_file_name)
            .await
            .map_err(|e| AppError::file_read_failed(source_file_name.display().to_string(), e))?;
        let size = bytes.len();

        let destination = format!("gs://{}/{}", bucket_name, destination_blob_name);
        let location = ObjectPath::parse(destination_blob_name)
            .map_err(|e| AppError::object_store(&destination, e.into()))?;

        let store = self.client.store(bucket_name)?;
        store
            .put(&location, PutPayload::from(bytes))
            .await
            .map_err(|e| AppError::object_store(&destination, e))?;

        info!(
            bucket = %bucket_name,
            size_bytes = size,
            "File {} uploaded to {}.",
            source_file_name.display(),
            destination_blob_name
        );
        Ok(())
    }

    /// 对象名原样作为存储键，不做百分号编码
    fn object_path(path: &GcsPath) -> AppResult<ObjectPath> {
        ObjectPath::parse(path.object_name())
            .map_err(|_| ValidationError::InvalidGcsPath(path.to_string()).into())
    }

    /// 模拟目录的列举前缀，bucket 根目录时为 `None`
    fn dir_prefix(path: &GcsPath) -> AppResult<Option<ObjectPath>> {
        if path.object_name().is_empty() {
            Ok(None)
        } else {
            Self::object_path(path).map(Some)
        }
    }
}
