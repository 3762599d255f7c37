//! gs:// 路径模型
//!
//! 把 `gs://bucket/prefix/.../object` 拆成 bucket、目录前缀和文件名，
//! 用于判断路径是文件还是"模拟目录"。

use crate::error::ValidationError;
use regex::Regex;
use std::fmt::Display;
use std::sync::OnceLock;

static GS_PATH_RE: OnceLock<Regex> = OnceLock::new();

fn gs_path_re() -> &'static Regex {
    GS_PATH_RE.get_or_init(|| Regex::new(r"^gs://([^/]+)(?:/(.*))?$").expect("gs path pattern"))
}

/// 解析后的 GCS 路径
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GcsPath {
    pub bucket: String,
    /// 目录部分，不含首尾斜杠，可能为空
    pub prefix: String,
    /// 最后一段，路径以 `/` 结尾时为空
    pub file: String,
}

impl GcsPath {
    /// 解析 gs:// 路径
    ///
    /// # 参数
    /// - `gs_path`: 形如 `gs://bucket/a/b/file`
    ///
    /// # 返回
    /// 不以 `gs://` 开头或 bucket 为空时返回 `InvalidGcsPath`
    pub fn parse(gs_path: &str) -> Result<Self, ValidationError> {
        let caps = gs_path_re()
            .captures(gs_path)
            .ok_or_else(|| ValidationError::InvalidGcsPath(gs_path.to_string()))?;

        let bucket = caps[1].to_string();
        let rest = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let (prefix, file) = match rest.rsplit_once('/') {
            Some((prefix, file)) => (prefix.trim_matches('/').to_string(), file.to_string()),
            None => (String::new(), rest.to_string()),
        };

        Ok(Self {
            bucket,
            prefix,
            file,
        })
    }

    /// bucket 内的对象名
    pub fn object_name(&self) -> String {
        match (self.prefix.is_empty(), self.file.is_empty()) {
            (true, _) => self.file.clone(),
            (false, true) => self.prefix.clone(),
            (false, false) => format!("{}/{}", self.prefix, self.file),
        }
    }
}

impl std::str::FromStr for GcsPath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for GcsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gs://{}/{}", self.bucket, self.object_name())
    }
}
