use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 外部 API 调用错误（Terra / SendGrid）
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 对象存储 / 本地文件错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 参数校验错误
    #[error("参数错误: {0}")]
    Validation(#[from] ValidationError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非 2xx 响应
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        #[source]
        source: serde_json::Error,
    },
}

/// 存储相关错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 对象存储操作失败
    #[error("对象存储操作失败 ({location}): {source}")]
    ObjectStore {
        location: String,
        #[source]
        source: object_store::Error,
    },
    /// 读取本地文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取或解析失败
    #[error("配置文件 {path} 无效: {reason}")]
    InvalidFile { path: String, reason: String },
    /// 日志初始化失败
    #[error("日志初始化失败: {0}")]
    Logging(String),
}

/// 参数校验错误
#[derive(Debug, Error)]
pub enum ValidationError {
    /// 非法的 gs:// 路径
    #[error("Provided gs path isn't valid: {0}")]
    InvalidGcsPath(String),
    /// 收件人姓名与邮箱数量不一致
    #[error("Different number of recipients ({names}) and recipients' emails ({emails})")]
    RecipientMismatch { names: usize, emails: usize },
    /// 必填字段为空
    #[error("字段 {0} 不能为空")]
    EmptyField(&'static str),
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed { source: err })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建API错误响应
    pub fn bad_response(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        })
    }

    /// 创建对象存储错误
    pub fn object_store(location: impl Into<String>, source: object_store::Error) -> Self {
        AppError::Storage(StorageError::ObjectStore {
            location: location.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Storage(StorageError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 外部服务返回的 HTTP 状态码（仅 BadResponse 有）
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api(ApiError::BadResponse { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
