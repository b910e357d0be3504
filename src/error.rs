//! tasktrack 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，store、API 与客户端共用。

use std::io;
use thiserror::Error;

/// tasktrack 错误类型
#[derive(Debug, Error)]
pub enum TrackerError {
    /// I/O 错误（数据目录、tasks.toml 读写）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 字段校验失败（缺少必填字段、标题为空、日期非法等）
    #[error("Validation error: {0}")]
    Validation(String),

    /// 资源不存在
    #[error("Not found: {0}")]
    NotFound(String),

    /// 无效的任务 ID（不是合法的 UUID）
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// 存储错误（通用）
    #[error("Storage error: {0}")]
    Storage(String),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON 解析错误
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// HTTP 传输错误（连接失败、响应无法解码）
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 服务端返回的非 2xx 响应
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// tasktrack Result 类型别名
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// 创建 Validation 错误
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// 创建 NotFound 错误
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// 创建 InvalidId 错误
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// 创建 Storage 错误
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// 是否为 NotFound（包括服务端返回的 404）
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Api { status: 404, .. })
    }
}
