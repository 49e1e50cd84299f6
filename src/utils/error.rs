use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Element with id=\"{id}\" not found")]
    MissingElement { id: String },

    #[error("Request failed with status {status}: {reason}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Invalid fragment payload: {message}")]
    InvalidPayload { message: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類：本地前置條件、傳輸、配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LocalPrecondition,
    Transport,
    Configuration,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::MissingElement { .. } => ErrorKind::LocalPrecondition,
            ClientError::Http(_)
            | ClientError::Status { .. }
            | ClientError::InvalidPayload { .. }
            | ClientError::Serialization(_) => ErrorKind::Transport,
            ClientError::Io(_)
            | ClientError::InvalidUrl { .. }
            | ClientError::Selector { .. }
            | ClientError::ConfigError { .. }
            | ClientError::InvalidConfigValueError { .. } => ErrorKind::Configuration,
        }
    }

    /// 顯示在目標區塊中的錯誤文字（與瀏覽器端 AJAX 的錯誤描述一致）
    pub fn transport_text(&self) -> String {
        match self {
            ClientError::Http(e) if e.is_timeout() => "timeout".to_string(),
            ClientError::Http(e) if e.is_decode() => "parsererror".to_string(),
            ClientError::Http(e) => e.to_string(),
            ClientError::Status { status, reason, .. } => {
                if reason.is_empty() {
                    status.to_string()
                } else {
                    reason.clone()
                }
            }
            ClientError::InvalidPayload { .. } | ClientError::Serialization(_) => {
                "parsererror".to_string()
            }
            other => other.to_string(),
        }
    }

    /// 伺服器回傳的原始內容（若有）
    pub fn response_body(&self) -> Option<&str> {
        match self {
            ClientError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
