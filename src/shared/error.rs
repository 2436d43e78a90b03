use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// 统一的错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 请求参数缺失或格式错误
    #[error("{0}")]
    Validation(String),

    /// 上游 GitHub 搜索接口错误（网络、非 2xx、解码失败不做区分）
    #[error("{0}")]
    Gateway(String),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Gateway(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 用于 Axum 的错误响应实现
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Validation(_) | AppError::Gateway(_) => {
                tracing::warn!("Request rejected: {}", self);
                self.to_string()
            }
            // 内部错误细节只写日志，不返回给客户端
            _ => {
                tracing::error!("Request error: {}", self);
                "Unexpected error.".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Gateway(e.to_string())
    }
}
