//! 错误类型
//!
//! 所有失败都以 `AppError` 返回，只在 HTTP 边界处统一转换为
//! `{"status": "error", "message": ...}` 响应

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ApiResponse;

/// 服务错误分类
#[derive(Debug, Error)]
pub enum AppError {
    /// 请求格式错误或缺少字段（400）
    #[error("{0}")]
    Validation(String),

    /// 启动时配置缺失或无效（致命）
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// LLM 上游调用失败（500）
    #[error("{0}")]
    Upstream(String),

    /// 分析器内部异常，整个请求失败（500）
    #[error("Analyzer error: {0}")]
    Analyzer(String),

    /// Bearer Token 无效（401）
    #[error("Invalid bearer token")]
    Unauthorized,

    /// 路由不存在（404）
    #[error("Endpoint not found")]
    NotFound,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Configuration(_) | AppError::Upstream(_) | AppError::Analyzer(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("请求失败 ({}): {}", status.as_u16(), self);
        } else {
            log::warn!("请求被拒绝 ({}): {}", status.as_u16(), self);
        }

        HttpResponse::build(status).json(ApiResponse::<()>::error(self.to_string()))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Upstream(format!("LLM request timed out: {}", e))
        } else {
            AppError::Upstream(format!("LLM request failed: {}", e))
        }
    }
}
