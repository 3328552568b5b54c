//! 通用 API 响应模型
//! 
//! 定义统一的 API 响应格式

use serde::{Deserialize, Serialize};

/// 响应状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// 统一 API 响应结构
/// 
/// 所有接口返回统一格式：
/// - 成功：`{"status": "success", "response": ...}`
/// - 失败：`{"status": "error", "message": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 请求是否成功
    pub status: ResponseStatus,
    /// 响应数据（成功时有值）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
    /// 错误信息（失败时有值）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    /// 
    /// # 参数
    /// - data: 响应数据
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            response: Some(data),
            message: None,
        }
    }

    /// 创建错误响应
    /// 
    /// # 参数
    /// - message: 错误信息
    pub fn error(message: String) -> Self {
        Self {
            status: ResponseStatus::Error,
            response: None,
            message: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let value = serde_json::to_value(ApiResponse::success("ok")).unwrap();
        assert_eq!(value, json!({"status": "success", "response": "ok"}));
    }

    #[test]
    fn test_error_shape() {
        let value = serde_json::to_value(ApiResponse::<()>::error("boom".to_string())).unwrap();
        assert_eq!(value, json!({"status": "error", "message": "boom"}));
    }
}
