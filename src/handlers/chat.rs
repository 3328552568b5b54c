//! 对话接口处理器
//!
//! POST /api/v1/chat
//!
//! 请求体: `{"query": "..."}`

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};

use crate::error::AppError;
use crate::middleware::RequestId;
use crate::models::{ApiResponse, ChatRequest};
use crate::services::chat_service::ChatService;

/// 缺少问题时的固定提示
pub const MISSING_QUERY: &str = "Missing 'query' field";

/// 对话
///
/// 校验请求后交给 `ChatService`，错误统一由 `AppError` 转换为 HTTP 响应
pub async fn chat(
    service: web::Data<ChatService>,
    request_id: Option<web::ReqData<RequestId>>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    if let Some(id) = request_id {
        log::debug!("对话请求 {}", id.into_inner());
    }

    let query = body
        .into_inner()
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::Validation(MISSING_QUERY.to_string()))?;

    let response = service.process_query(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// 请求体解析失败（非 JSON、Content-Type 错误、字段类型错误）统一返回 400
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        other => other.to_string(),
    };
    AppError::Validation(format!("Invalid request body: {}", detail)).into()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/chat")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(web::post().to(chat))
    );
}
