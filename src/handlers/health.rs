//! 健康检查
//!
//! GET /api/v1/health，认证中间件对该路径放行

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::models::ApiResponse;

pub async fn health_check() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success("Service is healthy")))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
