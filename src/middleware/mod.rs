//! 中间件

mod api_key;
mod cors;
mod request_id;

pub use api_key::ApiKeyMiddleware;
pub use cors::cors_middleware;
pub use request_id::{RequestId, RequestIdMiddleware, REQUEST_ID_HEADER};

use actix_web::middleware::DefaultHeaders;

/// 基础安全响应头
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("X-XSS-Protection", "1; mode=block"))
}
