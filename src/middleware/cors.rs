//! 跨域配置
//!
//! 允许任意来源的 GET/POST 请求

use actix_cors::Cors;
use actix_web::http::header;

use super::REQUEST_ID_HEADER;

pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers(vec![REQUEST_ID_HEADER])
        .max_age(3600)
}
