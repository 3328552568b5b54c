//! 交易对话后端服务
//! 
//! 将用户问题转发给 Groq 大模型，并按关键词附加交易建议和市场数据
//! 
//! - POST /api/v1/chat
//! - GET  /api/v1/health

mod config;     // 配置加载
mod error;      // 错误类型
mod handlers;   // HTTP 请求处理器
mod middleware; // 中间件
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use actix_web::{web, App, HttpServer, middleware::Logger};
use env_logger::Env;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::middleware::{cors_middleware, security_headers, ApiKeyMiddleware, RequestIdMiddleware};
use crate::services::chat_service::ChatService;
use crate::services::llm_gateway::GroqGateway;
use crate::services::market_analyzer::PlaceholderMarketAnalyzer;
use crate::services::trade_analyzer::PlaceholderTradeAnalyzer;

/// 访问日志格式，附带响应头中的请求 ID
const ACCESS_LOG_FORMAT: &str = r#"%a "%r" %s %b %T %{x-request-id}o"#;

/// 应用程序入口
/// 
/// 加载配置并启动 HTTP 服务器，默认监听 0.0.0.0:8080
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略，格式错误在日志初始化后告警
    let dotenv_error = config::load_dotenv(None);

    let (config, source) = AppConfig::load()?;

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    if let Some(e) = dotenv_error {
        log::warn!("加载 .env 文件失败: {}", e);
    }

    match source {
        Some(path) => log::info!("从 {} 加载配置成功", path.display()),
        None => log::info!("使用默认配置"),
    }

    // API Key 缺失时直接退出，不对外提供服务
    let gateway = GroqGateway::new(&config.llm)?;
    log::info!("LLM 网关: {} (model={})", gateway.endpoint(), gateway.model());

    let chat_service = web::Data::new(ChatService::new(
        Arc::new(gateway),
        Arc::new(PlaceholderMarketAnalyzer),
        Arc::new(PlaceholderTradeAnalyzer),
    ));

    let api_key = config.api.api_key.clone();
    if !ApiKeyMiddleware::new(api_key.clone()).is_enabled() {
        log::warn!("未设置 API_KEY，接口不启用认证");
    }

    let bind_addr = config.bind_addr();
    log::info!("启动交易对话后端服务: {}", bind_addr);

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        // 后注册的中间件在外层：跨域预检先于认证处理，日志可以记录请求 ID
        App::new()
            .wrap(ApiKeyMiddleware::new(api_key.clone()))  // API Key 认证
            .wrap(cors_middleware())  // 跨域
            .wrap(security_headers())  // 安全响应头
            .wrap(RequestIdMiddleware)  // 请求 ID
            .wrap(Logger::new(ACCESS_LOG_FORMAT))  // 添加请求日志中间件
            .app_data(chat_service.clone())
            .configure(handlers::config)  // 配置路由
            .default_service(web::to(handlers::not_found))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_addr)?.run().await?;
    Ok(())
}
