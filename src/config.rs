//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，环境变量（含 .env）优先级最高

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// API 配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 本服务的 API Key（为空则不启用认证）
    #[serde(default)]
    pub api_key: String,
}

/// LLM 网关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Groq API Key，必填
    #[serde(default)]
    pub api_key: String,
    /// 模型名称
    #[serde(default = "default_model")]
    pub model: String,
    /// OpenAI 兼容接口地址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 系统提示词
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 加载 .env 文件，`path` 为空时从当前目录向上查找
///
/// 文件不存在不算错误；其余错误（如格式错误）返回给调用方记录告警
pub fn load_dotenv(path: Option<&Path>) -> Option<dotenvy::Error> {
    let result = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// API 配置
    #[serde(default)]
    pub api: ApiConfig,
    /// LLM 配置
    #[serde(default)]
    pub llm: LlmConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_model() -> String { "mixtral-8x7b-32768".to_string() }
fn default_base_url() -> String { "https://api.groq.com/openai/v1".to_string() }
fn default_system_prompt() -> String {
    "You are a helpful AI assistant. Provide clear, accurate, and informative responses.".to_string()
}
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            system_prompt: default_system_prompt(),
            temperature: None,
            max_tokens: None,
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置：默认值 <- 配置文件 <- 环境变量
    ///
    /// 依次查找 `config.json`、`config/config.json`
    pub fn load() -> anyhow::Result<(Self, Option<PathBuf>)> {
        let config_paths = [Path::new("config.json"), Path::new("config/config.json")];
        let (mut config, source) = Self::load_from(&config_paths)?;
        config.apply_env(|key| env::var(key).ok())?;
        Ok((config, source))
    }

    /// 按顺序使用第一个存在的配置文件，都不存在时使用默认值
    ///
    /// 配置文件存在但解析失败时直接返回错误，不回退到默认值。
    /// 返回值附带实际使用的配置文件路径
    pub fn load_from(paths: &[&Path]) -> anyhow::Result<(Self, Option<PathBuf>)> {
        for path in paths {
            if path.exists() {
                let config = Self::from_file(path)
                    .map_err(|e| anyhow::anyhow!("加载配置文件 {} 失败: {}", path.display(), e))?;
                return Ok((config, Some(path.to_path_buf())));
            }
        }
        Ok((Self::default(), None))
    }

    /// 用环境变量覆盖配置，空值忽略，格式错误返回错误
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = var("GROQ_API_KEY") {
            self.llm.api_key = v;
        }
        if let Some(v) = var("MODEL") {
            self.llm.model = v;
        }
        if let Some(v) = var("GROQ_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Some(v) = var("API_KEY") {
            self.api.api_key = v;
        }
        if let Some(v) = var("HOST") {
            self.server.host = v;
        }
        if let Some(v) = var("PORT") {
            self.server.port = v
                .parse()
                .map_err(|e| anyhow::anyhow!("无效的 PORT 环境变量 {:?}: {}", v, e))?;
        }
        if let Some(v) = var("LOG_LEVEL") {
            self.log.level = v;
        }
        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
