//! LLM 网关
//!
//! 封装对 Groq（OpenAI 兼容）chat completions 接口的调用
//! 每次调用只发起一次请求，不做重试

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::LlmConfig;
use crate::error::AppError;
use crate::models::{LlmCompletion, TokenUsage};

/// LLM 网关接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// 以用户问题为提示词请求补全
    async fn complete(&self, prompt: &str) -> Result<LlmCompletion, AppError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Groq 网关
pub struct GroqGateway {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    system_prompt: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl GroqGateway {
    /// 创建网关，API Key 缺失或地址无效时返回配置错误
    pub fn new(config: &LlmConfig) -> Result<Self, AppError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::Configuration(
                "GROQ_API_KEY environment variable is not set".to_string(),
            ));
        }

        let endpoint = chat_completions_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LlmGateway for GroqGateway {
    async fn complete(&self, prompt: &str) -> Result<LlmCompletion, AppError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: &self.system_prompt },
                ChatMessage { role: "user", content: prompt },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        log::debug!("请求 LLM: {} (model={})", self.endpoint, self.model);

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "LLM API error ({}): {}",
                status.as_u16(),
                vendor_error_message(&text)
            )));
        }

        parse_completion(&text, &self.model)
    }
}

/// 拼接 `{base_url}/chat/completions`
fn chat_completions_url(base_url: &str) -> Result<Url, AppError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{}/chat/completions", trimmed))
        .map_err(|e| AppError::Configuration(format!("无效的 LLM 接口地址 {}: {}", base_url, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(AppError::Configuration(format!(
            "LLM 接口地址协议不受支持: {}",
            scheme
        ))),
    }
}

/// 提取上游错误信息，格式: {"error": {"message": "..."}}
fn vendor_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// 解析补全结果
fn parse_completion(body: &str, requested_model: &str) -> Result<LlmCompletion, AppError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Upstream(format!("Malformed LLM response: {}", e)))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Upstream("LLM response contained no choices".to_string()))?;

    let content = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::Upstream("LLM response contained no content".to_string()))?;

    Ok(LlmCompletion {
        content,
        model: parsed.model.unwrap_or_else(|| requested_model.to_string()),
        finish_reason: choice.finish_reason,
        usage: parsed.usage,
        created_at: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::json;

    fn config_with_key(key: &str) -> LlmConfig {
        LlmConfig {
            api_key: key.to_string(),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        for key in ["", "   "] {
            let result = GroqGateway::new(&config_with_key(key));
            assert!(matches!(result, Err(AppError::Configuration(_))));
        }
    }

    #[test]
    fn test_endpoint_from_base_url() {
        let gateway = GroqGateway::new(&config_with_key("gsk_test")).unwrap();
        assert_eq!(
            gateway.endpoint().as_str(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(gateway.model(), "mixtral-8x7b-32768");

        let url = chat_completions_url("http://localhost:9000/v1/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(chat_completions_url("not a url"), Err(AppError::Configuration(_))));
        assert!(matches!(chat_completions_url("ftp://example.com"), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_parse_completion() {
        let body = json!({
            "id": "chatcmpl-1",
            "model": "mixtral-8x7b-32768",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "ETH looks range-bound."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 6, "total_tokens": 18}
        })
        .to_string();

        let completion = parse_completion(&body, "fallback").unwrap();
        assert_eq!(completion.content, "ETH looks range-bound.");
        assert_eq!(completion.model, "mixtral-8x7b-32768");
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.usage.unwrap().total_tokens, 18);
    }

    #[test]
    fn test_parse_completion_failures() {
        assert!(matches!(parse_completion("<html>", "m"), Err(AppError::Upstream(_))));
        assert!(matches!(parse_completion(r#"{"choices": []}"#, "m"), Err(AppError::Upstream(_))));

        let empty = r#"{"choices": [{"message": {"content": "  "}}]}"#;
        assert!(matches!(parse_completion(empty, "m"), Err(AppError::Upstream(_))));

        // 缺少 model 时回退到请求的模型
        let no_model = r#"{"choices": [{"message": {"content": "hi"}}]}"#;
        assert_eq!(parse_completion(no_model, "m").unwrap().model, "m");
    }

    #[test]
    fn test_vendor_error_message() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        assert_eq!(vendor_error_message(body), "Invalid API Key");
        assert_eq!(vendor_error_message("gateway timeout\n"), "gateway timeout");
    }

    async fn fake_completions(req: HttpRequest, body: web::Json<serde_json::Value>) -> HttpResponse {
        let auth = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if auth != "Bearer gsk_test" {
            return HttpResponse::Unauthorized()
                .json(json!({"error": {"message": "Invalid API Key"}}));
        }

        let user = body["messages"][1]["content"].as_str().unwrap_or_default();
        HttpResponse::Ok().json(json!({
            "model": body["model"],
            "choices": [{
                "message": {"role": "assistant", "content": format!("echo: {}", user)},
                "finish_reason": "stop"
            }]
        }))
    }

    /// 在本地端口启动一个假的 chat completions 服务
    fn spawn_fake_vendor() -> (String, actix_web::dev::ServerHandle) {
        let server = HttpServer::new(|| {
            App::new().route("/v1/chat/completions", web::post().to(fake_completions))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        (format!("http://{}/v1", addr), handle)
    }

    #[actix_web::test]
    async fn test_complete_against_local_server() {
        let (base_url, handle) = spawn_fake_vendor();

        let config = LlmConfig {
            base_url: base_url.clone(),
            ..config_with_key("gsk_test")
        };
        let gateway = GroqGateway::new(&config).unwrap();
        let completion = gateway.complete("Should I buy ETH?").await.unwrap();
        assert_eq!(completion.content, "echo: Should I buy ETH?");
        assert_eq!(completion.model, "mixtral-8x7b-32768");

        let config = LlmConfig {
            base_url,
            ..config_with_key("gsk_wrong")
        };
        let gateway = GroqGateway::new(&config).unwrap();
        match gateway.complete("hi").await {
            Err(AppError::Upstream(msg)) => {
                assert_eq!(msg, "LLM API error (401): Invalid API Key");
            }
            other => panic!("期望上游错误, 实际: {:?}", other),
        }

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_unreachable_vendor_is_upstream_error() {
        // 先占用再释放一个端口，保证无人监听
        let (base_url, handle) = spawn_fake_vendor();
        handle.stop(false).await;

        let config = LlmConfig {
            base_url,
            connect_timeout_secs: 2,
            timeout_secs: 2,
            ..config_with_key("gsk_test")
        };
        let gateway = GroqGateway::new(&config).unwrap();
        assert!(matches!(gateway.complete("hi").await, Err(AppError::Upstream(_))));
    }
}
