//! 对话数据模型
//!
//! 定义对话请求、LLM 回复以及合并后的响应结构

use serde::{Deserialize, Serialize};

use super::{MarketData, TradeRecommendation};

/// 对话请求体
///
/// `query` 允许缺失，由处理器统一返回 "Missing 'query' field"
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// 用户问题
    #[serde(default)]
    pub query: Option<String>,
}

/// Token 用量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// LLM 网关返回的回复
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmCompletion {
    /// 生成的文本
    pub content: String,
    /// 实际使用的模型
    pub model: String,
    /// 结束原因
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Token 用量
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// 收到回复的时间（RFC 3339）
    pub created_at: String,
}

/// 合并后的对话响应
///
/// 基础回复字段总是存在，交易建议和市场数据仅在对应关键词命中时出现
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(flatten)]
    pub completion: LlmCompletion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_recommendations: Option<TradeRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_data: Option<MarketData>,
}

impl ChatResponse {
    pub fn new(completion: LlmCompletion) -> Self {
        Self {
            completion,
            trade_recommendations: None,
            market_data: None,
        }
    }
}
