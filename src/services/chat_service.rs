//! 对话服务
//!
//! 请求分类与响应组装：先调用 LLM 网关，再根据关键词决定是否附加
//! 交易建议和市场数据。网关失败时直接返回，不会调用任何分析器

use std::sync::Arc;

use crate::error::AppError;
use crate::models::ChatResponse;
use crate::services::classifier::classify;
use crate::services::llm_gateway::LlmGateway;
use crate::services::market_analyzer::MarketAnalyzer;
use crate::services::trade_analyzer::TradeAnalyzer;

/// 对话服务
///
/// 启动时构造一次，通过 `web::Data` 在各 worker 间共享，不持有可变状态
#[derive(Clone)]
pub struct ChatService {
    gateway: Arc<dyn LlmGateway>,
    market: Arc<dyn MarketAnalyzer>,
    trade: Arc<dyn TradeAnalyzer>,
}

impl ChatService {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        market: Arc<dyn MarketAnalyzer>,
        trade: Arc<dyn TradeAnalyzer>,
    ) -> Self {
        Self { gateway, market, trade }
    }

    /// 处理一次对话
    pub async fn process_query(&self, query: &str) -> Result<ChatResponse, AppError> {
        let completion = self.gateway.complete(query).await?;

        let intent = classify(query);
        log::info!("问题分类: trade={}, market={}", intent.trade, intent.market);

        let mut response = ChatResponse::new(completion);

        if intent.trade {
            let rec = self
                .trade
                .analyze(query, &response.completion)
                .map_err(|e| AppError::Analyzer(e.to_string()))?;
            response.trade_recommendations = Some(rec);
        }

        if intent.market {
            let data = self
                .market
                .analyze(query)
                .map_err(|e| AppError::Analyzer(e.to_string()))?;
            response.market_data = Some(data);
        }

        Ok(response)
    }
}
