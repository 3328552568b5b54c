//! 交易分析
//!
//! 目前为占位实现：忽略问题和 LLM 回复，返回固定的交易建议

use crate::models::{LlmCompletion, TradeAction, TradeRecommendation};

/// 交易分析接口
#[cfg_attr(test, mockall::automock)]
pub trait TradeAnalyzer: Send + Sync {
    fn analyze(&self, query: &str, completion: &LlmCompletion) -> anyhow::Result<TradeRecommendation>;
}

/// 占位交易分析器
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTradeAnalyzer;

impl TradeAnalyzer for PlaceholderTradeAnalyzer {
    fn analyze(&self, _query: &str, _completion: &LlmCompletion) -> anyhow::Result<TradeRecommendation> {
        Ok(TradeRecommendation {
            action: TradeAction::Buy,
            entry_price: 100.0,
            stop_loss: 95.0,
            take_profit: 110.0,
            position_size: 1.0,
            risk_ratio: 2.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn completion(content: &str) -> LlmCompletion {
        LlmCompletion {
            content: content.to_string(),
            model: "mixtral-8x7b-32768".to_string(),
            finish_reason: None,
            usage: None,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_placeholder_shape() {
        let rec = PlaceholderTradeAnalyzer
            .analyze("Should I buy ETH?", &completion("Maybe."))
            .unwrap();
        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            json!({
                "action": "BUY",
                "entry_price": 100.0,
                "stop_loss": 95.0,
                "take_profit": 110.0,
                "position_size": 1.0,
                "risk_ratio": 2.0
            })
        );
    }

    #[test]
    fn test_stateless() {
        let analyzer = PlaceholderTradeAnalyzer;
        let first = analyzer.analyze("buy", &completion("a")).unwrap();
        let second = analyzer.analyze("sell everything", &completion("something else")).unwrap();
        assert_eq!(first, second);
    }
}
