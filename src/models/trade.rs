//! 交易建议模型

use serde::{Deserialize, Serialize};

/// 交易方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

/// 交易建议
///
/// 附加在对话响应的 `trade_recommendations` 字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecommendation {
    /// 操作
    pub action: TradeAction,
    /// 入场价
    pub entry_price: f64,
    /// 止损价
    pub stop_loss: f64,
    /// 止盈价
    pub take_profit: f64,
    /// 仓位
    pub position_size: f64,
    /// 盈亏比
    pub risk_ratio: f64,
}
