//! 市场数据模型

use serde::{Deserialize, Serialize};

/// 趋势方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

/// 均线
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub ma_20: f64,
    pub ma_50: f64,
    pub ma_200: f64,
}

/// 技术指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    /// 相对强弱指数
    pub rsi: u32,
    /// MACD 信号方向
    pub macd: Trend,
    pub moving_averages: MovingAverages,
}

/// 市场数据
///
/// 附加在对话响应的 `market_data` 字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// 当前价格
    pub current_price: f64,
    /// 趋势
    pub trend: Trend,
    /// 成交量
    pub volume: f64,
    /// 波动率
    pub volatility: f64,
    /// 技术指标
    pub indicators: TechnicalIndicators,
}
