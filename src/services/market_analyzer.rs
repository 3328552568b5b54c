//! 市场分析
//!
//! 目前为占位实现：忽略问题内容，返回固定数据，无网络、无状态

use crate::models::{MarketData, MovingAverages, TechnicalIndicators, Trend};

/// 市场分析接口
#[cfg_attr(test, mockall::automock)]
pub trait MarketAnalyzer: Send + Sync {
    fn analyze(&self, query: &str) -> anyhow::Result<MarketData>;
}

/// 占位市场分析器
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderMarketAnalyzer;

impl PlaceholderMarketAnalyzer {
    fn current_price(&self) -> f64 {
        100.0
    }

    fn trend(&self) -> Trend {
        Trend::Bullish
    }

    fn volume(&self) -> f64 {
        1_000_000.0
    }

    fn volatility(&self) -> f64 {
        0.15
    }

    fn indicators(&self) -> TechnicalIndicators {
        TechnicalIndicators {
            rsi: 55,
            macd: Trend::Bullish,
            moving_averages: MovingAverages {
                ma_20: 98.5,
                ma_50: 95.0,
                ma_200: 90.0,
            },
        }
    }
}

impl MarketAnalyzer for PlaceholderMarketAnalyzer {
    fn analyze(&self, _query: &str) -> anyhow::Result<MarketData> {
        Ok(MarketData {
            current_price: self.current_price(),
            trend: self.trend(),
            volume: self.volume(),
            volatility: self.volatility(),
            indicators: self.indicators(),
        })
    }
}
