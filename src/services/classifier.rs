//! 关键词分类
//!
//! 对原始问题做不区分大小写的子串匹配，决定附加哪些分析

/// 交易类关键词
pub const TRADE_KEYWORDS: [&str; 4] = ["trade", "buy", "sell", "position"];

/// 市场类关键词
pub const MARKET_KEYWORDS: [&str; 3] = ["market", "price", "trend"];

/// 问题分类结果，两个标志互不影响
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryIntent {
    pub trade: bool,
    pub market: bool,
}

pub fn classify(query: &str) -> QueryIntent {
    let lower = query.to_lowercase();
    QueryIntent {
        trade: contains_any(&lower, &TRADE_KEYWORDS),
        market: contains_any(&lower, &MARKET_KEYWORDS),
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}
