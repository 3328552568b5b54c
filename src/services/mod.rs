//! 业务逻辑服务模块
//! 
//! 封装 LLM 调用、关键词分类与响应组装

pub mod chat_service;     // 对话流程
pub mod classifier;       // 关键词分类
pub mod llm_gateway;      // LLM 网关
pub mod market_analyzer;  // 市场分析（占位）
pub mod trade_analyzer;   // 交易分析（占位）
