//! 报价数据模型
//!
//! 所有数值字段保持为字符串，原样保留上游格式

use serde::{Deserialize, Serialize};

/// 单个货币对在某一时刻的报价
///
/// 字段名与上游 JSON 完全一致，反序列化时缺少任一字段即整体失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    /// 货币代码，如 USD
    pub code: String,
    /// 对应货币代码，如 BRL
    pub codein: String,
    /// 展示名称
    pub name: String,
    /// 日内最高价
    pub high: String,
    /// 日内最低价
    pub low: String,
    /// 买入价变动
    #[serde(rename = "varBid")]
    pub var_bid: String,
    /// 涨跌幅
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    /// 买入价
    pub bid: String,
    /// 卖出价
    pub ask: String,
    /// 上游时间戳
    pub timestamp: String,
    /// 上游创建时间
    pub create_date: String,
}

/// 上游响应外层结构 `{"USDBRL": {...}}`
#[derive(Debug, Deserialize)]
pub struct QuotationEnvelope {
    #[serde(rename = "USDBRL")]
    pub usd_brl: Quotation,
}

impl QuotationEnvelope {
    pub fn into_quotation(self) -> Quotation {
        self.usd_brl
    }
}

/// 已入库的报价，附带存储分配的自增主键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredQuotation {
    pub id: i64,
    pub quotation: Quotation,
}

/// 客户端关心的投影：只有买入价
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateView {
    pub bid: String,
}

#[cfg(test)]
pub(crate) fn sample_quotation() -> Quotation {
    Quotation {
        code: "USD".to_string(),
        codein: "BRL".to_string(),
        name: "Dólar Americano/Real Brasileiro".to_string(),
        high: "5.4412".to_string(),
        low: "5.3869".to_string(),
        var_bid: "0.0213".to_string(),
        pct_change: "0.39".to_string(),
        bid: "5.4301".to_string(),
        ask: "5.4311".to_string(),
        timestamp: "1718395198".to_string(),
        create_date: "2024-06-14 16:59:58".to_string(),
    }
}
