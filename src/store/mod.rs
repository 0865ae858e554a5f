//! 报价存储
//!
//! 只追加写入，记录每一次成功拉取的报价

pub mod sqlite;

use async_trait::async_trait;

use crate::error::QuoteResult;
use crate::models::{Quotation, StoredQuotation};

pub use sqlite::{init_schema, SqliteStore};

/// 报价持久化接口
#[async_trait]
pub trait QuotationStore: Send + Sync {
    /// 写入一条报价，返回带存储主键的记录
    ///
    /// 实现需自行约束写入截止时间；返回错误时不得留下任何记录
    async fn insert(&self, quotation: Quotation) -> QuoteResult<StoredQuotation>;
}
