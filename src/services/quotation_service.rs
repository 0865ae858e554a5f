//! 报价服务
//!
//! 每个请求依次执行：拉取 → 解码 → 获取存储连接 → 写入，任一阶段失败即终止

use std::sync::Arc;

use crate::error::QuoteResult;
use crate::models::Quotation;
use crate::services::upstream::QuoteProvider;
use crate::store::QuotationStore;

pub struct QuotationService {
    provider: Arc<dyn QuoteProvider>,
    store: Arc<dyn QuotationStore>,
}

impl QuotationService {
    pub fn new(provider: Arc<dyn QuoteProvider>, store: Arc<dyn QuotationStore>) -> Self {
        Self { provider, store }
    }

    /// 拉取一条新报价并写入存储，写入成功后才返回
    ///
    /// 不重试；写入失败时已拉取的报价被丢弃
    pub async fn current_quotation(&self) -> QuoteResult<Quotation> {
        let quotation = self.provider.fetch().await?;
        let stored = self.store.insert(quotation).await?;

        log::info!("报价已入库 id={} bid={}", stored.id, stored.quotation.bid);
        Ok(stored.quotation)
    }
}
