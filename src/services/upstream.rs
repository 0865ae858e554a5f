//! 上游报价接口
//!
//! 对接 https://economia.awesomeapi.com.br/json/last/USD-BRL

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::deadline::with_deadline;
use crate::error::{QuoteError, QuoteResult, Stage};
use crate::models::{Quotation, QuotationEnvelope};

/// 报价来源
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// 拉取并解码一条报价，超出截止时间返回 `QuoteError::Timeout`
    async fn fetch(&self) -> QuoteResult<Quotation>;
}

/// AwesomeAPI 报价来源，HTTP 客户端由调用方构造并注入
pub struct AwesomeApiProvider {
    client: Client,
    url: String,
    timeout: Duration,
}

impl AwesomeApiProvider {
    pub fn new(client: Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    async fn request(&self) -> QuoteResult<Quotation> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteError::UpstreamStatus { status, body });
        }

        let bytes = response.bytes().await?;
        let envelope: QuotationEnvelope = serde_json::from_slice(&bytes)?;
        Ok(envelope.into_quotation())
    }
}

#[async_trait]
impl QuoteProvider for AwesomeApiProvider {
    async fn fetch(&self) -> QuoteResult<Quotation> {
        log::debug!("请求上游报价: {}", self.url);
        with_deadline(Stage::Fetch, self.timeout, self.request()).await
    }
}
