//! 下游客户端
//!
//! 向服务端请求一次报价，只保留买入价并写入本地文件

use std::path::Path;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::config::ClientConfig;
use crate::deadline::with_deadline;
use crate::error::{QuoteError, QuoteResult, Stage};
use crate::models::RateView;

pub struct RateClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl RateClient {
    pub fn new(client: Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// 请求服务端当前报价，截止时间覆盖连接、发送与读取完整响应体
    pub async fn fetch_current_rate(&self) -> QuoteResult<RateView> {
        with_deadline(Stage::Request, self.timeout, self.request()).await
    }

    async fn request(&self) -> QuoteResult<RateView> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteError::UpstreamStatus { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// 覆盖写入 `"<label>: <bid>"`
pub async fn save_rate(path: &Path, label: &str, rate: &RateView) -> QuoteResult<()> {
    let line = format!("{}: {}", label, rate.bid);
    tokio::fs::write(path, line)
        .await
        .map_err(|e| QuoteError::persistence(path.display().to_string(), e))
}

/// 客户端完整流程：先请求，成功后才写文件
pub async fn run(config: &ClientConfig) -> QuoteResult<RateView> {
    let client = RateClient::new(Client::new(), config.endpoint.clone(), config.timeout());

    let rate = client.fetch_current_rate().await?;
    save_rate(&config.output_path(), &config.label, &rate).await?;

    log::info!("{}: {} 已写入 {}", config.label, rate.bid, config.output_path);
    Ok(rate)
}
