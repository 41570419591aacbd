use crate::models::stock::{DateRange, StockRecord};
use crate::config::Config;
use crate::errors::{DataHubError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;

/// Base trait for stock data scrapers
pub trait StockScraper {
    /// Short code of the service this scraper talks to
    fn provider_code(&self) -> &'static str;
}

/// Scrapers that download a historical series into a local file
#[async_trait]
pub trait HistoryScraper: StockScraper {
    /// Download history for `ticker` over `range` and overwrite `output`
    async fn fetch_history(&self, ticker: &str, range: &DateRange, output: &Path) -> Result<()>;
}

/// Scrapers that return the latest quote snapshot
#[async_trait]
pub trait QuoteScraper: StockScraper {
    /// `Ok(None)` when the response carries no quote for the ticker
    async fn fetch_latest(&self, ticker: &str) -> Result<Option<StockRecord>>;
}

/// 构建带超时的 HTTP 客户端，每个抓取器持有一个
pub fn build_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder().timeout(config.request_timeout);
    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent.clone());
    }
    builder.build().map_err(DataHubError::RequestError)
}

/// 单次 GET 请求，读取完整响应体。HTTP 错误状态视为失败。
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
