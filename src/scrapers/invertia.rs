use crate::config::Config;
use crate::errors::Result;
use crate::models::stock::DateRange;
use crate::scrapers::base::{build_client, fetch_bytes, HistoryScraper, StockScraper};
use crate::util;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::path::Path;

/// invertia.com 历史行情抓取器（xls 导出）
///
/// Ticker uses invertia's own codes, e.g. `RV011BSCH` or `RV011TELEFON`.
/// Dates are `YYYY/MM/DD` and are passed to the service verbatim.
pub struct InvertiaScraper {
    client: Client,
    base_url: String,
}

impl InvertiaScraper {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.invertia_url.clone(),
        })
    }

    pub fn build_url(&self, ticker: &str, range: &DateRange) -> String {
        format!(
            "{}/inc/bolsa/ficha/excel.asp?FechaDesde={}%2000:00&FechaHasta={}%2000:00&idtel={}",
            self.base_url, range.begin, range.end, ticker
        )
    }

    /// 逐行拼接（不保留换行），再去除变音符号
    pub fn clean_content(raw: &[u8]) -> String {
        let text = util::decode_latin1(raw);
        let joined: String = util::split_lines(&text).concat();
        util::strip_diacritics(&joined)
    }
}

impl StockScraper for InvertiaScraper {
    fn provider_code(&self) -> &'static str {
        "invertia"
    }
}

#[async_trait]
impl HistoryScraper for InvertiaScraper {
    async fn fetch_history(&self, ticker: &str, range: &DateRange, output: &Path) -> Result<()> {
        let url = self.build_url(ticker, range);
        info!("获取 invertia {} 历史数据: {} - {}", ticker, range.begin, range.end);
        debug!("GET {}", url);

        let raw = fetch_bytes(&self.client, &url).await?;
        let content = Self::clean_content(&raw);

        // 非空内容作为单独一行写出；空响应生成空文件
        let mut line = content;
        if !line.is_empty() {
            line.push('\n');
        }
        util::write_text_file(output, &line)?;

        info!("invertia {} 数据已写入 {}", ticker, output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraper() -> InvertiaScraper {
        InvertiaScraper::new(&Config::new()).unwrap()
    }

    #[test]
    fn url_embeds_dates_and_ticker_verbatim() {
        let url = scraper().build_url("RV011IBERDRO", &DateRange::new("2010/2/23", "2011/4/20"));
        assert_eq!(
            url,
            "http://www.invertia.com/inc/bolsa/ficha/excel.asp?FechaDesde=2010/2/23%2000:00&FechaHasta=2011/4/20%2000:00&idtel=RV011IBERDRO"
        );
    }

    #[test]
    fn malformed_dates_are_not_validated() {
        let url = scraper().build_url("RV011BSCH", &DateRange::new("not-a-date", ""));
        assert!(url.contains("FechaDesde=not-a-date%2000:00&FechaHasta=%2000:00"));
    }

    #[test]
    fn clean_content_joins_lines_and_strips_accents() {
        let raw = b"<td>Cotizaci\xf3n</td>\r\n<td>Telef\xf3nica</td>\n<td>Espa\xf1a</td>";
        assert_eq!(
            InvertiaScraper::clean_content(raw),
            "<td>Cotizacion</td><td>Telefonica</td><td>Espana</td>"
        );
    }

    #[test]
    fn clean_content_of_empty_body_is_empty() {
        assert_eq!(InvertiaScraper::clean_content(b""), "");
    }
}
