use crate::config::Config;
use crate::errors::{DataHubError, Result};
use crate::models::stock::StockRecord;
use crate::scrapers::base::{build_client, fetch_bytes, QuoteScraper, StockScraper};
use crate::util;
use async_trait::async_trait;
use log::{debug, info};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::Client;

const FINANCE_TAG: &[u8] = b"finance";

/// Google Finance 最新行情抓取器（XML 接口）
pub struct GoogleScraper {
    client: Client,
    base_url: String,
}

impl GoogleScraper {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.google_url.clone(),
        })
    }

    pub fn build_url(&self, ticker: &str) -> String {
        format!("{}/ig/api?stock={}", self.base_url, ticker)
    }

    /// Parse the first `<finance>` element of `xml` into a record.
    ///
    /// Every immediate child contributes `tag name -> first attribute value`.
    /// Children without attributes are skipped. Returns `Ok(None)` when the
    /// document has no `<finance>` element.
    pub fn parse_finance(ticker: &str, xml: &str) -> Result<Option<StockRecord>> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut depth = 0usize;
        // (finance 元素所在深度, 已收集的字段)
        let mut finance: Option<(usize, StockRecord)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    depth += 1;
                    match finance.as_mut() {
                        Some((fd, rec)) => {
                            if depth == *fd + 1 {
                                add_child_field(rec, &e)?;
                            }
                        }
                        None if e.name().as_ref() == FINANCE_TAG => {
                            finance = Some((depth, StockRecord::new(ticker)));
                        }
                        None => {}
                    }
                }
                Event::Empty(e) => match finance.as_mut() {
                    Some((fd, rec)) => {
                        if depth == *fd {
                            add_child_field(rec, &e)?;
                        }
                    }
                    // 空的 finance 元素：没有子元素
                    None if e.name().as_ref() == FINANCE_TAG => {
                        return Ok(Some(StockRecord::new(ticker)));
                    }
                    None => {}
                },
                Event::End(_) => {
                    if matches!(&finance, Some((fd, _)) if *fd == depth) {
                        break;
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(finance.map(|(_, rec)| rec))
    }
}

fn add_child_field(record: &mut StockRecord, element: &BytesStart<'_>) -> Result<()> {
    let name = std::str::from_utf8(element.name().as_ref())
        .map_err(|e| DataHubError::DataError(format!("Invalid tag name: {}", e)))?
        .to_string();

    match element.attributes().next() {
        Some(attr) => {
            let attr = attr?;
            let value = attr.unescape_value()?;
            record.insert(&name, &value);
        }
        None => debug!("跳过没有属性的元素 <{}>", name),
    }
    Ok(())
}

impl StockScraper for GoogleScraper {
    fn provider_code(&self) -> &'static str {
        "google"
    }
}

#[async_trait]
impl QuoteScraper for GoogleScraper {
    async fn fetch_latest(&self, ticker: &str) -> Result<Option<StockRecord>> {
        let url = self.build_url(ticker);
        info!("获取 Google {} 最新行情", ticker);
        debug!("GET {}", url);

        let raw = fetch_bytes(&self.client, &url).await?;
        let xml = match String::from_utf8(raw) {
            Ok(text) => text,
            Err(e) => util::decode_latin1(e.as_bytes()),
        };

        let record = Self::parse_finance(ticker, &xml)?;
        match &record {
            Some(r) => info!("Google {} 返回 {} 个字段", ticker, r.len()),
            None => info!("Google 响应中没有 {} 的 finance 元素", ticker),
        }
        Ok(record)
    }
}
