use crate::config::Config;
use crate::errors::Result;
use crate::models::stock::DateRange;
use crate::scrapers::base::{build_client, fetch_bytes, HistoryScraper, StockScraper};
use crate::util;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use reqwest::Client;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Yahoo Finance 历史行情抓取器（csv 导出）
///
/// Ticker uses Yahoo symbols (`SAN.MC`, `TEF.MC`, `AAPL`), dates are `YYYY-MM-DD`.
pub struct YahooScraper {
    client: Client,
    base_url: String,
}

impl YahooScraper {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.yahoo_url.clone(),
        })
    }

    /// 月份从 0 开始；结束日期参数 (d, e, f) 在开始日期参数 (a, b, c) 之前
    pub fn build_url(&self, ticker: &str, range: &DateRange) -> Result<String> {
        let begin = NaiveDate::parse_from_str(&range.begin, DATE_FORMAT)?;
        let end = NaiveDate::parse_from_str(&range.end, DATE_FORMAT)?;

        Ok(format!(
            "{}/table.csv?s={}&d={}&e={}&f={}&a={}&b={}&c={}&ignore=.csv",
            self.base_url,
            ticker,
            end.month0(),
            end.day(),
            end.year(),
            begin.month0(),
            begin.day(),
            begin.year()
        ))
    }

    /// 每行以换行符结尾重新拼接
    pub fn frame_lines(raw: &[u8]) -> String {
        let text = util::decode_latin1(raw);
        let mut content = String::with_capacity(text.len() + 1);
        for line in util::split_lines(&text) {
            content.push_str(line);
            content.push('\n');
        }
        content
    }
}

impl StockScraper for YahooScraper {
    fn provider_code(&self) -> &'static str {
        "yahoo"
    }
}

#[async_trait]
impl HistoryScraper for YahooScraper {
    async fn fetch_history(&self, ticker: &str, range: &DateRange, output: &Path) -> Result<()> {
        // 日期不合法时在发起请求和打开文件之前失败
        let url = self.build_url(ticker, range)?;
        info!("获取 Yahoo {} 历史数据: {} - {}", ticker, range.begin, range.end);
        debug!("GET {}", url);

        let raw = fetch_bytes(&self.client, &url).await?;
        let content = Self::frame_lines(&raw);
        util::write_text_file(output, &content)?;

        info!("Yahoo {} 数据已写入 {}", ticker, output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DataHubError, ErrorKind};

    fn scraper() -> YahooScraper {
        YahooScraper::new(&Config::new()).unwrap()
    }

    #[test]
    fn url_puts_end_date_before_begin_date_with_zero_based_months() {
        let url = scraper()
            .build_url("SAN.MC", &DateRange::new("2010-03-01", "2011-01-25"))
            .unwrap();
        assert_eq!(
            url,
            "http://ichart.yahoo.com/table.csv?s=SAN.MC&d=0&e=25&f=2011&a=2&b=1&c=2010&ignore=.csv"
        );
    }

    #[test]
    fn december_maps_to_month_index_eleven() {
        let url = scraper()
            .build_url("AAPL", &DateRange::new("2009-12-31", "2010-12-01"))
            .unwrap();
        assert!(url.contains("&d=11&e=1&f=2010&a=11&b=31&c=2009"));
    }

    #[test]
    fn unparsable_date_is_a_date_error() {
        let err = scraper()
            .build_url("AAPL", &DateRange::new("2010/03/01", "2011-01-25"))
            .unwrap_err();
        assert!(matches!(err, DataHubError::DateError(_)));
        assert_eq!(err.kind(), ErrorKind::Date);
    }

    #[test]
    fn frame_lines_terminates_every_line() {
        let raw = b"Date,Open,Close\r\n2011-01-25,10.1,10.3\r\n2011-01-24,9.9,10.0";
        assert_eq!(
            YahooScraper::frame_lines(raw),
            "Date,Open,Close\n2011-01-25,10.1,10.3\n2011-01-24,9.9,10.0\n"
        );
    }
}
