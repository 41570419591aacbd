use crate::config::Config;
use crate::errors::{DataHubError, Result};
use crate::models::stock::{DateRange, FetchJob, StockRecord};
use crate::scrapers::base::{HistoryScraper, QuoteScraper, StockScraper};
use crate::scrapers::google::GoogleScraper;
use crate::scrapers::invertia::InvertiaScraper;
use crate::scrapers::yahoo::YahooScraper;
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;

/// 数据服务：对外的入口，所有失败记录日志后以 `false` / `None` 返回，不向调用方传播错误
pub struct DataService {
    invertia: Arc<InvertiaScraper>,
    yahoo: Arc<YahooScraper>,
    google: GoogleScraper,
}

impl DataService {
    /// 创建新的数据服务实例
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            invertia: Arc::new(InvertiaScraper::new(config)?),
            yahoo: Arc::new(YahooScraper::new(config)?),
            google: GoogleScraper::new(config)?,
        })
    }

    /// Download invertia.com history (`YYYY/MM/DD` dates) into `output`.
    pub async fn retrieve_from_invertia(
        &self,
        ticker: &str,
        begin: &str,
        end: &str,
        output: impl AsRef<Path>,
    ) -> bool {
        let range = DateRange::new(begin, end);
        run_history(self.invertia.as_ref(), ticker, &range, output.as_ref()).await
    }

    /// Download Yahoo Finance history (`YYYY-MM-DD` dates) into `output`.
    pub async fn retrieve_from_yahoo(
        &self,
        ticker: &str,
        begin: &str,
        end: &str,
        output: impl AsRef<Path>,
    ) -> bool {
        let range = DateRange::new(begin, end);
        run_history(self.yahoo.as_ref(), ticker, &range, output.as_ref()).await
    }

    /// Latest quote snapshot from Google Finance; `None` on absence or failure.
    pub async fn retrieve_latest_from_google(&self, ticker: &str) -> Option<StockRecord> {
        match self.google.fetch_latest(ticker).await {
            Ok(record) => record,
            Err(e) => {
                report_failure(self.google.provider_code(), &e);
                None
            }
        }
    }

    /// 并发执行互不依赖的下载任务，每个任务一个连接；结果顺序与输入一致
    pub async fn retrieve_batch(&self, jobs: Vec<FetchJob>) -> Vec<(FetchJob, bool)> {
        info!("Processing {} download jobs", jobs.len());

        let mut set = JoinSet::new();
        for (index, job) in jobs.iter().cloned().enumerate() {
            let invertia = Arc::clone(&self.invertia);
            let yahoo = Arc::clone(&self.yahoo);
            set.spawn(async move {
                let ok = match job.provider.as_str() {
                    "invertia" => run_history(invertia.as_ref(), &job.ticker, &job.range, &job.output).await,
                    "yahoo" => run_history(yahoo.as_ref(), &job.ticker, &job.range, &job.output).await,
                    other => {
                        let e = DataHubError::DataError(format!("Unknown provider: {}", other));
                        report_failure(other, &e);
                        false
                    }
                };
                (index, ok)
            });
        }

        let mut outcomes = vec![false; jobs.len()];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, ok)) => outcomes[index] = ok,
                Err(e) => warn!("Download task aborted: {}", e),
            }
        }

        let succeeded = outcomes.iter().filter(|ok| **ok).count();
        info!("{} of {} download jobs succeeded", succeeded, jobs.len());

        jobs.into_iter().zip(outcomes).collect()
    }
}

async fn run_history<S>(scraper: &S, ticker: &str, range: &DateRange, output: &Path) -> bool
where
    S: HistoryScraper + Sync,
{
    match scraper.fetch_history(ticker, range, output).await {
        Ok(()) => true,
        Err(e) => {
            report_failure(scraper.provider_code(), &e);
            false
        }
    }
}

fn report_failure(provider: &str, e: &DataHubError) {
    error!("{} service failed ({:?}): {}", provider, e.kind(), e);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // 本地关闭的端口，连接会被立即拒绝
    fn unreachable_service() -> DataService {
        let config = Config::new()
            .with_base_url("http://127.0.0.1:9")
            .with_request_timeout(Duration::from_secs(2));
        DataService::new(&config).unwrap()
    }

    #[tokio::test]
    async fn unreachable_endpoints_report_failure_without_panicking() {
        let service = unreachable_service();
        let dir = tempfile::tempdir().unwrap();

        assert!(!service
            .retrieve_from_invertia("RV011BSCH", "2010/3/1", "2011/1/25", dir.path().join("a.xls"))
            .await);
        assert!(!service
            .retrieve_from_yahoo("SAN.MC", "2010-03-01", "2011-01-25", dir.path().join("b.csv"))
            .await);
        assert!(service.retrieve_latest_from_google("GOOG").await.is_none());
    }

    #[tokio::test]
    async fn bad_yahoo_date_fails_before_creating_output() {
        let service = unreachable_service();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("never.csv");

        assert!(!service.retrieve_from_yahoo("SAN.MC", "01/03/2010", "2011-01-25", &output).await);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn batch_with_unknown_provider_marks_job_failed() {
        let service = unreachable_service();
        let job = FetchJob::new("bloomberg", "X", DateRange::new("a", "b"), "x.txt");

        let results = service.retrieve_batch(vec![job.clone()]).await;
        assert_eq!(results, vec![(job, false)]);
    }
}
