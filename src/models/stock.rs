use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 最新行情快照，字段名到字段值的扁平映射
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StockRecord {
    pub ticker: String,
    pub fields: BTreeMap<String, String>,
}

impl StockRecord {
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            fields: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Date range exactly as the caller supplied it; each scraper reformats it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub begin: String,
    pub end: String,
}

impl DateRange {
    pub fn new(begin: &str, end: &str) -> Self {
        Self {
            begin: begin.to_string(),
            end: end.to_string(),
        }
    }
}

/// 单个历史数据下载任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchJob {
    pub provider: String,
    pub ticker: String,
    pub range: DateRange,
    pub output: PathBuf,
}

impl FetchJob {
    pub fn new(provider: &str, ticker: &str, range: DateRange, output: impl Into<PathBuf>) -> Self {
        Self {
            provider: provider.to_lowercase(),
            ticker: ticker.to_string(),
            range,
            output: output.into(),
        }
    }
}
