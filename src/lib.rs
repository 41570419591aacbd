// 公开导出的模块，供外部使用
pub mod models;
pub mod errors;
pub mod config;
pub mod scrapers;
pub mod services;

#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use models::stock::{DateRange, FetchJob, StockRecord};
pub use services::data_service::DataService;
pub use config::Config;
pub use errors::{Result, DataHubError, ErrorKind};
