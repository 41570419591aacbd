use std::time::Duration;

pub const DEFAULT_INVERTIA_URL: &str = "http://www.invertia.com";
pub const DEFAULT_YAHOO_URL: &str = "http://ichart.yahoo.com";
pub const DEFAULT_GOOGLE_URL: &str = "http://www.google.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub request_timeout: Duration,
    pub invertia_url: String,
    pub yahoo_url: String,
    pub google_url: String,
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            invertia_url: DEFAULT_INVERTIA_URL.to_string(),
            yahoo_url: DEFAULT_YAHOO_URL.to_string(),
            google_url: DEFAULT_GOOGLE_URL.to_string(),
            user_agent: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_invertia_url(mut self, url: &str) -> Self {
        self.invertia_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_yahoo_url(mut self, url: &str) -> Self {
        self.yahoo_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_google_url(mut self, url: &str) -> Self {
        self.google_url = url.trim_end_matches('/').to_string();
        self
    }

    /// 所有服务指向同一地址，测试桩服务器使用
    pub fn with_base_url(self, url: &str) -> Self {
        self.with_invertia_url(url)
            .with_yahoo_url(url)
            .with_google_url(url)
    }

    pub fn with_user_agent(mut self, agent: &str) -> Self {
        self.user_agent = Some(agent.to_string());
        self
    }
}
