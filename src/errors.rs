use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataHubError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Date parsing error: {0}")]
    DateError(#[from] chrono::ParseError),

    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// 错误类别，供调用方区分失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Date,
    Parse,
    Io,
    Data,
}

impl DataHubError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataHubError::IoError(_) => ErrorKind::Io,
            DataHubError::RequestError(_) => ErrorKind::Network,
            DataHubError::DateError(_) => ErrorKind::Date,
            DataHubError::XmlError(_) => ErrorKind::Parse,
            DataHubError::DataError(_) | DataHubError::Unknown(_) => ErrorKind::Data,
        }
    }
}

pub type Result<T> = std::result::Result<T, DataHubError>;

// 用于从字符串创建错误
impl From<String> for DataHubError {
    fn from(s: String) -> Self {
        DataHubError::Unknown(s)
    }
}

// 用于从&str创建错误
impl From<&str> for DataHubError {
    fn from(s: &str) -> Self {
        DataHubError::Unknown(s.to_string())
    }
}

// quick-xml 属性解析错误单独成型，统一归入 XML 错误
impl From<quick_xml::events::attributes::AttrError> for DataHubError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        DataHubError::XmlError(quick_xml::Error::from(e))
    }
}
