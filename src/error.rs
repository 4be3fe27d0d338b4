use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("cannot resolve endpoint {path}: {source}")]
    InvalidEndpoint {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("timeout must be a positive duration")]
    InvalidTimeout,

    #[error("Invalid header line: {0}")]
    InvalidHeader(String),

    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("creating report directory {}: {source}", path.display())]
    ReportDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing report to {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serializing report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
