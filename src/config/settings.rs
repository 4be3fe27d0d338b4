use std::{path::PathBuf, time::Duration};

use serde::Serialize;
use url::Url;

use crate::error::{HarnessError, Result};

pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api/";
pub const DEFAULT_REPORT_PATH: &str = "test-reports/results.xml";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_micros(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Junit,
    Json,
}

/// Everything a run needs to know about its target and its output.
///
/// Catalogs receive this by reference when they are built, so the same
/// scenarios can be pointed at production, staging or a local mock.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub base_url: Url,
    /// Applied to scenarios that do not override their timeout.
    pub request_timeout: Duration,
    /// Applied to scenarios that expect the call to time out.
    pub probe_timeout: Duration,
    pub default_headers: Vec<(String, String)>,
    pub report_path: PathBuf,
    pub report_format: ReportFormat,
}

impl HarnessConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            default_headers: Vec::new(),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            report_format: ReportFormat::default(),
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.request_timeout = positive(timeout)?;
        Ok(self)
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.probe_timeout = positive(timeout)?;
        Ok(self)
    }

    pub fn with_default_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn with_report(mut self, path: PathBuf, format: ReportFormat) -> Self {
        self.report_path = path;
        self.report_format = format;
        self
    }

    /// Resolves a resource path such as `users/2` against the base URL.
    pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url =
            self.base_url
                .join(path.trim_start_matches('/'))
                .map_err(|source| HarnessError::InvalidEndpoint {
                    path: path.to_string(),
                    source,
                })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            default_headers: Vec::new(),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            report_format: ReportFormat::default(),
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: &str| HarnessError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base"));
    }
    url.set_query(None);
    url.set_fragment(None);

    // Url::join drops the last segment unless the path ends with a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn positive(timeout: Duration) -> Result<Duration> {
    if timeout.is_zero() {
        Err(HarnessError::InvalidTimeout)
    } else {
        Ok(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn base_url_gains_trailing_slash() -> Result<()> {
        let config = HarnessConfig::new("https://reqres.in/api")?;
        assert_eq!(config.base_url.as_str(), "https://reqres.in/api/");

        let users = config.endpoint("users", &[])?;
        assert_eq!(users.as_str(), "https://reqres.in/api/users");
        Ok(())
    }

    #[test]
    fn endpoint_appends_query_pairs() -> Result<()> {
        let config = HarnessConfig::new("http://127.0.0.1:8080/api/")?;
        let url = config.endpoint("/users", &[("page".to_string(), "2".to_string())])?;
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/users?page=2");
        Ok(())
    }

    #[test]
    fn rejects_non_http_base() {
        let err = HarnessConfig::new("mailto:someone@example.com").unwrap_err();
        assert!(err.to_string().contains("http or https"));

        let err = HarnessConfig::new("not a url").unwrap_err();
        assert!(matches!(err, HarnessError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn rejects_zero_timeouts() {
        let config = HarnessConfig::default();
        assert!(matches!(
            config.clone().with_request_timeout(Duration::ZERO),
            Err(HarnessError::InvalidTimeout)
        ));
        assert!(matches!(
            config.with_probe_timeout(Duration::ZERO),
            Err(HarnessError::InvalidTimeout)
        ));
    }

    #[test]
    fn defaults_point_at_public_api() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.report_path, PathBuf::from("test-reports/results.xml"));
        assert_eq!(config.report_format, ReportFormat::Junit);
        assert!(config.probe_timeout < Duration::from_millis(1));
    }
}
