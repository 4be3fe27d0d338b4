mod headers;
mod settings;

pub use headers::{merge_headers, parse_header};
pub use settings::{HarnessConfig, ReportFormat, DEFAULT_BASE_URL, DEFAULT_REPORT_PATH};
