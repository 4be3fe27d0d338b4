use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use tempfile::NamedTempFile;
use tracing::info;

use crate::config::ReportFormat;
use crate::error::{HarnessError, Result};

use super::junit::render_junit;
use super::models::{ReportEntry, RunReport};

/// Collects entries in run order and writes them out once.
///
/// `flush` consumes the sink. The file is written to a temporary sibling and
/// renamed over the destination, so readers never see a partial report.
#[derive(Debug)]
pub struct ReportSink {
    path: PathBuf,
    format: ReportFormat,
    report: RunReport,
}

impl ReportSink {
    pub fn new(path: impl Into<PathBuf>, format: ReportFormat) -> Self {
        Self {
            path: path.into(),
            format,
            report: RunReport::new(Utc::now()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&mut self, entry: ReportEntry) {
        self.report.entries.push(entry);
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn flush(self) -> Result<RunReport> {
        let rendered = match self.format {
            ReportFormat::Junit => render_junit(&self.report),
            ReportFormat::Json => serde_json::to_string_pretty(&self.report)?,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| HarnessError::ReportDirectory {
            path: dir.clone(),
            source,
        })?;

        let write_error = |source| HarnessError::ReportWrite {
            path: self.path.clone(),
            source,
        };
        let mut staged = NamedTempFile::new_in(&dir).map_err(write_error)?;
        staged
            .write_all(rendered.as_bytes())
            .and_then(|_| staged.as_file().sync_all())
            .map_err(write_error)?;
        staged
            .persist(&self.path)
            .map_err(|err| write_error(err.error))?;

        info!(
            path = %self.path.display(),
            entries = self.report.total(),
            "report written"
        );
        Ok(self.report)
    }
}
