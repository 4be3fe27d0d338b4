use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pass,
    Fail,
    Error,
}

impl EntryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub catalog: String,
    pub scenario: String,
    pub status: EntryStatus,
    pub message: String,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

impl ReportEntry {
    pub fn new(
        catalog: &str,
        scenario: &str,
        status: EntryStatus,
        message: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            catalog: catalog.to_string(),
            scenario: scenario.to_string(),
            status,
            message: message.into(),
            duration,
        }
    }
}

/// Every entry of a run, in the order the scenarios executed.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub entries: Vec<ReportEntry>,
}

impl RunReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            entries: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn count(&self, status: EntryStatus) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    }

    pub fn duration(&self) -> Duration {
        self.entries.iter().map(|entry| entry.duration).sum()
    }

    pub fn success(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| entry.status == EntryStatus::Pass)
    }

    /// Catalog names in first-seen order.
    pub fn catalogs(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.catalog.as_str()) {
                names.push(&entry.catalog);
            }
        }
        names
    }
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(catalog: &str, status: EntryStatus) -> ReportEntry {
        ReportEntry::new(catalog, "case", status, "msg", Duration::from_millis(250))
    }

    #[test]
    fn counts_and_success() {
        let mut report = RunReport::new(Utc::now());
        assert!(report.success());

        report.entries.push(entry("get-users", EntryStatus::Pass));
        report.entries.push(entry("post-users", EntryStatus::Fail));
        report.entries.push(entry("get-users", EntryStatus::Error));

        assert_eq!(report.total(), 3);
        assert_eq!(report.count(EntryStatus::Fail), 1);
        assert_eq!(report.count(EntryStatus::Error), 1);
        assert_eq!(report.duration(), Duration::from_millis(750));
        assert_eq!(report.catalogs(), vec!["get-users", "post-users"]);
        assert!(!report.success());
    }

    #[test]
    fn entry_serializes_duration_in_millis() {
        let value = serde_json::to_value(entry("delete-users", EntryStatus::Pass)).unwrap();
        assert_eq!(value["duration_ms"], json!(250.0));
        assert_eq!(value["status"], json!("pass"));
    }
}
