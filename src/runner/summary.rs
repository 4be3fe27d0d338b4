use crate::report::{EntryStatus, ReportEntry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl RunSummary {
    pub fn add(&mut self, entry: &ReportEntry) {
        match entry.status {
            EntryStatus::Pass => self.passed += 1,
            EntryStatus::Fail => self.failed += 1,
            EntryStatus::Error => self.errored += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errored
    }

    pub fn success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}
