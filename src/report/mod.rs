mod junit;
mod models;
mod printer;
mod sink;

pub use junit::render_junit;
pub use models::{EntryStatus, ReportEntry, RunReport};
pub use printer::{print_entry, print_summary};
pub use sink::ReportSink;
