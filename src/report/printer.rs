use colored::{Color, Colorize};

use super::models::{EntryStatus, ReportEntry, RunReport};

fn status_color(status: EntryStatus) -> Color {
    match status {
        EntryStatus::Pass => Color::Green,
        EntryStatus::Fail => Color::Red,
        EntryStatus::Error => Color::Yellow,
    }
}

pub fn print_entry(entry: &ReportEntry) {
    println!("{}", format_entry(entry));
}

fn format_entry(entry: &ReportEntry) -> String {
    let label = format!("{:<5}", entry.status.as_str().to_ascii_uppercase());
    let mut line = format!(
        "{} {}::{} {}",
        label.color(status_color(entry.status)).bold(),
        entry.catalog.cyan(),
        entry.scenario,
        format!("({:.1} ms)", entry.duration.as_secs_f64() * 1000.0).dimmed()
    );
    if entry.status != EntryStatus::Pass {
        line.push_str(&format!("\n      {}", entry.message.dimmed()));
    }
    line
}

pub fn print_summary(report: &RunReport) {
    let passed = report.count(EntryStatus::Pass);
    let failed = report.count(EntryStatus::Fail);
    let errors = report.count(EntryStatus::Error);

    let verdict = if report.success() {
        "PASSED".green().bold()
    } else {
        "FAILED".red().bold()
    };

    println!(
        "{} {} {}, {}, {} {}",
        verdict,
        format!("{} scenario(s):", report.total()).bold(),
        format!("{passed} passed").green(),
        format!("{failed} failed").red(),
        format!("{errors} errored").yellow(),
        format!("({:.2} s)", report.duration().as_secs_f64()).dimmed()
    );
}
