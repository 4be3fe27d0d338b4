use std::fmt::Write as _;

use super::models::{EntryStatus, ReportEntry, RunReport};

const SUITES_NAME: &str = env!("CARGO_PKG_NAME");

/// Renders the run as JUnit XML with one `<testsuite>` per catalog.
pub fn render_junit(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        "<testsuites name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" time=\"{:.3}\" timestamp=\"{}\">",
        SUITES_NAME,
        report.total(),
        report.count(EntryStatus::Fail),
        report.count(EntryStatus::Error),
        report.duration().as_secs_f64(),
        report.started_at.format("%Y-%m-%dT%H:%M:%S")
    );

    for catalog in report.catalogs() {
        let entries: Vec<&ReportEntry> = report
            .entries
            .iter()
            .filter(|entry| entry.catalog == catalog)
            .collect();
        let failures = entries
            .iter()
            .filter(|entry| entry.status == EntryStatus::Fail)
            .count();
        let errors = entries
            .iter()
            .filter(|entry| entry.status == EntryStatus::Error)
            .count();
        let time: f64 = entries.iter().map(|entry| entry.duration.as_secs_f64()).sum();

        let _ = writeln!(
            out,
            "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"0\" time=\"{:.3}\">",
            xml_escape(catalog),
            entries.len(),
            failures,
            errors,
            time
        );
        for entry in entries {
            render_case(&mut out, entry);
        }
        out.push_str("  </testsuite>\n");
    }

    out.push_str("</testsuites>\n");
    out
}

fn render_case(out: &mut String, entry: &ReportEntry) {
    let _ = write!(
        out,
        "    <testcase classname=\"{}\" name=\"{}\" time=\"{:.3}\"",
        xml_escape(&entry.catalog),
        xml_escape(&entry.scenario),
        entry.duration.as_secs_f64()
    );
    match entry.status {
        EntryStatus::Pass => out.push_str("/>\n"),
        EntryStatus::Fail => {
            let _ = writeln!(
                out,
                ">\n      <failure message=\"{0}\" type=\"AssertionError\">{0}</failure>\n    </testcase>",
                xml_escape(&entry.message)
            );
        }
        EntryStatus::Error => {
            let _ = writeln!(
                out,
                ">\n      <error message=\"{0}\" type=\"UnexpectedOutcome\">{0}</error>\n    </testcase>",
                xml_escape(&entry.message)
            );
        }
    }
}

fn xml_escape(input: &str) -> String {
    input
        .chars()
        .filter(|ch| matches!(ch, '\t' | '\n' | '\r') || !ch.is_control())
        .collect::<String>()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn sample() -> RunReport {
        let mut report = RunReport::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        report.entries.push(ReportEntry::new(
            "get-users",
            "successful_response",
            EntryStatus::Pass,
            "ok",
            Duration::from_millis(120),
        ));
        report.entries.push(ReportEntry::new(
            "post-users",
            "post_with_empty_payload",
            EntryStatus::Fail,
            "status-equals: expected status 400, got 201",
            Duration::from_millis(80),
        ));
        report.entries.push(ReportEntry::new(
            "get-users",
            "timeout_scenario",
            EntryStatus::Error,
            "transport error: <dns> & \"refused\"",
            Duration::from_millis(5),
        ));
        report
    }

    #[test]
    fn groups_cases_by_catalog() {
        let xml = render_junit(&sample());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("tests=\"3\" failures=\"1\" errors=\"1\""));
        assert!(xml.contains("timestamp=\"2024-05-01T12:00:00\""));
        assert_eq!(xml.matches("<testsuite ").count(), 2);
        assert!(xml.contains(
            "<testsuite name=\"get-users\" tests=\"2\" failures=\"0\" errors=\"1\" skipped=\"0\" time=\"0.125\">"
        ));
        assert!(xml.contains(
            "<testcase classname=\"get-users\" name=\"successful_response\" time=\"0.120\"/>"
        ));
        assert!(xml.trim_end().ends_with("</testsuites>"));
    }

    #[test]
    fn failure_and_error_messages_are_escaped() {
        let xml = render_junit(&sample());
        assert!(xml.contains("<failure message=\"status-equals: expected status 400, got 201\""));
        assert!(xml.contains("transport error: &lt;dns&gt; &amp; &quot;refused&quot;"));
        assert!(xml.contains("<error message="));
    }

    #[test]
    fn empty_run_is_still_a_document() {
        let xml = render_junit(&RunReport::new(Utc::now()));
        assert!(xml.contains("tests=\"0\""));
        assert!(!xml.contains("<testsuite "));
    }
}
