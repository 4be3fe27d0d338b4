use std::time::Instant;

use tracing::{debug, info};

use crate::assertion::{values_differ, Expectation, Verdict};
use crate::catalog::{Case, Catalog, Scenario};
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::invoker::{InvocationResult, Invoker, Outcome};
use crate::report::{EntryStatus, ReportEntry, ReportSink};

use super::summary::RunSummary;

/// Executes catalogs one case at a time and hands each outcome to the sink.
pub struct RunDriver {
    config: HarnessConfig,
    invoker: Invoker,
}

impl RunDriver {
    pub fn new(config: HarnessConfig) -> Result<Self> {
        let invoker = Invoker::new(&config)?;
        Ok(Self { config, invoker })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub async fn run(&self, catalogs: &[Catalog], sink: &mut ReportSink) -> RunSummary {
        self.run_with(catalogs, sink, |_| {}).await
    }

    /// Like [`RunDriver::run`], calling `observe` after each entry is recorded.
    pub async fn run_with<F>(
        &self,
        catalogs: &[Catalog],
        sink: &mut ReportSink,
        mut observe: F,
    ) -> RunSummary
    where
        F: FnMut(&ReportEntry),
    {
        let mut summary = RunSummary::default();
        for catalog in catalogs {
            info!(
                catalog = catalog.name(),
                cases = catalog.cases.len(),
                "running catalog"
            );
            for case in &catalog.cases {
                let entry = self.run_case(catalog, case).await;
                summary.add(&entry);
                observe(&entry);
                sink.record(entry);
            }
        }
        summary
    }

    pub async fn run_case(&self, catalog: &Catalog, case: &Case) -> ReportEntry {
        let start = Instant::now();
        let (status, message) = match case {
            Case::Single {
                scenario,
                expectations,
            } => match self.invoke(scenario).await {
                Ok(result) => judge(&result, expectations),
                Err(message) => (EntryStatus::Error, message),
            },
            Case::Distinct {
                scenario,
                expectations,
                field,
            } => self.run_distinct(scenario, expectations, field).await,
        };

        let entry = ReportEntry::new(
            catalog.name(),
            case.name(),
            status,
            message,
            start.elapsed(),
        );
        match entry.status {
            EntryStatus::Pass => debug!(
                catalog = %entry.catalog,
                scenario = %entry.scenario,
                "scenario passed"
            ),
            _ => info!(
                catalog = %entry.catalog,
                scenario = %entry.scenario,
                status = entry.status.as_str(),
                message = %entry.message,
                "scenario did not pass"
            ),
        }
        entry
    }

    /// Both calls go out in order and each must pass on its own before the
    /// values are compared.
    async fn run_distinct(
        &self,
        scenario: &Scenario,
        expectations: &[Expectation],
        field: &str,
    ) -> (EntryStatus, String) {
        let first = match self.invoke(scenario).await {
            Ok(result) => result,
            Err(message) => return (EntryStatus::Error, message),
        };
        let (status, message) = judge(&first, expectations);
        if status != EntryStatus::Pass {
            return (status, format!("first request: {message}"));
        }

        let second = match self.invoke(scenario).await {
            Ok(result) => result,
            Err(message) => return (EntryStatus::Error, message),
        };
        judge_distinct(&first, &second, expectations, field)
    }

    async fn invoke(&self, scenario: &Scenario) -> std::result::Result<InvocationResult, String> {
        let request = scenario
            .request(&self.config)
            .map_err(|err| err.to_string())?;
        self.invoker
            .invoke(&request)
            .await
            .map_err(|err| err.to_string())
    }
}

/// Turns one result and its expectations into an entry status and message.
///
/// Transport failures and timeouts nobody asked for are errors; broken
/// contracts are failures.
fn judge(result: &InvocationResult, expectations: &[Expectation]) -> (EntryStatus, String) {
    let expects_timeout = expectations.contains(&Expectation::TimeoutExpected);
    match &result.outcome {
        Outcome::TransportError(message) => {
            return (EntryStatus::Error, format!("transport error: {message}"));
        }
        Outcome::TimedOut if !expects_timeout => {
            return (
                EntryStatus::Error,
                format!(
                    "{} {} timed out after {:.1} ms",
                    result.method,
                    result.url,
                    result.elapsed.as_secs_f64() * 1000.0
                ),
            );
        }
        _ => {}
    }

    let verdicts: Vec<(&Expectation, Verdict)> = expectations
        .iter()
        .map(|expectation| (expectation, expectation.evaluate(result)))
        .collect();

    let failures: Vec<String> = verdicts
        .iter()
        .filter(|(_, verdict)| !verdict.passed)
        .map(|(expectation, verdict)| format!("{}: {}", expectation.label(), verdict.message))
        .collect();

    if failures.is_empty() {
        let passed: Vec<&str> = verdicts
            .iter()
            .map(|(_, verdict)| verdict.message.as_str())
            .collect();
        (EntryStatus::Pass, passed.join("; "))
    } else {
        (EntryStatus::Fail, failures.join("; "))
    }
}

/// Judges both responses of a distinct case, then compares `field` across
/// them.
fn judge_distinct(
    first: &InvocationResult,
    second: &InvocationResult,
    expectations: &[Expectation],
    field: &str,
) -> (EntryStatus, String) {
    for (which, result) in [("first", first), ("second", second)] {
        let (status, message) = judge(result, expectations);
        if status != EntryStatus::Pass {
            return (status, format!("{which} request: {message}"));
        }
    }

    let verdict = values_differ(first, second, field);
    if verdict.passed {
        (EntryStatus::Pass, verdict.message)
    } else {
        (EntryStatus::Fail, format!("values-differ: {}", verdict.message))
    }
}
