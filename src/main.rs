use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use reqres_contract::catalog::{self, Catalog, CatalogKind};
use reqres_contract::config::{
    parse_header, HarnessConfig, ReportFormat, DEFAULT_BASE_URL, DEFAULT_REPORT_PATH,
};
use reqres_contract::logging::{self, LogLevel};
use reqres_contract::report::{print_entry, print_summary, ReportSink};
use reqres_contract::runner::RunDriver;

#[derive(Parser, Debug)]
#[command(
    name = "reqres-contract",
    version,
    about = "Contract checks for the reqres users API",
    disable_help_subcommand = true
)]
struct Cli {
    /// Base URL the resource paths are resolved against
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Where to write the run report
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_REPORT_PATH)]
    report: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Junit)]
    format: ReportFormat,

    /// Run only these catalogs (repeatable); all catalogs by default
    #[arg(short, long = "catalog", value_enum, value_name = "CATALOG")]
    catalogs: Vec<CatalogKind>,

    /// Extra header sent with every request, as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// Timeout for ordinary requests, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 30_000)]
    timeout_ms: u64,

    /// Timeout for scenarios that expect the call to time out, in microseconds
    #[arg(long, value_name = "US", default_value_t = 500)]
    probe_timeout_us: u64,

    /// Print the catalogs and their scenarios without sending any request
    #[arg(long)]
    list: bool,

    /// Diagnostic log level (written to stderr)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let config = build_config(&cli)?;
    let kinds = if cli.catalogs.is_empty() {
        CatalogKind::ALL.to_vec()
    } else {
        cli.catalogs.clone()
    };
    let catalogs = catalog::select(&config, &kinds);

    if cli.list {
        print_catalogs(&catalogs);
        return Ok(true);
    }

    let driver = RunDriver::new(config.clone()).context("preparing HTTP client")?;
    let mut sink = ReportSink::new(config.report_path.clone(), config.report_format);

    println!(
        "{} {}",
        "Target:".bold(),
        driver.config().base_url.as_str().cyan()
    );
    let summary = driver.run_with(&catalogs, &mut sink, print_entry).await;

    let report_path = sink.path().to_path_buf();
    let report = sink
        .flush()
        .with_context(|| format!("writing report {}", report_path.display()))?;
    print_summary(&report);
    println!(
        "{} {}",
        "Report:".bold(),
        report_path.display().to_string().dimmed()
    );

    Ok(summary.success())
}

fn build_config(cli: &Cli) -> Result<HarnessConfig> {
    let headers = cli
        .headers
        .iter()
        .map(|line| parse_header(line))
        .collect::<Result<Vec<_>, _>>()
        .context("parsing --header")?;

    let config = HarnessConfig::new(&cli.base_url)
        .context("parsing --base-url")?
        .with_request_timeout(Duration::from_millis(cli.timeout_ms))
        .context("parsing --timeout-ms")?
        .with_probe_timeout(Duration::from_micros(cli.probe_timeout_us))
        .context("parsing --probe-timeout-us")?
        .with_default_headers(headers)
        .with_report(cli.report.clone(), cli.format);
    Ok(config)
}

fn print_catalogs(catalogs: &[Catalog]) {
    for catalog in catalogs {
        println!("{}", catalog.name().bold());
        for case in &catalog.cases {
            let scenario = case.scenario();
            println!(
                "  {} {} {}",
                case.name(),
                scenario.method.as_str().dimmed(),
                scenario.path.dimmed()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("reqres-contract").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_public_api() -> Result<()> {
        let cli = parse(&[]);
        let config = build_config(&cli)?;
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.report_path, PathBuf::from(DEFAULT_REPORT_PATH));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.probe_timeout, Duration::from_micros(500));
        assert!(cli.catalogs.is_empty());
        Ok(())
    }

    #[test]
    fn flags_flow_into_config() -> Result<()> {
        let cli = parse(&[
            "--base-url",
            "http://localhost:3000/api",
            "--catalog",
            "post-users",
            "-c",
            "delete-users",
            "-H",
            "x-api-key: secret",
            "--format",
            "json",
            "--report",
            "out/report.json",
        ]);
        let config = build_config(&cli)?;
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/api/");
        assert_eq!(
            cli.catalogs,
            vec![CatalogKind::PostUsers, CatalogKind::DeleteUsers]
        );
        assert_eq!(
            config.default_headers,
            vec![("x-api-key".to_string(), "secret".to_string())]
        );
        assert_eq!(config.report_format, ReportFormat::Json);
        assert_eq!(config.report_path, PathBuf::from("out/report.json"));
        Ok(())
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cli = parse(&["--timeout-ms", "0"]);
        let err = build_config(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("positive"));
    }
}
