use std::io::IsTerminal;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::EnvFilter, util::SubscriberInitExt, FmtSubscriber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout stays the
/// human-readable run transcript.
///
/// The level comes only from the command line; `RUST_LOG` is not consulted.
pub fn init(level: LogLevel) {
    let filter = build_filter(level);
    let subscriber = FmtSubscriber::builder()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .finish();
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = subscriber.try_init();
}

fn build_filter(level: LogLevel) -> EnvFilter {
    let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(format!("{crate_name}={}", LevelFilter::from(level)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_targets_this_crate() {
        let filter = build_filter(LogLevel::Debug);
        assert!(filter.to_string().contains("reqres_contract=debug"));
    }
}
