// src/logging.rs

//! Logging setup for the `confbox` binary.
//!
//! The filter comes from `--log-level` when given. Otherwise `CONFBOX_LOG` is
//! read as an `EnvFilter` directive string (`debug`, `confbox=trace,warn`).
//! With neither, the level is `info`.
//!
//! Output goes to stderr; stdout only carries command output. The library
//! never installs a subscriber itself. A `ConfigLoader` logs to whichever
//! dispatcher it was given.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "CONFBOX_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV_VAR).ok();

    fmt()
        .with_env_filter(log_filter(cli_level, env_value.as_deref()))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

/// Build the filter from the CLI flag and the raw `CONFBOX_LOG` value.
///
/// Unparseable directives in `env_value` are dropped rather than failing
/// startup.
pub fn log_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> EnvFilter {
    match cli_level {
        Some(lvl) => EnvFilter::builder()
            .with_default_directive(level_from_log_level(lvl).into())
            .parse_lossy(""),
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .parse_lossy(env_value.unwrap_or_default()),
    }
}

pub fn level_from_log_level(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}
