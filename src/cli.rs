// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `confbox`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "confbox",
    version,
    about = "Load pipeline configuration and provision the directories it names.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CONFBOX_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load a config document and print its top-level keys.
    Check {
        /// Path to the config document (YAML, or TOML by extension).
        #[arg(value_name = "PATH", default_value = "config/config.yaml")]
        config: PathBuf,
    },

    /// Load a config document and create the directories it names.
    Provision {
        #[arg(value_name = "PATH", default_value = "config/config.yaml")]
        config: PathBuf,

        /// Dotted key holding a single directory path (repeatable).
        #[arg(long, value_name = "KEY")]
        dir: Vec<String>,

        /// Dotted key holding a list of directory paths (repeatable).
        #[arg(long, value_name = "KEY")]
        dirs: Vec<String>,

        /// Do not log each directory.
        #[arg(long, short)]
        quiet: bool,
    },

    /// Print `~ N KB` size labels for files.
    Size {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
