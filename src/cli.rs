//! Command-line argument parsing for IntelliSQL.

use clap::Parser;
use std::path::PathBuf;

/// Ask a SQLite database questions in plain English.
#[derive(Parser, Debug)]
#[command(name = "intellisql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(short = 'd', long, value_name = "PATH", env = "INTELLISQL_DB")]
    pub database: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// LLM provider to use (gemini or mock)
    #[arg(long, value_name = "PROVIDER")]
    pub llm: Option<String>,

    /// Model name to request from the provider
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Ask a single question and exit instead of starting the REPL
    #[arg(short = 'q', long, value_name = "TEXT")]
    pub question: Option<String>,

    /// Reject SQL that modifies the database
    #[arg(long)]
    pub read_only: bool,

    /// Create and seed the demo table, print its contents, and exit
    #[arg(long)]
    pub setup: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}
