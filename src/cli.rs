//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// ModelFeed - LLM model metadata aggregator
///
/// Fetch model listings from the upstream catalog endpoints, merge them
/// into one snapshot sorted by creation time, and write it as JSON for
/// the tracker frontend.
///
/// Examples:
///   modelfeed
///   modelfeed --output public/models.json --timeout 30
///   modelfeed --format compact --quiet
///   modelfeed --fail-on-errors
///   modelfeed --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Output file path for the feed snapshot
    ///
    /// If not specified, uses the config value or public/models.json.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .modelfeed.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds, per endpoint
    ///
    /// How long to wait for each endpoint to respond. Default: from
    /// config or 30s.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// User-Agent header sent to the upstream API
    ///
    /// Can also be set via MODELFEED_USER_AGENT env var or .modelfeed.toml.
    #[arg(long, value_name = "UA", env = "MODELFEED_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Output format (pretty, compact)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: list the configured sources without issuing any requests
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .modelfeed.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Fail if any endpoint could not be fetched
    ///
    /// Useful for CI pipelines. Exit code 2 when at least one endpoint
    /// failed; the snapshot is still written first.
    #[arg(long)]
    pub fail_on_errors: bool,
}

/// Output format for the feed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    #[default]
    Pretty,
    /// Compact single-line JSON
    Compact,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Validate output path if provided
        if let Some(ref output) = self.output {
            if output.as_os_str().is_empty() {
                return Err("Output path must not be empty".to_string());
            }
            if output.is_dir() {
                return Err(format!(
                    "Output path is a directory: {}",
                    output.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            output: None,
            config: None,
            timeout: None,
            user_agent: None,
            format: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
            fail_on_errors: false,
        }
    }

    #[test]
    fn test_validation_passes_on_defaults() {
        let args = make_args();
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut args = make_args();
        args.timeout = Some(0);
        assert!(args.validate().is_err());

        args.timeout = Some(30);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_skipped_for_init_config() {
        let mut args = make_args();
        args.init_config = true;
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
