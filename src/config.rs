//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.modelfeed.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Upstream fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Report output settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file path for the feed snapshot.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "public/models.json".to_string()
}

/// Upstream fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds, per endpoint.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "LLM-Tracker/1.0 (GitHub Actions)".to_string()
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Pretty-print the JSON snapshot.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".modelfeed.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; only
    /// explicitly provided values override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        if let Some(timeout) = args.timeout {
            self.fetch.timeout_seconds = timeout;
        }

        if let Some(ref user_agent) = args.user_agent {
            self.fetch.user_agent = user_agent.clone();
        }

        if let Some(format) = args.format {
            self.report.pretty = format == crate::cli::OutputFormat::Pretty;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::path::PathBuf;

    fn make_args() -> crate::cli::Args {
        crate::cli::Args {
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
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "public/models.json");
        assert_eq!(config.fetch.timeout_seconds, 30);
        assert!(config.report.pretty);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "dist/feed.json"
verbose = true

[fetch]
timeout_seconds = 60
user_agent = "custom-agent/2.0"

[report]
pretty = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "dist/feed.json");
        assert!(config.general.verbose);
        assert_eq!(config.fetch.timeout_seconds, 60);
        assert_eq!(config.fetch.user_agent, "custom-agent/2.0");
        assert!(!config.report.pretty);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[fetch]\ntimeout_seconds = 10\n").unwrap();
        assert_eq!(config.fetch.timeout_seconds, 10);
        assert_eq!(config.fetch.user_agent, "LLM-Tracker/1.0 (GitHub Actions)");
        assert_eq!(config.general.output, "public/models.json");
    }

    #[test]
    fn test_merge_with_args_precedence() {
        let mut config = Config::default();
        let mut args = make_args();
        args.output = Some(PathBuf::from("out/snapshot.json"));
        args.timeout = Some(5);
        args.format = Some(OutputFormat::Compact);

        config.merge_with_args(&args);

        assert_eq!(config.general.output, "out/snapshot.json");
        assert_eq!(config.fetch.timeout_seconds, 5);
        assert!(!config.report.pretty);
        // Untouched args leave config values alone
        assert_eq!(config.fetch.user_agent, "LLM-Tracker/1.0 (GitHub Actions)");
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[fetch]"));
        assert!(toml_str.contains("[report]"));

        // Round-trips back into the same defaults
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.fetch.timeout_seconds, 30);
    }
}
