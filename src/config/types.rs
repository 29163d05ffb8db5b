//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    COMMON_DKIM_SELECTORS, DEFAULT_DNS_PORT, DNS_TIMEOUT_SECS, ENV_RESOLVER, ENV_TIMEOUT,
    MAX_DNS_TIMEOUT_SECS,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sectioned, human-readable report
    Plain,
    /// Pretty-printed JSON document
    Json,
}

/// Settings used to build the DNS resolver.
///
/// Passed explicitly to the resolver adapter at construction; nothing about
/// the resolver is cached globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Per-query timeout
    pub timeout: Duration,
    /// Nameserver to query instead of the system configuration
    pub nameserver: Option<SocketAddr>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
            nameserver: None,
        }
    }
}

/// Command-line options and configuration.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// spoof_check example.com
///
/// # Query a specific nameserver with a shorter timeout
/// spoof_check example.com --resolver 1.1.1.1 --timeout-seconds 2
///
/// # Probe custom DKIM selectors and emit JSON
/// spoof_check example.com --selectors s1,s2 --format json
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "spoof_check",
    version,
    about = "Grades a domain's exposure to email spoofing from its SPF, DMARC and DKIM records."
)]
pub struct Config {
    /// Domain to analyze
    pub domain: String,

    /// Per-query DNS timeout in seconds
    #[arg(long, env = ENV_TIMEOUT, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Nameserver to query (IP or IP:PORT); defaults to the system resolver
    #[arg(long, env = ENV_RESOLVER, value_parser = parse_nameserver)]
    pub resolver: Option<SocketAddr>,

    /// Comma-separated DKIM selectors to probe instead of the built-in list
    #[arg(long, value_delimiter = ',')]
    pub selectors: Option<Vec<String>>,

    /// Report format: plain|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            timeout_seconds: DNS_TIMEOUT_SECS,
            resolver: None,
            selectors: None,
            format: OutputFormat::Plain,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks option values that clap cannot express as types.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the timeout is zero or too large, or if a
    /// selector override was given but contains no usable selector.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.timeout_seconds > MAX_DNS_TIMEOUT_SECS {
            return Err(ConfigError::TimeoutTooLarge {
                value: self.timeout_seconds,
                max: MAX_DNS_TIMEOUT_SECS,
            });
        }
        if self.selectors.is_some() && self.dkim_selectors().is_empty() {
            return Err(ConfigError::EmptySelectors);
        }
        for selector in self.dkim_selectors() {
            if !is_valid_selector(&selector) {
                return Err(ConfigError::InvalidSelector(selector));
            }
        }
        Ok(())
    }

    /// Resolver settings derived from the CLI options.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            timeout: Duration::from_secs(self.timeout_seconds),
            nameserver: self.resolver,
        }
    }

    /// DKIM selectors to probe, in order, lowercased and without duplicates.
    pub fn dkim_selectors(&self) -> Vec<String> {
        let raw: Vec<String> = match &self.selectors {
            Some(list) => list.clone(),
            None => COMMON_DKIM_SELECTORS.iter().map(|s| s.to_string()).collect(),
        };

        let mut selectors: Vec<String> = Vec::with_capacity(raw.len());
        for selector in raw {
            let selector = selector.trim().to_ascii_lowercase();
            if !selector.is_empty() && !selectors.contains(&selector) {
                selectors.push(selector);
            }
        }
        selectors
    }
}

/// Selectors are one or more DNS labels; `_domainkey` is appended by the probe.
fn is_valid_selector(selector: &str) -> bool {
    selector.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

/// Parses `IP` or `IP:PORT` (IPv6 with a port must be bracketed).
pub(crate) fn parse_nameserver(value: &str) -> Result<SocketAddr, String> {
    let value = value.trim();
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    value
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| format!("'{value}' is not an IP address or IP:PORT pair"))
}
