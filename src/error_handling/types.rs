//! Error type definitions.
//!
//! This module defines the error types used throughout the application.
//! Lookup failures are not errors at this level: they are recovered per
//! mechanism and surface as inconclusive findings.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Rejections of the input domain. Raised before any query is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Nothing left after trimming.
    #[error("domain name is empty")]
    Empty,

    /// Longer than the 253 characters a hostname may have.
    #[error("domain name is {0} characters long (maximum 253)")]
    TooLong(usize),

    /// A single label, e.g. `localhost`.
    #[error("'{0}' is not a fully qualified domain name")]
    SingleLabel(String),

    /// An IP literal was given instead of a name.
    #[error("'{0}' is an IP address, not a domain name")]
    IpAddress(String),

    /// A label is empty, too long, or contains invalid characters.
    #[error("invalid label '{label}' in '{domain}'")]
    InvalidLabel {
        /// The whole input
        domain: String,
        /// The offending label
        label: String,
    },

    /// The top-level label is all digits.
    #[error("top-level label of '{0}' is numeric")]
    NumericTld(String),
}

/// Option values that parse but are unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `--timeout-seconds 0`
    #[error("timeout must be at least one second")]
    ZeroTimeout,

    /// Timeout beyond the accepted bound.
    #[error("timeout of {value}s exceeds the maximum of {max}s")]
    TimeoutTooLarge {
        /// Requested timeout
        value: u64,
        /// Accepted maximum
        max: u64,
    },

    /// `--selectors` given but nothing usable in it.
    #[error("selector list is empty")]
    EmptySelectors,

    /// A selector that cannot form a DNS name.
    #[error("invalid DKIM selector '{0}'")]
    InvalidSelector(String),
}

/// Errors that abort a run before any assessment is produced.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input domain was rejected.
    #[error("invalid domain: {0}")]
    InvalidDomain(#[from] DomainError),

    /// An option value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The resolver could not be built.
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}
