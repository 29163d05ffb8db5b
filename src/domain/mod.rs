//! Input domain validation.
//!
//! `DomainTarget` is the only way a name reaches the resolver: it is
//! normalized (trimmed, lowercased, trailing dot removed) and checked for
//! hostname syntax before any query is issued.

use std::fmt;
use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::{DKIM_LABEL, DMARC_LABEL};
use crate::error_handling::DomainError;

/// Maximum length of a hostname in presentation format.
const MAX_DOMAIN_LENGTH: usize = 253;

/// LDH label: letters, digits and inner hyphens, 1-63 characters.
static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$").expect("label pattern is valid")
});

/// A syntactically plausible domain name to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DomainTarget(String);

impl DomainTarget {
    /// Validates and normalizes `input`.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` describing the first rule the input breaks.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(DomainError::Empty);
        }

        if trimmed.parse::<IpAddr>().is_ok() {
            return Err(DomainError::IpAddress(trimmed.to_string()));
        }

        let domain = trimmed.to_ascii_lowercase();
        if domain.len() > MAX_DOMAIN_LENGTH {
            return Err(DomainError::TooLong(domain.len()));
        }

        let labels: Vec<&str> = domain.split('.').collect();
        for label in &labels {
            if !LABEL_PATTERN.is_match(label) {
                return Err(DomainError::InvalidLabel {
                    domain: domain.clone(),
                    label: (*label).to_string(),
                });
            }
        }

        if labels.len() < 2 {
            return Err(DomainError::SingleLabel(domain));
        }

        // Checked above: at least two labels
        let tld = labels[labels.len() - 1];
        if tld.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::NumericTld(domain));
        }

        Ok(Self(domain))
    }

    /// The normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name holding the DMARC policy record.
    pub fn dmarc_name(&self) -> String {
        format!("{DMARC_LABEL}.{}", self.0)
    }

    /// Name holding the DKIM key for `selector`.
    pub fn dkim_name(&self, selector: &str) -> String {
        format!("{selector}.{DKIM_LABEL}.{}", self.0)
    }
}

impl fmt::Display for DomainTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DomainTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
