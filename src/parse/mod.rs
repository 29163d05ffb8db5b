//! Record parsers.
//!
//! Pure functions turning raw TXT answers into structured findings:
//! - SPF: terms and final `all` qualifier
//! - DMARC: tag map and policy
//! - DKIM: which probed selectors publish a key
//!
//! A lookup that timed out or failed yields a not-present finding whose
//! `lookup` status says so; it is never read as a confirmed absence.

mod dkim;
mod dmarc;
mod spf;

use serde::Serialize;

use crate::dns::DnsLookupResult;

// Re-export public API
pub use dkim::{is_dkim_record, parse_dkim, DkimFinding};
pub use dmarc::{parse_dmarc, parse_dmarc_tags, DmarcFinding, DmarcPolicy};
pub use spf::{final_qualifier, parse_spf, parse_spf_terms, SpfFinding, SpfQualifier};

/// Whether the lookup behind a finding completed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum LookupStatus {
    /// Answered, including "no such record"
    Completed,
    /// No answer within the timeout
    Timeout,
    /// Resolver-level failure
    Failed(String),
}

impl LookupStatus {
    /// Status of a lookup outcome.
    pub fn from_result(result: &DnsLookupResult) -> Self {
        match result {
            DnsLookupResult::Success(_) | DnsLookupResult::NotFound => LookupStatus::Completed,
            DnsLookupResult::Timeout => LookupStatus::Timeout,
            DnsLookupResult::QueryError(message) => LookupStatus::Failed(message.clone()),
        }
    }

    /// True for `Timeout` and `Failed`.
    pub fn is_inconclusive(&self) -> bool {
        !matches!(self, LookupStatus::Completed)
    }

    /// Short description used in reasons.
    pub fn describe(&self) -> String {
        match self {
            LookupStatus::Completed => "completed".to_string(),
            LookupStatus::Timeout => "timed out".to_string(),
            LookupStatus::Failed(message) => message.clone(),
        }
    }
}

/// Splits a `;`-separated tag list into lowercased keys and trimmed values.
///
/// Segments without `=` and empty segments are skipped.
fn parse_tag_list(record: &str) -> impl Iterator<Item = (String, String)> + '_ {
    record.split(';').filter_map(|segment| {
        let (key, value) = segment.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_ascii_lowercase(), value.trim().to_string()))
    })
}
