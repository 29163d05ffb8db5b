//! DKIM selector probe.
//!
//! Only a fixed list of selectors is checked, so "nothing found" is a
//! heuristic and never proof that the domain does not sign its mail.

use serde::Serialize;

use super::parse_tag_list;
use crate::config::DKIM_VERSION_TAG;
use crate::dns::DnsLookupResult;

/// Results of probing the configured selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DkimFinding {
    /// Selectors probed, in probe order
    pub selectors_checked: Vec<String>,
    /// At least one selector returned a DKIM record
    pub any_found: bool,
    /// Selectors that returned a DKIM record, in probe order
    pub found_selectors: Vec<String>,
    /// Selectors whose lookup timed out or failed
    pub failed_selectors: Vec<String>,
}

impl DkimFinding {
    /// Nothing was found and at least one lookup could not complete.
    pub fn is_inconclusive(&self) -> bool {
        !self.any_found && !self.failed_selectors.is_empty()
    }

    /// Every probe failed; nothing at all is known about DKIM.
    pub fn all_failed(&self) -> bool {
        !self.selectors_checked.is_empty()
            && self.failed_selectors.len() == self.selectors_checked.len()
    }
}

/// Builds the DKIM finding from per-selector lookups, in probe order.
pub fn parse_dkim(results: &[(String, DnsLookupResult)]) -> DkimFinding {
    let mut finding = DkimFinding {
        selectors_checked: Vec::with_capacity(results.len()),
        any_found: false,
        found_selectors: Vec::new(),
        failed_selectors: Vec::new(),
    };

    for (selector, result) in results {
        finding.selectors_checked.push(selector.clone());
        match result {
            DnsLookupResult::Success(records) => {
                if records.iter().any(|r| is_dkim_record(r)) {
                    log::debug!("DKIM record found at selector '{selector}'");
                    finding.found_selectors.push(selector.clone());
                }
            }
            DnsLookupResult::NotFound => {}
            DnsLookupResult::Timeout | DnsLookupResult::QueryError(_) => {
                finding.failed_selectors.push(selector.clone());
            }
        }
    }

    finding.any_found = !finding.found_selectors.is_empty();
    finding
}

/// True if `txt` looks like a DKIM key record.
///
/// `v=DKIM1` anywhere in the text is decisive. Records that omit the
/// (optional) version are accepted when they carry a `k=` or `p=` tag.
pub fn is_dkim_record(txt: &str) -> bool {
    if txt
        .to_ascii_lowercase()
        .contains(&DKIM_VERSION_TAG.to_ascii_lowercase())
    {
        return true;
    }
    parse_tag_list(txt).any(|(key, _)| key == "k" || key == "p")
}
