//! DNS record extraction utilities.
//!
//! This module provides functions to pick SPF and DMARC records out of
//! TXT record collections.

use crate::config::{DMARC_VERSION_TAG, SPF_VERSION_TAG};

/// Extracts SPF records from TXT records, in answer order.
///
/// SPF records start with "v=spf1" (case-insensitive) followed by whitespace
/// or the end of the string, so `v=spf10` is not SPF.
///
/// # Arguments
///
/// * `txt_records` - Vector of TXT record strings
///
/// # Returns
///
/// The trimmed SPF records; more than one means the domain publishes an
/// ambiguous policy.
pub fn extract_spf_records(txt_records: &[String]) -> Vec<String> {
    txt_records
        .iter()
        .map(|txt| txt.trim())
        .filter(|txt| has_version_tag(txt, SPF_VERSION_TAG))
        .map(str::to_string)
        .collect()
}

/// Extracts DMARC records from TXT records, in answer order.
///
/// DMARC records are published at `_dmarc.<domain>` and start with
/// "v=DMARC1" (case-insensitive).
pub fn extract_dmarc_records(txt_records: &[String]) -> Vec<String> {
    txt_records
        .iter()
        .map(|txt| txt.trim())
        .filter(|txt| has_version_tag(txt, DMARC_VERSION_TAG))
        .map(str::to_string)
        .collect()
}

/// True when `txt` opens with `tag` as a whole term.
fn has_version_tag(txt: &str, tag: &str) -> bool {
    let Some(prefix) = txt.get(..tag.len()) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case(tag) {
        return false;
    }
    match txt[tag.len()..].chars().next() {
        None => true,
        Some(c) => c.is_whitespace() || c == ';',
    }
}
