//! DMARC record parsing.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{parse_tag_list, LookupStatus};
use crate::dns::{extract_dmarc_records, DnsLookupResult};

/// Requested receiver disposition (`p=` tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DmarcPolicy {
    /// `p=none`: monitor only
    None,
    /// `p=quarantine`
    Quarantine,
    /// `p=reject`
    Reject,
    /// No record, or no usable `p=` tag
    Absent,
}

impl DmarcPolicy {
    /// Parses a `p=`/`sp=` value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(DmarcPolicy::None),
            "quarantine" => Some(DmarcPolicy::Quarantine),
            "reject" => Some(DmarcPolicy::Reject),
            _ => None,
        }
    }

    /// Tag value as written in a record.
    pub fn as_str(&self) -> &'static str {
        match self {
            DmarcPolicy::None => "none",
            DmarcPolicy::Quarantine => "quarantine",
            DmarcPolicy::Reject => "reject",
            DmarcPolicy::Absent => "absent",
        }
    }
}

/// What `_dmarc.<domain>` says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DmarcFinding {
    /// A `v=DMARC1` record was found
    pub present: bool,
    /// Value of the `p` tag
    pub policy: DmarcPolicy,
    /// Every tag, keys lowercased; the last duplicate wins
    pub raw_tags: BTreeMap<String, String>,
    /// The record that was parsed
    pub record: Option<String>,
    /// How many TXT strings looked like DMARC
    pub record_count: usize,
    /// Whether the lookup itself completed
    pub lookup: LookupStatus,
}

impl DmarcFinding {
    /// No DMARC record, with the given lookup status.
    pub fn absent(lookup: LookupStatus) -> Self {
        Self {
            present: false,
            policy: DmarcPolicy::Absent,
            raw_tags: BTreeMap::new(),
            record: None,
            record_count: 0,
            lookup,
        }
    }

    /// A record is present but its `p=` tag is missing or unrecognized.
    pub fn is_malformed(&self) -> bool {
        self.present && self.policy == DmarcPolicy::Absent
    }

    /// True when more than one DMARC record is published.
    pub fn has_multiple_records(&self) -> bool {
        self.record_count > 1
    }

    /// Subdomain policy (`sp=`), defaulting to `p=`.
    pub fn subdomain_policy(&self) -> DmarcPolicy {
        self.raw_tags
            .get("sp")
            .and_then(|v| DmarcPolicy::parse(v))
            .unwrap_or(self.policy)
    }

    /// Share of failing mail the policy applies to (`pct=`), default 100.
    ///
    /// Out-of-range or non-numeric values fall back to 100.
    pub fn percentage(&self) -> u8 {
        self.raw_tags
            .get("pct")
            .and_then(|v| v.trim().parse::<u8>().ok())
            .filter(|pct| *pct <= 100)
            .unwrap_or(100)
    }

    /// Aggregate report destinations (`rua=`), if any.
    pub fn aggregate_reporting(&self) -> Option<&str> {
        self.raw_tags
            .get("rua")
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Builds the DMARC finding from the `_dmarc` TXT lookup.
pub fn parse_dmarc(result: &DnsLookupResult) -> DmarcFinding {
    let records = match result {
        DnsLookupResult::Success(records) => records,
        other => return DmarcFinding::absent(LookupStatus::from_result(other)),
    };

    let dmarc_records = extract_dmarc_records(records);
    let Some(first) = dmarc_records.first() else {
        return DmarcFinding::absent(LookupStatus::Completed);
    };

    let raw_tags = parse_dmarc_tags(first);
    let policy = raw_tags
        .get("p")
        .and_then(|v| DmarcPolicy::parse(v))
        .unwrap_or(DmarcPolicy::Absent);
    if policy == DmarcPolicy::Absent {
        log::debug!("DMARC record has no usable p= tag: {first}");
    }

    DmarcFinding {
        present: true,
        policy,
        raw_tags,
        record: Some(first.clone()),
        record_count: dmarc_records.len(),
        lookup: LookupStatus::Completed,
    }
}

/// Parses `key=value` pairs separated by `;`.
///
/// Keys are lowercased and values trimmed. When a key repeats, the last
/// occurrence wins.
pub fn parse_dmarc_tags(record: &str) -> BTreeMap<String, String> {
    parse_tag_list(record).collect()
}
