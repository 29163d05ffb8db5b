//! SPF record parsing.

use serde::Serialize;

use super::LookupStatus;
use crate::dns::{extract_spf_records, DnsLookupResult};

/// Disposition of the last `all` term of an SPF record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpfQualifier {
    /// `+all` (or bare `all`): every sender passes
    Allow,
    /// `~all`
    SoftFail,
    /// `-all`
    HardFail,
    /// `?all`
    Neutral,
    /// No record, or a record without an `all` term
    Absent,
}

impl SpfQualifier {
    /// The `all` term this qualifier stands for, if any.
    pub fn as_term(&self) -> Option<&'static str> {
        match self {
            SpfQualifier::Allow => Some("+all"),
            SpfQualifier::SoftFail => Some("~all"),
            SpfQualifier::HardFail => Some("-all"),
            SpfQualifier::Neutral => Some("?all"),
            SpfQualifier::Absent => None,
        }
    }
}

/// What the root domain's TXT answer says about SPF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpfFinding {
    /// A `v=spf1` record was found
    pub present: bool,
    /// Terms after the version tag, in record order
    pub mechanisms: Vec<String>,
    /// Qualifier of the last `all` term
    pub final_qualifier: SpfQualifier,
    /// The record that was parsed
    pub record: Option<String>,
    /// How many TXT strings looked like SPF
    pub record_count: usize,
    /// Whether the lookup itself completed
    pub lookup: LookupStatus,
}

impl SpfFinding {
    /// No SPF record, with the given lookup status.
    pub fn absent(lookup: LookupStatus) -> Self {
        Self {
            present: false,
            mechanisms: Vec::new(),
            final_qualifier: SpfQualifier::Absent,
            record: None,
            record_count: 0,
            lookup,
        }
    }

    /// Target of a `redirect=` modifier, which this tool does not follow.
    pub fn redirect(&self) -> Option<&str> {
        self.mechanisms.iter().find_map(|term| {
            term.get(..9)
                .filter(|prefix| prefix.eq_ignore_ascii_case("redirect="))
                .map(|_| &term[9..])
        })
    }

    /// True when more than one SPF record is published.
    pub fn has_multiple_records(&self) -> bool {
        self.record_count > 1
    }
}

/// Builds the SPF finding from the root domain's TXT lookup.
///
/// When several SPF records are published the first one in answer order is
/// parsed and the count is kept so the ambiguity can be reported.
pub fn parse_spf(result: &DnsLookupResult) -> SpfFinding {
    let records = match result {
        DnsLookupResult::Success(records) => records,
        other => return SpfFinding::absent(LookupStatus::from_result(other)),
    };

    let spf_records = extract_spf_records(records);
    let Some(first) = spf_records.first() else {
        return SpfFinding::absent(LookupStatus::Completed);
    };

    if spf_records.len() > 1 {
        log::debug!("{} SPF records published, parsing the first", spf_records.len());
    }

    let mechanisms = parse_spf_terms(first);
    let final_qualifier = final_qualifier(&mechanisms);
    SpfFinding {
        present: true,
        mechanisms,
        final_qualifier,
        record: Some(first.clone()),
        record_count: spf_records.len(),
        lookup: LookupStatus::Completed,
    }
}

/// Splits an SPF record into its terms, dropping the version tag.
pub fn parse_spf_terms(record: &str) -> Vec<String> {
    record
        .split_whitespace()
        .skip(1)
        .map(str::to_string)
        .collect()
}

/// Qualifier of the last `all` term, or `Absent` if there is none.
pub fn final_qualifier(terms: &[String]) -> SpfQualifier {
    terms
        .iter()
        .rev()
        .find_map(|term| all_qualifier(term))
        .unwrap_or(SpfQualifier::Absent)
}

fn all_qualifier(term: &str) -> Option<SpfQualifier> {
    let (qualifier, name) = match term.chars().next()? {
        '+' => (SpfQualifier::Allow, &term[1..]),
        '-' => (SpfQualifier::HardFail, &term[1..]),
        '~' => (SpfQualifier::SoftFail, &term[1..]),
        '?' => (SpfQualifier::Neutral, &term[1..]),
        _ => (SpfQualifier::Allow, term),
    };
    name.eq_ignore_ascii_case("all").then_some(qualifier)
}
