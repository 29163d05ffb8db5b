//! Policy classifier.
//!
//! Maps SPF, DMARC and DKIM findings to a risk level with an ordered list of
//! reasons. The level is the maximum severity among triggered rules, so every
//! verdict can be traced to the rule that set it.
//!
//! Rule order is fixed: SPF, then DMARC, then DKIM, then the
//! incomplete-analysis note. A lookup that timed out or failed is never read
//! as an absent record; it yields an "inconclusive" reason at Medium and the
//! run can never come out Low.

mod types;

pub use types::{Coverage, Mechanism, Reason, RiskAssessment, RiskLevel};

use crate::parse::{DkimFinding, DmarcFinding, DmarcPolicy, SpfFinding, SpfQualifier};

// Reason texts, in rule order. Messages may carry detail after these prefixes.
/// No `v=spf1` record at the domain.
pub const REASON_NO_SPF: &str = "no SPF record";
/// SPF ends in `+all` or has no `all` term.
pub const REASON_WEAK_SPF: &str = "permissive/ineffective SPF policy";
/// SPF ends in `?all`.
pub const REASON_NEUTRAL_SPF: &str = "SPF policy is neutral (?all)";
/// More than one SPF record.
pub const REASON_MULTIPLE_SPF: &str = "multiple SPF records";
/// No `v=DMARC1` record at `_dmarc`.
pub const REASON_NO_DMARC: &str = "no DMARC record";
/// DMARC `p=none`.
pub const REASON_MONITOR_DMARC: &str = "DMARC policy is monitor-only (p=none)";
/// DMARC record without a usable `p=`.
pub const REASON_MALFORMED_DMARC: &str = "malformed DMARC record: missing or unrecognized p= tag";
/// More than one DMARC record.
pub const REASON_MULTIPLE_DMARC: &str = "multiple DMARC records";
/// No probed selector publishes a key.
pub const REASON_NO_DKIM: &str =
    "no DKIM record found at common selectors (heuristic, non-exhaustive)";
/// Marker carried by every reason about a failed lookup.
pub const REASON_INCONCLUSIVE: &str = "inconclusive";
/// Closing note when any mechanism is inconclusive.
pub const REASON_INCOMPLETE: &str =
    "incomplete analysis: one or more lookups were inconclusive";

/// Classifies the findings for one domain.
///
/// Pure and deterministic: identical findings always produce an identical
/// assessment.
pub fn classify(spf: SpfFinding, dmarc: DmarcFinding, dkim: DkimFinding) -> RiskAssessment {
    let mut reasons = Vec::new();

    evaluate_spf(&spf, &mut reasons);
    evaluate_dmarc(&dmarc, is_weak_spf(&spf), &mut reasons);
    evaluate_dkim(&dkim, &mut reasons);

    let inconclusive =
        spf.lookup.is_inconclusive() || dmarc.lookup.is_inconclusive() || dkim.is_inconclusive();
    if inconclusive {
        push(&mut reasons, Mechanism::Analysis, RiskLevel::Medium, REASON_INCOMPLETE);
    }

    let coverage = if spf.lookup.is_inconclusive()
        && dmarc.lookup.is_inconclusive()
        && dkim.all_failed()
    {
        Coverage::None
    } else if inconclusive {
        Coverage::Partial
    } else {
        Coverage::Complete
    };

    let level = reasons
        .iter()
        .map(|r| r.severity)
        .max()
        .unwrap_or(RiskLevel::Low);

    RiskAssessment {
        level,
        reasons,
        spf,
        dmarc,
        dkim,
        inconclusive,
        coverage,
    }
}

/// SPF that does not make unauthorized senders fail.
///
/// An inconclusive lookup is not weak: nothing is known about it.
fn is_weak_spf(spf: &SpfFinding) -> bool {
    if spf.lookup.is_inconclusive() {
        return false;
    }
    !spf.present
        || matches!(
            spf.final_qualifier,
            SpfQualifier::Allow | SpfQualifier::Absent | SpfQualifier::Neutral
        )
}

fn evaluate_spf(spf: &SpfFinding, reasons: &mut Vec<Reason>) {
    if spf.lookup.is_inconclusive() {
        let message = format!(
            "SPF lookup failed: {REASON_INCONCLUSIVE} ({})",
            spf.lookup.describe()
        );
        push(reasons, Mechanism::Spf, RiskLevel::Medium, message);
        return;
    }

    if !spf.present {
        push(reasons, Mechanism::Spf, RiskLevel::High, REASON_NO_SPF);
        return;
    }

    if spf.has_multiple_records() {
        let message = format!(
            "{REASON_MULTIPLE_SPF} ({}); evaluated the first",
            spf.record_count
        );
        push(reasons, Mechanism::Spf, RiskLevel::Medium, message);
    }

    match spf.final_qualifier {
        SpfQualifier::Allow => {
            let message = format!("{REASON_WEAK_SPF}: '+all' authorizes any sender");
            push(reasons, Mechanism::Spf, RiskLevel::High, message);
        }
        SpfQualifier::Absent => {
            let message = match spf.redirect() {
                Some(target) => format!(
                    "{REASON_WEAK_SPF}: no 'all' mechanism (redirect={target} not followed)"
                ),
                None => format!("{REASON_WEAK_SPF}: no 'all' mechanism"),
            };
            push(reasons, Mechanism::Spf, RiskLevel::High, message);
        }
        SpfQualifier::Neutral => {
            push(reasons, Mechanism::Spf, RiskLevel::Medium, REASON_NEUTRAL_SPF);
        }
        SpfQualifier::SoftFail | SpfQualifier::HardFail => {}
    }
}

fn evaluate_dmarc(dmarc: &DmarcFinding, weak_spf: bool, reasons: &mut Vec<Reason>) {
    if dmarc.lookup.is_inconclusive() {
        let message = format!(
            "DMARC lookup failed: {REASON_INCONCLUSIVE} ({})",
            dmarc.lookup.describe()
        );
        push(reasons, Mechanism::Dmarc, RiskLevel::Medium, message);
        return;
    }

    if !dmarc.present {
        push(reasons, Mechanism::Dmarc, RiskLevel::High, REASON_NO_DMARC);
        return;
    }

    if dmarc.has_multiple_records() {
        let message = format!(
            "{REASON_MULTIPLE_DMARC} ({}); evaluated the first",
            dmarc.record_count
        );
        push(reasons, Mechanism::Dmarc, RiskLevel::Medium, message);
    }

    match dmarc.policy {
        DmarcPolicy::Absent => {
            push(reasons, Mechanism::Dmarc, RiskLevel::High, REASON_MALFORMED_DMARC);
        }
        DmarcPolicy::None => {
            // Monitor-only DMARC over weak SPF leaves nothing enforcing
            let severity = if weak_spf {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            };
            push(reasons, Mechanism::Dmarc, severity, REASON_MONITOR_DMARC);
        }
        DmarcPolicy::Quarantine | DmarcPolicy::Reject => {}
    }
}

/// DKIM never contributes more than Medium: the probe only knows a few
/// selectors.
fn evaluate_dkim(dkim: &DkimFinding, reasons: &mut Vec<Reason>) {
    if dkim.any_found {
        return;
    }
    if dkim.failed_selectors.is_empty() {
        push(reasons, Mechanism::Dkim, RiskLevel::Medium, REASON_NO_DKIM);
    } else {
        let message = format!(
            "DKIM probe {REASON_INCONCLUSIVE}: {} of {} selector lookups failed",
            dkim.failed_selectors.len(),
            dkim.selectors_checked.len()
        );
        push(reasons, Mechanism::Dkim, RiskLevel::Medium, message);
    }
}

fn push(
    reasons: &mut Vec<Reason>,
    mechanism: Mechanism,
    severity: RiskLevel,
    message: impl Into<String>,
) {
    reasons.push(Reason {
        mechanism,
        severity,
        message: message.into(),
    });
}
