//! Machine-readable report.

use serde::Serialize;

use crate::classify::{Coverage, Reason, RiskAssessment, RiskLevel};
use crate::domain::DomainTarget;
use crate::parse::{DkimFinding, DmarcFinding, SpfFinding};

#[derive(Serialize)]
struct JsonReport<'a> {
    domain: &'a DomainTarget,
    level: RiskLevel,
    /// `null` when no lookup succeeded
    spoofing_possible: Option<bool>,
    inconclusive: bool,
    coverage: Coverage,
    reasons: &'a [Reason],
    spf: &'a SpfFinding,
    dmarc: &'a DmarcFinding,
    dkim: JsonDkim<'a>,
}

#[derive(Serialize)]
struct JsonDkim<'a> {
    #[serde(flatten)]
    finding: &'a DkimFinding,
    heuristic: bool,
}

/// Renders the assessment as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn render_json(
    target: &DomainTarget,
    assessment: &RiskAssessment,
) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        domain: target,
        level: assessment.level,
        spoofing_possible: (assessment.coverage != Coverage::None)
            .then(|| assessment.spoofing_possible()),
        inconclusive: assessment.inconclusive,
        coverage: assessment.coverage,
        reasons: &assessment.reasons,
        spf: &assessment.spf,
        dmarc: &assessment.dmarc,
        dkim: JsonDkim {
            finding: &assessment.dkim,
            heuristic: true,
        },
    };
    serde_json::to_string_pretty(&report)
}
