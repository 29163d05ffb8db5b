//! Classifier output types.

use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::parse::{DkimFinding, DmarcFinding, SpfFinding};

/// Overall exposure to spoofing. Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Strict SPF and an enforcing DMARC policy
    Low,
    /// Gaps that weaken but do not remove protection
    Medium,
    /// Spoofed mail is likely to be delivered
    High,
}

/// Which part of the analysis a reason comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Mechanism {
    /// Sender Policy Framework
    Spf,
    /// DMARC policy record
    Dmarc,
    /// DKIM selector probe
    Dkim,
    /// The analysis as a whole
    Analysis,
}

/// One triggered rule: what it says and how much it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason {
    /// Origin of the reason
    pub mechanism: Mechanism,
    /// Level this rule alone would set
    pub severity: RiskLevel,
    /// Human-readable justification
    pub message: String,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// How much of the analysis rests on completed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    /// Every lookup completed
    Complete,
    /// Some mechanism is inconclusive
    Partial,
    /// SPF, DMARC and every DKIM probe failed
    None,
}

/// Result of classifying one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    /// Highest severity among `reasons`, or `Low` when there are none
    pub level: RiskLevel,
    /// Triggered rules in evaluation order
    pub reasons: Vec<Reason>,
    /// SPF finding the assessment was made from
    pub spf: SpfFinding,
    /// DMARC finding the assessment was made from
    pub dmarc: DmarcFinding,
    /// DKIM finding the assessment was made from
    pub dkim: DkimFinding,
    /// At least one mechanism could not be assessed
    pub inconclusive: bool,
    /// Extent of completed lookups
    pub coverage: Coverage,
}

impl RiskAssessment {
    /// True when the configuration leaves room for spoofed mail.
    pub fn spoofing_possible(&self) -> bool {
        self.level > RiskLevel::Low
    }

    /// Reason messages in order.
    pub fn reason_messages(&self) -> Vec<&str> {
        self.reasons.iter().map(|r| r.message.as_str()).collect()
    }
}
