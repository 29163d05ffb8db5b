//! Human-readable report.

use std::fmt::Write;

use colored::*;

use crate::classify::{Coverage, RiskAssessment, RiskLevel};
use crate::domain::DomainTarget;
use crate::parse::{DkimFinding, DmarcFinding, SpfFinding};

const DKIM_HEURISTIC_NOTE: &str =
    "only common selectors are probed; not finding one does not prove the domain is unsigned";

/// Renders the sectioned text report.
pub fn render_plain(target: &DomainTarget, assessment: &RiskAssessment) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "[+] Analyzing domain: {}", target.as_str().bold());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", banner(assessment));
    let _ = writeln!(out);
    write_spf(&mut out, &assessment.spf);
    write_dmarc(&mut out, &assessment.dmarc);
    write_dkim(&mut out, &assessment.dkim);
    write_reasons(&mut out, assessment);
    let _ = writeln!(out, "{}", verdict(assessment));

    out
}

fn banner(assessment: &RiskAssessment) -> ColoredString {
    if assessment.coverage == Coverage::None {
        return "=== RISK: INCONCLUSIVE (every lookup failed) ===".magenta().bold();
    }
    let mut text = format!("=== RISK: {} ===", assessment.level);
    if assessment.inconclusive {
        text.push_str(" (incomplete analysis)");
    }
    paint(&text, assessment.level).bold()
}

fn verdict(assessment: &RiskAssessment) -> ColoredString {
    if assessment.coverage == Coverage::None {
        "[?] No lookup succeeded; no verdict could be reached.".magenta()
    } else if assessment.spoofing_possible() {
        paint("[!] Possible email spoofing exposure identified.", assessment.level)
    } else {
        paint("[+] Configuration resists spoofing.", assessment.level)
    }
}

fn paint(text: &str, level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Low => text.green(),
        RiskLevel::Medium => text.yellow(),
        RiskLevel::High => text.red(),
    }
}

fn write_spf(out: &mut String, spf: &SpfFinding) {
    let _ = writeln!(out, "[SPF]");
    let _ = writeln!(out, "  Lookup      : {}", spf.lookup.describe());
    let _ = writeln!(out, "  Present     : {}", yes_no(spf.present));
    if let Some(record) = &spf.record {
        let _ = writeln!(out, "  Record      : {record}");
        let _ = writeln!(
            out,
            "  Qualifier   : {}",
            spf.final_qualifier.as_term().unwrap_or("none (no 'all' term)")
        );
        let _ = writeln!(out, "  Mechanisms  : {}", join_or_none(&spf.mechanisms));
    }
    if spf.has_multiple_records() {
        let _ = writeln!(out, "  Records     : {} (ambiguous)", spf.record_count);
    }
    let _ = writeln!(out);
}

fn write_dmarc(out: &mut String, dmarc: &DmarcFinding) {
    let _ = writeln!(out, "[DMARC]");
    let _ = writeln!(out, "  Lookup      : {}", dmarc.lookup.describe());
    let _ = writeln!(out, "  Present     : {}", yes_no(dmarc.present));
    if let Some(record) = &dmarc.record {
        let _ = writeln!(out, "  Record      : {record}");
        let _ = writeln!(out, "  Policy      : {}", dmarc.policy.as_str());
        let _ = writeln!(out, "  Subdomains  : {}", dmarc.subdomain_policy().as_str());
        let _ = writeln!(out, "  Percentage  : {}", dmarc.percentage());
        let _ = writeln!(
            out,
            "  Reporting   : {}",
            dmarc.aggregate_reporting().unwrap_or("none")
        );
    }
    if dmarc.has_multiple_records() {
        let _ = writeln!(out, "  Records     : {} (ambiguous)", dmarc.record_count);
    }
    let _ = writeln!(out);
}

fn write_dkim(out: &mut String, dkim: &DkimFinding) {
    let _ = writeln!(out, "[DKIM] (heuristic)");
    let _ = writeln!(out, "  Checked     : {}", join_or_none(&dkim.selectors_checked));
    let _ = writeln!(out, "  Found       : {}", join_or_none(&dkim.found_selectors));
    if !dkim.failed_selectors.is_empty() {
        let _ = writeln!(out, "  Failed      : {}", dkim.failed_selectors.join(", "));
    }
    let _ = writeln!(out, "  Note        : {DKIM_HEURISTIC_NOTE}");
    let _ = writeln!(out);
}

fn write_reasons(out: &mut String, assessment: &RiskAssessment) {
    let _ = writeln!(out, "[REASONS]");
    if assessment.reasons.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (index, reason) in assessment.reasons.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. [{}] {}",
            index + 1,
            paint(&reason.severity.to_string(), reason.severity),
            reason.message
        );
    }
    let _ = writeln!(out);
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
