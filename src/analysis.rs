//! Lookup fan-out and classification for one domain.
//!
//! SPF, DMARC and every DKIM selector are queried concurrently. Each lookup
//! has its own timeout and result slot, and classification only starts once
//! all of them have completed.

use std::time::Duration;

use futures::future::join_all;

use crate::classify::{classify, RiskAssessment};
use crate::dns::{DnsLookupResult, TxtResolver};
use crate::domain::DomainTarget;
use crate::parse::{parse_dkim, parse_dmarc, parse_spf};

/// Runs the lookups for a domain and classifies the answers.
pub struct Analyzer<R> {
    resolver: R,
    timeout: Duration,
    selectors: Vec<String>,
}

impl<R: TxtResolver> Analyzer<R> {
    /// Creates an analyzer probing `selectors` with a per-query `timeout`.
    pub fn new(resolver: R, timeout: Duration, selectors: Vec<String>) -> Self {
        Self {
            resolver,
            timeout,
            selectors,
        }
    }

    /// The resolver lookups go through.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Queries and classifies `target`.
    pub async fn analyze(&self, target: &DomainTarget) -> RiskAssessment {
        let root = target.as_str().to_string();
        let dmarc_name = target.dmarc_name();
        let dkim_names: Vec<(String, String)> = self
            .selectors
            .iter()
            .map(|selector| (selector.clone(), target.dkim_name(selector)))
            .collect();

        log::info!(
            "Querying SPF, DMARC and {} DKIM selector(s) for {target}",
            dkim_names.len()
        );

        let (spf_result, dmarc_result, dkim_results) = tokio::join!(
            self.bounded_lookup(&root),
            self.bounded_lookup(&dmarc_name),
            join_all(dkim_names.iter().map(|(selector, name)| async move {
                (selector.clone(), self.bounded_lookup(name).await)
            })),
        );

        let spf = parse_spf(&spf_result);
        let dmarc = parse_dmarc(&dmarc_result);
        let dkim = parse_dkim(&dkim_results);

        let assessment = classify(spf, dmarc, dkim);
        log::info!(
            "{target}: risk {} with {} reason(s)",
            assessment.level,
            assessment.reasons.len()
        );
        assessment
    }

    /// One lookup, cut off at the per-query timeout.
    async fn bounded_lookup(&self, name: &str) -> DnsLookupResult {
        match tokio::time::timeout(self.timeout, self.resolver.lookup_txt(name)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "TXT lookup for {name} exceeded {}ms",
                    self.timeout.as_millis()
                );
                DnsLookupResult::Timeout
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Coverage, RiskLevel};
    use crate::dns::MockResolver;
    use crate::parse::{LookupStatus, SpfQualifier};

    fn selectors() -> Vec<String> {
        vec!["default".to_string(), "google".to_string()]
    }

    fn target() -> DomainTarget {
        DomainTarget::parse("example.com").unwrap()
    }

    #[tokio::test]
    async fn test_analyze_queries_every_name() {
        let resolver = MockResolver::new()
            .with_txt("example.com", &["v=spf1 -all"])
            .with_txt("_dmarc.example.com", &["v=DMARC1; p=reject"])
            .with_txt("google._domainkey.example.com", &["v=DKIM1; p=MIGf"]);
        let analyzer = Analyzer::new(resolver, Duration::from_secs(1), selectors());

        let assessment = analyzer.analyze(&target()).await;
        assert_eq!(analyzer.resolver().query_count(), 4);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert_eq!(assessment.spf.final_qualifier, SpfQualifier::HardFail);
        assert_eq!(assessment.dkim.found_selectors, vec!["google"]);
        assert_eq!(assessment.dkim.selectors_checked, selectors());
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out_without_blocking_others() {
        let resolver = MockResolver::new()
            .with_txt("example.com", &["v=spf1 -all"])
            .with_txt("_dmarc.example.com", &["v=DMARC1; p=reject"])
            .with_delay("_dmarc.example.com", Duration::from_secs(5))
            .with_txt("default._domainkey.example.com", &["v=DKIM1; p=MIGf"]);
        let analyzer = Analyzer::new(resolver, Duration::from_millis(100), selectors());

        let start = std::time::Instant::now();
        let assessment = analyzer.analyze(&target()).await;
        assert!(start.elapsed() < Duration::from_secs(2));

        assert_eq!(assessment.dmarc.lookup, LookupStatus::Timeout);
        assert!(assessment.spf.present);
        assert!(assessment.dkim.any_found);
        assert_eq!(assessment.level, RiskLevel::Medium);
        assert_eq!(assessment.coverage, Coverage::Partial);
    }

    #[tokio::test]
    async fn test_all_lookups_failing_gives_no_coverage() {
        let resolver = MockResolver::new()
            .with_result("example.com", DnsLookupResult::Timeout)
            .with_result(
                "_dmarc.example.com",
                DnsLookupResult::QueryError("refused".into()),
            )
            .with_result("default._domainkey.example.com", DnsLookupResult::Timeout)
            .with_result("google._domainkey.example.com", DnsLookupResult::Timeout);
        let analyzer = Analyzer::new(resolver, Duration::from_secs(1), selectors());

        let assessment = analyzer.analyze(&target()).await;
        assert_eq!(assessment.coverage, Coverage::None);
        assert!(assessment.inconclusive);
    }
}
