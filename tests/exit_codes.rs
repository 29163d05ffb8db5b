//! Tests for exit code policy.

use spoof_check::dns::{DnsLookupResult, MockResolver};
use spoof_check::error_handling::{
    exit_code_for_error, EXIT_INCONCLUSIVE, EXIT_INVALID_INPUT, EXIT_SUCCESS,
};
use spoof_check::{run_analysis_with, AnalysisError, Config, RiskLevel};

fn config(domain: &str) -> Config {
    Config {
        domain: domain.to_string(),
        selectors: Some(vec!["default".to_string()]),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_high_risk_still_exits_zero() {
    let report = run_analysis_with(&config("example.com"), MockResolver::new())
        .await
        .expect("analysis should complete");
    assert_eq!(report.assessment.level, RiskLevel::High);
    assert_eq!(report.exit_code(), EXIT_SUCCESS);
}

#[tokio::test]
async fn test_partial_failure_exits_zero() {
    let resolver = MockResolver::new()
        .with_txt("example.com", &["v=spf1 -all"])
        .with_result("_dmarc.example.com", DnsLookupResult::Timeout);
    let report = run_analysis_with(&config("example.com"), resolver)
        .await
        .unwrap();
    assert!(report.assessment.inconclusive);
    assert_eq!(report.exit_code(), EXIT_SUCCESS);
}

#[tokio::test]
async fn test_every_lookup_failing_exits_two() {
    let resolver = MockResolver::new()
        .with_result("example.com", DnsLookupResult::Timeout)
        .with_result("_dmarc.example.com", DnsLookupResult::Timeout)
        .with_result(
            "default._domainkey.example.com",
            DnsLookupResult::QueryError("SERVFAIL".into()),
        );
    let report = run_analysis_with(&config("example.com"), resolver)
        .await
        .unwrap();
    assert_eq!(report.exit_code(), EXIT_INCONCLUSIVE);
}

#[tokio::test]
async fn test_invalid_domain_exits_one_without_queries() {
    let resolver = MockResolver::new();
    let err = run_analysis_with(&config("not a domain"), &resolver)
        .await
        .expect_err("domain should be rejected");
    assert!(matches!(err, AnalysisError::InvalidDomain(_)));
    assert_eq!(exit_code_for_error(&err), EXIT_INVALID_INPUT);
    assert_eq!(resolver.query_count(), 0);
}

#[tokio::test]
async fn test_invalid_option_exits_one() {
    let config = Config {
        timeout_seconds: 0,
        ..config("example.com")
    };
    let err = run_analysis_with(&config, MockResolver::new())
        .await
        .expect_err("zero timeout should be rejected");
    assert_eq!(exit_code_for_error(&err), EXIT_INVALID_INPUT);
}

fn run_binary(args: &[&str]) -> Option<i32> {
    std::process::Command::new(env!("CARGO_BIN_EXE_spoof_check"))
        .args(args)
        .output()
        .expect("binary should start")
        .status
        .code()
}

#[test]
fn test_usage_errors_exit_one() {
    assert_eq!(run_binary(&[]), Some(EXIT_INVALID_INPUT));
    assert_eq!(
        run_binary(&["example.com", "--resolver", "dns.google"]),
        Some(EXIT_INVALID_INPUT)
    );
    assert_eq!(
        run_binary(&["example.com", "--timeout-seconds", "soon"]),
        Some(EXIT_INVALID_INPUT)
    );
}

#[test]
fn test_help_and_version_exit_zero() {
    assert_eq!(run_binary(&["--help"]), Some(EXIT_SUCCESS));
    assert_eq!(run_binary(&["--version"]), Some(EXIT_SUCCESS));
}

#[test]
fn test_invalid_domain_binary_exits_one() {
    assert_eq!(run_binary(&["localhost"]), Some(EXIT_INVALID_INPUT));
}
