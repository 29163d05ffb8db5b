//! DNS module tests.

use super::lookup::classify_resolve_error;
use super::*;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::{Query, ResponseCode};
use std::time::Duration;

fn strings(records: &[&str]) -> Vec<String> {
    records.iter().map(|r| r.to_string()).collect()
}

#[test]
fn test_from_records_empty_is_not_found() {
    assert_eq!(
        DnsLookupResult::from_records(Vec::new()),
        DnsLookupResult::NotFound
    );
    assert_eq!(
        DnsLookupResult::from_records(strings(&["a"])),
        DnsLookupResult::Success(strings(&["a"]))
    );
}

#[test]
fn test_classify_timeout() {
    let err = ResolveError::from(ResolveErrorKind::Timeout);
    assert_eq!(classify_resolve_error(&err), DnsLookupResult::Timeout);
}

fn no_records(response_code: ResponseCode) -> ResolveError {
    ResolveError::from(ResolveErrorKind::NoRecordsFound {
        query: Box::new(Query::default()),
        soa: None,
        negative_ttl: None,
        response_code,
        trusted: true,
    })
}

#[test]
fn test_classify_nxdomain_and_empty_answer_as_not_found() {
    assert_eq!(
        classify_resolve_error(&no_records(ResponseCode::NXDomain)),
        DnsLookupResult::NotFound
    );
    assert_eq!(
        classify_resolve_error(&no_records(ResponseCode::NoError)),
        DnsLookupResult::NotFound
    );
}

#[test]
fn test_classify_server_failures_as_query_error() {
    for code in [ResponseCode::ServFail, ResponseCode::Refused] {
        assert!(matches!(
            classify_resolve_error(&no_records(code)),
            DnsLookupResult::QueryError(msg) if msg.contains(&format!("{code:?}"))
        ));
    }
}

#[test]
fn test_classify_other_errors_as_query_error() {
    let err = ResolveError::from("malformed response");
    assert!(matches!(
        classify_resolve_error(&err),
        DnsLookupResult::QueryError(msg) if msg.contains("malformed response")
    ));
}

#[test]
fn test_extract_spf_records() {
    let txt = strings(&[
        "google-site-verification=abc",
        "  v=spf1 include:_spf.example.com -all ",
        "V=SPF1 mx ~all",
        "v=spf10 -all",
    ]);
    let spf = extract_spf_records(&txt);
    assert_eq!(
        spf,
        strings(&["v=spf1 include:_spf.example.com -all", "V=SPF1 mx ~all"])
    );
}

#[test]
fn test_extract_spf_bare_version() {
    assert_eq!(extract_spf_records(&strings(&["v=spf1"])), strings(&["v=spf1"]));
}

#[test]
fn test_extract_spf_records_none() {
    let txt = strings(&["MS=ms12345", "spf1 -all", ""]);
    assert!(extract_spf_records(&txt).is_empty());
}

#[test]
fn test_extract_dmarc_records() {
    let txt = strings(&[
        "v=DMARC1; p=reject; rua=mailto:d@example.com",
        "v=dmarc1;p=none",
        "v=DMARC2; p=reject",
        "some other text",
    ]);
    let dmarc = extract_dmarc_records(&txt);
    assert_eq!(
        dmarc,
        strings(&[
            "v=DMARC1; p=reject; rua=mailto:d@example.com",
            "v=dmarc1;p=none"
        ])
    );
}

#[test]
fn test_extract_handles_multibyte_text() {
    let txt = strings(&["é=spf1 -all", "v=sp"]);
    assert!(extract_spf_records(&txt).is_empty());
}

#[tokio::test]
async fn test_mock_resolver_answers_and_counts() {
    let resolver = MockResolver::new()
        .with_txt("Example.com.", &["v=spf1 -all"])
        .with_result("_dmarc.example.com", DnsLookupResult::Timeout);

    assert_eq!(
        resolver.lookup_txt("example.com").await,
        DnsLookupResult::Success(strings(&["v=spf1 -all"]))
    );
    assert_eq!(
        resolver.lookup_txt("_dmarc.example.com").await,
        DnsLookupResult::Timeout
    );
    assert_eq!(
        resolver.lookup_txt("unknown.example.com").await,
        DnsLookupResult::NotFound
    );
    assert_eq!(resolver.query_count(), 3);
}

#[tokio::test]
async fn test_mock_resolver_delay() {
    let resolver = MockResolver::new()
        .with_txt("slow.example.com", &["v=spf1 -all"])
        .with_delay("slow.example.com", Duration::from_millis(20));
    let start = std::time::Instant::now();
    let result = resolver.lookup_txt("slow.example.com").await;
    assert!(start.elapsed() >= Duration::from_millis(20));
    assert!(matches!(result, DnsLookupResult::Success(_)));
}
