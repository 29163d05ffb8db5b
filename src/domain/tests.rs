// Domain module tests.

use super::*;

#[test]
fn test_parse_basic_domain() {
    let target = DomainTarget::parse("example.com").unwrap();
    assert_eq!(target.as_str(), "example.com");
}

#[test]
fn test_parse_normalizes_case_whitespace_and_trailing_dot() {
    let target = DomainTarget::parse("  Mail.Example.COM. ").unwrap();
    assert_eq!(target.as_str(), "mail.example.com");
    assert_eq!(target.to_string(), "mail.example.com");
}

#[test]
fn test_parse_multi_part_suffix_and_punycode() {
    assert!(DomainTarget::parse("example.co.uk").is_ok());
    assert!(DomainTarget::parse("xn--bcher-kva.example").is_ok());
    assert!(DomainTarget::parse("a-b.c-d.io").is_ok());
}

#[test]
fn test_parse_rejects_empty() {
    assert_eq!(DomainTarget::parse(""), Err(DomainError::Empty));
    assert_eq!(DomainTarget::parse("   "), Err(DomainError::Empty));
    assert_eq!(DomainTarget::parse("."), Err(DomainError::Empty));
}

#[test]
fn test_parse_rejects_single_label() {
    assert_eq!(
        DomainTarget::parse("localhost"),
        Err(DomainError::SingleLabel("localhost".to_string()))
    );
}

#[test]
fn test_parse_rejects_ip_addresses() {
    assert!(matches!(
        DomainTarget::parse("192.168.1.1"),
        Err(DomainError::IpAddress(_))
    ));
    assert!(matches!(
        DomainTarget::parse("2001:db8::1"),
        Err(DomainError::IpAddress(_))
    ));
}

#[test]
fn test_parse_rejects_bad_labels() {
    for input in [
        "exa mple.com",
        "-example.com",
        "example-.com",
        "example..com",
        "ex_ample.com",
        "https://example.com",
        "user@example.com",
    ] {
        assert!(
            matches!(
                DomainTarget::parse(input),
                Err(DomainError::InvalidLabel { .. })
            ),
            "expected invalid label for {input}"
        );
    }
}

#[test]
fn test_parse_rejects_long_label() {
    let label = "a".repeat(64);
    let input = format!("{label}.com");
    assert!(matches!(
        DomainTarget::parse(&input),
        Err(DomainError::InvalidLabel { .. })
    ));
}

#[test]
fn test_parse_rejects_too_long_name() {
    let label = "a".repeat(60);
    let input = format!("{label}.{label}.{label}.{label}.{label}.com");
    assert!(matches!(
        DomainTarget::parse(&input),
        Err(DomainError::TooLong(_))
    ));
}

#[test]
fn test_parse_rejects_numeric_tld() {
    assert!(matches!(
        DomainTarget::parse("example.123"),
        Err(DomainError::NumericTld(_))
    ));
}

#[test]
fn test_query_names() {
    let target = DomainTarget::parse("example.com").unwrap();
    assert_eq!(target.dmarc_name(), "_dmarc.example.com");
    assert_eq!(
        target.dkim_name("selector1"),
        "selector1._domainkey.example.com"
    );
}

#[test]
fn test_from_str() {
    let target: DomainTarget = "Example.org".parse().unwrap();
    assert_eq!(target.as_str(), "example.org");
}
