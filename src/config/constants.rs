//! Configuration constants.
//!
//! Defaults for DNS timeouts, the DKIM selector probe list, and the
//! environment variables the CLI falls back to.

/// DNS query timeout in seconds.
/// A single attempt is made per query; a lookup that exceeds this is reported
/// as a timeout for that mechanism rather than retried.
pub const DNS_TIMEOUT_SECS: u64 = 5;

/// Upper bound accepted for `--timeout-seconds`.
pub const MAX_DNS_TIMEOUT_SECS: u64 = 60;

/// Port used when `--resolver` is given without one.
pub const DEFAULT_DNS_PORT: u16 = 53;

/// Common DKIM selectors probed when no override is given.
///
/// This is a small heuristic list, not an enumeration: a domain signing with
/// any other selector will look unsigned to the probe.
pub const COMMON_DKIM_SELECTORS: &[&str] = &[
    "default",
    "selector1",
    "selector2",
    "google",
    "mail",
    "smtp",
    "k1",
];

/// Environment variable holding the per-query timeout.
pub const ENV_TIMEOUT: &str = "SPOOF_CHECK_TIMEOUT";
/// Environment variable holding the nameserver override.
pub const ENV_RESOLVER: &str = "SPOOF_CHECK_RESOLVER";

/// Version tag opening an SPF record.
pub const SPF_VERSION_TAG: &str = "v=spf1";
/// Version tag opening a DMARC record.
pub const DMARC_VERSION_TAG: &str = "v=DMARC1";
/// Version tag of a DKIM key record (optional in the record itself).
pub const DKIM_VERSION_TAG: &str = "v=DKIM1";

/// Label under which DMARC policies are published.
pub const DMARC_LABEL: &str = "_dmarc";
/// Label under which DKIM selectors are published.
pub const DKIM_LABEL: &str = "_domainkey";
