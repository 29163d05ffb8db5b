//! TXT lookups and outcome normalization.
//!
//! Resolver failures are folded into a small tagged union so nothing
//! downstream ever inspects hickory error types.

use std::future::Future;

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::config::ResolverSettings;
use crate::error_handling::InitializationError;
use crate::initialization::init_resolver;

/// Outcome of a single TXT query. Exactly one tag holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsLookupResult {
    /// One string per TXT record; never empty.
    Success(Vec<String>),
    /// NXDOMAIN, or the name exists without TXT records.
    NotFound,
    /// No answer within the per-query timeout.
    Timeout,
    /// Any other resolver failure (SERVFAIL, refused, malformed, I/O).
    QueryError(String),
}

impl DnsLookupResult {
    /// Builds a result from answer strings; an empty answer is `NotFound`.
    pub fn from_records(records: Vec<String>) -> Self {
        if records.is_empty() {
            DnsLookupResult::NotFound
        } else {
            DnsLookupResult::Success(records)
        }
    }
}

/// Source of TXT answers.
///
/// Implemented by [`HickoryTxtResolver`] for real queries and by
/// [`MockResolver`](crate::dns::MockResolver) for tests.
pub trait TxtResolver: Send + Sync {
    /// Queries TXT records at `name`.
    fn lookup_txt(&self, name: &str) -> impl Future<Output = DnsLookupResult> + Send;
}

impl<T: TxtResolver> TxtResolver for &T {
    fn lookup_txt(&self, name: &str) -> impl Future<Output = DnsLookupResult> + Send {
        (**self).lookup_txt(name)
    }
}

/// TXT resolver backed by `hickory-resolver`.
#[derive(Clone)]
pub struct HickoryTxtResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryTxtResolver {
    /// Builds the resolver from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::DnsResolverError` if the settings name an
    /// unusable nameserver.
    pub fn new(settings: &ResolverSettings) -> Result<Self, InitializationError> {
        Ok(Self {
            resolver: init_resolver(settings)?,
        })
    }
}

impl TxtResolver for HickoryTxtResolver {
    async fn lookup_txt(&self, name: &str) -> DnsLookupResult {
        // Fully qualified so no search domain is ever appended
        let fqdn = if name.ends_with('.') {
            name.to_string()
        } else {
            format!("{name}.")
        };

        match self.resolver.lookup(fqdn, RecordType::TXT).await {
            Ok(lookup) => {
                let txt_records: Vec<String> = lookup
                    .iter()
                    .filter_map(|rdata| {
                        if let RData::TXT(txt) = rdata {
                            // TXT records can contain multiple strings - join them
                            Some(
                                txt.iter()
                                    .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                                    .collect::<Vec<String>>()
                                    .join(""),
                            )
                        } else {
                            None
                        }
                    })
                    .collect();
                log::debug!("TXT lookup for {name}: {} record(s)", txt_records.len());
                DnsLookupResult::from_records(txt_records)
            }
            Err(e) => {
                let result = classify_resolve_error(&e);
                match &result {
                    DnsLookupResult::NotFound => {
                        log::debug!("TXT lookup for {name}: no records");
                    }
                    DnsLookupResult::Timeout => {
                        log::warn!("TXT record lookup timed out for {name}: {e}");
                    }
                    _ => log::warn!("Failed to lookup TXT records for {name}: {e}"),
                }
                result
            }
        }
    }
}

/// Maps a hickory error to a lookup outcome.
///
/// NXDOMAIN and NOERROR-with-no-answer both mean "no record here"; any other
/// response code is a server-side failure, not an absence.
pub(crate) fn classify_resolve_error(err: &ResolveError) -> DnsLookupResult {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NXDomain | ResponseCode::NoError => DnsLookupResult::NotFound,
            code => DnsLookupResult::QueryError(format!("server responded {code:?}")),
        },
        ResolveErrorKind::Timeout => DnsLookupResult::Timeout,
        ResolveErrorKind::Proto(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => {
            DnsLookupResult::Timeout
        }
        _ => DnsLookupResult::QueryError(err.to_string()),
    }
}
