//! DNS resolution and record querying.
//!
//! This module provides async TXT lookups using `hickory-resolver`:
//! - Outcome normalization into `DnsLookupResult`
//! - The `TxtResolver` seam and its hickory and in-memory implementations
//! - SPF/DMARC extraction from TXT answers
//!
//! Lookups respect the explicit `ResolverSettings` they were built with.

mod extract;
mod lookup;
mod mock;

// Re-export public API
pub use extract::{extract_dmarc_records, extract_spf_records};
pub use lookup::{DnsLookupResult, HickoryTxtResolver, TxtResolver};
pub use mock::MockResolver;

#[cfg(test)]
mod tests;
