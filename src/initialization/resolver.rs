//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::ResolverSettings;
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver for TXT lookups.
///
/// Uses the nameserver from `settings` when one is given, otherwise the
/// system configuration, falling back to hickory's default upstreams if the
/// system configuration cannot be read.
///
/// Each query gets a single attempt bounded by `settings.timeout`; a failure
/// is reported to the caller instead of being retried.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the configured
/// nameserver address cannot be queried (unspecified or multicast).
pub fn init_resolver(settings: &ResolverSettings) -> Result<TokioAsyncResolver, InitializationError> {
    let mut opts = ResolverOpts::default();
    opts.timeout = settings.timeout;
    opts.attempts = 1;
    // Set ndots to 0 to prevent search domain appending
    opts.ndots = 0;

    let config = match settings.nameserver {
        Some(addr) => {
            let ip = addr.ip();
            if ip.is_unspecified() || ip.is_multicast() {
                return Err(InitializationError::DnsResolverError(format!(
                    "nameserver {addr} is not a unicast address"
                )));
            }
            log::info!("Using nameserver {addr}");
            ResolverConfig::from_parts(
                None,
                Vec::new(),
                NameServerConfigGroup::from_ips_clear(&[ip], addr.port(), true),
            )
        }
        None => match hickory_resolver::system_conf::read_system_conf() {
            Ok((config, _)) => {
                log::debug!("Using system resolver configuration");
                config
            }
            Err(e) => {
                log::warn!("Failed to read system resolver configuration ({e}); using defaults");
                ResolverConfig::default()
            }
        },
    };

    Ok(TokioAsyncResolver::tokio(config, opts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_init_resolver_with_nameserver() {
        let settings = ResolverSettings {
            timeout: Duration::from_secs(1),
            nameserver: Some("127.0.0.1:5353".parse().unwrap()),
        };
        assert!(init_resolver(&settings).is_ok());
    }

    #[tokio::test]
    async fn test_init_resolver_default_settings() {
        assert!(init_resolver(&ResolverSettings::default()).is_ok());
    }

    #[tokio::test]
    async fn test_init_resolver_rejects_unspecified_address() {
        let settings = ResolverSettings {
            timeout: Duration::from_secs(1),
            nameserver: Some("0.0.0.0:53".parse().unwrap()),
        };
        assert!(matches!(
            init_resolver(&settings),
            Err(InitializationError::DnsResolverError(_))
        ));
    }
}
