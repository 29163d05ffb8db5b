//! spoof_check library: email spoofing exposure analysis
//!
//! This library inspects a domain's published email-authentication records
//! (SPF, DMARC, and a heuristic DKIM selector probe) and classifies how easily
//! mail from that domain could be spoofed. It only issues DNS queries.
//!
//! # Example
//!
//! ```no_run
//! use spoof_check::{run_analysis, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "example.com".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = run_analysis(config).await?;
//! println!("{}: {}", report.target, report.assessment.level);
//! for reason in &report.assessment.reasons {
//!     println!("  - {reason}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod analysis;
pub mod classify;
pub mod config;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod initialization;
pub mod parse;
pub mod report;

// Re-export public API
pub use analysis::Analyzer;
pub use classify::{classify, Coverage, Reason, RiskAssessment, RiskLevel};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use domain::DomainTarget;
pub use error_handling::{AnalysisError, DomainError};
pub use run::{run_analysis, run_analysis_with, AnalysisReport};

// Internal run module (contains the top-level analysis flow)
mod run {
    use log::info;

    use crate::analysis::Analyzer;
    use crate::classify::RiskAssessment;
    use crate::config::Config;
    use crate::dns::{HickoryTxtResolver, TxtResolver};
    use crate::domain::DomainTarget;
    use crate::error_handling::{exit_code_for, AnalysisError};

    /// Result of analyzing one domain.
    #[derive(Debug, Clone)]
    pub struct AnalysisReport {
        /// The validated domain
        pub target: DomainTarget,
        /// The classifier's verdict
        pub assessment: RiskAssessment,
    }

    impl AnalysisReport {
        /// Process exit code for this report.
        pub fn exit_code(&self) -> i32 {
            exit_code_for(&self.assessment)
        }
    }

    /// Runs an analysis with the provided configuration.
    ///
    /// Validates the domain and options, builds the DNS resolver from the
    /// configured settings, then queries and classifies.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The domain is not a plausible hostname
    /// - An option value is unusable
    /// - The DNS resolver cannot be initialized
    ///
    /// Lookup failures are not errors: they show up as inconclusive findings.
    pub async fn run_analysis(config: Config) -> Result<AnalysisReport, AnalysisError> {
        let target = DomainTarget::parse(&config.domain)?;
        config.validate()?;
        let resolver = HickoryTxtResolver::new(&config.resolver_settings())?;
        Ok(analyze_target(target, &config, resolver).await)
    }

    /// Like [`run_analysis`], with a caller-supplied resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain or an option value is rejected; no
    /// query is issued in that case.
    pub async fn run_analysis_with<R: TxtResolver>(
        config: &Config,
        resolver: R,
    ) -> Result<AnalysisReport, AnalysisError> {
        let target = DomainTarget::parse(&config.domain)?;
        config.validate()?;
        Ok(analyze_target(target, config, resolver).await)
    }

    async fn analyze_target<R: TxtResolver>(
        target: DomainTarget,
        config: &Config,
        resolver: R,
    ) -> AnalysisReport {
        info!("Analyzing {target}");
        let analyzer = Analyzer::new(
            resolver,
            config.resolver_settings().timeout,
            config.dkim_selectors(),
        );
        let assessment = analyzer.analyze(&target).await;
        AnalysisReport { target, assessment }
    }
}
