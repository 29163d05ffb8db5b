//! Error handling and exit codes.
//!
//! This module provides:
//! - Error type definitions (domain, configuration, initialization)
//! - The mapping from run outcomes to process exit codes
//!
//! Lookup outcomes are categorized into:
//! - **Absence**: `NotFound`, a valid signal that feeds the classifier
//! - **Inconclusive**: timeouts and resolver errors, recovered per mechanism

mod types;

// Re-export public API
pub use types::{AnalysisError, ConfigError, DomainError, InitializationError};

use crate::classify::{Coverage, RiskAssessment};

/// Analysis completed, whatever the risk level.
pub const EXIT_SUCCESS: i32 = 0;
/// The domain (or an option value) was rejected before any query.
pub const EXIT_INVALID_INPUT: i32 = 1;
/// No lookup produced a usable answer.
pub const EXIT_INCONCLUSIVE: i32 = 2;

/// Exit code for a completed assessment.
///
/// The risk level never affects the exit code; only a run where every lookup
/// failed is reported as a failure.
pub fn exit_code_for(assessment: &RiskAssessment) -> i32 {
    match assessment.coverage {
        Coverage::None => EXIT_INCONCLUSIVE,
        Coverage::Partial | Coverage::Complete => EXIT_SUCCESS,
    }
}

/// Exit code for a run that aborted before producing an assessment.
pub fn exit_code_for_error(error: &AnalysisError) -> i32 {
    match error {
        AnalysisError::InvalidDomain(_) | AnalysisError::InvalidConfig(_) => EXIT_INVALID_INPUT,
        AnalysisError::Initialization(_) => EXIT_INCONCLUSIVE,
    }
}
