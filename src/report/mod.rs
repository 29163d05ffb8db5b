//! Report assembly.
//!
//! Formatting only: findings and reasons are printed in the order the
//! classifier produced them and nothing is recomputed here.

mod json;
mod plain;

pub use json::render_json;
pub use plain::render_plain;

use crate::classify::RiskAssessment;
use crate::config::OutputFormat;
use crate::domain::DomainTarget;

/// Renders `assessment` in the requested format.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(
    target: &DomainTarget,
    assessment: &RiskAssessment,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Plain => Ok(render_plain(target, assessment)),
        OutputFormat::Json => render_json(target, assessment),
    }
}
