//! Optional advisory collaborator.
//!
//! An advisor can suggest a sample message or comment on how well a file
//! would work as a carrier. It is purely cosmetic: it never sees passwords,
//! cipher blobs or bitstreams, and its failures never abort encoding or
//! decoding. Callers go through the `*_or_fallback` helpers, which turn any
//! failure into a fixed text.

use thiserror::Error;
use tracing::warn;

/// Used when the advisor answers with empty text.
pub const DEFAULT_MESSAGE: &str = "Operation Silent Storm: Advance to coordinates 34.55, 12.33 \
     at 0400 hours. Maintain radio silence. Target extraction confirmed.";

/// Used when the advisor fails.
pub const FALLBACK_MESSAGE: &str =
    "Operation Fallback: Unable to contact HQ. Proceed to secondary extraction point immediately.";

/// Used when the advisor answers an assessment with empty text.
pub const DEFAULT_ASSESSMENT: &str =
    "Analysis complete: Image appears suitable for covert operations.";

/// Used when the assessment fails.
pub const FALLBACK_ASSESSMENT: &str = "Analysis failed: Proceed with caution.";

/// Errors an advisor may report.
#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Advisory service unavailable")]
    Unavailable,

    #[error("Advisory request failed: {0}")]
    RequestFailed(String),
}

/// A source of advisory text.
pub trait Advisor {
    /// Proposes a sample message to hide.
    fn suggest_message(&self) -> Result<String, AdvisoryError>;

    /// Comments on whether `carrier` (an encoded image or audio file) makes
    /// good camouflage.
    fn assess_carrier(&self, carrier: &[u8]) -> Result<String, AdvisoryError>;
}

/// Advisor used when no service is configured. Always unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineAdvisor;

impl Advisor for OfflineAdvisor {
    fn suggest_message(&self) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::Unavailable)
    }

    fn assess_carrier(&self, _carrier: &[u8]) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::Unavailable)
    }
}

fn or_fallback(
    result: Result<String, AdvisoryError>,
    default: &str,
    fallback: &str,
) -> String {
    match result {
        Ok(text) if text.trim().is_empty() => default.to_string(),
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "advisor failed, using fallback text");
            fallback.to_string()
        }
    }
}

/// Asks `advisor` for a sample message; never fails.
pub fn suggest_message_or_fallback<A: Advisor + ?Sized>(advisor: &A) -> String {
    or_fallback(advisor.suggest_message(), DEFAULT_MESSAGE, FALLBACK_MESSAGE)
}

/// Asks `advisor` to assess a carrier; never fails.
pub fn assess_carrier_or_fallback<A: Advisor + ?Sized>(advisor: &A, carrier: &[u8]) -> String {
    or_fallback(
        advisor.assess_carrier(carrier),
        DEFAULT_ASSESSMENT,
        FALLBACK_ASSESSMENT,
    )
}
