//! Verifier error types

use evidence_sources::SourceError;
use thiserror::Error;

/// Errors raised while constructing a verifier
///
/// Verification itself reports failures through
/// [`VerificationResult`](crate::VerificationResult), never through this type.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// A source client could not be created
    #[error("Source client error: {0}")]
    Client(#[from] SourceError),
}
