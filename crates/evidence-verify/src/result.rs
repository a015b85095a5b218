//! Verification results and aggregation

use serde::Serialize;

/// Outcome of verifying one item (or a whole list)
///
/// A valid result may still carry messages: those are advisories such as a
/// skipped archive lookup. An invalid result always carries at least one
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    /// Whether the evidence matched its source
    pub is_valid: bool,

    /// Mismatches, failures or advisories
    pub errors: Vec<String>,
}

impl VerificationResult {
    /// Valid, no messages
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Valid, with one advisory message
    pub fn advisory(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            errors: vec![message.into()],
        }
    }

    /// Invalid, with one message
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![message.into()],
        }
    }

    /// Valid exactly when no errors were collected
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Split into the `(is_valid, errors)` pair
    pub fn into_parts(self) -> (bool, Vec<String>) {
        (self.is_valid, self.errors)
    }
}

/// Per-item verification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    /// Evidence identifier ("unknown" when absent)
    pub id: String,

    /// `event_type` or `observation_type`
    pub kind: String,

    /// Declared source
    pub source: String,

    /// Checker that ran
    pub checker: String,

    /// Outcome
    pub result: VerificationResult,
}

/// Combine per-item reports into one result
///
/// The combined result is invalid if any item failed. Its messages are the
/// failing items' messages, each prefixed with `[id] `, in input order.
/// Advisories on valid items are not carried over.
pub fn aggregate(reports: &[ItemReport]) -> VerificationResult {
    let mut all_valid = true;
    let mut all_errors = Vec::new();

    for report in reports {
        if !report.result.is_valid {
            all_valid = false;
            all_errors.extend(
                report
                    .result
                    .errors
                    .iter()
                    .map(|e| format!("[{}] {}", report.id, e)),
            );
        }
    }

    VerificationResult {
        is_valid: all_valid,
        errors: all_errors,
    }
}
