//! # Session Errors
//!
//! What the frontend sees when a billing operation fails. Core rule
//! violations, collaborator failures, and the one session-level condition
//! (scanning a barcode that matches nothing) funnel into [`SessionError`].

use thiserror::Error;

use medipos_core::CoreError;

use crate::collaborators::{LookupError, SubmissionError};

/// Billing session error.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Scanned barcode matched no product.
    ///
    /// Distinct from [`SessionError::Lookup`]: the collaborator answered,
    /// the answer was "no such product".
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A cart/billing rule rejected the operation; nothing was mutated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The product lookup collaborator failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The order submission collaborator failed; cart state is untouched
    /// and the checkout may be retried.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Convenience type alias for Results with SessionError.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use medipos_core::ValidationError;

    #[test]
    fn test_core_error_converts() {
        let core: CoreError = ValidationError::Required {
            field: "reference number".to_string(),
        }
        .into();
        let session: SessionError = core.into();
        assert!(matches!(session, SessionError::Core(_)));
    }

    #[test]
    fn test_messages_surface_verbatim() {
        let err = SessionError::Submission(SubmissionError("HTTP 503".to_string()));
        assert_eq!(err.to_string(), "order submission failed: HTTP 503");

        let err = SessionError::ProductNotFound("8901234567890".to_string());
        assert_eq!(err.to_string(), "Product not found: 8901234567890");
    }
}
