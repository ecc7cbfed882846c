//! # Collaborator Traits
//!
//! The two async boundaries of the billing flow, as injected traits.
//!
//! The production implementations are thin REST clients living with the
//! application shell; tests inject in-memory fakes. Either way the session
//! never constructs its collaborators itself.
//!
//! Both collaborators are opaque: their failures carry a human-readable
//! message and nothing else, because there is nothing the billing flow can
//! do with more detail beyond showing it and leaving the cart intact for a
//! retry.

use async_trait::async_trait;
use thiserror::Error;

use medipos_core::{CheckoutPayload, InvoiceDetails, Product};

// =============================================================================
// Errors
// =============================================================================

/// Product lookup collaborator failure (network, server, decode).
///
/// "Barcode exists but matches nothing" is NOT this error - that is a
/// successful lookup returning `None`.
#[derive(Debug, Clone, Error)]
#[error("product lookup failed: {0}")]
pub struct LookupError(pub String);

/// Order submission collaborator failure.
///
/// Surfaced verbatim to the cashier; the in-flight cart is left untouched
/// so the checkout can be retried or edited.
#[derive(Debug, Clone, Error)]
#[error("order submission failed: {0}")]
pub struct SubmissionError(pub String);

// =============================================================================
// Traits
// =============================================================================

/// Resolves a scanned barcode to a product.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Returns `Ok(None)` when the barcode matches no product.
    async fn lookup_by_barcode(&self, barcode: &str) -> Result<Option<Product>, LookupError>;
}

/// Records a finalized order with the backend.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submits the payload; on success returns the invoice metadata the
    /// receipt preview shows.
    async fn submit(&self, payload: &CheckoutPayload) -> Result<InvoiceDetails, SubmissionError>;
}
