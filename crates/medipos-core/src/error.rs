//! # Error Types
//!
//! Domain-specific error types for medipos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medipos-core errors (this file)                                        │
//! │  ├── CoreError        - Cart / billing rule violations                  │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  medipos-session errors (separate crate)                                │
//! │  ├── LookupError      - Product lookup collaborator failures            │
//! │  ├── SubmissionError  - Order submission collaborator failures          │
//! │  └── SessionError     - What the frontend sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → Frontend            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (barcode, held-bill id, etc.)
//! 3. Errors are enum variants, never String
//! 4. No error in this crate is fatal: every rejected operation leaves the
//!    cart in its previous, valid state

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core billing logic errors.
///
/// These errors represent business rule violations. They should be caught
/// and translated to user-facing messages by the presentation layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The operation requires at least one line in the cart.
    ///
    /// ## When This Occurs
    /// - Checkout assembly on an empty cart
    /// - Holding a bill with nothing in it
    #[error("Cart is empty")]
    EmptyCart,

    /// The referenced line does not exist in the cart.
    ///
    /// Only raised by quantity mutations; `remove_item` on an unknown key
    /// is a benign no-op instead.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// The referenced held bill does not exist in the registry.
    ///
    /// ## When This Occurs
    /// - Retrieve with an unknown id
    /// - Retrieve called twice with the same id (retrieval consumes)
    #[error("Held bill not found: {0}")]
    HeldBillNotFound(String),

    /// Cart has exceeded maximum allowed distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// The tendered amount does not cover the bill.
    ///
    /// ## User Workflow
    /// ```text
    /// Tender entry: ₹150.00 against a ₹180.00 bill
    ///      │
    ///      ▼
    /// InsufficientTender { required: 180.00, tendered: 150.00 }
    ///      │
    ///      ▼
    /// UI shows: "₹30.00 short" and keeps the tender prompt open
    /// ```
    #[error("Tendered {tendered} is less than the bill total {required}")]
    InsufficientTender { required: Money, tendered: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before the billing logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a mobile number that is not 10 digits).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
