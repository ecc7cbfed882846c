//! # Validation Module
//!
//! Input validation rules for the billing screen.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── The authoritative rules the cart/assembler boundary enforces      │
//! │  └── A rejected input never mutates the cart                           │
//! │                                                                         │
//! │  Defense in depth: the frontend check is a convenience, this is law    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{BARCODE_MAX_LEN, BARCODE_MIN_LEN, MAX_ITEM_QUANTITY, MOBILE_NUMBER_DIGITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a held-bill reference number.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 50 characters
///
/// ## Returns
/// The trimmed reference, which is what gets stored on the held bill.
pub fn validate_reference_number(reference: &str) -> ValidationResult<String> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "reference number".to_string(),
        });
    }

    if reference.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "reference number".to_string(),
            max: 50,
        });
    }

    Ok(reference.to_string())
}

/// Validates a customer mobile number.
///
/// ## Rules
/// - Empty (absent) is fine - the field is optional
/// - When present, must be exactly 10 ASCII digits
///
/// ## Example
/// ```rust
/// use medipos_core::validation::validate_customer_mobile;
///
/// assert!(validate_customer_mobile("").is_ok());
/// assert!(validate_customer_mobile("9876543210").is_ok());
/// assert!(validate_customer_mobile("12345").is_err());
/// assert!(validate_customer_mobile("98765abcde").is_err());
/// ```
pub fn validate_customer_mobile(mobile: &str) -> ValidationResult<()> {
    let mobile = mobile.trim();

    if mobile.is_empty() {
        return Ok(());
    }

    if mobile.len() != MOBILE_NUMBER_DIGITS || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "customer mobile".to_string(),
            reason: format!("must be exactly {MOBILE_NUMBER_DIGITS} digits"),
        });
    }

    Ok(())
}

/// Validates a scanned barcode.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Length must be within the scanner's accepted window (4-48 chars)
pub fn validate_barcode(barcode: &str) -> ValidationResult<String> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() < BARCODE_MIN_LEN || barcode.len() > BARCODE_MAX_LEN {
        return Err(ValidationError::OutOfRange {
            field: "barcode length".to_string(),
            min: BARCODE_MIN_LEN as i64,
            max: BARCODE_MAX_LEN as i64,
        });
    }

    Ok(barcode.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0); a removal is an explicit `remove_item`, never
///   a zero quantity
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free samples)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
