//! # medipos-core: Pure Billing Logic for MediPOS
//!
//! This crate is the **heart** of the MediPOS billing screen. It contains all
//! cart and GST arithmetic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       MediPOS Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (POS screens)                       │   │
//! │  │   Scan UI ──► Cart UI ──► Discount UI ──► Checkout ──► Receipt  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                medipos-session (orchestration)                  │   │
//! │  │    barcode lookup, checkout submission, logging                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medipos-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐  │   │
//! │  │  │  money  │ │  cart   │ │  held   │ │ checkout │ │ receipt │  │   │
//! │  │  │  Money  │ │  Cart   │ │ HeldBill│ │ Payload  │ │ Figures │  │   │
//! │  │  │ GstRate │ │ LineItem│ │ Registry│ │ assembly │ │ 2 views │  │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money`, `GstRate`, `DiscountPercent` and tax extraction
//! - [`types`] - Domain types (Product, PaymentMethod, CustomerDetails, ...)
//! - [`cart`] - The cart store: line items unique by barcode, derived totals
//! - [`held`] - Suspend/resume of whole carts as named snapshots
//! - [`checkout`] - Assembly of the immutable checkout payload
//! - [`receipt`] - Shared numeric figures for both receipt layouts
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every calculation is deterministic
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: All monetary values are `rust_decimal` decimals;
//!    rounding to 2 places happens only at the display edge
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use medipos_core::money::{GstRate, Money};
//! use medipos_core::cart::{Cart, LineItem};
//!
//! let mut cart = Cart::new();
//! cart.add_item(LineItem::new(
//!     "8901234567890",
//!     "Paracetamol 500mg",
//!     Money::from_major_minor(112, 0),
//!     1,
//!     GstRate::from_percent_i64(6),
//!     GstRate::from_percent_i64(6),
//! )).unwrap();
//!
//! // Prices include GST; the taxable base is extracted by division.
//! let tax = cart.items()[0].line_tax();
//! assert_eq!(tax.base.to_display_string(), "100.00");
//! assert_eq!(tax.sgst_amount.to_display_string(), "6.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod held;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use medipos_core::Money` instead of
// `use medipos_core::money::Money`

pub use cart::{Cart, CartTotals, LineItem};
pub use checkout::{CheckoutLine, CheckoutPayload};
pub use error::{CoreError, CoreResult, ValidationError};
pub use held::{HeldBill, HeldBillRegistry};
pub use money::{change_due, extract_inclusive_tax, DiscountPercent, GstRate, LineTax, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable per store in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Exact digit count for an Indian customer mobile number
pub const MOBILE_NUMBER_DIGITS: usize = 10;

/// Accepted barcode length range (matches the scanner configuration)
pub const BARCODE_MIN_LEN: usize = 4;
pub const BARCODE_MAX_LEN: usize = 48;
