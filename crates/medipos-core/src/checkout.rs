//! # Checkout Assembly
//!
//! Builds the immutable payload handed to the order-submission collaborator.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Flow                                      │
//! │                                                                         │
//! │  Cart + Discount + CustomerDetails + PaymentMethod                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutPayload::assemble ← THIS MODULE                               │
//! │       │          (validates, normalizes, computes total)               │
//! │       ▼                                                                 │
//! │  submit(payload)              ← session orchestration, async          │
//! │       │                                                                 │
//! │       ├── Ok(InvoiceDetails)  → session records invoice, clears cart  │
//! │       └── Err(...)            → cart untouched, user retries          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The assembler itself has no side effects: it reads state and returns a
//! value. Clearing the cart after a successful submission is the caller's
//! job, which is what keeps a failed submission loss-free.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::{DiscountPercent, GstRate, Money};
use crate::types::{CustomerDetails, PaymentMethod};
use crate::validation::validate_customer_mobile;

// =============================================================================
// Checkout Line
// =============================================================================

/// A cart line normalized for submission.
///
/// Explicit fields only: the transient `added_at` timestamp and the
/// display-only `schedule` class are dropped here. Field names below are
/// the order API's wire names - snake_case, `sgst`/`cgst` without suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutLine {
    pub barcode: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub quantity: i64,
    pub batch_number: Option<String>,
    pub manufacturing_date: Option<String>,
    pub expiry_date: Option<String>,
    pub brand: Option<String>,
    pub unit: Option<String>,
    pub sgst: GstRate,
    pub cgst: GstRate,
}

// =============================================================================
// Checkout Payload
// =============================================================================

/// The finalized order, assembled once and never mutated afterwards.
///
/// ## Wire Shape
/// The serialized field names mix conventions (`paymentMethod` camelCase,
/// `discount_percentage`/`user_id` snake_case). That mix IS the contract
/// the order API consumes - do not "fix" it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutPayload {
    /// Normalized cart lines.
    pub cart: Vec<CheckoutLine>,

    /// Amount payable: subtotal − clamped discount.
    pub total: Money,

    /// Selected payment method.
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,

    /// Trimmed customer block (all fields optional).
    #[serde(rename = "customerDetails")]
    pub customer_details: CustomerDetails,

    /// The clamped whole-cart discount percentage.
    pub discount_percentage: DiscountPercent,

    /// External user/session identifier of the cashier.
    pub user_id: String,
}

impl CheckoutPayload {
    /// Assembles a payload from current state.
    ///
    /// ## Validation
    /// - Cart must be non-empty
    /// - A provided customer mobile must be exactly 10 digits
    ///   (`doctor_name`/`customer_name` are always optional)
    ///
    /// ## Errors
    /// [`CoreError::EmptyCart`] or a wrapped
    /// [`crate::error::ValidationError`]; nothing is mutated either way.
    pub fn assemble(
        cart: &Cart,
        discount: DiscountPercent,
        customer_details: &CustomerDetails,
        payment_method: PaymentMethod,
        user_id: &str,
    ) -> CoreResult<CheckoutPayload> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let customer_details = customer_details.trimmed();
        validate_customer_mobile(&customer_details.customer_mobile)?;

        let lines = cart
            .items()
            .iter()
            .map(|item| CheckoutLine {
                barcode: item.item_key.clone(),
                name: item.name.clone(),
                description: item.description.clone(),
                price: item.unit_price,
                quantity: item.quantity,
                batch_number: item.batch_number.clone(),
                manufacturing_date: item.manufacturing_date.clone(),
                expiry_date: item.expiry_date.clone(),
                brand: item.brand.clone(),
                unit: item.unit.clone(),
                sgst: item.sgst_rate,
                cgst: item.cgst_rate,
            })
            .collect();

        Ok(CheckoutPayload {
            cart: lines,
            total: cart.grand_total(discount),
            payment_method,
            customer_details,
            discount_percentage: discount,
            user_id: user_id.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
