//! # Domain Types
//!
//! Core domain types used throughout MediPOS billing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ CustomerDetails │   │ InvoiceDetails  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  barcode        │   │  doctor_name    │   │  invoice_number │       │
//! │  │  name           │   │  customer_name  │   │  order_date     │       │
//! │  │  price (incl.)  │   │  customer_mobile│   │  order_time     │       │
//! │  │  gst_rate       │   └─────────────────┘   └─────────────────┘       │
//! │  │  batch/expiry...│                                                    │
//! │  └─────────────────┘   ┌─────────────────┐                              │
//! │                        │  PaymentMethod  │                              │
//! │                        │  Cash|Upi|Card  │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Product` is what the barcode-lookup collaborator returns; it carries the
//! **combined** GST slab. The split into SGST/CGST halves happens when a
//! [`crate::cart::LineItem`] is built from it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{GstRate, Money};

// =============================================================================
// Product
// =============================================================================

/// A product as returned by the barcode-lookup collaborator.
///
/// The descriptive metadata (batch, dates, brand, pack unit, schedule class)
/// is pass-through only: displayed and forwarded on the checkout payload,
/// never used in arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Scanned barcode - the stable identity a cart line merges on.
    pub barcode: String,

    /// Display name shown to the cashier and on the receipt.
    pub name: String,

    /// Optional description for product details.
    #[serde(default)]
    pub description: String,

    /// Unit price, GST-inclusive.
    pub price: Money,

    /// Combined GST slab (e.g. 5%, 12%); split evenly into SGST/CGST.
    pub gst_rate: GstRate,

    /// Batch number printed on the pack.
    pub batch_number: Option<String>,

    /// Manufacturing date as printed (opaque string, not parsed).
    pub manufacturing_date: Option<String>,

    /// Expiry date as printed (opaque string, not parsed).
    pub expiry_date: Option<String>,

    /// Brand / manufacturer.
    pub brand: Option<String>,

    /// Pack unit ("strip of 10", "bottle", ...).
    pub unit: Option<String>,

    /// Drug schedule class (H, H1, ...). Display only.
    pub schedule: Option<String>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
///
/// Serialized lowercase ("cash", "upi", "card") - the order-submission API
/// expects these exact strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash payment (change may be due).
    Cash,
    /// UPI transfer.
    Upi,
    /// Card payment on external terminal.
    Card,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Customer Details
// =============================================================================

/// Optional customer block attached at checkout time.
///
/// All fields are optional; an empty string means "not provided". The only
/// format rule is that a non-empty mobile number must be exactly 10 digits
/// (validated by the checkout assembler).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerDetails {
    /// Prescribing doctor, if any.
    #[serde(default)]
    pub doctor_name: String,

    /// Customer name.
    #[serde(default)]
    pub customer_name: String,

    /// Customer mobile number, 10 digits when present.
    #[serde(default)]
    pub customer_mobile: String,
}

impl CustomerDetails {
    /// Returns a copy with every field whitespace-trimmed.
    ///
    /// The assembler normalizes through this before validating, so
    /// `" 9876543210 "` passes and `"   "` counts as absent.
    pub fn trimmed(&self) -> Self {
        CustomerDetails {
            doctor_name: self.doctor_name.trim().to_string(),
            customer_name: self.customer_name.trim().to_string(),
            customer_mobile: self.customer_mobile.trim().to_string(),
        }
    }
}

// =============================================================================
// Invoice Details
// =============================================================================

/// Confirmation returned by the order-submission collaborator.
///
/// Field names mirror the order API response verbatim (snake_case on the
/// wire) - do not rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceDetails {
    pub invoice_number: String,
    pub order_date: String,
    pub order_time: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
