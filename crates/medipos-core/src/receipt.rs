//! # Receipt Figures
//!
//! The numeric content of the two receipt presentations: the compact
//! thermal slip and the full A4 tax invoice.
//!
//! Layout (fonts, widths, printer control) belongs to the rendering
//! collaborators. What belongs HERE is the arithmetic both renderers show,
//! computed exactly once:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 One arithmetic, two presentations                       │
//! │                                                                         │
//! │                    ┌──────────────────┐                                │
//! │                    │  ReceiptFigures  │                                │
//! │                    │  (this module)   │                                │
//! │                    └────────┬─────────┘                                │
//! │                      ┌──────┴───────┐                                  │
//! │                      ▼              ▼                                  │
//! │            ┌─────────────────┐ ┌────────────────┐                      │
//! │            │ ThermalReceipt  │ │   TaxInvoice   │                      │
//! │            │ (80mm slip)     │ │   (A4 sheet)   │                      │
//! │            └─────────────────┘ └────────────────┘                      │
//! │                                                                         │
//! │   Identical input ⇒ numerically identical totals on both formats.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two renderers each doing their own tax math is exactly how one of them
//! ends up multiplying the GST-inclusive line total by the rate directly
//! and silently overstating tax on that format. Deriving both from one
//! [`ReceiptFigures`] makes that class of drift unrepresentable.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::{DiscountPercent, GstRate, Money};
use crate::types::{CustomerDetails, InvoiceDetails};

/// Footer disclosure carried on the thermal slip.
pub const PRICE_INCLUDES_GST_NOTE: &str = "* Price includes GST";

// =============================================================================
// GST Summary
// =============================================================================

/// Cart-wide GST aggregates, extracted from the inclusive prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GstSummary {
    /// Σ taxable base over all lines.
    pub taxable_value: Money,
    /// Σ SGST over all lines.
    pub sgst_amount: Money,
    /// Σ CGST over all lines.
    pub cgst_amount: Money,
    /// Distinct non-zero SGST rates present, in first-appearance order.
    /// Drives the "SGST @ 2.5%" caption; multiple slabs list all rates.
    pub sgst_rates: Vec<GstRate>,
    /// Distinct non-zero CGST rates present, in first-appearance order.
    pub cgst_rates: Vec<GstRate>,
}

impl GstSummary {
    /// Total GST (SGST + CGST).
    #[inline]
    pub fn total_tax(&self) -> Money {
        self.sgst_amount + self.cgst_amount
    }

    /// Caption fragment listing rates: "2.5%" or "2.5, 6%".
    pub fn format_rates(rates: &[GstRate]) -> String {
        let joined = rates
            .iter()
            .map(|r| r.percent().normalize().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{joined}%")
    }
}

// =============================================================================
// Receipt Figures
// =============================================================================

/// Every number a receipt shows, derived in one pass over the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptFigures {
    /// GST-inclusive subtotal.
    pub subtotal: Money,
    /// The clamped discount percentage applied.
    pub discount_percentage: DiscountPercent,
    /// Discount taken off the subtotal.
    pub discount_amount: Money,
    /// Amount payable.
    pub grand_total: Money,
    /// GST aggregates.
    pub gst: GstSummary,
}

impl ReceiptFigures {
    /// Computes the complete figure set for a cart and discount.
    pub fn compute(cart: &Cart, discount: DiscountPercent) -> Self {
        let mut taxable_value = Money::zero();
        let mut sgst_amount = Money::zero();
        let mut cgst_amount = Money::zero();
        let mut sgst_rates: Vec<GstRate> = Vec::new();
        let mut cgst_rates: Vec<GstRate> = Vec::new();

        for item in cart.items() {
            let tax = item.line_tax();
            taxable_value += tax.base;
            sgst_amount += tax.sgst_amount;
            cgst_amount += tax.cgst_amount;

            if !item.sgst_rate.is_zero() && !sgst_rates.contains(&item.sgst_rate) {
                sgst_rates.push(item.sgst_rate);
            }
            if !item.cgst_rate.is_zero() && !cgst_rates.contains(&item.cgst_rate) {
                cgst_rates.push(item.cgst_rate);
            }
        }

        ReceiptFigures {
            subtotal: cart.subtotal(),
            discount_percentage: discount,
            discount_amount: cart.discount_amount(discount),
            grand_total: cart.grand_total(discount),
            gst: GstSummary {
                taxable_value,
                sgst_amount,
                cgst_amount,
                sgst_rates,
                cgst_rates,
            },
        }
    }
}

// =============================================================================
// Thermal Receipt
// =============================================================================

/// One line on the thermal slip: name, quantity, inclusive amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ThermalLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// The compact 80mm slip: line items plus the shared figure block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ThermalReceipt {
    pub lines: Vec<ThermalLine>,
    pub figures: ReceiptFigures,
    /// Always [`PRICE_INCLUDES_GST_NOTE`]; carried so the renderer prints
    /// the disclosure verbatim.
    pub footer_note: String,
}

impl ThermalReceipt {
    /// Prepares the slip content for a cart and discount.
    pub fn prepare(cart: &Cart, discount: DiscountPercent) -> Self {
        let lines = cart
            .items()
            .iter()
            .map(|item| ThermalLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total(),
            })
            .collect();

        ThermalReceipt {
            lines,
            figures: ReceiptFigures::compute(cart, discount),
            footer_note: PRICE_INCLUDES_GST_NOTE.to_string(),
        }
    }
}

// =============================================================================
// A4 Tax Invoice
// =============================================================================

/// One row of the A4 invoice table, with per-line tax columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TaxInvoiceLine {
    pub name: String,
    pub batch_number: Option<String>,
    pub expiry_date: Option<String>,
    pub unit: Option<String>,
    pub quantity: i64,
    pub unit_price: Money,
    pub taxable_value: Money,
    pub sgst_rate: GstRate,
    pub sgst_amount: Money,
    pub cgst_rate: GstRate,
    pub cgst_amount: Money,
    pub line_total: Money,
}

/// The full-page tax invoice: per-line tax columns, customer block,
/// invoice metadata from the submission confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TaxInvoice {
    /// Present once the order has been submitted; a preview before
    /// submission carries `None`.
    pub invoice: Option<InvoiceDetails>,
    pub customer: CustomerDetails,
    pub lines: Vec<TaxInvoiceLine>,
    pub figures: ReceiptFigures,
}

impl TaxInvoice {
    /// Prepares the invoice content for a cart and discount.
    pub fn prepare(
        cart: &Cart,
        discount: DiscountPercent,
        customer: &CustomerDetails,
        invoice: Option<InvoiceDetails>,
    ) -> Self {
        let lines = cart
            .items()
            .iter()
            .map(|item| {
                let tax = item.line_tax();
                TaxInvoiceLine {
                    name: item.name.clone(),
                    batch_number: item.batch_number.clone(),
                    expiry_date: item.expiry_date.clone(),
                    unit: item.unit.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    taxable_value: tax.base,
                    sgst_rate: item.sgst_rate,
                    sgst_amount: tax.sgst_amount,
                    cgst_rate: item.cgst_rate,
                    cgst_amount: tax.cgst_amount,
                    line_total: item.line_total(),
                }
            })
            .collect();

        TaxInvoice {
            invoice,
            customer: customer.trimmed(),
            lines,
            figures: ReceiptFigures::compute(cart, discount),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
