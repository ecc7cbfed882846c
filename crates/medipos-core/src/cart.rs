//! # Cart Store
//!
//! The in-memory cart: ordered line items unique by barcode, with all
//! aggregate figures re-derived from the line list on demand.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_item   ┌───────────┐  checkout / hold   ┌─────────┐ │
//! │  │  Empty   │────────────►│ Populated │───────────────────►│  Empty  │ │
//! │  └──────────┘             └───────────┘   (clear)          └─────────┘ │
//! │       ▲                        │                                       │
//! │       │    remove last line    │  add / remove / set_quantity /        │
//! │       └────────────────────────┤  increment / decrement                │
//! │                                ▼                                       │
//! │                           ┌───────────┐                                │
//! │                           │ Populated │  (≥1 line, quantities ≥1)      │
//! │                           └───────────┘                                │
//! │                                                                         │
//! │  No terminal state: the store is reused across bills indefinitely.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No two lines share an `item_key`; adding an existing key merges quantity
//! - Quantity is never stored as 0 or negative; removal is explicit
//! - Totals are never cached: every aggregate is a fold over current lines
//! - A rejected mutation leaves the cart exactly as it was

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{extract_inclusive_tax, DiscountPercent, GstRate, LineTax, Money};
use crate::types::Product;
use crate::validation::{validate_quantity, validate_unit_price};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Line Item
// =============================================================================

/// One product's presence in the cart.
///
/// ## Price Freezing
/// The unit price and GST rates are captured when the line is created.
/// If the product record changes afterwards, this line keeps billing at the
/// price the customer saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Barcode - the stable merge/lookup identity within a cart.
    pub item_key: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Product description at time of adding (frozen).
    pub description: String,

    /// Unit price at time of adding, GST-inclusive (frozen).
    pub unit_price: Money,

    /// Quantity in cart; always ≥ 1.
    pub quantity: i64,

    /// State GST component rate.
    pub sgst_rate: GstRate,

    /// Central GST component rate.
    pub cgst_rate: GstRate,

    /// Batch number (display/forwarding only).
    pub batch_number: Option<String>,

    /// Manufacturing date as printed (display/forwarding only).
    pub manufacturing_date: Option<String>,

    /// Expiry date as printed (display/forwarding only).
    pub expiry_date: Option<String>,

    /// Brand (display/forwarding only).
    pub brand: Option<String>,

    /// Pack unit (display/forwarding only).
    pub unit: Option<String>,

    /// Drug schedule class (display only; dropped from the checkout payload).
    pub schedule: Option<String>,

    /// When this line was first added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a bare line item with no pack metadata.
    pub fn new(
        item_key: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
        sgst_rate: GstRate,
        cgst_rate: GstRate,
    ) -> Self {
        LineItem {
            item_key: item_key.into(),
            name: name.into(),
            description: String::new(),
            unit_price,
            quantity,
            sgst_rate,
            cgst_rate,
            batch_number: None,
            manufacturing_date: None,
            expiry_date: None,
            brand: None,
            unit: None,
            schedule: None,
            added_at: Utc::now(),
        }
    }

    /// Builds a line from a looked-up product, splitting the combined GST
    /// slab into equal SGST/CGST halves.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        let (sgst_rate, cgst_rate) = product.gst_rate.split_even();
        LineItem {
            item_key: product.barcode.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            unit_price: product.price,
            quantity,
            sgst_rate,
            cgst_rate,
            batch_number: product.batch_number.clone(),
            manufacturing_date: product.manufacturing_date.clone(),
            expiry_date: product.expiry_date.clone(),
            brand: product.brand.clone(),
            unit: product.unit.clone(),
            schedule: product.schedule.clone(),
            added_at: Utc::now(),
        }
    }

    /// The line total: `unit_price × quantity`, GST-inclusive, exact.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Taxable base and GST components extracted from the inclusive total.
    #[inline]
    pub fn line_tax(&self) -> LineTax {
        extract_inclusive_tax(self.line_total(), self.sgst_rate, self.cgst_rate)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The billing cart.
///
/// Lines are kept in insertion order (that is the display order); order has
/// no effect on any total.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// Lines, unique by `item_key`. Kept private so every mutation goes
    /// through the validated operations below.
    items: Vec<LineItem>,

    /// When the cart was created/last cleared.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Read access to the current lines, in display order.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Adds a line to the cart, merging on an existing key.
    ///
    /// ## Behavior
    /// - Key already present: that line's quantity grows by the incoming
    ///   quantity (one line per product, always)
    /// - New key: appended at the end
    ///
    /// ## Errors
    /// - Incoming quantity ≤ 0 or merged quantity > 999
    /// - Negative unit price
    /// - Cart already holds the maximum number of distinct lines
    ///
    /// ## Returns
    /// The stored line (merged or appended), for display feedback.
    pub fn add_item(&mut self, item: LineItem) -> CoreResult<&LineItem> {
        validate_quantity(item.quantity)?;
        validate_unit_price(item.unit_price)?;

        if let Some(index) = self.items.iter().position(|i| i.item_key == item.item_key) {
            let merged = self.items[index].quantity + item.quantity;
            if merged > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            self.items[index].quantity = merged;
            return Ok(&self.items[index]);
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(item);
        // just pushed, the list is non-empty
        Ok(self.items.last().expect("line was just pushed"))
    }

    /// Removes a line by key.
    ///
    /// Unknown keys are a benign no-op, not an error: the cashier may have
    /// already removed the line from another control.
    ///
    /// ## Returns
    /// Whether a line was actually removed.
    pub fn remove_item(&mut self, item_key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.item_key != item_key);
        self.items.len() != before
    }

    /// Sets a line's quantity outright.
    ///
    /// This is the single validated entry point for direct quantity edits;
    /// keypad/input-device concerns live entirely in the UI layer.
    ///
    /// ## Errors
    /// - `quantity` ≤ 0 or > 999 (the cart is left unchanged)
    /// - Key not present in the cart
    pub fn set_quantity(&mut self, item_key: &str, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.item_key == item_key)
            .ok_or_else(|| CoreError::ItemNotInCart(item_key.to_string()))?;

        item.quantity = quantity;
        Ok(())
    }

    /// Increments a line's quantity by one.
    pub fn increment_quantity(&mut self, item_key: &str) -> CoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.item_key == item_key)
            .ok_or_else(|| CoreError::ItemNotInCart(item_key.to_string()))?;

        if item.quantity + 1 > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: item.quantity + 1,
                max: MAX_ITEM_QUANTITY,
            });
        }

        item.quantity += 1;
        Ok(())
    }

    /// Decrements a line's quantity by one, flooring at 1.
    ///
    /// At quantity 1 this is a no-op; dropping the line requires an explicit
    /// [`Cart::remove_item`].
    pub fn decrement_quantity(&mut self, item_key: &str) -> CoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.item_key == item_key)
            .ok_or_else(|| CoreError::ItemNotInCart(item_key.to_string()))?;

        if item.quantity > 1 {
            item.quantity -= 1;
        }
        Ok(())
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Replaces the cart's contents wholesale (held-bill retrieval).
    pub(crate) fn restore(&mut self, items: Vec<LineItem>) {
        self.items = items;
        self.created_at = Utc::now();
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// GST-inclusive subtotal: Σ line_total.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Total GST across all lines, extracted from the inclusive prices.
    ///
    /// Not reduced by discount: the discount applies to the inclusive
    /// subtotal after tax is already inside it.
    pub fn total_tax(&self) -> Money {
        self.items.iter().map(|i| i.line_tax().total()).sum()
    }

    /// Discount amount for the given percentage of the subtotal.
    pub fn discount_amount(&self, discount: DiscountPercent) -> Money {
        discount.amount_of(self.subtotal())
    }

    /// Amount payable: subtotal − discount.
    pub fn grand_total(&self, discount: DiscountPercent) -> Money {
        self.subtotal() - self.discount_amount(discount)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Aggregate figures for display, derived in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub total_tax: Money,
    pub discount_amount: Money,
    pub grand_total: Money,
}

impl CartTotals {
    /// Computes the full aggregate set for a cart and discount.
    pub fn compute(cart: &Cart, discount: DiscountPercent) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            total_tax: cart.total_tax(),
            discount_amount: cart.discount_amount(discount),
            grand_total: cart.grand_total(discount),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn paracetamol(qty: i64) -> LineItem {
        LineItem::new(
            "8901234567890",
            "Paracetamol 500mg",
            Money::from_major_minor(112, 0),
            qty,
            GstRate::from_percent_i64(6),
            GstRate::from_percent_i64(6),
        )
    }

    fn cough_syrup(qty: i64) -> LineItem {
        LineItem::new(
            "8900000000001",
            "Cough Syrup 100ml",
            Money::from_major_minor(100, 0),
            qty,
            GstRate::from_percent(dec!(2.5)),
            GstRate::from_percent(dec!(2.5)),
        )
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_item(paracetamol(2)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().amount(), dec!(224));
    }

    /// Merge invariant: any sequence of adds with the same key yields one
    /// line whose quantity is the sum of all added quantities.
    #[test]
    fn test_add_same_key_merges() {
        let mut cart = Cart::new();
        cart.add_item(paracetamol(2)).unwrap();
        cart.add_item(paracetamol(3)).unwrap();
        cart.add_item(paracetamol(1)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].quantity, 6);
    }

    /// Totals are re-derived after every mutation - no cached figure to
    /// drift out of sync.
    #[test]
    fn test_total_recomputation_after_each_mutation() {
        let mut cart = Cart::new();

        cart.add_item(paracetamol(2)).unwrap();
        assert_eq!(cart.subtotal().amount(), dec!(224));

        cart.add_item(cough_syrup(1)).unwrap();
        assert_eq!(cart.subtotal().amount(), dec!(324));

        cart.set_quantity("8900000000001", 4).unwrap();
        assert_eq!(cart.subtotal().amount(), dec!(624));

        cart.increment_quantity("8901234567890").unwrap();
        assert_eq!(cart.subtotal().amount(), dec!(736));

        cart.decrement_quantity("8901234567890").unwrap();
        assert_eq!(cart.subtotal().amount(), dec!(624));

        cart.remove_item("8900000000001");
        assert_eq!(cart.subtotal().amount(), dec!(224));
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut cart = Cart::new();

        assert!(cart.add_item(paracetamol(0)).is_err());
        assert!(cart.add_item(paracetamol(-2)).is_err());

        let mut negative = paracetamol(1);
        negative.unit_price = Money::from_major_minor(-10, 0);
        assert!(cart.add_item(negative).is_err());

        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_respects_quantity_cap() {
        let mut cart = Cart::new();
        cart.add_item(paracetamol(998)).unwrap();

        // 998 + 2 would breach the cap; the line stays at 998
        assert!(matches!(
            cart.add_item(paracetamol(2)),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert_eq!(cart.items()[0].quantity, 998);
    }

    #[test]
    fn test_remove_is_benign_on_unknown_key() {
        let mut cart = Cart::new();
        cart.add_item(paracetamol(1)).unwrap();

        assert!(!cart.remove_item("no-such-key"));
        assert_eq!(cart.item_count(), 1);

        assert!(cart.remove_item("8901234567890"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_rejects_zero_and_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_item(paracetamol(3)).unwrap();

        assert!(cart.set_quantity("8901234567890", 0).is_err());
        assert!(cart.set_quantity("8901234567890", -5).is_err());
        assert_eq!(cart.items()[0].quantity, 3);

        assert!(matches!(
            cart.set_quantity("unknown", 2),
            Err(CoreError::ItemNotInCart(_))
        ));
    }

    /// Decrement floor: at quantity 1 decrement is a no-op, never a removal.
    #[test]
    fn test_decrement_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_item(paracetamol(1)).unwrap();

        cart.decrement_quantity("8901234567890").unwrap();
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(paracetamol(2)).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
    }

    /// End-to-end figures: one line ₹100 × 2 at 2.5% + 2.5%, 10% discount.
    #[test]
    fn test_end_to_end_totals() {
        let mut cart = Cart::new();
        cart.add_item(cough_syrup(2)).unwrap();
        let discount = DiscountPercent::from_percent_i64(10);

        assert_eq!(cart.subtotal().to_display_string(), "200.00");
        assert_eq!(
            cart.discount_amount(discount).to_display_string(),
            "20.00"
        );
        assert_eq!(cart.grand_total(discount).to_display_string(), "180.00");
        // 200 / 1.05 × 0.05 = 9.5238... → 9.52 at the display edge
        assert_eq!(cart.total_tax().to_display_string(), "9.52");
    }

    #[test]
    fn test_line_from_product_splits_gst() {
        let product = Product {
            barcode: "8901234567890".to_string(),
            name: "Azithromycin 250".to_string(),
            description: "Strip of 6".to_string(),
            price: Money::from_major_minor(89, 50),
            gst_rate: GstRate::from_percent_i64(12),
            batch_number: Some("AZB-2215".to_string()),
            manufacturing_date: Some("01/2026".to_string()),
            expiry_date: Some("12/2027".to_string()),
            brand: Some("Cipla".to_string()),
            unit: Some("strip".to_string()),
            schedule: Some("H".to_string()),
        };

        let line = LineItem::from_product(&product, 1);
        assert_eq!(line.sgst_rate.percent(), dec!(6));
        assert_eq!(line.cgst_rate.percent(), dec!(6));
        assert_eq!(line.unit_price, product.price);
        assert_eq!(line.batch_number.as_deref(), Some("AZB-2215"));
    }

    #[test]
    fn test_cart_totals_compute() {
        let mut cart = Cart::new();
        cart.add_item(cough_syrup(2)).unwrap();
        let totals = CartTotals::compute(&cart, DiscountPercent::from_percent_i64(10));

        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.total_quantity, 2);
        assert_eq!(totals.subtotal.amount(), dec!(200));
        assert_eq!(totals.grand_total.amount(), dec!(180.0));
    }
}
