//! # Held Bills
//!
//! Suspend/resume of a whole cart as a named, timestamped snapshot.
//!
//! A customer steps away to fetch a prescription; the cashier holds the
//! bill under a reference ("COUNTER-2"), serves the next customer on a
//! fresh cart, and retrieves the held bill when the first customer returns.
//!
//! ## Semantics
//! - `hold` deep-copies the lines: later edits to the live cart never leak
//!   into the snapshot
//! - `retrieve` is consuming - a held bill can be restored at most once,
//!   after which its id is gone from the registry
//! - Registry order carries no meaning; the UI sorts for display
//! - Held bills live in process memory only and end with the session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartTotals, LineItem};
use crate::error::{CoreError, CoreResult};
use crate::money::DiscountPercent;
use crate::validation::validate_reference_number;

// =============================================================================
// Held Bill
// =============================================================================

/// An immutable snapshot of a suspended cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HeldBill {
    /// Unique id (UUID v4); must stay unique even when two bills are held
    /// in the same instant.
    pub id: String,

    /// User-supplied label ("COUNTER-2", a customer name, ...).
    pub reference_number: String,

    /// Deep copy of the lines at hold time.
    pub items: Vec<LineItem>,

    /// Discount in effect at hold time; restored on retrieve.
    pub discount: DiscountPercent,

    /// Totals computed at hold time, for the held-bills list display.
    pub totals: CartTotals,

    /// When the bill was held.
    #[ts(as = "String")]
    pub held_at: DateTime<Utc>,
}

// =============================================================================
// Registry
// =============================================================================

/// The in-memory registry of suspended bills.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HeldBillRegistry {
    bills: Vec<HeldBill>,
}

impl HeldBillRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        HeldBillRegistry::default()
    }

    /// Read access to the held bills (no ordering guarantee).
    #[inline]
    pub fn bills(&self) -> &[HeldBill] {
        &self.bills
    }

    /// Number of bills currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.bills.len()
    }

    /// Checks if nothing is held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    /// Suspends the live cart under a reference number.
    ///
    /// On success the registry grows by exactly one entry and the live cart
    /// is left empty, ready for the next customer.
    ///
    /// ## Errors
    /// - Empty reference number (nothing to identify the bill by later)
    /// - Empty cart (nothing to hold)
    ///
    /// ## Returns
    /// The fresh snapshot's id, for immediate display/toast use.
    pub fn hold(
        &mut self,
        cart: &mut Cart,
        discount: DiscountPercent,
        reference_number: &str,
    ) -> CoreResult<String> {
        let reference_number = validate_reference_number(reference_number)?;

        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let id = Uuid::new_v4().to_string();
        self.bills.push(HeldBill {
            id: id.clone(),
            reference_number,
            items: cart.items().to_vec(),
            discount,
            totals: CartTotals::compute(cart, discount),
            held_at: Utc::now(),
        });

        cart.clear();
        Ok(id)
    }

    /// Restores a held bill into the live cart and removes it from the
    /// registry.
    ///
    /// The live cart's previous contents are overwritten; deciding whether
    /// they needed holding first is the caller's responsibility.
    ///
    /// ## Errors
    /// Unknown id - including an id that was already retrieved once.
    ///
    /// ## Returns
    /// The discount that was in effect when the bill was held, so the
    /// session can restore it alongside the lines.
    pub fn retrieve(&mut self, id: &str, cart: &mut Cart) -> CoreResult<DiscountPercent> {
        let index = self
            .bills
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| CoreError::HeldBillNotFound(id.to_string()))?;

        let bill = self.bills.remove(index);
        cart.restore(bill.items);
        Ok(bill.discount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{GstRate, Money};
    use rust_decimal_macros::dec;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(LineItem::new(
            "A-1111",
            "Item A",
            Money::from_major_minor(50, 0),
            2,
            GstRate::from_percent(dec!(2.5)),
            GstRate::from_percent(dec!(2.5)),
        ))
        .unwrap();
        cart.add_item(LineItem::new(
            "B-2222",
            "Item B",
            Money::from_major_minor(30, 0),
            1,
            GstRate::from_percent_i64(6),
            GstRate::from_percent_i64(6),
        ))
        .unwrap();
        cart
    }

    #[test]
    fn test_hold_requires_reference() {
        let mut registry = HeldBillRegistry::new();
        let mut cart = sample_cart();

        assert!(registry.hold(&mut cart, DiscountPercent::zero(), "").is_err());
        assert!(registry
            .hold(&mut cart, DiscountPercent::zero(), "   ")
            .is_err());

        // rejected hold touched nothing
        assert_eq!(cart.item_count(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_hold_rejects_empty_cart() {
        let mut registry = HeldBillRegistry::new();
        let mut cart = Cart::new();

        assert!(matches!(
            registry.hold(&mut cart, DiscountPercent::zero(), "REF1"),
            Err(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_hold_snapshots_and_clears_live_cart() {
        let mut registry = HeldBillRegistry::new();
        let mut cart = sample_cart();
        let discount = DiscountPercent::from_percent_i64(5);

        let id = registry.hold(&mut cart, discount, " REF1 ").unwrap();

        assert_eq!(registry.len(), 1);
        assert!(cart.is_empty());

        let bill = &registry.bills()[0];
        assert_eq!(bill.id, id);
        assert_eq!(bill.reference_number, "REF1");
        assert_eq!(bill.items.len(), 2);
        assert_eq!(bill.totals.subtotal.amount(), dec!(130));
    }

    /// Mutating the live cart after hold must not reach into the snapshot.
    #[test]
    fn test_snapshot_is_isolated_from_live_cart() {
        let mut registry = HeldBillRegistry::new();
        let mut cart = sample_cart();

        registry
            .hold(&mut cart, DiscountPercent::zero(), "REF1")
            .unwrap();

        // new bill on the live cart
        cart.add_item(LineItem::new(
            "A-1111",
            "Item A",
            Money::from_major_minor(50, 0),
            9,
            GstRate::from_percent(dec!(2.5)),
            GstRate::from_percent(dec!(2.5)),
        ))
        .unwrap();

        let bill = &registry.bills()[0];
        assert_eq!(bill.items[0].quantity, 2);
    }

    /// Hold then retrieve restores the same lines and totals, and consumes
    /// the registry entry.
    #[test]
    fn test_hold_retrieve_round_trip() {
        let mut registry = HeldBillRegistry::new();
        let mut cart = sample_cart();
        let discount = DiscountPercent::from_percent_i64(10);
        let subtotal_before = cart.subtotal();

        let id = registry.hold(&mut cart, discount, "REF1").unwrap();
        let restored_discount = registry.retrieve(&id, &mut cart).unwrap();

        assert_eq!(restored_discount, discount);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.items()[0].item_key, "A-1111");
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].item_key, "B-2222");
        assert_eq!(cart.items()[1].quantity, 1);
        assert_eq!(cart.subtotal(), subtotal_before);

        // retrieval consumed the entry
        assert!(registry.is_empty());
        assert!(matches!(
            registry.retrieve(&id, &mut cart),
            Err(CoreError::HeldBillNotFound(_))
        ));
    }

    #[test]
    fn test_retrieve_unknown_id_is_explicit_failure() {
        let mut registry = HeldBillRegistry::new();
        let mut cart = Cart::new();

        assert!(matches!(
            registry.retrieve("nope", &mut cart),
            Err(CoreError::HeldBillNotFound(_))
        ));
    }
}
