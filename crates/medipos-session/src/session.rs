//! # Billing Session
//!
//! The orchestration object behind one billing screen: every user action
//! lands here as a single validated call, and every collaborator exchange
//! happens here. The core stays pure; this file is where the async edge
//! and the logging live.
//!
//! ## Failure Discipline
//! Any error - validation, not-found, collaborator outage - leaves the
//! session exactly as it was. The one place that matters most is checkout:
//! a failed submission must never eat the cart.

use tracing::{debug, info};

use medipos_core::receipt::{TaxInvoice, ThermalReceipt};
use medipos_core::{
    change_due, Cart, CartTotals, CheckoutPayload, CoreError, CustomerDetails, DiscountPercent,
    HeldBill, HeldBillRegistry, InvoiceDetails, LineItem, Money, PaymentMethod,
};
use medipos_core::validation::validate_barcode;

use crate::collaborators::{OrderSubmitter, ProductLookup};
use crate::config::StoreConfig;
use crate::error::{SessionError, SessionResult};

// =============================================================================
// Checkout Outcome
// =============================================================================

/// Everything the frontend needs after a successful checkout.
///
/// The receipts are prepared from the cart BEFORE it is cleared - by the
/// time this value is in the caller's hands, the session is already on a
/// fresh bill.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    /// Invoice metadata returned by the order API.
    pub invoice: InvoiceDetails,
    /// Thermal slip content for the just-submitted order.
    pub thermal_receipt: ThermalReceipt,
    /// A4 tax invoice content for the just-submitted order.
    pub tax_invoice: TaxInvoice,
}

// =============================================================================
// Billing Session
// =============================================================================

/// One terminal's billing state and its collaborator handles.
///
/// Constructed once per terminal with its collaborators injected; see the
/// crate docs for the ownership model.
#[derive(Debug)]
pub struct BillingSession<L, S> {
    config: StoreConfig,
    lookup: L,
    submitter: S,
    cart: Cart,
    discount: DiscountPercent,
    customer_details: CustomerDetails,
    held: HeldBillRegistry,
    last_invoice: Option<InvoiceDetails>,
}

impl<L, S> BillingSession<L, S>
where
    L: ProductLookup,
    S: OrderSubmitter,
{
    /// Creates a session with an empty cart and no discount.
    pub fn new(config: StoreConfig, lookup: L, submitter: S) -> Self {
        BillingSession {
            config,
            lookup,
            submitter,
            cart: Cart::new(),
            discount: DiscountPercent::zero(),
            customer_details: CustomerDetails::default(),
            held: HeldBillRegistry::new(),
            last_invoice: None,
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// The live cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Aggregate figures for the current cart and discount.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.cart, self.discount)
    }

    /// The discount currently in effect.
    pub fn discount(&self) -> DiscountPercent {
        self.discount
    }

    /// The customer block as currently entered.
    pub fn customer_details(&self) -> &CustomerDetails {
        &self.customer_details
    }

    /// Currently suspended bills.
    pub fn held_bills(&self) -> &[HeldBill] {
        self.held.bills()
    }

    /// Invoice metadata of the most recent successful checkout.
    pub fn last_invoice(&self) -> Option<&InvoiceDetails> {
        self.last_invoice.as_ref()
    }

    /// Store/terminal identity.
    pub fn store_config(&self) -> &StoreConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Scanning
    // -------------------------------------------------------------------------

    /// Resolves a scanned barcode and adds one unit to the cart.
    ///
    /// A barcode already in the cart merges into its existing line. The
    /// product's combined GST slab is split into equal SGST/CGST halves
    /// when the line is first built.
    ///
    /// ## Returns
    /// A snapshot of the affected line (post-merge quantity), for the
    /// "Added ... to cart" feedback.
    pub async fn scan_barcode(&mut self, barcode: &str) -> SessionResult<LineItem> {
        debug!(barcode = %barcode, "barcode scanned");
        let barcode = validate_barcode(barcode).map_err(CoreError::from)?;

        let product = self
            .lookup
            .lookup_by_barcode(&barcode)
            .await?
            .ok_or_else(|| SessionError::ProductNotFound(barcode.clone()))?;

        let line = self
            .cart
            .add_item(LineItem::from_product(&product, 1))?
            .clone();

        info!(
            barcode = %line.item_key,
            name = %line.name,
            quantity = line.quantity,
            "item added to cart"
        );
        Ok(line)
    }

    // -------------------------------------------------------------------------
    // Cart mutations
    // -------------------------------------------------------------------------

    /// Adds a prepared line (product picked from the search screen).
    pub fn add_item(&mut self, item: LineItem) -> SessionResult<LineItem> {
        let line = self.cart.add_item(item)?.clone();
        info!(barcode = %line.item_key, quantity = line.quantity, "item added to cart");
        Ok(line)
    }

    /// Removes a line; unknown keys are a no-op.
    pub fn remove_item(&mut self, item_key: &str) -> bool {
        let removed = self.cart.remove_item(item_key);
        if removed {
            info!(barcode = %item_key, "item removed from cart");
        }
        removed
    }

    /// Sets a line's quantity (the numpad edit path).
    pub fn set_quantity(&mut self, item_key: &str, quantity: i64) -> SessionResult<()> {
        self.cart.set_quantity(item_key, quantity)?;
        debug!(barcode = %item_key, quantity, "quantity set");
        Ok(())
    }

    /// Bumps a line's quantity by one.
    pub fn increment_quantity(&mut self, item_key: &str) -> SessionResult<()> {
        self.cart.increment_quantity(item_key)?;
        Ok(())
    }

    /// Drops a line's quantity by one, flooring at 1.
    pub fn decrement_quantity(&mut self, item_key: &str) -> SessionResult<()> {
        self.cart.decrement_quantity(item_key)?;
        Ok(())
    }

    /// Sets the whole-cart discount (already clamped by its type).
    pub fn set_discount(&mut self, discount: DiscountPercent) {
        debug!(discount = %discount, "discount set");
        self.discount = discount;
    }

    /// Replaces the customer block.
    pub fn set_customer_details(&mut self, details: CustomerDetails) {
        self.customer_details = details;
    }

    // -------------------------------------------------------------------------
    // Hold / retrieve / suspend
    // -------------------------------------------------------------------------

    /// Suspends the current bill under a reference number.
    ///
    /// The cart empties and the discount resets; the customer block is kept
    /// (it usually belongs to the next action the cashier takes).
    pub fn hold(&mut self, reference_number: &str) -> SessionResult<String> {
        let id = self.held.hold(&mut self.cart, self.discount, reference_number)?;
        self.discount = DiscountPercent::zero();
        info!(bill_id = %id, held_count = self.held.len(), "bill held");
        Ok(id)
    }

    /// Restores a held bill into the live cart, discount included, and
    /// consumes the registry entry.
    pub fn retrieve_held(&mut self, id: &str) -> SessionResult<()> {
        self.discount = self.held.retrieve(id, &mut self.cart)?;
        info!(bill_id = %id, items = self.cart.item_count(), "held bill retrieved");
        Ok(())
    }

    /// Abandons the current bill entirely: cart, discount, and customer
    /// block reset. Held bills survive.
    pub fn suspend(&mut self) {
        self.cart.clear();
        self.discount = DiscountPercent::zero();
        self.customer_details = CustomerDetails::default();
        info!("bill suspended");
    }

    // -------------------------------------------------------------------------
    // Tender / checkout
    // -------------------------------------------------------------------------

    /// Change owed for a cash tender against the current grand total.
    ///
    /// Insufficient tender is an error, not a negative amount.
    pub fn change_due(&self, tendered: Money) -> SessionResult<Money> {
        Ok(change_due(tendered, self.cart.grand_total(self.discount))?)
    }

    /// Receipt preview of the live cart (before submission, no invoice
    /// number yet).
    pub fn thermal_receipt(&self) -> ThermalReceipt {
        ThermalReceipt::prepare(&self.cart, self.discount)
    }

    /// A4 invoice preview of the live cart.
    pub fn tax_invoice(&self) -> TaxInvoice {
        TaxInvoice::prepare(
            &self.cart,
            self.discount,
            &self.customer_details,
            self.last_invoice.clone(),
        )
    }

    /// Assembles, submits, and on success starts a fresh bill.
    ///
    /// ## Flow
    /// 1. Assemble the payload (empty-cart and mobile validation here)
    /// 2. Submit to the order collaborator
    /// 3. On success: prepare both receipts, record the invoice, clear
    ///    cart/discount/customer
    ///
    /// On any failure the session state is untouched: the cashier can fix
    /// the input or just retry.
    pub async fn checkout(&mut self, payment_method: PaymentMethod) -> SessionResult<CheckoutOutcome> {
        debug!(method = ?payment_method, items = self.cart.item_count(), "checkout requested");

        let payload = CheckoutPayload::assemble(
            &self.cart,
            self.discount,
            &self.customer_details,
            payment_method,
            &self.config.user_id,
        )?;

        let invoice = self.submitter.submit(&payload).await?;

        info!(
            invoice_number = %invoice.invoice_number,
            total = %payload.total,
            items = payload.cart.len(),
            "order submitted"
        );

        let outcome = CheckoutOutcome {
            thermal_receipt: ThermalReceipt::prepare(&self.cart, self.discount),
            tax_invoice: TaxInvoice::prepare(
                &self.cart,
                self.discount,
                &self.customer_details,
                Some(invoice.clone()),
            ),
            invoice: invoice.clone(),
        };

        self.last_invoice = Some(invoice);
        self.cart.clear();
        self.discount = DiscountPercent::zero();
        self.customer_details = CustomerDetails::default();

        Ok(outcome)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use medipos_core::{GstRate, Product};

    use crate::collaborators::{LookupError, SubmissionError};

    // --- fakes ---------------------------------------------------------------

    struct InMemoryCatalog {
        products: HashMap<String, Product>,
    }

    #[async_trait]
    impl ProductLookup for InMemoryCatalog {
        async fn lookup_by_barcode(
            &self,
            barcode: &str,
        ) -> Result<Option<Product>, LookupError> {
            Ok(self.products.get(barcode).cloned())
        }
    }

    struct FakeSubmitter {
        fail: bool,
    }

    #[async_trait]
    impl OrderSubmitter for FakeSubmitter {
        async fn submit(
            &self,
            _payload: &CheckoutPayload,
        ) -> Result<InvoiceDetails, SubmissionError> {
            if self.fail {
                return Err(SubmissionError("HTTP 503".to_string()));
            }
            Ok(InvoiceDetails {
                invoice_number: "INV-00042".to_string(),
                order_date: "2026-02-11".to_string(),
                order_time: "14:32".to_string(),
            })
        }
    }

    // --- helpers -------------------------------------------------------------

    fn paracetamol() -> Product {
        Product {
            barcode: "8901234567890".to_string(),
            name: "Paracetamol 500mg".to_string(),
            description: "Strip of 10".to_string(),
            price: Money::from_major_minor(112, 0),
            gst_rate: GstRate::from_percent_i64(12),
            batch_number: Some("PCM-4471".to_string()),
            manufacturing_date: Some("01/2026".to_string()),
            expiry_date: Some("12/2027".to_string()),
            brand: Some("Calpol".to_string()),
            unit: Some("strip".to_string()),
            schedule: None,
        }
    }

    fn cough_syrup() -> Product {
        Product {
            barcode: "8900000000001".to_string(),
            name: "Cough Syrup 100ml".to_string(),
            description: String::new(),
            price: Money::from_major_minor(100, 0),
            gst_rate: GstRate::from_percent_i64(5),
            batch_number: None,
            manufacturing_date: None,
            expiry_date: None,
            brand: None,
            unit: Some("bottle".to_string()),
            schedule: None,
        }
    }

    fn session(fail_submit: bool) -> BillingSession<InMemoryCatalog, FakeSubmitter> {
        let mut products = HashMap::new();
        for p in [paracetamol(), cough_syrup()] {
            products.insert(p.barcode.clone(), p);
        }
        BillingSession::new(
            StoreConfig::default(),
            InMemoryCatalog { products },
            FakeSubmitter { fail: fail_submit },
        )
    }

    // --- scanning ------------------------------------------------------------

    #[tokio::test]
    async fn test_scan_adds_and_merges() {
        let mut session = session(false);

        let line = session.scan_barcode("8901234567890").await.unwrap();
        assert_eq!(line.quantity, 1);
        // 12% combined slab split into even halves
        assert_eq!(line.sgst_rate.percent(), dec!(6));
        assert_eq!(line.cgst_rate.percent(), dec!(6));

        let line = session.scan_barcode("8901234567890").await.unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(session.cart().item_count(), 1);
    }

    #[tokio::test]
    async fn test_scan_unknown_barcode() {
        let mut session = session(false);

        let result = session.scan_barcode("9999999999999").await;
        assert!(matches!(result, Err(SessionError::ProductNotFound(_))));
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_scan_rejects_malformed_barcode() {
        let mut session = session(false);

        // below the scanner's 4-char minimum
        let result = session.scan_barcode("123").await;
        assert!(matches!(result, Err(SessionError::Core(_))));
        assert!(session.cart().is_empty());
    }

    // --- checkout ------------------------------------------------------------

    #[tokio::test]
    async fn test_checkout_success_starts_fresh_bill() {
        let mut session = session(false);
        session.scan_barcode("8900000000001").await.unwrap();
        session.scan_barcode("8900000000001").await.unwrap();
        session.set_discount(DiscountPercent::from_percent_i64(10));
        session.set_customer_details(CustomerDetails {
            doctor_name: String::new(),
            customer_name: "Asha".to_string(),
            customer_mobile: "9876543210".to_string(),
        });

        let outcome = session.checkout(PaymentMethod::Upi).await.unwrap();

        assert_eq!(outcome.invoice.invoice_number, "INV-00042");
        // receipts snapshot the bill as submitted
        assert_eq!(
            outcome.thermal_receipt.figures.grand_total.to_display_string(),
            "180.00"
        );
        assert_eq!(
            outcome.tax_invoice.invoice.as_ref().unwrap().invoice_number,
            "INV-00042"
        );
        assert_eq!(outcome.tax_invoice.figures, outcome.thermal_receipt.figures);

        // fresh bill
        assert!(session.cart().is_empty());
        assert!(session.discount().is_zero());
        assert_eq!(session.customer_details(), &CustomerDetails::default());
        assert_eq!(
            session.last_invoice().unwrap().invoice_number,
            "INV-00042"
        );
    }

    #[tokio::test]
    async fn test_checkout_failure_preserves_state() {
        let mut session = session(true);
        session.scan_barcode("8901234567890").await.unwrap();
        session.set_discount(DiscountPercent::from_percent_i64(5));

        let result = session.checkout(PaymentMethod::Cash).await;
        assert!(matches!(result, Err(SessionError::Submission(_))));

        // nothing lost: retry is possible
        assert_eq!(session.cart().item_count(), 1);
        assert_eq!(session.discount().percent(), dec!(5));
        assert!(session.last_invoice().is_none());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_rejected() {
        let mut session = session(false);

        let result = session.checkout(PaymentMethod::Cash).await;
        assert!(matches!(
            result,
            Err(SessionError::Core(CoreError::EmptyCart))
        ));
    }

    #[tokio::test]
    async fn test_checkout_rejects_bad_mobile() {
        let mut session = session(false);
        session.scan_barcode("8901234567890").await.unwrap();
        session.set_customer_details(CustomerDetails {
            doctor_name: String::new(),
            customer_name: String::new(),
            customer_mobile: "12345".to_string(),
        });

        assert!(session.checkout(PaymentMethod::Cash).await.is_err());
        // cart untouched for correction
        assert_eq!(session.cart().item_count(), 1);
    }

    // --- hold / retrieve / suspend -------------------------------------------

    #[tokio::test]
    async fn test_hold_and_retrieve_round_trip() {
        let mut session = session(false);
        session.scan_barcode("8901234567890").await.unwrap();
        session.scan_barcode("8901234567890").await.unwrap();
        session.set_discount(DiscountPercent::from_percent_i64(10));

        let id = session.hold("COUNTER-2").unwrap();
        assert!(session.cart().is_empty());
        assert!(session.discount().is_zero());
        assert_eq!(session.held_bills().len(), 1);

        session.retrieve_held(&id).unwrap();
        assert_eq!(session.cart().item_count(), 1);
        assert_eq!(session.cart().items()[0].quantity, 2);
        assert_eq!(session.discount().percent(), dec!(10));
        assert!(session.held_bills().is_empty());

        // consumed: a second retrieve is an explicit failure
        assert!(session.retrieve_held(&id).is_err());
    }

    #[tokio::test]
    async fn test_suspend_keeps_held_bills() {
        let mut session = session(false);
        session.scan_barcode("8901234567890").await.unwrap();
        session.hold("REF-A").unwrap();

        session.scan_barcode("8900000000001").await.unwrap();
        session.set_discount(DiscountPercent::from_percent_i64(20));
        session.suspend();

        assert!(session.cart().is_empty());
        assert!(session.discount().is_zero());
        assert_eq!(session.held_bills().len(), 1);
    }

    // --- tender --------------------------------------------------------------

    #[tokio::test]
    async fn test_change_due() {
        let mut session = session(false);
        session.scan_barcode("8900000000001").await.unwrap(); // ₹100

        let change = session
            .change_due(Money::from_major_minor(200, 0))
            .unwrap();
        assert_eq!(change.amount(), dec!(100));

        assert!(session.change_due(Money::from_major_minor(50, 0)).is_err());
    }

    #[tokio::test]
    async fn test_totals_reflect_discount() {
        let mut session = session(false);
        session.scan_barcode("8900000000001").await.unwrap();
        session.set_discount(DiscountPercent::from_percent_i64(10));

        let totals = session.totals();
        assert_eq!(totals.subtotal.amount(), dec!(100));
        assert_eq!(totals.grand_total.amount(), dec!(90.0));
    }
}
