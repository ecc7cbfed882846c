//! # Money Module
//!
//! Monetary values, GST rates, and the tax-inclusive extraction arithmetic.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  And GST extraction divides:                                            │
//! │    ₹112.00 / 1.12 = ₹100.00 must come out EXACT, not 99.999999...       │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    Exact base-10 arithmetic end to end; rounding to 2 places            │
//! │    happens ONCE, at the display/serialization edge                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The One Tax Formula
//! Unit prices are GST-inclusive. The taxable base is therefore extracted by
//! division, never read off the line total directly:
//!
//! ```text
//! base = line_total / (1 + (sgst% + cgst%) / 100)
//! sgst = base × sgst% / 100
//! cgst = base × cgst% / 100
//! ```
//!
//! Multiplying the inclusive line total by the rate (`line_total × rate/100`)
//! double-counts the tax that is already inside the price and overstates
//! every figure built on it. [`extract_inclusive_tax`] is the single path
//! everything here uses; no caller computes tax on its own.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in rupees, exact to arbitrary decimal places.
///
/// ## Design Decisions
/// - **Decimal (not f64)**: exact arithmetic; `112 / 1.12` is `100`, period
/// - **Decimal (not integer paise)**: the tax-base extraction divides, and
///   intermediate results must not be rounded to a currency unit
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **Display rounding only**: [`Money::rounded`] / [`Money::to_display_string`]
///   are the only places a value is cut to 2 places
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Creates a Money value from an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Example
    /// ```rust
    /// use medipos_core::money::Money;
    ///
    /// let price = Money::from_major_minor(112, 50); // ₹112.50
    /// assert_eq!(price.to_display_string(), "112.50");
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub fn from_major_minor(major: i64, minor: i64) -> Self {
        let paise = if major < 0 {
            major * 100 - minor
        } else {
            major * 100 + minor
        };
        Money(Decimal::new(paise, 2))
    }

    /// Returns the exact inner amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to 2 decimal places using Bankers Rounding (round half to even).
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even)                              │
    /// │                                                                     │
    /// │  Standard rounding always rounds 0.5 UP, causing systematic bias:  │
    /// │    0.125 → 0.13, 0.135 → 0.14, 0.145 → 0.15 (always up = +bias)    │
    /// │                                                                     │
    /// │  Bankers Rounding rounds 0.5 to nearest EVEN digit:                │
    /// │    0.125 → 0.12, 0.135 → 0.14, 0.145 → 0.14 (alternates = no bias) │
    /// │                                                                     │
    /// │  Over millions of receipts this prevents systematic loss/gain      │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// This is the ONLY place precision is dropped. Aggregates are computed
    /// on exact values and rounded once for presentation.
    #[inline]
    pub fn rounded(&self) -> Self {
        Money(self.0.round_dp(2))
    }

    /// Formats the amount with exactly two decimal places, no currency sign.
    ///
    /// Serialization-edge counterpart of [`Money::rounded`]; receipt
    /// renderers and the frontend consume this form.
    pub fn to_display_string(&self) -> String {
        format!("{:.2}", self.0.round_dp(2))
    }
}

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for receipts, logs, and error messages. The frontend formats
/// from [`Money::to_display_string`] to handle localization itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.to_display_string())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity (for line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

/// Summation over iterators (for subtotals and tax totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// GST Rate
// =============================================================================

/// A GST component rate as a percentage.
///
/// ## Why Decimal Percent?
/// Pharmacy GST slabs split into fractional halves: a 5% slab is
/// SGST 2.5% + CGST 2.5%. Integer basis points would do, but every
/// computation path here is decimal already, and rates print as the user
/// entered them ("2.5%", not "250 bps").
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct GstRate(#[ts(type = "string")] Decimal);

impl GstRate {
    /// Creates a rate from a decimal percentage (2.5 = 2.5%).
    #[inline]
    pub const fn from_percent(pct: Decimal) -> Self {
        GstRate(pct)
    }

    /// Creates a rate from a whole-number percentage (6 = 6%).
    #[inline]
    pub fn from_percent_i64(pct: i64) -> Self {
        GstRate(Decimal::from(pct))
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a fraction (2.5% → 0.025).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        GstRate(Decimal::ZERO)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Splits a combined GST rate into equal SGST/CGST halves.
    ///
    /// Products carry one combined slab (5%, 12%, ...); the state and
    /// central components are always even halves of it.
    ///
    /// ## Example
    /// ```rust
    /// use medipos_core::money::GstRate;
    ///
    /// let (sgst, cgst) = GstRate::from_percent_i64(5).split_even();
    /// assert_eq!(sgst, cgst);
    /// assert_eq!(sgst.percent().to_string(), "2.5");
    /// ```
    pub fn split_even(&self) -> (GstRate, GstRate) {
        let half = GstRate(self.0 / Decimal::TWO);
        (half, half)
    }
}

impl Default for GstRate {
    fn default() -> Self {
        GstRate::zero()
    }
}

/// Combining SGST + CGST into the slab rate.
impl Add for GstRate {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GstRate(self.0 + other.0)
    }
}

impl fmt::Display for GstRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Discount Percent
// =============================================================================

/// A whole-cart discount percentage, clamped to [0, 100] on every
/// construction, including deserialization.
///
/// ## Clamp, Don't Error
/// ```text
/// set_discount(150)  →  stored as 100   (never a 150% discount)
/// set_discount(-10)  →  stored as 0
/// ```
/// The discount applies to the cart subtotal, not per line, and is applied
/// on the GST-inclusive amount (tax totals are NOT reduced by discount).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TS)]
#[ts(export)]
pub struct DiscountPercent(#[ts(type = "string")] Decimal);

/// Serializes as the bare (already clamped) decimal percentage.
impl Serialize for DiscountPercent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Serialize::serialize(&self.0, serializer)
    }
}

/// Deserialization clamps too: a payload replayed with `discount: 150`
/// still cannot produce more than a 100% discount.
impl<'de> Deserialize<'de> for DiscountPercent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer).map(DiscountPercent::new)
    }
}

impl DiscountPercent {
    /// Creates a discount percentage, clamping into [0, 100].
    pub fn new(pct: Decimal) -> Self {
        DiscountPercent(pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// Convenience constructor from a whole-number percentage.
    pub fn from_percent_i64(pct: i64) -> Self {
        Self::new(Decimal::from(pct))
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountPercent(Decimal::ZERO)
    }

    /// Returns the clamped percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Checks if no discount is set.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The discount amount this percentage takes off a subtotal.
    #[inline]
    pub fn amount_of(&self, subtotal: Money) -> Money {
        Money::new(subtotal.amount() * self.0 / Decimal::ONE_HUNDRED)
    }
}

impl Default for DiscountPercent {
    fn default() -> Self {
        DiscountPercent::zero()
    }
}

impl From<Decimal> for DiscountPercent {
    fn from(pct: Decimal) -> Self {
        DiscountPercent::new(pct)
    }
}

impl From<DiscountPercent> for Decimal {
    fn from(d: DiscountPercent) -> Self {
        d.0
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Tax Extraction
// =============================================================================

/// Per-line tax breakdown extracted from a GST-inclusive line total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineTax {
    /// Pre-tax taxable value of the line.
    pub base: Money,
    /// State GST component.
    pub sgst_amount: Money,
    /// Central GST component.
    pub cgst_amount: Money,
}

impl LineTax {
    /// Total tax on the line (SGST + CGST).
    #[inline]
    pub fn total(&self) -> Money {
        self.sgst_amount + self.cgst_amount
    }
}

/// Extracts the taxable base and GST components from a tax-inclusive total.
///
/// ## The Formula
/// ```text
/// base = line_total / (1 + (sgst% + cgst%)/100)
/// sgst = base × sgst%/100
/// cgst = base × cgst%/100
/// ```
///
/// ## Example
/// ```rust
/// use medipos_core::money::{extract_inclusive_tax, GstRate, Money};
///
/// // ₹112 inclusive of 12% GST (6% + 6%)
/// let tax = extract_inclusive_tax(
///     Money::from_major_minor(112, 0),
///     GstRate::from_percent_i64(6),
///     GstRate::from_percent_i64(6),
/// );
/// assert_eq!(tax.base.to_display_string(), "100.00");
/// assert_eq!(tax.sgst_amount.to_display_string(), "6.00");
/// assert_eq!(tax.cgst_amount.to_display_string(), "6.00");
/// ```
///
/// Note the counter-example: `112 × 6/100 = 6.72` is what the broken
/// renderer printed for SGST. The division step is not optional.
pub fn extract_inclusive_tax(line_total: Money, sgst: GstRate, cgst: GstRate) -> LineTax {
    let combined = sgst.fraction() + cgst.fraction();
    let base = line_total.amount() / (Decimal::ONE + combined);
    LineTax {
        base: Money::new(base),
        sgst_amount: Money::new(base * sgst.fraction()),
        cgst_amount: Money::new(base * cgst.fraction()),
    }
}

// =============================================================================
// Change Due
// =============================================================================

/// Change owed to the customer for a cash tender.
///
/// Insufficient payment is rejected here, not signalled by a negative
/// result the caller could accidentally hand back as change.
pub fn change_due(tendered: Money, grand_total: Money) -> CoreResult<Money> {
    let change = tendered - grand_total;
    if change.is_negative() {
        return Err(CoreError::InsufficientTender {
            required: grand_total,
            tendered,
        });
    }
    Ok(change)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(112, 50);
        assert_eq!(money.amount(), dec!(112.50));

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.amount(), dec!(-5.50));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_major_minor(112, 0)), "₹112.00");
        assert_eq!(format!("{}", Money::new(dec!(9.523809))), "₹9.52");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10.00));
        let b = Money::new(dec!(5.50));

        assert_eq!((a + b).amount(), dec!(15.50));
        assert_eq!((a - b).amount(), dec!(4.50));
        assert_eq!((a * 3).amount(), dec!(30.00));

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.amount(), dec!(21.00));
    }

    #[test]
    fn test_display_rounding_is_bankers() {
        // round half to even at the 2nd decimal place
        assert_eq!(Money::new(dec!(0.125)).to_display_string(), "0.12");
        assert_eq!(Money::new(dec!(0.135)).to_display_string(), "0.14");
    }

    /// The extraction round trip: ₹112 @ 6% + 6% inclusive.
    #[test]
    fn test_tax_extraction_round_trip() {
        let tax = extract_inclusive_tax(
            Money::from_major_minor(112, 0),
            GstRate::from_percent_i64(6),
            GstRate::from_percent_i64(6),
        );

        assert_eq!(tax.base.rounded().amount(), dec!(100.00));
        assert_eq!(tax.sgst_amount.rounded().amount(), dec!(6.00));
        assert_eq!(tax.cgst_amount.rounded().amount(), dec!(6.00));
        assert_eq!(tax.total().rounded().amount(), dec!(12.00));

        // The broken renderer's figure. Never this.
        assert_ne!(tax.sgst_amount.rounded().amount(), dec!(6.72));
    }

    #[test]
    fn test_tax_extraction_zero_rate() {
        // Exempt items: base == line total, no tax
        let tax = extract_inclusive_tax(
            Money::from_major_minor(50, 0),
            GstRate::zero(),
            GstRate::zero(),
        );
        assert_eq!(tax.base.amount(), dec!(50));
        assert!(tax.total().is_zero());
    }

    #[test]
    fn test_gst_split_even() {
        let (sgst, cgst) = GstRate::from_percent_i64(5).split_even();
        assert_eq!(sgst.percent(), dec!(2.5));
        assert_eq!(cgst.percent(), dec!(2.5));
        assert_eq!((sgst + cgst).percent(), dec!(5));
    }

    #[test]
    fn test_discount_clamp() {
        // 150% clamps to 100%: the discount can wipe the bill, never invert it
        let discount = DiscountPercent::from_percent_i64(150);
        assert_eq!(discount.percent(), dec!(100));
        assert_eq!(
            discount.amount_of(Money::from_major_minor(200, 0)).amount(),
            dec!(200)
        );

        let negative = DiscountPercent::new(dec!(-10));
        assert_eq!(negative.percent(), dec!(0));
    }

    #[test]
    fn test_discount_clamps_on_deserialize() {
        let discount: DiscountPercent = serde_json::from_str("\"150\"").unwrap();
        assert_eq!(discount.percent(), dec!(100));
    }

    #[test]
    fn test_discount_amount() {
        let discount = DiscountPercent::from_percent_i64(10);
        let amount = discount.amount_of(Money::from_major_minor(200, 0));
        assert_eq!(amount.amount(), dec!(20.0));
    }

    #[test]
    fn test_change_due() {
        let total = Money::from_major_minor(180, 0);

        let change = change_due(Money::from_major_minor(200, 0), total).unwrap();
        assert_eq!(change.amount(), dec!(20));

        let exact = change_due(total, total).unwrap();
        assert!(exact.is_zero());

        let short = change_due(Money::from_major_minor(150, 0), total);
        assert!(matches!(
            short,
            Err(CoreError::InsufficientTender { .. })
        ));
    }
}
