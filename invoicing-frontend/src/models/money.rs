//! Money arithmetic for invoice financials.
//!
//! Pure helpers shared by normalization, the line item editor and the
//! in-memory backend. Amounts are plain `f64`; currency formatting is a
//! presentation concern left to the embedding UI.

use crate::models::LineItem;

/// Amount owed for a single line: quantity times unit price.
pub fn line_amount(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// Sum of line amounts. Non-finite amounts count as zero so one malformed
/// row cannot poison the whole invoice.
pub fn subtotal(items: &[LineItem]) -> f64 {
    items
        .iter()
        .map(|item| if item.amount.is_finite() { item.amount } else { 0.0 })
        .sum()
}

/// Invoice total: subtotal plus the flat tax amount when present.
pub fn total(subtotal: f64, tax: Option<f64>) -> f64 {
    subtotal + tax.unwrap_or(0.0)
}
