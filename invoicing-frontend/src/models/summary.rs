use chrono::NaiveDate;

use crate::models::Invoice;

/// Aggregate figures for one customer's invoices, shown on the customer
/// detail summary card.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSummary {
    pub total_invoiced: f64,
    pub total_balance: f64,
    pub unpaid_count: usize,
    pub overdue_count: usize,
    pub has_outstanding_balance: bool,
}

impl BalanceSummary {
    /// Fold a set of invoices into summary figures. An invoice counts as
    /// unpaid while it still carries a balance and is not marked paid;
    /// overdue additionally requires the due date to be behind `today`.
    pub fn for_invoices(invoices: &[Invoice], today: NaiveDate) -> Self {
        let total_invoiced = invoices.iter().map(|invoice| invoice.total).sum();
        let total_balance: f64 = invoices.iter().map(|invoice| invoice.balance).sum();

        let unpaid: Vec<&Invoice> = invoices
            .iter()
            .filter(|invoice| invoice.balance > 0.0 && !invoice.is_paid())
            .collect();
        let overdue_count = unpaid
            .iter()
            .filter(|invoice| invoice.due_date < today)
            .count();

        Self {
            total_invoiced,
            total_balance,
            unpaid_count: unpaid.len(),
            overdue_count,
            has_outstanding_balance: total_balance > 0.0,
        }
    }
}
