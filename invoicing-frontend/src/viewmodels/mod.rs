//! Per-entity session objects backing the screens.
//!
//! Each view-model owns the list, selection, loading and error state its
//! screens render, and is the only place that state changes. Operations
//! follow one protocol: set loading and clear the previous error on entry,
//! clear loading on both exits. Loads swallow failures into the error state
//! so a broken backend degrades to an empty list with a banner; mutations
//! and selection both store and re-raise failures so forms can react
//! locally. One call runs at a time per view-model; callers disable
//! triggering controls while `loading()` is set.

mod customers;
mod invoices;
mod payments;

pub use customers::CustomerViewModel;
pub use invoices::InvoiceViewModel;
pub use payments::PaymentViewModel;

use crate::models::Page;

/// Pager state for list screens, refreshed from every page envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub total_elements: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total_elements: 0,
            total_pages: 0,
            current_page: 0,
            size: 10,
        }
    }
}

impl Pagination {
    pub fn update_from<T>(&mut self, page: &Page<T>) {
        self.total_elements = page.total_elements;
        self.total_pages = page.total_pages;
        self.current_page = page.number;
        self.size = page.size;
    }
}
