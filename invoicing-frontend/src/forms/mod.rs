//! Form state for invoice create and edit.
//!
//! Customer forms need no state of their own; their payloads validate via
//! `validator` derives on the request types in [`crate::models`].

mod invoice;
mod line_items;

pub use invoice::{InvoiceForm, InvoiceFormErrors};
pub use line_items::{LineItemEdit, LineItemEditor, LineItemErrors, RowErrors};
