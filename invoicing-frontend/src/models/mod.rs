//! Domain models and their wire mirrors.
//!
//! `Raw*` types mirror backend payloads field for field and tolerate the
//! holes real responses have. The normalized types are what the rest of the
//! crate works with; `from_raw` is the only way across.

mod customer;
mod invoice;
mod line_item;
pub mod money;
mod page;
mod payment;
mod summary;

pub use customer::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
pub use invoice::{CreateInvoiceRequest, Invoice, InvoiceStatus, RawInvoice, UpdateInvoiceRequest};
pub use line_item::{LineItem, LineItemInput, RawLineItem};
pub use page::Page;
pub use payment::{
    validate_payment_amount, CreatePaymentRequest, Payment, PaymentMethod, RawPayment,
};
pub use summary::BalanceSummary;
