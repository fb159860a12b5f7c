//! Backend collaborators behind trait seams.
//!
//! View-models depend on these traits, never on HTTP directly. [`rest`]
//! holds the production clients over [`frontend_core::http::ApiTransport`];
//! [`mock`] holds an in-memory backend that applies the same business rules
//! the server does, for tests and demo wiring.

pub mod mock;
pub mod rest;

use async_trait::async_trait;
use uuid::Uuid;

use frontend_core::error::ApiError;

use crate::models::{
    CreateCustomerRequest, CreateInvoiceRequest, CreatePaymentRequest, Customer, InvoiceStatus,
    Page, RawInvoice, RawPayment, UpdateCustomerRequest, UpdateInvoiceRequest,
};

pub use mock::MockApi;
pub use rest::{RestCustomerApi, RestInvoiceApi, RestPaymentApi};

/// Customer endpoints.
#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn list_customers(&self, page: u32, size: u32) -> Result<Page<Customer>, ApiError>;

    async fn get_customer(&self, id: Uuid) -> Result<Customer, ApiError>;

    async fn create_customer(&self, request: &CreateCustomerRequest)
        -> Result<Customer, ApiError>;

    async fn update_customer(
        &self,
        id: Uuid,
        request: &UpdateCustomerRequest,
    ) -> Result<Customer, ApiError>;

    async fn delete_customer(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Invoice endpoints. Payloads come back raw; callers run them through
/// [`crate::models::Invoice::from_raw`].
#[async_trait]
pub trait InvoiceApi: Send + Sync {
    async fn list_invoices(
        &self,
        status: Option<InvoiceStatus>,
        page: u32,
        size: u32,
    ) -> Result<Page<RawInvoice>, ApiError>;

    async fn list_invoices_by_customer(
        &self,
        customer_id: Uuid,
        page: u32,
        size: u32,
    ) -> Result<Page<RawInvoice>, ApiError>;

    async fn get_invoice(&self, id: Uuid) -> Result<RawInvoice, ApiError>;

    async fn create_invoice(&self, request: &CreateInvoiceRequest)
        -> Result<RawInvoice, ApiError>;

    async fn update_invoice(
        &self,
        id: Uuid,
        request: &UpdateInvoiceRequest,
    ) -> Result<RawInvoice, ApiError>;

    async fn mark_invoice_sent(&self, id: Uuid) -> Result<RawInvoice, ApiError>;
}

/// Payment endpoints. Payments are append-only.
#[async_trait]
pub trait PaymentApi: Send + Sync {
    async fn record_payment(&self, request: &CreatePaymentRequest)
        -> Result<RawPayment, ApiError>;

    async fn list_payments_for_invoice(
        &self,
        invoice_id: Uuid,
    ) -> Result<Vec<RawPayment>, ApiError>;

    async fn get_payment(&self, id: Uuid) -> Result<RawPayment, ApiError>;
}
