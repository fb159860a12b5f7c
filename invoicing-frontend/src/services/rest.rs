//! REST clients over the shared [`ApiTransport`].
//!
//! Thin by intent. Paths and query names mirror the backend routes; all
//! envelope and error handling lives in the transport.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use frontend_core::error::ApiError;
use frontend_core::http::ApiTransport;

use super::{CustomerApi, InvoiceApi, PaymentApi};
use crate::models::{
    CreateCustomerRequest, CreateInvoiceRequest, CreatePaymentRequest, Customer, InvoiceStatus,
    Page, RawInvoice, RawPayment, UpdateCustomerRequest, UpdateInvoiceRequest,
};

#[derive(Clone)]
pub struct RestCustomerApi {
    transport: Arc<ApiTransport>,
}

impl RestCustomerApi {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CustomerApi for RestCustomerApi {
    #[instrument(skip(self))]
    async fn list_customers(&self, page: u32, size: u32) -> Result<Page<Customer>, ApiError> {
        self.transport
            .get_query("/customers", &[("page", page), ("size", size)])
            .await
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn get_customer(&self, id: Uuid) -> Result<Customer, ApiError> {
        self.transport.get(&format!("/customers/{}", id)).await
    }

    #[instrument(skip(self, request))]
    async fn create_customer(
        &self,
        request: &CreateCustomerRequest,
    ) -> Result<Customer, ApiError> {
        let customer: Customer = self.transport.post("/customers", request).await?;
        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    #[instrument(skip(self, request), fields(customer_id = %id))]
    async fn update_customer(
        &self,
        id: Uuid,
        request: &UpdateCustomerRequest,
    ) -> Result<Customer, ApiError> {
        self.transport
            .put(&format!("/customers/{}", id), request)
            .await
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn delete_customer(&self, id: Uuid) -> Result<(), ApiError> {
        self.transport.delete(&format!("/customers/{}", id)).await?;
        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}

#[derive(Clone)]
pub struct RestInvoiceApi {
    transport: Arc<ApiTransport>,
}

impl RestInvoiceApi {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl InvoiceApi for RestInvoiceApi {
    #[instrument(skip(self))]
    async fn list_invoices(
        &self,
        status: Option<InvoiceStatus>,
        page: u32,
        size: u32,
    ) -> Result<Page<RawInvoice>, ApiError> {
        let mut query: Vec<(&str, String)> =
            vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }

        self.transport.get_query("/invoices", &query).await
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn list_invoices_by_customer(
        &self,
        customer_id: Uuid,
        page: u32,
        size: u32,
    ) -> Result<Page<RawInvoice>, ApiError> {
        self.transport
            .get_query(
                &format!("/invoices/customers/{}", customer_id),
                &[("page", page), ("size", size)],
            )
            .await
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn get_invoice(&self, id: Uuid) -> Result<RawInvoice, ApiError> {
        self.transport.get(&format!("/invoices/{}", id)).await
    }

    #[instrument(skip(self, request))]
    async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<RawInvoice, ApiError> {
        let invoice: RawInvoice = self.transport.post("/invoices", request).await?;
        tracing::info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            "Invoice created"
        );
        Ok(invoice)
    }

    #[instrument(skip(self, request), fields(invoice_id = %id))]
    async fn update_invoice(
        &self,
        id: Uuid,
        request: &UpdateInvoiceRequest,
    ) -> Result<RawInvoice, ApiError> {
        self.transport
            .put(&format!("/invoices/{}", id), request)
            .await
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn mark_invoice_sent(&self, id: Uuid) -> Result<RawInvoice, ApiError> {
        let invoice: RawInvoice = self
            .transport
            .patch(&format!("/invoices/{}/mark-sent", id))
            .await?;
        tracing::info!(invoice_id = %id, "Invoice marked as sent");
        Ok(invoice)
    }
}

#[derive(Clone)]
pub struct RestPaymentApi {
    transport: Arc<ApiTransport>,
}

impl RestPaymentApi {
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl PaymentApi for RestPaymentApi {
    #[instrument(skip(self, request), fields(invoice_id = %request.invoice_id))]
    async fn record_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<RawPayment, ApiError> {
        let payment: RawPayment = self.transport.post("/payments", request).await?;
        tracing::info!(
            payment_id = %payment.id,
            invoice_id = %payment.invoice_id,
            "Payment recorded"
        );
        Ok(payment)
    }

    #[instrument(skip(self), fields(invoice_id = %invoice_id))]
    async fn list_payments_for_invoice(
        &self,
        invoice_id: Uuid,
    ) -> Result<Vec<RawPayment>, ApiError> {
        self.transport
            .get(&format!("/invoices/{}/payments", invoice_id))
            .await
    }

    #[instrument(skip(self), fields(payment_id = %id))]
    async fn get_payment(&self, id: Uuid) -> Result<RawPayment, ApiError> {
        self.transport.get(&format!("/payments/{}", id)).await
    }
}
