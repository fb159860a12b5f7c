//! Session state and operations for the invoice screens.

use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use frontend_core::error::ApiError;

use super::Pagination;
use crate::models::{CreateInvoiceRequest, Invoice, InvoiceStatus, UpdateInvoiceRequest};
use crate::services::InvoiceApi;

pub struct InvoiceViewModel {
    api: Arc<dyn InvoiceApi>,
    invoices: Vec<Invoice>,
    selected: Option<Invoice>,
    loading: bool,
    error: Option<String>,
    pagination: Pagination,
}

impl InvoiceViewModel {
    pub fn new(api: Arc<dyn InvoiceApi>) -> Self {
        Self {
            api,
            invoices: Vec::new(),
            selected: None,
            loading: false,
            error: None,
            pagination: Pagination::default(),
        }
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn selected(&self) -> Option<&Invoice> {
        self.selected.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Load a page of invoices, optionally filtered by status. On failure
    /// the list is emptied rather than left half-stale and the failure lands
    /// in the error state.
    #[instrument(skip(self))]
    pub async fn load_invoices(&mut self, status: Option<InvoiceStatus>, page: u32, size: u32) {
        self.begin();
        match self.api.list_invoices(status, page, size).await {
            Ok(response) => {
                self.pagination.update_from(&response);
                self.invoices = response.content.into_iter().map(Invoice::from_raw).collect();
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load invoices");
                self.error = Some(err.to_string());
                self.invoices.clear();
            }
        }
        self.loading = false;
    }

    /// Load one customer's invoices, newest first.
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn load_invoices_by_customer(&mut self, customer_id: Uuid, page: u32, size: u32) {
        self.begin();
        match self
            .api
            .list_invoices_by_customer(customer_id, page, size)
            .await
        {
            Ok(response) => {
                self.pagination.update_from(&response);
                self.invoices = response.content.into_iter().map(Invoice::from_raw).collect();
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load customer invoices");
                self.error = Some(err.to_string());
                self.invoices.clear();
            }
        }
        self.loading = false;
    }

    /// Fetch one invoice and make it the selection. Detail and edit screens
    /// hydrate from a route id through this.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn select_invoice(&mut self, id: Uuid) -> Result<Invoice, ApiError> {
        self.begin();
        let result = self.api.get_invoice(id).await;
        self.loading = false;

        match result {
            Ok(raw) => {
                let invoice = Invoice::from_raw(raw);
                self.selected = Some(invoice.clone());
                Ok(invoice)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Create an invoice and prepend it to the list, matching the backend's
    /// newest-first ordering.
    #[instrument(skip(self, request))]
    pub async fn create_invoice(
        &mut self,
        request: &CreateInvoiceRequest,
    ) -> Result<Invoice, ApiError> {
        self.begin();
        let result = self.api.create_invoice(request).await;
        self.loading = false;

        match result {
            Ok(raw) => {
                let invoice = Invoice::from_raw(raw);
                self.invoices.insert(0, invoice.clone());
                Ok(invoice)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Update an invoice. The list entry is replaced by id and a matching
    /// selection is refreshed too, so open detail views never go stale.
    #[instrument(skip(self, request), fields(invoice_id = %id))]
    pub async fn update_invoice(
        &mut self,
        id: Uuid,
        request: &UpdateInvoiceRequest,
    ) -> Result<Invoice, ApiError> {
        self.begin();
        let result = self.api.update_invoice(id, request).await;
        self.loading = false;

        match result {
            Ok(raw) => {
                let invoice = Invoice::from_raw(raw);
                self.replace_cached(id, &invoice);
                Ok(invoice)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Ask the backend to move a draft to SENT and refresh the cached copy.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn mark_as_sent(&mut self, id: Uuid) -> Result<Invoice, ApiError> {
        self.begin();
        let result = self.api.mark_invoice_sent(id).await;
        self.loading = false;

        match result {
            Ok(raw) => {
                let invoice = Invoice::from_raw(raw);
                self.replace_cached(id, &invoice);
                Ok(invoice)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn replace_cached(&mut self, id: Uuid, invoice: &Invoice) {
        if let Some(entry) = self.invoices.iter_mut().find(|entry| entry.id == id) {
            *entry = invoice.clone();
        }
        if self.selected.as_ref().is_some_and(|selected| selected.id == id) {
            self.selected = Some(invoice.clone());
        }
    }
}
