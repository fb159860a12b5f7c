//! Session state and operations for the customer screens.

use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use frontend_core::error::ApiError;

use super::Pagination;
use crate::models::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
use crate::services::CustomerApi;

pub struct CustomerViewModel {
    api: Arc<dyn CustomerApi>,
    customers: Vec<Customer>,
    selected: Option<Customer>,
    loading: bool,
    error: Option<String>,
    pagination: Pagination,
}

impl CustomerViewModel {
    pub fn new(api: Arc<dyn CustomerApi>) -> Self {
        Self {
            api,
            customers: Vec::new(),
            selected: None,
            loading: false,
            error: None,
            pagination: Pagination::default(),
        }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn selected(&self) -> Option<&Customer> {
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

    /// Load a page of customers. On failure the list is emptied and the
    /// failure lands in the error state.
    #[instrument(skip(self))]
    pub async fn load_customers(&mut self, page: u32, size: u32) {
        self.begin();
        match self.api.list_customers(page, size).await {
            Ok(response) => {
                self.pagination.update_from(&response);
                self.customers = response.content;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load customers");
                self.error = Some(err.to_string());
                self.customers.clear();
            }
        }
        self.loading = false;
    }

    /// Fetch one customer and make it the selection.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn select_customer(&mut self, id: Uuid) -> Result<Customer, ApiError> {
        self.begin();
        let result = self.api.get_customer(id).await;
        self.loading = false;

        match result {
            Ok(customer) => {
                self.selected = Some(customer.clone());
                Ok(customer)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Create a customer and prepend it to the list.
    #[instrument(skip(self, request))]
    pub async fn create_customer(
        &mut self,
        request: &CreateCustomerRequest,
    ) -> Result<Customer, ApiError> {
        self.begin();
        let result = self.api.create_customer(request).await;
        self.loading = false;

        match result {
            Ok(customer) => {
                self.customers.insert(0, customer.clone());
                Ok(customer)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Update a customer; the list entry is replaced by id and a matching
    /// selection is refreshed.
    #[instrument(skip(self, request), fields(customer_id = %id))]
    pub async fn update_customer(
        &mut self,
        id: Uuid,
        request: &UpdateCustomerRequest,
    ) -> Result<Customer, ApiError> {
        self.begin();
        let result = self.api.update_customer(id, request).await;
        self.loading = false;

        match result {
            Ok(customer) => {
                if let Some(entry) = self.customers.iter_mut().find(|entry| entry.id == id) {
                    *entry = customer.clone();
                }
                if self.selected.as_ref().is_some_and(|selected| selected.id == id) {
                    self.selected = Some(customer.clone());
                }
                Ok(customer)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a customer, dropping it from the list and clearing a matching
    /// selection.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete_customer(&mut self, id: Uuid) -> Result<(), ApiError> {
        self.begin();
        let result = self.api.delete_customer(id).await;
        self.loading = false;

        match result {
            Ok(()) => {
                self.customers.retain(|customer| customer.id != id);
                if self.selected.as_ref().is_some_and(|selected| selected.id == id) {
                    self.selected = None;
                }
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
