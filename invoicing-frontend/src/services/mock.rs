//! In-memory backend for tests and demo wiring.
//!
//! [`MockApi`] implements every API trait against `Vec`s behind a mutex and
//! applies the same business rules the real backend enforces: amounts are
//! recomputed server-side, only drafts may change, payments may not exceed
//! the open balance and a payment that clears the balance flips the invoice
//! to PAID. Rejections carry the backend's exact messages so error-path
//! tests read the same against either implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use frontend_core::error::ApiError;

use super::{CustomerApi, InvoiceApi, PaymentApi};
use crate::models::{
    CreateCustomerRequest, CreateInvoiceRequest, CreatePaymentRequest, Customer, InvoiceStatus,
    LineItemInput, Page, RawInvoice, RawLineItem, RawPayment, UpdateCustomerRequest,
    UpdateInvoiceRequest,
};

#[derive(Default)]
struct MockState {
    customers: Vec<Customer>,
    invoices: Vec<RawInvoice>,
    payments: Vec<RawPayment>,
}

pub struct MockApi {
    state: Mutex<MockState>,
    invoice_seq: AtomicU64,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
            invoice_seq: AtomicU64::new(0),
        }
    }

    /// Insert a customer as-is, bypassing request validation. Fixture hook
    /// for tests.
    pub async fn seed_customer(&self, customer: Customer) {
        self.state.lock().await.customers.insert(0, customer);
    }

    /// Insert a raw invoice without recomputing its financials. Fixture hook
    /// for exercising client-side repair of partial payloads.
    pub async fn seed_invoice(&self, invoice: RawInvoice) {
        self.state.lock().await.invoices.insert(0, invoice);
    }

    fn next_invoice_number(&self) -> String {
        let seq = self.invoice_seq.fetch_add(1, Ordering::SeqCst) + 1;
        format!("INV-{:04}", seq)
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

fn bad_request(message: impl Into<String>) -> ApiError {
    ApiError::Api {
        status: 400,
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> ApiError {
    ApiError::Api {
        status: 404,
        message: message.into(),
    }
}

/// Slice `items` into a zero-indexed page envelope. Items are stored newest
/// first, matching the backend's default `createdAt desc` ordering.
fn page_of<T: Clone>(items: &[T], page: u32, size: u32) -> Page<T> {
    let size = size.max(1);
    let total_elements = items.len() as u64;
    let total_pages = total_elements.div_ceil(size as u64) as u32;
    let start = page as usize * size as usize;
    let content = items.iter().skip(start).take(size as usize).cloned().collect();

    Page {
        content,
        total_elements,
        total_pages,
        size,
        number: page,
    }
}

fn line_items_from_inputs(inputs: &[LineItemInput]) -> Vec<RawLineItem> {
    inputs
        .iter()
        .map(|input| RawLineItem {
            id: Some(Uuid::new_v4()),
            description: input.description.clone(),
            quantity: input.quantity,
            unit_price: input.unit_price,
            amount: Some(input.quantity * input.unit_price),
        })
        .collect()
}

fn recompute_financials(invoice: &mut RawInvoice) {
    let subtotal: f64 = invoice
        .line_items
        .iter()
        .filter_map(|item| item.amount)
        .sum();
    let total = subtotal + invoice.tax.unwrap_or(0.0);
    invoice.subtotal = Some(subtotal);
    invoice.total = Some(total);
    invoice.balance = Some(total);
}

#[async_trait]
impl CustomerApi for MockApi {
    async fn list_customers(&self, page: u32, size: u32) -> Result<Page<Customer>, ApiError> {
        let state = self.state.lock().await;
        Ok(page_of(&state.customers, page, size))
    }

    async fn get_customer(&self, id: Uuid) -> Result<Customer, ApiError> {
        let state = self.state.lock().await;
        state
            .customers
            .iter()
            .find(|customer| customer.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("Customer not found with id: {}", id)))
    }

    async fn create_customer(
        &self,
        request: &CreateCustomerRequest,
    ) -> Result<Customer, ApiError> {
        if request.validate().is_err() {
            return Err(bad_request("Request validation failed"));
        }

        let now = Utc::now().naive_utc();
        let customer = Customer {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            email: Some(request.email.clone()),
            phone: request.phone.clone(),
            address: request.address.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.state.lock().await.customers.insert(0, customer.clone());
        Ok(customer)
    }

    async fn update_customer(
        &self,
        id: Uuid,
        request: &UpdateCustomerRequest,
    ) -> Result<Customer, ApiError> {
        if request.validate().is_err() {
            return Err(bad_request("Request validation failed"));
        }

        let mut state = self.state.lock().await;
        let customer = state
            .customers
            .iter_mut()
            .find(|customer| customer.id == id)
            .ok_or_else(|| not_found(format!("Customer not found with id: {}", id)))?;

        if let Some(name) = &request.name {
            customer.name = name.clone();
        }
        if let Some(email) = &request.email {
            customer.email = Some(email.clone());
        }
        if let Some(phone) = &request.phone {
            customer.phone = Some(phone.clone());
        }
        if let Some(address) = &request.address {
            customer.address = Some(address.clone());
        }
        customer.updated_at = Some(Utc::now().naive_utc());

        Ok(customer.clone())
    }

    async fn delete_customer(&self, id: Uuid) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        let before = state.customers.len();
        state.customers.retain(|customer| customer.id != id);
        if state.customers.len() == before {
            return Err(not_found(format!("Customer not found with id: {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl InvoiceApi for MockApi {
    async fn list_invoices(
        &self,
        status: Option<InvoiceStatus>,
        page: u32,
        size: u32,
    ) -> Result<Page<RawInvoice>, ApiError> {
        let state = self.state.lock().await;
        match status {
            Some(status) => {
                let filtered: Vec<RawInvoice> = state
                    .invoices
                    .iter()
                    .filter(|invoice| invoice.status.as_deref() == Some(status.as_str()))
                    .cloned()
                    .collect();
                Ok(page_of(&filtered, page, size))
            }
            None => Ok(page_of(&state.invoices, page, size)),
        }
    }

    async fn list_invoices_by_customer(
        &self,
        customer_id: Uuid,
        page: u32,
        size: u32,
    ) -> Result<Page<RawInvoice>, ApiError> {
        let state = self.state.lock().await;
        let filtered: Vec<RawInvoice> = state
            .invoices
            .iter()
            .filter(|invoice| invoice.customer_id == customer_id)
            .cloned()
            .collect();
        Ok(page_of(&filtered, page, size))
    }

    async fn get_invoice(&self, id: Uuid) -> Result<RawInvoice, ApiError> {
        let state = self.state.lock().await;
        state
            .invoices
            .iter()
            .find(|invoice| invoice.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("Invoice not found with id: {}", id)))
    }

    async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<RawInvoice, ApiError> {
        if request.due_date < request.issue_date {
            return Err(bad_request("Due date cannot be before issue date"));
        }

        let mut state = self.state.lock().await;
        let customer = state
            .customers
            .iter()
            .find(|customer| customer.id == request.customer_id)
            .cloned()
            .ok_or_else(|| {
                not_found(format!(
                    "Customer not found with id: {}",
                    request.customer_id
                ))
            })?;

        let now = Utc::now().naive_utc();
        let mut invoice = RawInvoice {
            id: Uuid::new_v4(),
            invoice_number: self.next_invoice_number(),
            customer_id: customer.id,
            customer_name: Some(customer.name.clone()),
            customer: None,
            status: Some(InvoiceStatus::Draft.as_str().to_string()),
            issue_date: request.issue_date,
            due_date: request.due_date,
            line_items: line_items_from_inputs(&request.line_items),
            subtotal: None,
            tax: Some(request.tax),
            total: None,
            balance: None,
            created_at: Some(now),
            updated_at: Some(now),
        };
        recompute_financials(&mut invoice);

        state.invoices.insert(0, invoice.clone());
        Ok(invoice)
    }

    async fn update_invoice(
        &self,
        id: Uuid,
        request: &UpdateInvoiceRequest,
    ) -> Result<RawInvoice, ApiError> {
        let mut state = self.state.lock().await;

        let new_customer = match request.customer_id {
            Some(customer_id) => Some(
                state
                    .customers
                    .iter()
                    .find(|customer| customer.id == customer_id)
                    .cloned()
                    .ok_or_else(|| {
                        not_found(format!("Customer not found with id: {}", customer_id))
                    })?,
            ),
            None => None,
        };

        let invoice = state
            .invoices
            .iter_mut()
            .find(|invoice| invoice.id == id)
            .ok_or_else(|| not_found(format!("Invoice not found with id: {}", id)))?;

        let status = invoice.status.as_deref().unwrap_or("DRAFT");
        if status != "DRAFT" {
            return Err(bad_request(format!(
                "Cannot update invoice with status: {}",
                status
            )));
        }

        let issue_date = request.issue_date.unwrap_or(invoice.issue_date);
        let due_date = request.due_date.unwrap_or(invoice.due_date);
        if due_date < issue_date {
            return Err(bad_request("Due date cannot be before issue date"));
        }

        if let Some(customer) = new_customer {
            invoice.customer_id = customer.id;
            invoice.customer_name = Some(customer.name);
        }
        invoice.issue_date = issue_date;
        invoice.due_date = due_date;
        if let Some(inputs) = &request.line_items {
            invoice.line_items = line_items_from_inputs(inputs);
        }
        if let Some(tax) = request.tax {
            invoice.tax = Some(tax);
        }

        recompute_financials(invoice);
        invoice.updated_at = Some(Utc::now().naive_utc());

        Ok(invoice.clone())
    }

    async fn mark_invoice_sent(&self, id: Uuid) -> Result<RawInvoice, ApiError> {
        let mut state = self.state.lock().await;
        let invoice = state
            .invoices
            .iter_mut()
            .find(|invoice| invoice.id == id)
            .ok_or_else(|| not_found(format!("Invoice not found with id: {}", id)))?;

        if invoice.status.as_deref() != Some("DRAFT") {
            return Err(bad_request("Only draft invoices can be marked as sent"));
        }
        if invoice.line_items.is_empty() {
            return Err(bad_request("Cannot send invoice without line items"));
        }

        invoice.status = Some(InvoiceStatus::Sent.as_str().to_string());
        invoice.updated_at = Some(Utc::now().naive_utc());

        Ok(invoice.clone())
    }
}

#[async_trait]
impl PaymentApi for MockApi {
    async fn record_payment(
        &self,
        request: &CreatePaymentRequest,
    ) -> Result<RawPayment, ApiError> {
        if request.amount.is_nan() || request.amount <= 0.0 {
            return Err(bad_request("Payment amount must be greater than zero"));
        }

        let mut state = self.state.lock().await;
        let invoice = state
            .invoices
            .iter_mut()
            .find(|invoice| invoice.id == request.invoice_id)
            .ok_or_else(|| {
                not_found(format!(
                    "Invoice not found with id: {}",
                    request.invoice_id
                ))
            })?;

        let status = invoice.status.as_deref().unwrap_or("DRAFT");
        if status == "DRAFT" {
            return Err(bad_request("Cannot record payment for draft invoice"));
        }

        let balance = invoice.balance.unwrap_or(0.0);
        if request.amount > balance {
            return Err(bad_request("Payment amount cannot exceed invoice balance"));
        }

        let new_balance = (balance - request.amount).max(0.0);
        invoice.balance = Some(new_balance);
        if new_balance <= 0.0 && status == "SENT" {
            invoice.status = Some(InvoiceStatus::Paid.as_str().to_string());
        }
        invoice.updated_at = Some(Utc::now().naive_utc());

        let payment = RawPayment {
            id: Uuid::new_v4(),
            invoice_id: request.invoice_id,
            invoice: None,
            amount: request.amount,
            payment_date: request.payment_date,
            payment_method: Some(request.payment_method.as_str().to_string()),
            reference_number: request.reference_number.clone(),
            notes: request.notes.clone(),
            created_at: Some(Utc::now().naive_utc()),
        };
        state.payments.insert(0, payment.clone());

        Ok(payment)
    }

    async fn list_payments_for_invoice(
        &self,
        invoice_id: Uuid,
    ) -> Result<Vec<RawPayment>, ApiError> {
        let state = self.state.lock().await;
        Ok(state
            .payments
            .iter()
            .filter(|payment| payment.invoice_id == invoice_id)
            .cloned()
            .collect())
    }

    async fn get_payment(&self, id: Uuid) -> Result<RawPayment, ApiError> {
        let state = self.state.lock().await;
        state
            .payments
            .iter()
            .find(|payment| payment.id == id)
            .cloned()
            .ok_or_else(|| not_found(format!("Payment not found with id: {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_zero_indexed_with_ceiling_page_count() {
        let items: Vec<u32> = (0..7).collect();

        let first = page_of(&items, 0, 3);
        assert_eq!(first.content, vec![0, 1, 2]);
        assert_eq!(first.total_elements, 7);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.number, 0);

        let last = page_of(&items, 2, 3);
        assert_eq!(last.content, vec![6]);
    }

    #[test]
    fn empty_collection_pages_to_zero_pages() {
        let page = page_of::<u32>(&[], 0, 10);
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn invoice_numbers_are_sequential() {
        let api = MockApi::new();
        assert_eq!(api.next_invoice_number(), "INV-0001");
        assert_eq!(api.next_invoice_number(), "INV-0002");
    }
}
