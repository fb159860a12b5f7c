//! Session state and operations for payment history and the record-payment
//! form.

use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use frontend_core::error::ApiError;

use crate::models::{self, CreatePaymentRequest, Payment};
use crate::services::PaymentApi;

pub struct PaymentViewModel {
    api: Arc<dyn PaymentApi>,
    payments: Vec<Payment>,
    loading: bool,
    error: Option<String>,
}

impl PaymentViewModel {
    pub fn new(api: Arc<dyn PaymentApi>) -> Self {
        Self {
            api,
            payments: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Load one invoice's payment history, newest first. On failure the list
    /// is emptied and the failure lands in the error state.
    #[instrument(skip(self), fields(invoice_id = %invoice_id))]
    pub async fn load_payments_for_invoice(&mut self, invoice_id: Uuid) {
        self.begin();
        match self.api.list_payments_for_invoice(invoice_id).await {
            Ok(raw) => {
                self.payments = raw.into_iter().map(Payment::from_raw).collect();
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load payments");
                self.error = Some(err.to_string());
                self.payments.clear();
            }
        }
        self.loading = false;
    }

    /// Record a payment and prepend it to the history. The caller reloads
    /// the affected invoice afterwards; balance and status changes only ever
    /// come from the server.
    #[instrument(skip(self, request), fields(invoice_id = %request.invoice_id))]
    pub async fn record_payment(
        &mut self,
        request: &CreatePaymentRequest,
    ) -> Result<Payment, ApiError> {
        self.begin();
        let result = self.api.record_payment(request).await;
        self.loading = false;

        match result {
            Ok(raw) => {
                let payment = Payment::from_raw(raw);
                self.payments.insert(0, payment.clone());
                Ok(payment)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Pre-submission guard for the record-payment form.
    pub fn validate_payment_amount(&self, amount: f64, invoice_balance: f64) -> bool {
        models::validate_payment_amount(amount, invoice_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CreateCustomerRequest, CreateInvoiceRequest, LineItemInput, PaymentMethod,
    };
    use crate::services::{CustomerApi, InvoiceApi, MockApi};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    async fn sent_invoice(backend: &MockApi) -> Uuid {
        let customer = backend
            .create_customer(&CreateCustomerRequest {
                name: "Acme Corp".to_string(),
                email: "billing@acme.test".to_string(),
                phone: None,
                address: None,
            })
            .await
            .unwrap();

        let invoice = backend
            .create_invoice(&CreateInvoiceRequest {
                customer_id: customer.id,
                issue_date: date(2025, 1, 10),
                due_date: date(2025, 2, 9),
                line_items: vec![LineItemInput {
                    description: "Widget".to_string(),
                    quantity: 2.0,
                    unit_price: 10.0,
                }],
                tax: 5.0,
            })
            .await
            .unwrap();

        backend.mark_invoice_sent(invoice.id).await.unwrap();
        invoice.id
    }

    fn payment(invoice_id: Uuid, amount: f64) -> CreatePaymentRequest {
        CreatePaymentRequest {
            invoice_id,
            amount,
            payment_date: date(2025, 1, 20),
            payment_method: PaymentMethod::BankTransfer,
            reference_number: Some("TXN-100".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn recorded_payments_prepend_to_history() {
        let backend = Arc::new(MockApi::new());
        let invoice_id = sent_invoice(&backend).await;
        let mut vm = PaymentViewModel::new(backend.clone());

        vm.record_payment(&payment(invoice_id, 10.0)).await.unwrap();
        let second = vm.record_payment(&payment(invoice_id, 5.0)).await.unwrap();

        assert_eq!(vm.payments().len(), 2);
        assert_eq!(vm.payments()[0], second);
        assert_eq!(vm.payments()[0].payment_method, PaymentMethod::BankTransfer);
    }

    #[tokio::test]
    async fn rejected_payment_is_stored_and_reraised() {
        let backend = Arc::new(MockApi::new());
        let invoice_id = sent_invoice(&backend).await;
        let mut vm = PaymentViewModel::new(backend.clone());

        let err = vm.record_payment(&payment(invoice_id, 100.0)).await.unwrap_err();
        assert_eq!(err.to_string(), "Payment amount cannot exceed invoice balance");
        assert_eq!(vm.error(), Some("Payment amount cannot exceed invoice balance"));
        assert!(vm.payments().is_empty());
    }

    #[tokio::test]
    async fn load_returns_only_the_requested_invoices_payments() {
        let backend = Arc::new(MockApi::new());
        let first = sent_invoice(&backend).await;
        let second = sent_invoice(&backend).await;
        let mut vm = PaymentViewModel::new(backend.clone());

        vm.record_payment(&payment(first, 10.0)).await.unwrap();
        vm.record_payment(&payment(second, 5.0)).await.unwrap();

        vm.load_payments_for_invoice(first).await;
        assert_eq!(vm.payments().len(), 1);
        assert_eq!(vm.payments()[0].invoice_id, first);
        assert!(vm.error().is_none());
    }

    #[tokio::test]
    async fn amount_guard_delegates_to_model_rule() {
        let vm = PaymentViewModel::new(Arc::new(MockApi::new()));
        assert!(!vm.validate_payment_amount(0.0, 100.0));
        assert!(vm.validate_payment_amount(50.0, 100.0));
        assert!(!vm.validate_payment_amount(150.0, 100.0));
        assert!(vm.validate_payment_amount(100.0, 100.0));
    }
}
