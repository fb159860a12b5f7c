use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Invoice, RawInvoice};

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Check,
    CreditCard,
    BankTransfer,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Check => "CHECK",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Other => "OTHER",
        }
    }

    /// Lenient parse; unknown methods read as `Other`.
    pub fn from_string(s: &str) -> Self {
        match s {
            "CASH" => PaymentMethod::Cash,
            "CHECK" => PaymentMethod::Check,
            "CREDIT_CARD" => PaymentMethod::CreditCard,
            "BANK_TRANSFER" => PaymentMethod::BankTransfer,
            _ => PaymentMethod::Other,
        }
    }

    /// Human label for tables and form selects.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Check => "Check",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Other => "Other",
        }
    }
}

/// Wire form of a payment. The embedded invoice, when the backend expands
/// it, is raw and still needs normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPayment {
    pub id: Uuid,
    pub invoice_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<RawInvoice>,
    pub amount: f64,
    pub payment_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

/// A recorded payment. Append-only: there is no update or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub invoice: Option<Invoice>,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl Payment {
    /// Map a wire payment. The amount is server-trusted as sent; only the
    /// embedded invoice goes through normalization.
    pub fn from_raw(raw: RawPayment) -> Self {
        Self {
            id: raw.id,
            invoice_id: raw.invoice_id,
            invoice: raw.invoice.map(Invoice::from_raw),
            amount: raw.amount,
            payment_date: raw.payment_date,
            payment_method: PaymentMethod::from_string(raw.payment_method.as_deref().unwrap_or("")),
            reference_number: raw.reference_number,
            notes: raw.notes,
            created_at: raw.created_at,
        }
    }
}

/// Payload for `POST /payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub invoice_id: Uuid,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Pre-submission guard for the record-payment form: positive and within
/// the invoice's open balance. The server re-checks; its rejection wins
/// whenever a stale balance slips through.
pub fn validate_payment_amount(amount: f64, invoice_balance: f64) -> bool {
    amount > 0.0 && amount <= invoice_balance
}
