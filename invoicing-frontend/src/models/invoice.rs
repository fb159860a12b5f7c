use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::money;
use crate::models::{Customer, LineItem, LineItemInput, RawLineItem};

/// Invoice lifecycle status. Transitions run one way, DRAFT to SENT to PAID,
/// and only ever on the server's say-so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Sent => "SENT",
            InvoiceStatus::Paid => "PAID",
        }
    }

    /// Lenient parse: anything unrecognized reads as `Draft` so a new
    /// backend status value degrades to the most restrictive UI state
    /// instead of failing the whole payload.
    pub fn from_string(s: &str) -> Self {
        match s {
            "SENT" => InvoiceStatus::Sent,
            "PAID" => InvoiceStatus::Paid,
            _ => InvoiceStatus::Draft,
        }
    }
}

/// Wire form of an invoice, exactly as the backend sends it. Every field the
/// backend may omit is optional here; [`Invoice::from_raw`] is the single
/// place that turns this into a value the UI can trust.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInvoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub customer_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub line_items: Vec<RawLineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// A normalized invoice. All financial fields are present and finite, line
/// item amounts are filled in and the status is typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub customer_id: Uuid,
    pub customer_name: Option<String>,
    pub customer: Option<Customer>,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub balance: f64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Invoice {
    /// Normalize a raw payload. Fallback rules, applied in order:
    ///
    /// - each line item's `amount` is back-filled from quantity times unit
    ///   price when missing or non-finite;
    /// - `subtotal` falls back to the sum of line amounts;
    /// - `tax` falls back to zero;
    /// - `total` falls back to `subtotal + tax`;
    /// - `balance` falls back to `total`, since an invoice with no recorded
    ///   payments owes everything.
    ///
    /// Finite-but-inconsistent numbers pass through untouched: the client
    /// repairs holes, it does not audit the backend. When the full customer
    /// record is absent but `customerName` is present, a bare customer is
    /// synthesized so detail views always have something to render.
    pub fn from_raw(raw: RawInvoice) -> Self {
        let line_items: Vec<LineItem> =
            raw.line_items.into_iter().map(LineItem::from_raw).collect();

        let subtotal = match raw.subtotal {
            Some(value) if value.is_finite() => value,
            _ => money::subtotal(&line_items),
        };
        let tax = match raw.tax {
            Some(value) if value.is_finite() => value,
            _ => 0.0,
        };
        let total = match raw.total {
            Some(value) if value.is_finite() => value,
            _ => money::total(subtotal, Some(tax)),
        };
        let balance = match raw.balance {
            Some(value) if value.is_finite() => value,
            _ => total,
        };

        let customer = raw.customer.or_else(|| {
            raw.customer_name
                .clone()
                .map(|name| Customer::minimal(raw.customer_id, name))
        });

        Self {
            id: raw.id,
            invoice_number: raw.invoice_number,
            customer_id: raw.customer_id,
            customer_name: raw.customer_name,
            customer,
            status: InvoiceStatus::from_string(raw.status.as_deref().unwrap_or("")),
            issue_date: raw.issue_date,
            due_date: raw.due_date,
            line_items,
            subtotal,
            tax,
            total,
            balance,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.status == InvoiceStatus::Draft
    }

    pub fn is_sent(&self) -> bool {
        self.status == InvoiceStatus::Sent
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Drafts are the only editable invoices.
    pub fn can_edit(&self) -> bool {
        self.is_draft()
    }

    pub fn can_mark_as_sent(&self) -> bool {
        self.is_draft()
    }

    /// Whether the invoice is overdue as of `today`. Not overdue on the due
    /// date itself, and never once paid.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        !self.is_paid() && self.due_date < today
    }

    /// Overdue check against the current UTC date.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Utc::now().date_naive())
    }

    /// Amount already received against this invoice.
    pub fn amount_paid(&self) -> f64 {
        self.total - self.balance
    }

    /// True once any payment has been recorded.
    pub fn has_payments(&self) -> bool {
        self.balance < self.total
    }
}

/// Payload for `POST /invoices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub customer_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub line_items: Vec<LineItemInput>,
    pub tax: f64,
}

/// Payload for `PUT /invoices/{id}`. Absent fields keep their server-side
/// values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItemInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
}
