//! Invoice create and edit form state.

use std::fmt;

use chrono::{Days, NaiveDate};
use uuid::Uuid;

use super::{LineItemEditor, LineItemErrors};
use crate::models::{CreateInvoiceRequest, Invoice, UpdateInvoiceRequest};

/// Header-level failures plus whatever the line item editor reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceFormErrors {
    pub customer: Option<&'static str>,
    pub due_date: Option<&'static str>,
    pub tax: Option<&'static str>,
    pub line_items: Option<LineItemErrors>,
}

impl InvoiceFormErrors {
    pub fn is_empty(&self) -> bool {
        self.customer.is_none()
            && self.due_date.is_none()
            && self.tax.is_none()
            && self.line_items.is_none()
    }

    fn missing_customer() -> Self {
        Self {
            customer: Some("Customer is required"),
            ..Default::default()
        }
    }
}

impl fmt::Display for InvoiceFormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut messages: Vec<String> = Vec::new();
        if let Some(message) = self.customer {
            messages.push(message.to_string());
        }
        if let Some(message) = self.due_date {
            messages.push(message.to_string());
        }
        if let Some(message) = self.tax {
            messages.push(message.to_string());
        }
        if let Some(errors) = &self.line_items {
            messages.push(errors.to_string());
        }
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for InvoiceFormErrors {}

/// Create and edit invoice form. Dates and tax live here; rows live in the
/// embedded [`LineItemEditor`].
#[derive(Debug, Clone)]
pub struct InvoiceForm {
    pub customer_id: Option<Uuid>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub tax: f64,
    pub line_items: LineItemEditor,
}

impl InvoiceForm {
    /// Blank create form: issued today, due in 30 days, no tax, one empty
    /// row.
    pub fn draft(today: NaiveDate) -> Self {
        Self {
            customer_id: None,
            issue_date: today,
            due_date: today + Days::new(30),
            tax: 0.0,
            line_items: LineItemEditor::new(),
        }
    }

    /// Edit form seeded from an existing invoice.
    pub fn for_invoice(invoice: &Invoice) -> Self {
        Self {
            customer_id: Some(invoice.customer_id),
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            tax: invoice.tax,
            line_items: LineItemEditor::from_items(invoice.line_items.clone()),
        }
    }

    /// Validate the header fields and every line item row.
    pub fn validate(&self) -> Result<(), InvoiceFormErrors> {
        let mut errors = InvoiceFormErrors::default();

        if self.customer_id.is_none() {
            errors.customer = Some("Customer is required");
        }
        if self.due_date < self.issue_date {
            errors.due_date = Some("Due date cannot be before issue date");
        }
        if self.tax.is_nan() || self.tax < 0.0 {
            errors.tax = Some("Tax must be greater than or equal to 0");
        }
        if let Err(line_errors) = self.line_items.validate_all() {
            errors.line_items = Some(line_errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Assemble the create payload once validation passes.
    pub fn to_create_request(&self) -> Result<CreateInvoiceRequest, InvoiceFormErrors> {
        self.validate()?;
        let customer_id = self
            .customer_id
            .ok_or_else(InvoiceFormErrors::missing_customer)?;

        Ok(CreateInvoiceRequest {
            customer_id,
            issue_date: self.issue_date,
            due_date: self.due_date,
            line_items: self.line_items.to_inputs(),
            tax: self.tax,
        })
    }

    /// Assemble the full update payload once validation passes.
    pub fn to_update_request(&self) -> Result<UpdateInvoiceRequest, InvoiceFormErrors> {
        self.validate()?;
        let customer_id = self
            .customer_id
            .ok_or_else(InvoiceFormErrors::missing_customer)?;

        Ok(UpdateInvoiceRequest {
            customer_id: Some(customer_id),
            issue_date: Some(self.issue_date),
            due_date: Some(self.due_date),
            line_items: Some(self.line_items.to_inputs()),
            tax: Some(self.tax),
        })
    }
}
