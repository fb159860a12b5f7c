//! Editable line item collection backing the invoice form.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::{money, LineItem, LineItemInput};

/// Edit applied to a single editor row.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemEdit {
    Description(String),
    Quantity(f64),
    UnitPrice(f64),
}

/// Field-level failures for one row; `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowErrors {
    pub description: Option<&'static str>,
    pub quantity: Option<&'static str>,
    pub unit_price: Option<&'static str>,
}

impl RowErrors {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.quantity.is_none() && self.unit_price.is_none()
    }
}

/// Why submission of the line item collection was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineItemErrors {
    #[error("At least one line item is required")]
    NoItems,
    #[error("{} line item(s) failed validation", .0.len())]
    Rows(BTreeMap<usize, RowErrors>),
}

/// Ordered, editable collection of line items for invoice create and edit.
///
/// Rows recompute their amount as quantity or unit price change. Validation
/// runs wholesale at submit time so half-typed rows do not flicker errors
/// while the user is still working.
#[derive(Debug, Clone)]
pub struct LineItemEditor {
    items: Vec<LineItem>,
}

impl LineItemEditor {
    /// Editor for the create form: starts with a single blank row.
    pub fn new() -> Self {
        Self {
            items: vec![LineItem::blank()],
        }
    }

    /// Editor seeded from an existing invoice's rows.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a blank row.
    pub fn add(&mut self) {
        self.items.push(LineItem::blank());
    }

    /// Remove the row at `index`. Out-of-range indexes are ignored. The last
    /// row may be removed; an empty editor only fails at submit time.
    pub fn remove(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// Apply an edit to the row at `index`. Quantity and unit price edits
    /// recompute the row's amount; description edits do not. Out-of-range
    /// indexes are ignored.
    pub fn update(&mut self, index: usize, edit: LineItemEdit) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };

        match edit {
            LineItemEdit::Description(description) => item.description = description,
            LineItemEdit::Quantity(quantity) => {
                item.quantity = quantity;
                item.amount = money::line_amount(item.quantity, item.unit_price);
            }
            LineItemEdit::UnitPrice(unit_price) => {
                item.unit_price = unit_price;
                item.amount = money::line_amount(item.quantity, item.unit_price);
            }
        }
    }

    /// Running subtotal across all rows.
    pub fn subtotal(&self) -> f64 {
        money::subtotal(&self.items)
    }

    /// Validate every row from scratch: description required after trimming,
    /// quantity strictly positive, unit price non-negative. Earlier results
    /// are never reused.
    pub fn validate_all(&self) -> Result<(), LineItemErrors> {
        if self.items.is_empty() {
            return Err(LineItemErrors::NoItems);
        }

        let mut rows = BTreeMap::new();
        for (index, item) in self.items.iter().enumerate() {
            let mut errors = RowErrors::default();
            if item.description.trim().is_empty() {
                errors.description = Some("Description is required");
            }
            if item.quantity.is_nan() || item.quantity <= 0.0 {
                errors.quantity = Some("Quantity must be greater than 0");
            }
            if item.unit_price.is_nan() || item.unit_price < 0.0 {
                errors.unit_price = Some("Unit price must be greater than or equal to 0");
            }
            if !errors.is_empty() {
                rows.insert(index, errors);
            }
        }

        if rows.is_empty() {
            Ok(())
        } else {
            Err(LineItemErrors::Rows(rows))
        }
    }

    /// Rows as request inputs, ids and amounts stripped; the backend assigns
    /// both itself.
    pub fn to_inputs(&self) -> Vec<LineItemInput> {
        self.items
            .iter()
            .map(|item| LineItemInput {
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect()
    }
}

impl Default for LineItemEditor {
    fn default() -> Self {
        Self::new()
    }
}
