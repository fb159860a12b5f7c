use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::money;

/// One billable row on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub amount: f64,
}

/// Wire form of a line item. `amount` may be absent on partial payloads;
/// [`LineItem::from_raw`] back-fills it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Outbound line item for create and update requests. The backend assigns
/// ids and recomputes amounts itself, so neither is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    /// Normalize a wire line item, back-filling `amount` from quantity times
    /// unit price when it is missing or non-finite. Finite values pass
    /// through untouched, zero included.
    pub fn from_raw(raw: RawLineItem) -> Self {
        let amount = match raw.amount {
            Some(value) if value.is_finite() => value,
            _ => money::line_amount(raw.quantity, raw.unit_price),
        };

        Self {
            id: raw.id,
            description: raw.description,
            quantity: raw.quantity,
            unit_price: raw.unit_price,
            amount,
        }
    }

    /// Fresh editor row with the create-form defaults.
    pub fn blank() -> Self {
        Self {
            id: None,
            description: String::new(),
            quantity: 1.0,
            unit_price: 0.0,
            amount: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(amount: Option<f64>) -> RawLineItem {
        RawLineItem {
            id: None,
            description: "Consulting".to_string(),
            quantity: 3.0,
            unit_price: 50.0,
            amount,
        }
    }

    #[test]
    fn missing_amount_is_backfilled_from_quantity_and_unit_price() {
        let item = LineItem::from_raw(raw(None));
        assert_eq!(item.amount, 150.0);
    }

    #[test]
    fn non_finite_amount_is_backfilled() {
        assert_eq!(LineItem::from_raw(raw(Some(f64::NAN))).amount, 150.0);
        assert_eq!(LineItem::from_raw(raw(Some(f64::INFINITY))).amount, 150.0);
    }

    #[test]
    fn finite_amount_passes_through_even_when_inconsistent() {
        assert_eq!(LineItem::from_raw(raw(Some(999.0))).amount, 999.0);
        assert_eq!(LineItem::from_raw(raw(Some(0.0))).amount, 0.0);
    }

    #[test]
    fn blank_row_matches_form_defaults() {
        let item = LineItem::blank();
        assert_eq!(item.description, "");
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.unit_price, 0.0);
        assert_eq!(item.amount, 0.0);
        assert!(item.id.is_none());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = r#"{"id":null,"description":"Hosting","quantity":1,"unitPrice":25.0}"#;
        let item = LineItem::from_raw(serde_json::from_str(json).unwrap());
        assert_eq!(item.unit_price, 25.0);
        assert_eq!(item.amount, 25.0);
    }
}
