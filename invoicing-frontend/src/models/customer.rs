use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A customer record.
///
/// `email` is optional because invoice payloads sometimes carry only a bare
/// `{id, name}` customer synthesized from `customerName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Customer {
    /// Bare customer built from an invoice's `customerName` when the full
    /// record was not embedded.
    pub fn minimal(id: Uuid, name: String) -> Self {
        Self {
            id,
            name,
            email: None,
            phone: None,
            address: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Best contact line for list views: email, else phone, else a stub.
    /// Empty strings count as absent.
    pub fn contact_info(&self) -> &str {
        if let Some(email) = self.email.as_deref().filter(|value| !value.is_empty()) {
            return email;
        }
        if let Some(phone) = self.phone.as_deref().filter(|value| !value.is_empty()) {
            return phone;
        }
        "No contact info"
    }
}

/// Payload for `POST /customers`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Payload for `PUT /customers/{id}`. Absent fields keep their server-side
/// values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
