//! Customer flow tests against the HTTP stub backend.

mod common;

use common::TestApp;
use invoicing_frontend::models::{CreateCustomerRequest, UpdateCustomerRequest};
use invoicing_frontend::services::CustomerApi;
use invoicing_frontend::viewmodels::CustomerViewModel;

fn acme() -> CreateCustomerRequest {
    CreateCustomerRequest {
        name: "Acme Corp".to_string(),
        email: "billing@acme.test".to_string(),
        phone: Some("+1-555-0100".to_string()),
        address: None,
    }
}

fn customer(name: &str, email: &str) -> CreateCustomerRequest {
    CreateCustomerRequest {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        address: None,
    }
}

#[tokio::test]
async fn create_customer_returns_persisted_record() {
    let app = TestApp::spawn().await;
    let api = app.customer_api();

    let created = api
        .create_customer(&acme())
        .await
        .expect("Failed to create customer");

    assert_eq!(created.name, "Acme Corp");
    assert_eq!(created.email.as_deref(), Some("billing@acme.test"));
    assert_eq!(created.contact_info(), "billing@acme.test");
    assert!(created.created_at.is_some());

    let fetched = api
        .get_customer(created.id)
        .await
        .expect("Failed to fetch customer");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn customer_list_pages_newest_first() {
    let app = TestApp::spawn().await;
    let api = app.customer_api();

    api.create_customer(&customer("Acme Corp", "a@acme.test"))
        .await
        .expect("Failed to create customer");
    api.create_customer(&customer("Globex", "b@globex.test"))
        .await
        .expect("Failed to create customer");
    let newest = api
        .create_customer(&customer("Initech", "c@initech.test"))
        .await
        .expect("Failed to create customer");

    let page = api
        .list_customers(0, 2)
        .await
        .expect("Failed to list customers");

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].id, newest.id);
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.number, 0);
}

#[tokio::test]
async fn update_customer_changes_only_provided_fields() {
    let app = TestApp::spawn().await;
    let api = app.customer_api();
    let created = api
        .create_customer(&acme())
        .await
        .expect("Failed to create customer");

    let updated = api
        .update_customer(
            created.id,
            &UpdateCustomerRequest {
                name: Some("Acme Corporation".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update customer");

    assert_eq!(updated.name, "Acme Corporation");
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.phone, created.phone);
}

#[tokio::test]
async fn deleted_customer_is_gone() {
    let app = TestApp::spawn().await;
    let api = app.customer_api();
    let created = api
        .create_customer(&acme())
        .await
        .expect("Failed to create customer");

    api.delete_customer(created.id)
        .await
        .expect("Failed to delete customer");

    let err = api.get_customer(created.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        format!("Customer not found with id: {}", created.id)
    );
}

#[tokio::test]
async fn invalid_customer_payload_is_rejected() {
    let app = TestApp::spawn().await;
    let api = app.customer_api();

    let err = api
        .create_customer(&customer("A", "not-an-email"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Request validation failed");
}

#[tokio::test]
async fn error_envelope_carries_message_field() {
    let app = TestApp::spawn().await;
    let url = format!(
        "{}/customers/{}",
        app.address,
        uuid::Uuid::new_v4()
    );

    let response = frontend_core::reqwest::get(&url)
        .await
        .expect("Failed to reach stub backend");
    assert_eq!(response.status().as_u16(), 404);

    let body: serde_json::Value = response.json().await.expect("Failed to decode envelope");
    let message = body["message"].as_str().expect("Missing message field");
    assert!(message.starts_with("Customer not found with id: "));
}

#[tokio::test]
async fn view_model_flow_create_select_delete() {
    let app = TestApp::spawn().await;
    let mut vm = CustomerViewModel::new(app.customer_api());

    let created = vm
        .create_customer(&acme())
        .await
        .expect("Failed to create customer");
    assert_eq!(vm.customers().len(), 1);

    vm.select_customer(created.id)
        .await
        .expect("Failed to select customer");
    assert_eq!(vm.selected().map(|c| c.id), Some(created.id));

    vm.delete_customer(created.id)
        .await
        .expect("Failed to delete customer");
    assert!(vm.customers().is_empty());
    assert!(vm.selected().is_none());
    assert!(!vm.loading());
    assert!(vm.error().is_none());
}
