//! Shared test harness: an in-process HTTP stub of the invoicing backend.
//!
//! The stub is a thin axum layer over [`MockApi`], so one implementation of
//! the backend's business rules serves both the trait-level unit tests and
//! these wire-level tests. Failure responses use the backend's error
//! envelope; the `message` field is what production clients surface.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Once;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use frontend_core::config::ApiSettings;
use frontend_core::error::ApiError;
use frontend_core::http::ApiTransport;
use invoicing_frontend::models::{
    CreateCustomerRequest, CreateInvoiceRequest, CreatePaymentRequest, Customer, InvoiceStatus,
    Page, RawInvoice, RawPayment, UpdateCustomerRequest, UpdateInvoiceRequest,
};
use invoicing_frontend::services::{
    CustomerApi, InvoiceApi, MockApi, PaymentApi, RestCustomerApi, RestInvoiceApi, RestPaymentApi,
};

static TRACING: Once = Once::new();

pub struct TestApp {
    pub address: String,
    pub backend: Arc<MockApi>,
    pub transport: Arc<ApiTransport>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        TRACING.call_once(|| {
            if std::env::var("TEST_LOG").is_ok() {
                frontend_core::observability::init_tracing("invoicing-frontend-tests", "debug");
            }
        });

        let backend = Arc::new(MockApi::new());
        let router = stub_router(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let address = format!(
            "http://{}/api",
            listener.local_addr().expect("Failed to read stub address")
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        let settings = ApiSettings {
            base_url: address.clone(),
            ..Default::default()
        };
        let transport =
            Arc::new(ApiTransport::new(&settings).expect("Failed to build test transport"));

        TestApp {
            address,
            backend,
            transport,
        }
    }

    pub fn customer_api(&self) -> Arc<RestCustomerApi> {
        Arc::new(RestCustomerApi::new(self.transport.clone()))
    }

    pub fn invoice_api(&self) -> Arc<RestInvoiceApi> {
        Arc::new(RestInvoiceApi::new(self.transport.clone()))
    }

    pub fn payment_api(&self) -> Arc<RestPaymentApi> {
        Arc::new(RestPaymentApi::new(self.transport.clone()))
    }
}

/// Error responder mirroring the backend's failure envelope.
struct StubError(ApiError);

impl From<ApiError> for StubError {
    fn from(err: ApiError) -> Self {
        StubError(err)
    }
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            ApiError::Api { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message,
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_size")]
    size: u32,
    status: Option<String>,
}

fn default_size() -> u32 {
    10
}

fn stub_router(backend: Arc<MockApi>) -> Router {
    Router::new()
        .route("/api/customers", get(list_customers).post(create_customer))
        .route(
            "/api/customers/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/api/invoices", get(list_invoices).post(create_invoice))
        .route("/api/invoices/:id", get(get_invoice).put(update_invoice))
        .route("/api/invoices/:id/mark-sent", patch(mark_invoice_sent))
        .route("/api/invoices/:id/payments", get(list_invoice_payments))
        .route("/api/invoices/customers/:id", get(list_customer_invoices))
        .route("/api/payments", post(record_payment))
        .route("/api/payments/:id", get(get_payment))
        .with_state(backend)
}

async fn list_customers(
    State(backend): State<Arc<MockApi>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Customer>>, StubError> {
    Ok(Json(backend.list_customers(query.page, query.size).await?))
}

async fn get_customer(
    State(backend): State<Arc<MockApi>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, StubError> {
    Ok(Json(backend.get_customer(id).await?))
}

async fn create_customer(
    State(backend): State<Arc<MockApi>>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), StubError> {
    let customer = backend.create_customer(&request).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn update_customer(
    State(backend): State<Arc<MockApi>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<Customer>, StubError> {
    Ok(Json(backend.update_customer(id, &request).await?))
}

async fn delete_customer(
    State(backend): State<Arc<MockApi>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StubError> {
    backend.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_invoices(
    State(backend): State<Arc<MockApi>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<RawInvoice>>, StubError> {
    let status = query.status.as_deref().map(InvoiceStatus::from_string);
    Ok(Json(
        backend.list_invoices(status, query.page, query.size).await?,
    ))
}

async fn list_customer_invoices(
    State(backend): State<Arc<MockApi>>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<RawInvoice>>, StubError> {
    Ok(Json(
        backend
            .list_invoices_by_customer(id, query.page, query.size)
            .await?,
    ))
}

async fn get_invoice(
    State(backend): State<Arc<MockApi>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RawInvoice>, StubError> {
    Ok(Json(backend.get_invoice(id).await?))
}

async fn create_invoice(
    State(backend): State<Arc<MockApi>>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<RawInvoice>), StubError> {
    let invoice = backend.create_invoice(&request).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

async fn update_invoice(
    State(backend): State<Arc<MockApi>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> Result<Json<RawInvoice>, StubError> {
    Ok(Json(backend.update_invoice(id, &request).await?))
}

async fn mark_invoice_sent(
    State(backend): State<Arc<MockApi>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RawInvoice>, StubError> {
    Ok(Json(backend.mark_invoice_sent(id).await?))
}

async fn list_invoice_payments(
    State(backend): State<Arc<MockApi>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RawPayment>>, StubError> {
    Ok(Json(backend.list_payments_for_invoice(id).await?))
}

async fn record_payment(
    State(backend): State<Arc<MockApi>>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<RawPayment>), StubError> {
    let payment = backend.record_payment(&request).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn get_payment(
    State(backend): State<Arc<MockApi>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RawPayment>, StubError> {
    Ok(Json(backend.get_payment(id).await?))
}
