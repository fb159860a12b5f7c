//! Core of the invoicing dashboard front-end.
//!
//! Holds everything below the rendering layer: normalized domain models,
//! invoice form and line item editing logic, typed REST clients for the
//! backend and the per-entity view-models that screens bind to. Routing,
//! markup and session storage belong to the embedding UI.
pub mod forms;
pub mod models;
pub mod services;
pub mod viewmodels;
