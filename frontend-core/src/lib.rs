//! frontend-core: Shared infrastructure for the invoicing front-end crates.
pub mod config;
pub mod error;
pub mod http;
pub mod observability;

pub use reqwest;
pub use serde;
pub use serde_json;
pub use tracing;
