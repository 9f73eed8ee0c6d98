//! API layer - HTTP handlers and routes
//!
//! Thin translation between HTTP and the storage facade: decode and validate
//! input, call one repository operation under a deadline, encode the result.

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
