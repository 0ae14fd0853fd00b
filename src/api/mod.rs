//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `GET /contains/:key` - Check for a live key
//! - `GET /keys` - List keys oldest to newest
//! - `GET /info` - Entry count and cache settings
//! - `GET /health` - Health check endpoint

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use handlers::*;
pub use routes::create_router;
