//! HTTP API module for the net pay engine.
//!
//! This module provides the REST API endpoints for computing net pay and
//! browsing the session's calculation history.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse};
pub use state::AppState;
