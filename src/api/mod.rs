//! HTTP API module for the CLT vs PJ Engine.
//!
//! This module provides the REST API endpoints for calculating CLT and PJ
//! take-home pay and comparing the two.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CltRequest, CompareRequest, MAX_AMOUNT, PjRequest};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
