//! HTTP request handlers for the CLT vs PJ Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_clt_with, calculate_pj_with, compare, explain_clt, explain_comparison, explain_pj,
};
use crate::error::EngineError;

use super::request::{CltRequest, CompareRequest, PjRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate/clt", post(calculate_clt_handler))
        .route("/calculate/pj", post(calculate_pj_handler))
        .route("/compare", post(compare_handler))
        .with_state(state)
}

/// Maps a body extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn success_response<T: Serialize>(body: CalculationResponse<T>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /calculate/clt endpoint.
///
/// Returns the CLT monthly and annual breakdown for a salary.
async fn calculate_clt_handler(
    State(state): State<AppState>,
    payload: Result<Json<CltRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing CLT calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    if let Err(err) = request.validate() {
        return error_response(correlation_id, err);
    }

    let tables = state.tables();
    let start_time = Instant::now();
    let result = calculate_clt_with(tables, request.gross_salary, request.benefits);
    let explanation = explain_clt(tables, &result);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        gross_salary = %result.gross_salary,
        net_salary = %result.net_salary,
        duration_us,
        "CLT calculation completed successfully"
    );

    success_response(CalculationResponse::new(
        correlation_id,
        tables.metadata().fiscal_year,
        result,
        explanation.into_trace(duration_us),
    ))
}

/// Handler for POST /calculate/pj endpoint.
///
/// Returns the PJ monthly and annual breakdown for an invoice.
async fn calculate_pj_handler(
    State(state): State<AppState>,
    payload: Result<Json<PjRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing PJ calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    if let Err(err) = request.validate() {
        return error_response(correlation_id, err);
    }

    let tables = state.tables();
    let accountant_cost = request
        .accountant_cost
        .unwrap_or(tables.simples().default_accountant_cost);

    let start_time = Instant::now();
    let result = calculate_pj_with(tables, request.gross_invoice, accountant_cost);
    let explanation = explain_pj(tables, &result);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        gross_invoice = %result.gross_invoice,
        net_income = %result.net_income,
        warnings = explanation.warnings.len(),
        duration_us,
        "PJ calculation completed successfully"
    );

    success_response(CalculationResponse::new(
        correlation_id,
        tables.metadata().fiscal_year,
        result,
        explanation.into_trace(duration_us),
    ))
}

/// Handler for POST /compare endpoint.
///
/// Compares a CLT offer with a PJ offer and reports the break-even invoice.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing comparison request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    if let Err(err) = request.validate() {
        return error_response(correlation_id, err);
    }

    let tables = state.tables();
    let input = request.into_input(tables.simples().default_accountant_cost);

    let start_time = Instant::now();
    let comparison = compare(tables, &input);
    let explanation = explain_comparison(tables, &comparison);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        advantage = ?comparison.advantage,
        difference = %comparison.difference,
        break_even = %comparison.break_even.monthly_invoice,
        duration_us,
        "Comparison completed successfully"
    );

    success_response(CalculationResponse::new(
        correlation_id,
        tables.metadata().fiscal_year,
        comparison,
        explanation.into_trace(duration_us),
    ))
}
