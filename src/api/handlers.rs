//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::BatchSummary;
use crate::store::BatchQuery;

use super::request::GeneratePayrollRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payrolls", post(generate_handler).get(list_handler))
        .route("/payrolls/:id", get(batch_handler))
        .route("/payrolls/:id/approve", post(approve_handler))
        .route("/payrolls/:id/export", get(export_handler))
        .route("/payrolls/:id/items/:employee_id", get(breakdown_handler))
        .route("/employees/:employee_id/payslips", get(payslips_handler))
        .with_state(state)
}

/// Handler for POST /payrolls.
///
/// Generates a draft batch for every active employee and returns it with
/// its items.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll generation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let (period_start, period_end) = match request.bounds() {
        Ok(bounds) => bounds,
        Err(message) => {
            warn!(correlation_id = %correlation_id, error = %message, "Incomplete pay period");
            return ApiErrorResponse::bad_request(ApiError::validation_error(message))
                .into_response();
        }
    };

    let start_time = Instant::now();
    match state.engine().generate(period_start, period_end) {
        Ok(batch) => {
            info!(
                correlation_id = %correlation_id,
                batch_id = %batch.id(),
                items = batch.items().len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Payroll generation completed"
            );
            json_response(StatusCode::CREATED, &batch)
        }
        Err(err) => engine_error(correlation_id, err, "Payroll generation failed"),
    }
}

/// Handler for GET /payrolls.
///
/// Lists batch summaries, newest first, filtered by `status`,
/// `employee_id` and `date` query parameters.
async fn list_handler(
    State(state): State<AppState>,
    query: Result<Query<BatchQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    match state.engine().list_batches(&query) {
        Ok(batches) => {
            let summaries: Vec<BatchSummary> = batches.iter().map(|b| b.summary()).collect();
            json_response(StatusCode::OK, &summaries)
        }
        Err(err) => engine_error(correlation_id, err, "Payroll listing failed"),
    }
}

/// Handler for GET /payrolls/:id.
async fn batch_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let batch_id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };

    match state.engine().batch(batch_id) {
        Ok(batch) => json_response(StatusCode::OK, &batch),
        Err(err) => engine_error(correlation_id, err, "Payroll lookup failed"),
    }
}

/// Handler for POST /payrolls/:id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let batch_id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, batch_id = %batch_id, "Processing approval request");

    match state.engine().approve(batch_id) {
        Ok(batch) => json_response(StatusCode::OK, &batch),
        Err(err) => engine_error(correlation_id, err, "Payroll approval failed"),
    }
}

/// Handler for GET /payrolls/:id/export.
///
/// Returns the batch as a CSV attachment, whatever its status.
async fn export_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let batch_id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };

    match state.engine().export(batch_id) {
        Ok(export) => {
            info!(
                correlation_id = %correlation_id,
                batch_id = %batch_id,
                rows = export.rows.len(),
                "Payroll exported"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", export.file_name()),
                    ),
                ],
                export.to_csv(),
            )
                .into_response()
        }
        Err(err) => engine_error(correlation_id, err, "Payroll export failed"),
    }
}

/// Handler for GET /payrolls/:id/items/:employee_id.
async fn breakdown_handler(
    State(state): State<AppState>,
    params: Result<Path<(Uuid, String)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let (batch_id, employee_id) = match params {
        Ok(Path(params)) => params,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };

    match state.engine().breakdown(batch_id, &employee_id) {
        Ok(breakdown) => json_response(StatusCode::OK, &breakdown),
        Err(err) => engine_error(correlation_id, err, "Pay breakdown failed"),
    }
}

/// Handler for GET /employees/:employee_id/payslips.
async fn payslips_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.engine().payslips(&employee_id) {
        Ok(payslips) => json_response(StatusCode::OK, &payslips),
        Err(err) => engine_error(correlation_id, err, "Payslip listing failed"),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error(correlation_id: Uuid, err: EngineError, context: &'static str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "{}", context
    );
    ApiErrorResponse::from(err).into_response()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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
    ApiErrorResponse::bad_request(error).into_response()
}

fn path_rejection(correlation_id: Uuid, rejection: PathRejection) -> Response {
    warn!(correlation_id = %correlation_id, error = %rejection, "Invalid path parameter");
    ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
        .into_response()
}
