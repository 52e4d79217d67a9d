//! HTTP request handlers for the worksheet engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_case;
use crate::models::CaseInputs;

use super::request::CaseRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, ScheduleSummary};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/schedule", get(schedule_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
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
    }
}

/// Handler for POST /calculate endpoint.
///
/// Validates the case, runs it through the worksheet router, and wraps the
/// outputs in a [`CalculationResponse`].
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CaseRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(rejection, correlation_id);
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let inputs = match CaseInputs::try_from(request) {
        Ok(inputs) => inputs,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Case failed validation");
            return error_response(err.into());
        }
    };

    let table = state.table();
    if !table.supports_children(inputs.children) {
        warn!(
            correlation_id = %correlation_id,
            children = inputs.children,
            "Unsupported child count"
        );
        let error = ApiError::unsupported_child_count(inputs.children, &table.child_counts());
        return json_response(StatusCode::BAD_REQUEST, error);
    }

    let start_time = Instant::now();
    match calculate_case(&inputs, table) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                custody_type = %inputs.custody_type,
                children = inputs.children,
                recommended_order = %result.recommended_order,
                advisory = ?result.advisory,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            let response = CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                schedule: state.metadata().name.clone(),
                result,
            };
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /schedule endpoint.
async fn schedule_handler(State(state): State<AppState>) -> Response {
    let metadata = state.metadata();
    let table = state.table();
    json_response(
        StatusCode::OK,
        ScheduleSummary {
            name: metadata.name.clone(),
            effective_date: metadata.effective_date,
            source_url: metadata.source_url.clone(),
            rows: table.incomes.len(),
            child_counts: table.child_counts(),
        },
    )
}
