//! HTTP request handlers for the leave ledger API.
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
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{adjust_paid_days, compute_year};
use crate::config::LeaveSettings;
use crate::error::EngineError;
use crate::models::{AuditTrace, LedgerCalculationResult};

use super::request::{LedgerRequest, SplitRequest, SplitResponse};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ledger", post(ledger_handler))
        .route("/split", post(split_handler))
        .with_state(state)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
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
    ApiErrorResponse::bad_request(error)
}

/// Handler for POST /ledger.
///
/// Computes the twelve monthly entries for the requested employee and year
/// under the process-wide settings.
async fn ledger_handler(
    State(state): State<AppState>,
    payload: Result<Json<LedgerRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing ledger request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection).into_response(),
    };

    match perform_calculation(&request, state.settings()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                applicant_id = %result.applicant_id,
                year = result.year,
                applications_count = request.applications.len(),
                closing_balance = result.totals.closing_balance,
                warnings = result.audit_trace.warnings.len(),
                duration_us = result.audit_trace.duration_us,
                "Ledger calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Ledger calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /split.
///
/// Previews the paid/LOP split for an approval. Out-of-range proposals are
/// clamped, so this endpoint only fails on an unreadable body.
async fn split_handler(payload: Result<Json<SplitRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection).into_response(),
    };

    let response = SplitResponse::from(adjust_paid_days(
        request.total_days,
        request.proposed_paid_days,
    ));
    info!(
        correlation_id = %correlation_id,
        total_days = response.total_days,
        proposed_paid_days = request.proposed_paid_days,
        paid_days = response.paid_days,
        lop_days = response.lop_days,
        "Split computed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Validates the request and computes the ledger envelope.
fn perform_calculation(
    request: &LedgerRequest,
    settings: &LeaveSettings,
) -> Result<LedgerCalculationResult, EngineError> {
    let start_time = Instant::now();

    let applications = request.validated_applications()?;
    let overrides = request.monthly_overrides(settings.override_detection)?;

    let ledger = compute_year(
        &request.applicant_id,
        request.year,
        &applications,
        &overrides,
        settings,
    );
    let totals = ledger.totals();

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(LedgerCalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        applicant_id: ledger.applicant_id,
        year: ledger.year,
        settings: *settings,
        entries: ledger.entries,
        totals,
        audit_trace: AuditTrace {
            steps: ledger.audit_steps,
            warnings: ledger.warnings,
            duration_us,
        },
    })
}
