//! HTTP request handlers for the net pay API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_with_schedule;
use crate::error::{EngineError, EngineResult};
use crate::export::render_entry;
use crate::models::CalculationInput;

use super::request::{CalculationFormRequest, CalculationRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/form", post(calculate_form_handler))
        .route("/history", get(history_handler))
        .route("/history/:id/summary", get(summary_handler))
        .with_state(state)
}

fn error_response(status: StatusCode, error: ApiError) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Maps a JSON extraction failure to an API error body.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
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

/// Computes a checked input and, when `save` is set, records the result.
fn calculate_checked(
    state: &AppState,
    input: EngineResult<CalculationInput>,
    save: bool,
    correlation_id: Uuid,
) -> Response {
    let input = match input {
        Ok(input) => input,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation input rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            return error_response(api_error.status, api_error.error);
        }
    };

    let start_time = Instant::now();
    let result = compute_with_schedule(&input, state.schedule());
    let duration = start_time.elapsed();

    let entry = save.then(|| state.ledger().append(result.clone()));

    info!(
        correlation_id = %correlation_id,
        gross_pay = %result.gross_pay,
        net_pay = %result.net_pay,
        saved = entry.is_some(),
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(CalculationResponse { result, entry }),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Validates the typed input, computes the result and, when `save` is set,
/// records it in the history ledger.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    let save = request.save;
    let input: CalculationInput = request.into();
    let checked = input.validate().map(|()| input);
    calculate_checked(&state, checked, save, correlation_id)
}

/// Handler for POST /calculate/form endpoint.
///
/// Accepts amounts as entered text, parses them through
/// [`CalculationForm`](crate::validation::CalculationForm), then behaves like
/// `/calculate`.
async fn calculate_form_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationFormRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing form calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    let checked = CalculationInput::try_from(request.form);
    calculate_checked(&state, checked, request.save, correlation_id)
}

/// Handler for GET /history endpoint.
///
/// Returns saved entries, most recent first.
async fn history_handler(State(state): State<AppState>) -> Response {
    let entries = state.ledger().list();
    info!(entries = entries.len(), "Listing calculation history");
    (StatusCode::OK, Json(entries)).into_response()
}

/// Handler for GET /history/:id/summary endpoint.
///
/// Returns the entry rendered as plain text.
async fn summary_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiErrorResponse> {
    let entry = state.ledger().get(id).ok_or_else(|| {
        warn!(entry_id = %id, "History entry not found");
        EngineError::EntryNotFound { id }
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_entry(&entry),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{CalculationResult, HistoryEntry};
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::builtin())
    }

    fn post_calculate(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/calculate")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    const REFERENCE_BODY: &str = r#"{
        "gross_pay": "50000",
        "ignore_benefits_under_threshold": true,
        "use_tiered_contribution_schedule": true,
        "include_second_contribution_tier": true,
        "apply_housing_levy": true
    }"#;

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());

        let response = router.oneshot(post_calculate(REFERENCE_BODY)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = body_bytes(response).await;
        let response: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(response.result.income_tax_amount, dec("6474.35"));
        assert_eq!(response.result.net_pay, dec("40495.65"));
        assert_eq!(response.result.audit_trace.steps.len(), 8);
        assert!(response.entry.is_none());
    }

    #[tokio::test]
    async fn test_unsaved_calculation_leaves_ledger_empty() {
        let state = create_test_state();
        let router = create_router(state.clone());

        router.oneshot(post_calculate(REFERENCE_BODY)).await.unwrap();

        assert!(state.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_save_appends_to_ledger() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let response = router
            .oneshot(post_calculate(r#"{ "gross_pay": "30000", "save": true }"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_bytes(response).await;
        let response: CalculationResponse = serde_json::from_slice(&body).unwrap();

        let entry = response.entry.expect("saved entry in response");
        assert_eq!(entry.result, response.result);
        assert_eq!(state.ledger().get(entry.entry_id), Some(entry));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router.oneshot(post_calculate("{invalid json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_gross_pay_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_calculate(r#"{ "apply_housing_levy": true }"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(
            error.message.contains("gross_pay"),
            "Expected error message to mention gross_pay, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_oversized_amount_returns_400() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let response = router
            .oneshot(post_calculate(
                r#"{ "gross_pay": "50000", "pension_contribution": "79228162514264337593543950335", "save": true }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("too large"));
        assert!(state.ledger().is_empty());
    }

    fn post_form(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/calculate/form")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_with_separators_computes_and_saves() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let response = router
            .oneshot(post_form(
                r#"{
                    "gross_pay": " 50,000 ",
                    "non_cash_benefits": "",
                    "ignore_benefits_under_threshold": true,
                    "use_tiered_contribution_schedule": true,
                    "include_second_contribution_tier": true,
                    "apply_housing_levy": true,
                    "save": true
                }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_bytes(response).await;
        let response: CalculationResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.result.net_pay, dec("40495.65"));
        assert!(response.entry.is_some());
        assert_eq!(state.ledger().len(), 1);
    }

    #[tokio::test]
    async fn test_form_with_non_numeric_field_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_form(r#"{ "gross_pay": "50000", "pension_contribution": "abc" }"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("pension_contribution"));
    }

    #[tokio::test]
    async fn test_negative_amount_returns_400() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let response = router
            .oneshot(post_calculate(
                r#"{ "gross_pay": "50000", "pension_contribution": "-1", "save": true }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("pension_contribution"));
        assert!(state.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_history_lists_most_recent_first() {
        let state = create_test_state();
        let first = state
            .ledger()
            .append(crate::calculation::compute(&CalculationInput::new(dec("10000"))));
        let second = state
            .ledger()
            .append(crate::calculation::compute(&CalculationInput::new(dec("20000"))));

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_bytes(response).await;
        let entries: Vec<HistoryEntry> = serde_json::from_slice(&body).unwrap();
        assert_eq!(entries, vec![second, first]);
    }

    #[tokio::test]
    async fn test_summary_returns_plain_text() {
        let state = create_test_state();
        let result: CalculationResult =
            crate::calculation::compute(&CalculationInput::new(dec("50000")));
        let entry = state.ledger().append(result);

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri(format!("/history/{}/summary", entry.entry_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "text/plain; charset=utf-8");

        let body = body_bytes(response).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("Calculated:"));
        assert!(text.contains("Net Pay Summary"));
        assert!(text.contains("Gross pay:              KES 50,000.00\n"));
    }

    #[tokio::test]
    async fn test_summary_for_unknown_entry_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri(format!("/history/{}/summary", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "ENTRY_NOT_FOUND");
    }
}
