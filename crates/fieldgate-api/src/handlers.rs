//! API Handlers
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use fieldgate_core::{Response, WorkflowError, FIELDGATE_VERSION};

use crate::service::{ReviewDecision, ReviewOutcome, SubmitOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub responses: Vec<Response>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub decision: ReviewDecision,
    pub reviewer_notes: Option<String>,
    pub escalation_reason: Option<String>,
}

/// Map a workflow error to its HTTP status and wire body.
fn error_response(err: WorkflowError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        WorkflowError::Validation(_) => StatusCode::BAD_REQUEST,
        WorkflowError::Authorization(_) => StatusCode::FORBIDDEN,
        WorkflowError::NotFound(_) => StatusCode::NOT_FOUND,
        WorkflowError::Conflict(_) => StatusCode::CONFLICT,
        WorkflowError::EscalationCreation(_) | WorkflowError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() })))
}

/// Caller identity from the `x-actor-id` header.
fn actor_id(headers: &HeaderMap) -> Result<String, (StatusCode, Json<Value>)> {
    headers
        .get("x-actor-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "VALIDATION/missing x-actor-id header" })),
            )
        })
}

pub async fn get_inspection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    match state.service.inspection(&id).await {
        Ok(inspection) => (StatusCode::OK, Json(json!(inspection))),
        Err(err) => error_response(err),
    }
}

pub async fn submit_inspection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<SubmitRequest>,
) -> (StatusCode, Json<Value>) {
    let actor = match actor_id(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match state.service.submit(&id, &actor, payload.responses).await {
        Ok(SubmitOutcome::Submitted { inspection }) => (
            StatusCode::OK,
            Json(json!({
                "status": inspection.status,
                "submitted_at": inspection.updated_at,
                "inspection": inspection,
            })),
        ),
        Ok(SubmitOutcome::Invalid { errors }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "validation_errors": errors })),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn review_inspection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ReviewRequest>,
) -> (StatusCode, Json<Value>) {
    let manager = match actor_id(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    let outcome = state
        .service
        .review(
            &id,
            &manager,
            payload.decision,
            payload.reviewer_notes,
            payload.escalation_reason,
        )
        .await;

    match outcome {
        Ok(ReviewOutcome::Approved { inspection }) => (
            StatusCode::OK,
            Json(json!({ "status": inspection.status, "inspection": inspection })),
        ),
        Ok(ReviewOutcome::Rejected {
            inspection,
            escalation,
            escalation_error,
        }) => (
            StatusCode::OK,
            Json(json!({
                "status": inspection.status,
                "inspection": inspection,
                "escalation": escalation,
                "escalation_error": escalation_error,
            })),
        ),
        Ok(ReviewOutcome::Invalid { errors }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "validation_errors": errors })),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn probe_inspection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    match state.service.probe(&id).await {
        Ok(report) => (StatusCode::OK, Json(json!(report))),
        Err(err) => error_response(err),
    }
}

pub async fn manager_queue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    match state.service.manager_queue(&id).await {
        Ok((escalations, metrics)) => (
            StatusCode::OK,
            Json(json!({ "escalations": escalations, "metrics": metrics })),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn resolve_escalation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    match state.service.resolve_escalation(&id).await {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({ "status": "resolved", "escalation": record })),
        ),
        Err(err) => error_response(err),
    }
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "version": FIELDGATE_VERSION })))
}
