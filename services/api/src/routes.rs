use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use psy_screen::catalog::{ResponseOption, ScaleType, TestDefinition};
use psy_screen::error::AppError;
use psy_screen::interpretation::{InterpretationRequest, InterpretationResponse};
use psy_screen::scoring::{score, AnswerSet, TestResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestSummary {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) scale_type: ScaleType,
    pub(crate) question_count: usize,
    pub(crate) has_subscales: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestDetail {
    #[serde(flatten)]
    pub(crate) definition: TestDefinition,
    pub(crate) response_options: &'static [ResponseOption],
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) answers: AnswerSet,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/tests", get(list_tests))
        .route("/api/v1/tests/:test_id", get(test_detail))
        .route("/api/v1/tests/:test_id/score", post(score_test))
        .route(
            "/api/generate",
            post(generate_interpretation).fallback(method_not_allowed),
        )
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_tests(Extension(state): Extension<AppState>) -> Json<Vec<TestSummary>> {
    let summaries = state
        .catalog
        .tests()
        .iter()
        .map(|test| TestSummary {
            id: test.id.clone(),
            title: test.title.clone(),
            description: test.description.clone(),
            scale_type: test.scale_type,
            question_count: test.questions.len(),
            has_subscales: test.subscales.is_some(),
        })
        .collect();
    Json(summaries)
}

pub(crate) async fn test_detail(
    Extension(state): Extension<AppState>,
    Path(test_id): Path<String>,
) -> Result<Json<TestDetail>, AppError> {
    let definition = state
        .catalog
        .get(&test_id)
        .ok_or(AppError::UnknownTest(test_id))?;

    Ok(Json(TestDetail {
        response_options: definition.profile().response_options(definition.scale_type),
        definition: definition.clone(),
    }))
}

pub(crate) async fn score_test(
    Extension(state): Extension<AppState>,
    Path(test_id): Path<String>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<TestResult>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::Payload(rejection.body_text()))?;
    let definition = state
        .catalog
        .get(&test_id)
        .ok_or(AppError::UnknownTest(test_id))?;

    let result = score(definition, &request.answers, Utc::now());
    info!(test_id = %result.test_id, total = result.total_score, "scored answers");
    Ok(Json(result))
}

pub(crate) async fn generate_interpretation(
    Extension(state): Extension<AppState>,
    payload: Result<Json<InterpretationRequest>, JsonRejection>,
) -> Result<Json<InterpretationResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::Payload(rejection.body_text()))?;
    let InterpretationRequest { result, test_def } = request;
    test_def.validate()?;
    if result.test_id != test_def.id {
        warn!(result_test = %result.test_id, definition = %test_def.id, "result and definition ids differ");
    }

    let interpretation = state.cascade.interpret(&result, &test_def).await;
    info!(
        test_id = %result.test_id,
        source = ?interpretation.source,
        "interpretation served"
    );
    Ok(Json(InterpretationResponse {
        text: interpretation.text,
    }))
}

pub(crate) async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}
