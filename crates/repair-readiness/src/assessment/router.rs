use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use tracing::{error, warn};

use super::engine::ReadinessEngine;
use super::guide::GuideLink;
use super::report::export_filename;
use super::responses::AssessmentSubmission;
use crate::error::AppError;

/// Shared, read-only state behind the assessment endpoints.
#[derive(Debug, Clone)]
pub struct AssessmentState {
    pub engine: Arc<ReadinessEngine>,
    pub guide: GuideLink,
}

/// Router builder exposing the rubric, scoring, export, and guide endpoints.
pub fn assessment_router(state: AssessmentState) -> Router {
    Router::new()
        .route("/api/v1/rubric", get(rubric_handler))
        .route("/api/v1/rubric/questions", get(questions_handler))
        .route("/api/v1/assessment/report", post(report_handler))
        .route("/api/v1/assessment/export", post(export_handler))
        .route("/api/v1/guide", get(guide_handler))
        .with_state(state)
}

pub(crate) async fn rubric_handler(State(state): State<AssessmentState>) -> Response {
    (StatusCode::OK, Json(state.engine.rubric())).into_response()
}

pub(crate) async fn questions_handler(State(state): State<AssessmentState>) -> Response {
    (StatusCode::OK, Json(state.engine.rubric().questions())).into_response()
}

pub(crate) async fn report_handler(
    State(state): State<AssessmentState>,
    Json(submission): Json<AssessmentSubmission>,
) -> Response {
    let (responses, comments) = match submission.into_sets(state.engine.rubric()) {
        Ok(sets) => sets,
        Err(err) => {
            warn!(error = %err, "rejected assessment submission");
            return AppError::from(err).into_response();
        }
    };

    match state.engine.report(&responses, &comments) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => {
            error!(error = %err, "rubric is missing recommendation text");
            AppError::from(err).into_response()
        }
    }
}

pub(crate) async fn export_handler(
    State(state): State<AssessmentState>,
    Json(submission): Json<AssessmentSubmission>,
) -> Response {
    let (responses, comments) = match submission.into_sets(state.engine.rubric()) {
        Ok(sets) => sets,
        Err(err) => {
            warn!(error = %err, "rejected export submission");
            return AppError::from(err).into_response();
        }
    };

    match state.engine.export_csv(&responses, &comments) {
        Ok(body) => {
            let filename = export_filename(Local::now().date_naive());
            let headers = [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ];
            (StatusCode::OK, headers, body).into_response()
        }
        Err(err) => {
            error!(error = %err, "csv export failed");
            AppError::from(err).into_response()
        }
    }
}

pub(crate) async fn guide_handler(State(state): State<AssessmentState>) -> Response {
    (StatusCode::OK, Json(state.guide)).into_response()
}
