use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::guard::AssessmentRequest;
use super::service::{AssessmentView, FraudAssessmentService};

/// Router builder exposing the scoring endpoint.
pub fn assessment_router(service: Arc<FraudAssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/fraud/assessments", post(assess_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler(
    State(service): State<Arc<FraudAssessmentService>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response {
    match service.assess(request) {
        Ok(assessment) => {
            let view = AssessmentView::from(&assessment);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
