use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{ContentMetrics, VisualParameters};
use crate::services::GeneratorService;

/// Request body for content analysis
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Article text (markup is tolerated and stripped)
    pub text: String,
}

/// Response with the metrics and parameter vector a render would use
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub metrics: ContentMetrics,
    pub parameters: VisualParameters,
    /// Server-side timestamp of the analysis
    pub analyzed_at: chrono::DateTime<chrono::Utc>,
}

/// Inspect the deterministic pipeline without rendering
///
/// Returns the content metrics and the derived visual parameters for the
/// submitted text: the exact inputs a cover render would consume.
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Metrics and parameters", body = AnalyzeResponse),
    ),
    tag = "Generation"
)]
pub async fn handle_analyze(
    State(generator): State<Arc<GeneratorService>>,
    JsonExtractor(request): JsonExtractor<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (metrics, parameters, _) = generator.analyze(&request.text);

    tracing::debug!(
        words = metrics.word_count,
        seed = parameters.seed,
        "Analyze request served"
    );

    Ok(Json(AnalyzeResponse {
        metrics,
        parameters,
        analyzed_at: chrono::Utc::now(),
    }))
}
