use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json as JsonExtractor,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, CropMode, StyleOverrides};
use crate::rendering;
use crate::services::GeneratorService;

/// Request body for cover generation
#[derive(Debug, Deserialize, ToSchema)]
pub struct CoverRequest {
    /// Article text (markup is tolerated and stripped)
    pub text: String,
    /// Named output format; defaults to "square"
    #[serde(default)]
    pub format: Option<String>,
    /// Crop strategy override; defaults to the configured mode
    #[serde(default)]
    pub crop_mode: Option<CropMode>,
    /// Minimum curve stroke width override
    #[serde(default)]
    pub min_stroke_width: Option<f64>,
    /// Maximum curve stroke width override
    #[serde(default)]
    pub max_stroke_width: Option<f64>,
}

/// Generate a cover image
///
/// Runs the deterministic pipeline over the submitted text and returns the
/// requested format as a PNG. Identical text always produces identical
/// pixels, so responses are safely cacheable by content.
#[utoipa::path(
    post,
    path = "/api/cover",
    request_body = CoverRequest,
    responses(
        (status = 200, description = "PNG cover image", content_type = "image/png"),
        (status = 400, description = "Unknown format name"),
    ),
    tag = "Generation"
)]
pub async fn handle_cover(
    State(config): State<Arc<AppConfig>>,
    State(generator): State<Arc<GeneratorService>>,
    JsonExtractor(request): JsonExtractor<CoverRequest>,
) -> Result<Response, ApiError> {
    let format_name = request.format.as_deref().unwrap_or("square");
    let spec = config
        .get_format(format_name)
        .ok_or_else(|| ApiError::UnknownFormat(format_name.to_string()))?;

    let crop_mode = request.crop_mode.unwrap_or(config.crop_mode);
    let style = StyleOverrides {
        min_stroke_width: request
            .min_stroke_width
            .unwrap_or(config.style.min_stroke_width),
        max_stroke_width: request
            .max_stroke_width
            .unwrap_or(config.style.max_stroke_width),
    };

    tracing::info!(
        format = %spec.name,
        crop_mode = ?crop_mode,
        text_len = request.text.len(),
        "Cover request received"
    );

    // Render, derive and encode off the async runtime.
    let generator = generator.clone();
    let text = request.text;
    let (seed, png_bytes) = tokio::task::spawn_blocking(move || {
        let (generated, derived) =
            generator.generate_formats(&text, &style, std::slice::from_ref(&spec), crop_mode)?;
        let (_, raster) = derived
            .into_iter()
            .next()
            .expect("one requested format yields one raster");
        let png_bytes = rendering::png::encode_png(&raster)?;
        Ok::<_, crate::error::RenderError>((generated.parameters.seed, png_bytes))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Render task failed: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::HeaderName::from_static("x-inkblot-seed"),
                seed.to_string(),
            ),
        ],
        png_bytes,
    )
        .into_response())
}
