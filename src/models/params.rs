use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ContentMetrics;

/// Stroke-width bounds supplied by the caller. Everything else in
/// [`VisualParameters`] is derived from the text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StyleOverrides {
    pub min_stroke_width: f64,
    pub max_stroke_width: f64,
}

impl Default for StyleOverrides {
    fn default() -> Self {
        Self {
            min_stroke_width: 0.5,
            max_stroke_width: 1.5,
        }
    }
}

/// The compact parameter vector driving one render.
///
/// Derived from [`ContentMetrics`] by pure arithmetic: the same metrics and
/// the same overrides always map to the same parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VisualParameters {
    /// Seed for the PRNG and the noise field.
    pub seed: u32,
    /// Shape count driver in [0, 1], saturating at 1000 words.
    pub density: f64,
    /// Shape size driver in [0, 1], saturating at 5000 characters.
    pub complexity: f64,
    /// Curve smoothness driver in [0, 1], saturating at avg word length 10.
    pub smoothness: f64,
    /// Number of paint layers, clamped to [3, 10].
    pub layer_count: u32,
    /// Vertex count for stars, polygons and blobs, clamped to [3, 20].
    pub shape_vertex_count: u32,
    /// Index into the fixed palette table, always in [0, 9].
    pub palette_index: u32,
    pub min_stroke_width: f64,
    pub max_stroke_width: f64,
}

impl VisualParameters {
    /// Map metrics to the visual parameter vector.
    pub fn from_metrics(metrics: &ContentMetrics, style: &StyleOverrides) -> Self {
        let seed = (metrics.word_count as f64 * 137.0
            + metrics.character_count as f64 * 31.0
            + metrics.avg_word_length * 17.0)
            .abs()
            .floor() as u32;

        Self {
            seed,
            density: (metrics.word_count as f64 / 1000.0).min(1.0),
            complexity: (metrics.character_count as f64 / 5000.0).min(1.0),
            smoothness: (metrics.avg_word_length / 10.0).min(1.0),
            layer_count: metrics.reading_time_minutes.clamp(3, 10),
            shape_vertex_count: metrics.paragraph_count.clamp(3, 20),
            palette_index: metrics.content_hash % 10,
            min_stroke_width: style.min_stroke_width,
            max_stroke_width: style.max_stroke_width,
        }
    }
}
