//! Generation pipeline: text → metrics → parameters → master raster.
//!
//! One [`GeneratorService`] serves all requests. Each call constructs its own
//! PRNG and noise field from the request's seed, so concurrent generations
//! share nothing and need no coordination.

use std::sync::Arc;

use crate::error::RenderError;
use crate::models::{ContentMetrics, CropMode, FormatSpec, StyleOverrides, VisualParameters};
use crate::rendering::{self, Raster};
use crate::services::ContentAnalyzer;

/// Result of one generation request: the metrics and parameter vector that
/// drove the render, plus the master raster.
pub struct GeneratedImage {
    pub metrics: ContentMetrics,
    pub parameters: VisualParameters,
    pub master: Raster,
}

/// Orchestrates analysis, parameter mapping and rendering.
pub struct GeneratorService {
    analyzer: ContentAnalyzer,
    master_size: u32,
}

impl GeneratorService {
    pub fn new(master_size: u32) -> Self {
        Self {
            analyzer: ContentAnalyzer::new(),
            master_size,
        }
    }

    /// Analyze without rendering, the cheap path for the analyze endpoint.
    pub fn analyze(&self, text: &str) -> (ContentMetrics, VisualParameters, StyleOverrides) {
        let style = StyleOverrides::default();
        let metrics = self.analyzer.analyze(text);
        let parameters = VisualParameters::from_metrics(&metrics, &style);
        (metrics, parameters, style)
    }

    /// Run the full pipeline and render the square master raster.
    pub fn generate_master(
        &self,
        text: &str,
        style: &StyleOverrides,
    ) -> Result<GeneratedImage, RenderError> {
        let metrics = self.analyzer.analyze(text);
        let parameters = VisualParameters::from_metrics(&metrics, style);

        tracing::debug!(
            words = metrics.word_count,
            seed = parameters.seed,
            palette = parameters.palette_index,
            "Generating master image"
        );

        let master = rendering::render_master(&parameters, self.master_size, self.master_size)?;

        Ok(GeneratedImage {
            metrics,
            parameters,
            master,
        })
    }

    /// Full pipeline plus format derivation.
    pub fn generate_formats(
        &self,
        text: &str,
        style: &StyleOverrides,
        formats: &[FormatSpec],
        mode: CropMode,
    ) -> Result<(GeneratedImage, Vec<(FormatSpec, Raster)>), RenderError> {
        let generated = self.generate_master(text, style)?;
        let derived = rendering::derive_formats(&generated.master, formats, mode)?;
        Ok((generated, derived))
    }

    /// Execute CPU-intensive generation in a blocking context so the async
    /// runtime keeps serving requests while pixels are painted.
    pub async fn generate_master_blocking(
        self: &Arc<Self>,
        text: String,
        style: StyleOverrides,
    ) -> Result<GeneratedImage, RenderError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.generate_master(&text, &style))
            .await
            .map_err(|e| RenderError::PngEncode(format!("Render task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "The quick brown fox jumps over the lazy dog.\n\n\
        A second paragraph keeps the analyzer honest with more words and a \
        little extra length.";

    #[test]
    fn test_full_pipeline_is_deterministic() {
        let service = GeneratorService::new(96);
        let style = StyleOverrides::default();

        let a = service.generate_master(SAMPLE, &style).unwrap();
        let b = service.generate_master(SAMPLE, &style).unwrap();

        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.parameters, b.parameters);
        assert!(a.master.data() == b.master.data(), "pixels diverged");
    }

    #[test]
    fn test_different_text_changes_parameters() {
        let service = GeneratorService::new(64);
        let (_, params_a, _) = service.analyze(SAMPLE);
        let (_, params_b, _) = service.analyze("Entirely different words here.");
        assert_ne!(params_a.seed, params_b.seed);
    }

    #[test]
    fn test_master_has_configured_size() {
        let service = GeneratorService::new(80);
        let generated = service
            .generate_master(SAMPLE, &StyleOverrides::default())
            .unwrap();
        assert_eq!(generated.master.width(), 80);
        assert_eq!(generated.master.height(), 80);
    }

    #[test]
    fn test_generate_formats_returns_all_requested() {
        let service = GeneratorService::new(100);
        let formats = vec![FormatSpec::new("wide", 100, 52), FormatSpec::new("square", 100, 100)];

        let (_, derived) = service
            .generate_formats(SAMPLE, &StyleOverrides::default(), &formats, CropMode::Resize)
            .unwrap();

        assert_eq!(derived.len(), 2);
        assert_eq!((derived[0].1.width(), derived[0].1.height()), (100, 52));
        assert_eq!((derived[1].1.width(), derived[1].1.height()), (100, 100));
    }

    #[test]
    fn test_direct_mode_oversized_format_errors() {
        let service = GeneratorService::new(64);
        let formats = vec![FormatSpec::new("big", 128, 64)];
        let result = service.generate_formats(
            SAMPLE,
            &StyleOverrides::default(),
            &formats,
            CropMode::Direct,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_blocking_wrapper_matches_sync_path() {
        let service = Arc::new(GeneratorService::new(48));
        let style = StyleOverrides::default();

        let sync = service.generate_master(SAMPLE, &style).unwrap();
        let blocking = service
            .generate_master_blocking(SAMPLE.to_string(), style)
            .await
            .unwrap();

        assert_eq!(sync.parameters, blocking.parameters);
        assert!(sync.master.data() == blocking.master.data());
    }
}
