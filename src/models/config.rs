use serde::Deserialize;
use std::path::Path;

use crate::models::format_spec::{FormatSpec, MASTER_SIZE};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Stroke-width style defaults
    #[serde(default)]
    pub style: StyleConfig,

    /// How derived formats are cut from the master
    #[serde(default)]
    pub crop_mode: CropMode,

    /// Master canvas edge length in pixels
    #[serde(default = "default_master_size")]
    pub master_size: u32,

    /// Output formats, in the order they are produced
    #[serde(default = "default_formats")]
    pub formats: Vec<FormatEntry>,
}

fn default_master_size() -> u32 {
    MASTER_SIZE
}

fn default_formats() -> Vec<FormatEntry> {
    vec![
        FormatEntry {
            name: "landscape".to_string(),
            width: MASTER_SIZE,
            height: 628,
        },
        FormatEntry {
            name: "square".to_string(),
            width: MASTER_SIZE,
            height: MASTER_SIZE,
        },
    ]
}

/// One configured output format
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FormatEntry {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl From<&FormatEntry> for FormatSpec {
    fn from(entry: &FormatEntry) -> Self {
        FormatSpec::new(entry.name.clone(), entry.width, entry.height)
    }
}

/// Stroke-width bounds for flowing curves
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct StyleConfig {
    #[serde(default = "default_min_stroke")]
    pub min_stroke_width: f64,

    #[serde(default = "default_max_stroke")]
    pub max_stroke_width: f64,
}

fn default_min_stroke() -> f64 {
    0.5
}

fn default_max_stroke() -> f64 {
    1.5
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            min_stroke_width: default_min_stroke(),
            max_stroke_width: default_max_stroke(),
        }
    }
}

/// Strategy for deriving output formats from the master raster
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    /// Copy the top-left rectangle verbatim, no scaling
    Direct,
    /// Cover-fit: scale to fully cover the target, crop the centered excess
    #[default]
    Resize,
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults with a
    /// warning on any read or parse failure.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        formats = config.formats.len(),
                        crop_mode = ?config.crop_mode,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolve a format by name.
    pub fn get_format(&self, name: &str) -> Option<FormatSpec> {
        self.formats
            .iter()
            .find(|f| f.name == name)
            .map(FormatSpec::from)
    }

    /// All configured formats, in configuration order.
    pub fn format_specs(&self) -> Vec<FormatSpec> {
        self.formats.iter().map(FormatSpec::from).collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            style: StyleConfig::default(),
            crop_mode: CropMode::default(),
            master_size: MASTER_SIZE,
            formats: default_formats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.master_size, 1200);
        assert_eq!(config.crop_mode, CropMode::Resize);
        assert_eq!(config.style.min_stroke_width, 0.5);
        assert_eq!(config.style.max_stroke_width, 1.5);

        let names: Vec<_> = config.formats.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["landscape", "square"]);
    }

    #[test]
    fn test_get_format() {
        let config = AppConfig::default();

        let landscape = config.get_format("landscape").unwrap();
        assert_eq!((landscape.width, landscape.height), (1200, 628));

        assert!(config.get_format("banner").is_none());
    }

    #[test]
    fn test_format_specs_preserve_order() {
        let config = AppConfig::default();
        let specs = config.format_specs();
        assert_eq!(specs[0].name, "landscape");
        assert_eq!(specs[1].name, "square");
    }

    #[test]
    fn test_load_missing_path_uses_defaults() {
        let config = AppConfig::load(None);
        assert_eq!(config.master_size, 1200);
    }

    #[test]
    fn test_load_unreadable_file_uses_defaults() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/config.yaml")));
        assert_eq!(config.crop_mode, CropMode::Resize);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
style:
  min_stroke_width: 1.0
  max_stroke_width: 4.0
crop_mode: direct
master_size: 1600
formats:
  - name: banner
    width: 1500
    height: 500
  - name: square
    width: 1600
    height: 1600
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.crop_mode, CropMode::Direct);
        assert_eq!(config.master_size, 1600);
        assert_eq!(config.style.max_stroke_width, 4.0);
        assert_eq!(config.formats.len(), 2);
        assert_eq!(config.formats[0].name, "banner");
    }

    #[test]
    fn test_deserialize_partial_config_fills_defaults() {
        let config: AppConfig = serde_yaml::from_str("crop_mode: direct\n").unwrap();
        assert_eq!(config.crop_mode, CropMode::Direct);
        assert_eq!(config.master_size, 1200);
        assert_eq!(config.formats.len(), 2);
    }
}
