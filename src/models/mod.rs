pub mod config;
pub mod format_spec;
pub mod metrics;
pub mod params;

pub use config::{AppConfig, CropMode, StyleConfig};
pub use format_spec::{FormatSpec, MASTER_SIZE};
pub use metrics::ContentMetrics;
pub use params::{StyleOverrides, VisualParameters};
