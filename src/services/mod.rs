pub mod analyzer;
pub mod content_source;
pub mod generator;

pub use analyzer::ContentAnalyzer;
pub use content_source::{read_article, scan_articles, RemoteSource};
pub use generator::{GeneratedImage, GeneratorService};
