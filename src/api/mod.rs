pub mod analyze;
pub mod cover;
pub mod palettes;

pub use analyze::{handle_analyze, AnalyzeRequest, AnalyzeResponse, __path_handle_analyze};
pub use cover::{handle_cover, CoverRequest, __path_handle_cover};
pub use palettes::{handle_palettes, PaletteInfo, __path_handle_palettes};
