pub mod composition;
pub mod formats;
pub mod palette;
pub mod png;
pub mod raster;
pub mod surface;

pub use composition::render_master;
pub use formats::derive_formats;
pub use palette::{palette_at, Palette, Rgb, PALETTE_COUNT};
pub use raster::Raster;
pub use surface::{PixelSurface, SkiaSurface, Surface};
