use axum::response::{IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::rendering::{palette_at, PALETTE_COUNT};

/// One palette entry, colors as `#RRGGBB` strings
#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteInfo {
    /// Table index, selected by `content_hash mod 10`
    pub index: u32,
    pub name: String,
    /// Background gradient stops, top to bottom
    pub background: Vec<String>,
    /// Accent colors cycled across shapes and curves
    pub accents: Vec<String>,
}

/// List the fixed palette table
#[utoipa::path(
    get,
    path = "/api/palettes",
    responses(
        (status = 200, description = "All ten palettes", body = [PaletteInfo]),
    ),
    tag = "Generation"
)]
pub async fn handle_palettes() -> impl IntoResponse {
    let palettes: Vec<PaletteInfo> = (0..PALETTE_COUNT as u32)
        .map(|index| {
            let palette = palette_at(index);
            PaletteInfo {
                index,
                name: palette.name.to_string(),
                background: palette.background.iter().map(|c| c.to_hex()).collect(),
                accents: palette.accents.iter().map(|c| c.to_hex()).collect(),
            }
        })
        .collect();

    Json(palettes)
}
