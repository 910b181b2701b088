//! Deriving output formats from the master raster.
//!
//! The master is rendered once at the largest needed extent; every format is
//! cut from it by one of two strategies. Both are pure functions of the
//! master pixels and the target size, and every derived raster owns its own
//! buffer. Nothing aliases the master.

use crate::error::RenderError;
use crate::models::{CropMode, FormatSpec};
use crate::rendering::raster::Raster;

/// Derive every requested format from the master, in order.
pub fn derive_formats(
    master: &Raster,
    formats: &[FormatSpec],
    mode: CropMode,
) -> Result<Vec<(FormatSpec, Raster)>, RenderError> {
    formats
        .iter()
        .map(|spec| {
            let raster = match mode {
                CropMode::Direct => crop_direct(master, spec)?,
                CropMode::Resize => resize_cover(master, spec)?,
            };
            Ok((spec.clone(), raster))
        })
        .collect()
}

/// Copy the top-left `width x height` rectangle verbatim. The target must
/// fit inside the master; exceeding it is a caller contract violation.
fn crop_direct(master: &Raster, spec: &FormatSpec) -> Result<Raster, RenderError> {
    spec.validate_within(master.width(), master.height())?;

    let row_bytes = spec.width as usize * 4;
    let mut data = Vec::with_capacity(row_bytes * spec.height as usize);
    for y in 0..spec.height {
        data.extend_from_slice(&master.row(y)[..row_bytes]);
    }
    Raster::from_rgba(spec.width, spec.height, data)
}

/// Cover-fit: scale the master uniformly so it fully covers the target,
/// then crop the centered excess. No letterboxing, no aspect distortion.
fn resize_cover(master: &Raster, spec: &FormatSpec) -> Result<Raster, RenderError> {
    spec.validate()?;

    let master_w = master.width() as f64;
    let master_h = master.height() as f64;
    let target_w = spec.width as f64;
    let target_h = spec.height as f64;

    let scale = (target_w / master_w).max(target_h / master_h);
    let crop_x = (master_w * scale - target_w) / 2.0;
    let crop_y = (master_h * scale - target_h) / 2.0;

    let mut data = Vec::with_capacity(spec.width as usize * spec.height as usize * 4);
    for oy in 0..spec.height {
        for ox in 0..spec.width {
            // Center of the output pixel mapped back into master space.
            let sx = (ox as f64 + 0.5 + crop_x) / scale - 0.5;
            let sy = (oy as f64 + 0.5 + crop_y) / scale - 0.5;
            data.extend_from_slice(&sample_bilinear(master, sx, sy));
        }
    }
    Raster::from_rgba(spec.width, spec.height, data)
}

/// Bilinear sample with edge clamping.
fn sample_bilinear(raster: &Raster, x: f64, y: f64) -> [u8; 4] {
    let max_x = (raster.width() - 1) as f64;
    let max_y = (raster.height() - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(raster.width() - 1);
    let y1 = (y0 + 1).min(raster.height() - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = raster.pixel(x0, y0);
    let p10 = raster.pixel(x1, y0);
    let p01 = raster.pixel(x0, y1);
    let p11 = raster.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f64 + fx * (p10[c] as f64 - p00[c] as f64);
        let bottom = p01[c] as f64 + fx * (p11[c] as f64 - p01[c] as f64);
        out[c] = (top + fy * (bottom - top)).round() as u8;
    }
    out
}
