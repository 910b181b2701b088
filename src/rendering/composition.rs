//! The layered composition renderer.
//!
//! Paints one master raster in three strictly ordered passes: gradient
//! background, layered shape flows with flowing noise curves, and a final
//! noise texture overlay. All variation comes from two seeded sources (the
//! LCG for positions and sizes, the noise field for curves, blobs and the
//! texture), so the whole image is a pure function of the parameter vector.

use seeded_noise::{Lcg32, NoiseField};

use crate::error::RenderError;
use crate::models::VisualParameters;
use crate::rendering::palette::palette_at;
use crate::rendering::raster::Raster;
use crate::rendering::surface::{SkiaSurface, Surface};

/// Fill opacity for flow shapes; stacked translucent layers read as depth.
const SHAPE_OPACITY: f64 = 0.3;

/// Points per flowing curve is STEPS + 1.
const CURVE_STEPS: u32 = 50;

/// Flowing curves drawn after each layer's shapes.
const CURVES_PER_LAYER: u32 = 3;

/// The five shape kinds a flow can take. Selection is threshold arithmetic
/// over a deterministic selector; the thresholds and their order are part
/// of the visual contract and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Star,
    Rect,
    Polygon,
    Blob,
}

impl ShapeKind {
    /// Map a selector in [0, 100) to a shape kind.
    pub fn select(selector: f64) -> Self {
        if selector < 20.0 {
            ShapeKind::Circle
        } else if selector < 35.0 {
            ShapeKind::Star
        } else if selector < 50.0 {
            ShapeKind::Rect
        } else if selector < 70.0 {
            ShapeKind::Polygon
        } else {
            ShapeKind::Blob
        }
    }
}

/// Selector for a flow at `offset = flow + layer*100`. Depends only on the
/// offset and the smoothness parameter, never on PRNG draw order, so shape
/// choice is stable no matter how many draws preceded it.
pub fn shape_selector(offset: u32, smoothness: f64) -> f64 {
    (offset as f64 * 37.0 + smoothness * 100.0) % 100.0
}

/// Render the master raster with the production (tiny-skia) backend.
pub fn render_master(
    params: &VisualParameters,
    width: u32,
    height: u32,
) -> Result<Raster, RenderError> {
    let mut surface = SkiaSurface::new(width, height)?;
    render_onto(&mut surface, params);
    Ok(surface.into_raster())
}

/// Run the full composition against any backend.
pub fn render_onto<S: Surface>(surface: &mut S, params: &VisualParameters) {
    let mut rng = Lcg32::new(params.seed);
    let noise = NoiseField::new(params.seed);
    let palette = palette_at(params.palette_index);

    let width = surface.width() as f64;
    let height = surface.height() as f64;

    surface.fill_vertical_gradient(palette.background[0], palette.background[1]);

    let num_flows = (5.0 + params.density * 10.0).floor() as u32;
    let noise_scale = 0.005 / (params.smoothness + 0.1);

    tracing::debug!(
        seed = params.seed,
        layers = params.layer_count,
        flows_per_layer = num_flows,
        palette = palette.name,
        "Composing master"
    );

    for layer in 0..params.layer_count {
        for flow in 0..num_flows {
            let x = rng.next_in(width);
            let y = rng.next_in(height);
            let size = 50.0 + rng.next_f64() * 150.0 * params.complexity;

            let offset = flow + layer * 100;
            let selector = shape_selector(offset, params.smoothness);
            let color = palette.accents[(flow % 3) as usize];

            match ShapeKind::select(selector) {
                ShapeKind::Circle => {
                    surface.fill_circle(x, y, size / 2.0, color, SHAPE_OPACITY);
                }
                ShapeKind::Star => {
                    let points =
                        star_points(x, y, size / 2.0, params.shape_vertex_count);
                    surface.fill_polygon(&points, color, SHAPE_OPACITY);
                }
                ShapeKind::Rect => {
                    let points = rect_points(x, y, size, offset);
                    surface.fill_polygon(&points, color, SHAPE_OPACITY);
                }
                ShapeKind::Polygon => {
                    let points =
                        polygon_points(x, y, size / 2.0, params.shape_vertex_count);
                    surface.fill_polygon(&points, color, SHAPE_OPACITY);
                }
                ShapeKind::Blob => {
                    let points = blob_points(
                        x,
                        y,
                        size / 2.0,
                        params.shape_vertex_count,
                        &noise,
                        noise_scale,
                    );
                    surface.fill_polygon(&points, color, SHAPE_OPACITY);
                }
            }
        }

        for curve in 0..CURVES_PER_LAYER {
            let curve_offset = layer * CURVES_PER_LAYER + curve;
            let points = curve_points(&noise, curve_offset, noise_scale, width, height);
            let stroke_width = params.min_stroke_width
                + params.complexity * (params.max_stroke_width - params.min_stroke_width);
            let color = palette.accents[(curve % 3) as usize];
            surface.stroke_polyline(&points, stroke_width, color);
        }
    }

    apply_noise_texture(surface, &noise);
}

/// Alternating outer/inner vertices; inner radius is half the outer.
fn star_points(cx: f64, cy: f64, outer: f64, vertex_count: u32) -> Vec<(f64, f64)> {
    let n = vertex_count as usize;
    let mut points = Vec::with_capacity(2 * n);
    for i in 0..2 * n {
        let radius = if i % 2 == 0 { outer } else { outer / 2.0 };
        let angle = i as f64 * std::f64::consts::PI / n as f64;
        points.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
    }
    points
}

/// Rectangle with edge lengths jittered by the offset and rotated by
/// `offset * 0.1` radians about the flow position.
fn rect_points(cx: f64, cy: f64, size: f64, offset: u32) -> Vec<(f64, f64)> {
    let w = size + (offset % 10) as f64;
    let h = size + ((offset * 3) % 10) as f64;
    let rotation = offset as f64 * 0.1;
    let (sin, cos) = rotation.sin_cos();

    [
        (-w / 2.0, -h / 2.0),
        (w / 2.0, -h / 2.0),
        (w / 2.0, h / 2.0),
        (-w / 2.0, h / 2.0),
    ]
    .into_iter()
    .map(|(dx, dy)| (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos))
    .collect()
}

fn polygon_points(cx: f64, cy: f64, radius: f64, vertex_count: u32) -> Vec<(f64, f64)> {
    let n = vertex_count as usize;
    (0..n)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / n as f64;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

/// Polygon whose vertex radii breathe with the noise field; the continuity
/// of the field is what keeps the outline organic instead of jittery.
fn blob_points(
    cx: f64,
    cy: f64,
    base_radius: f64,
    vertex_count: u32,
    noise: &NoiseField,
    noise_scale: f64,
) -> Vec<(f64, f64)> {
    let n = vertex_count as usize;
    (0..n)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / n as f64;
            let sample = noise.sample(angle.cos() + cx * noise_scale, angle.sin() + cy * noise_scale);
            let radius = base_radius * (0.7 + sample * 0.6);
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

/// A flowing curve: 51 points spanning x from 0 to width, y carved out of
/// the noise field inside a depth band chosen by `curve_offset mod 5`.
fn curve_points(
    noise: &NoiseField,
    curve_offset: u32,
    noise_scale: f64,
    width: f64,
    height: f64,
) -> Vec<(f64, f64)> {
    let base_depth = 0.1 + (curve_offset % 5) as f64 * 0.125;
    (0..=CURVE_STEPS)
        .map(|step| {
            let t = step as f64 / CURVE_STEPS as f64;
            let sample = noise.sample(
                t * 5.0 + curve_offset as f64,
                curve_offset as f64 * noise_scale,
            );
            (t * width, sample * height * base_depth)
        })
        .collect()
}

/// Perturb every 2nd pixel in x and y by a noise-derived delta in [-5, 5],
/// applied to R, G and B with alpha untouched. The 2-pixel stride is part of
/// the visual contract.
fn apply_noise_texture<S: Surface>(surface: &mut S, noise: &NoiseField) {
    let width = surface.width() as usize;
    let height = surface.height() as usize;
    let data = surface.data_mut();

    for py in (0..height).step_by(2) {
        for px in (0..width).step_by(2) {
            let delta = noise.sample(px as f64 * 0.01, py as f64 * 0.01) * 10.0 - 5.0;
            let i = (py * width + px) * 4;
            for channel in &mut data[i..i + 3] {
                *channel = (*channel as f64 + delta).clamp(0.0, 255.0) as u8;
            }
        }
    }
}
