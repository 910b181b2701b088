//! Rendering backends.
//!
//! The composition algorithm is backend-agnostic: it paints through the
//! [`Surface`] capability set and never touches a concrete canvas type.
//! Two implementations are provided: [`SkiaSurface`] (tiny-skia,
//! anti-aliased, the production backend) and [`PixelSurface`] (a plain RGBA
//! buffer with scanline filling, no anti-aliasing). Pixel parity is only
//! guaranteed within one backend.

use tiny_skia::{
    Color, FillRule, GradientStop, LineCap, LineJoin, LinearGradient, Paint, PathBuilder, Pixmap,
    Point, Rect, SpreadMode, Stroke, Transform,
};

use crate::error::RenderError;
use crate::rendering::palette::Rgb;
use crate::rendering::raster::Raster;

/// The capability set the composition renderer paints through.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Paint the whole surface with a top-to-bottom linear gradient.
    fn fill_vertical_gradient(&mut self, top: Rgb, bottom: Rgb);

    /// Fill a closed polygon given its vertices in order.
    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgb, opacity: f64);

    /// Fill a circle centered at `(cx, cy)`.
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, opacity: f64);

    /// Stroke an open polyline with round caps and joins.
    fn stroke_polyline(&mut self, points: &[(f64, f64)], width: f64, color: Rgb);

    /// Raw RGBA bytes for direct pixel passes (the noise texture overlay).
    fn data_mut(&mut self) -> &mut [u8];

    /// Hand the finished pixels off as an owned raster.
    fn into_raster(self) -> Raster;
}

// ---------------------------------------------------------------------------
// tiny-skia backend
// ---------------------------------------------------------------------------

/// Anti-aliased backend over a [`tiny_skia::Pixmap`].
pub struct SkiaSurface {
    pixmap: Pixmap,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        Ok(Self { pixmap })
    }

    fn solid_paint(color: Rgb, opacity: f64) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(Color::from_rgba8(
            color.r,
            color.g,
            color.b,
            (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
        ));
        paint.anti_alias = true;
        paint
    }

    fn polygon_path(points: &[(f64, f64)]) -> Option<tiny_skia::Path> {
        let (&(x0, y0), rest) = points.split_first()?;
        let mut pb = PathBuilder::new();
        pb.move_to(x0 as f32, y0 as f32);
        for &(x, y) in rest {
            pb.line_to(x as f32, y as f32);
        }
        pb.close();
        pb.finish()
    }
}

impl Surface for SkiaSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill_vertical_gradient(&mut self, top: Rgb, bottom: Rgb) {
        let height = self.pixmap.height() as f32;
        let width = self.pixmap.width() as f32;

        let shader = LinearGradient::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(0.0, height),
            vec![
                GradientStop::new(0.0, Color::from_rgba8(top.r, top.g, top.b, 255)),
                GradientStop::new(1.0, Color::from_rgba8(bottom.r, bottom.g, bottom.b, 255)),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        );

        let mut paint = Paint::default();
        match shader {
            Some(shader) => paint.shader = shader,
            // Degenerate gradient (identical stops): fall back to a flat fill.
            None => paint.set_color(Color::from_rgba8(top.r, top.g, top.b, 255)),
        }

        if let Some(rect) = Rect::from_xywh(0.0, 0.0, width, height) {
            self.pixmap
                .fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgb, opacity: f64) {
        let Some(path) = Self::polygon_path(points) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::solid_paint(color, opacity),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, opacity: f64) {
        let mut pb = PathBuilder::new();
        pb.push_circle(cx as f32, cy as f32, radius as f32);
        let Some(path) = pb.finish() else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::solid_paint(color, opacity),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], width: f64, color: Rgb) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(x0 as f32, y0 as f32);
        for &(x, y) in rest {
            pb.line_to(x as f32, y as f32);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &Self::solid_paint(color, 1.0),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_mut()
    }

    fn into_raster(self) -> Raster {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        // Un-premultiply pixel by pixel; with the opaque background this is
        // an identity pass, but partially covered AA edges stay correct.
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Raster::from_rgba(width, height, data).expect("pixmap dimensions are valid")
    }
}

// ---------------------------------------------------------------------------
// Plain pixel-buffer backend
// ---------------------------------------------------------------------------

/// Minimal headless backend: straight RGBA bytes, even-odd scanline polygon
/// filling, disc-stamped strokes, no anti-aliasing.
pub struct PixelSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgb, opacity: f64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let a = opacity.clamp(0.0, 1.0);
        for (offset, src) in [color.r, color.g, color.b].into_iter().enumerate() {
            let dst = self.data[i + offset] as f64;
            self.data[i + offset] = (src as f64 * a + dst * (1.0 - a)).round() as u8;
        }
        self.data[i + 3] = 255;
    }

    fn stamp_disc(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, opacity: f64) {
        let r = radius.max(0.5);
        let x_min = (cx - r).floor() as i64;
        let x_max = (cx + r).ceil() as i64;
        let y_min = (cy - r).floor() as i64;
        let y_max = (cy + r).ceil() as i64;
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.blend(x, y, color, opacity);
                }
            }
        }
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_vertical_gradient(&mut self, top: Rgb, bottom: Rgb) {
        let denom = (self.height.saturating_sub(1)).max(1) as f64;
        for y in 0..self.height {
            let t = y as f64 / denom;
            let r = (top.r as f64 + t * (bottom.r as f64 - top.r as f64)).round() as u8;
            let g = (top.g as f64 + t * (bottom.g as f64 - top.g as f64)).round() as u8;
            let b = (top.b as f64 + t * (bottom.b as f64 - top.b as f64)).round() as u8;
            let stride = self.width as usize * 4;
            let start = y as usize * stride;
            for pixel in self.data[start..start + stride].chunks_exact_mut(4) {
                pixel.copy_from_slice(&[r, g, b, 255]);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgb, opacity: f64) {
        if points.len() < 3 {
            return;
        }
        let y_min = points
            .iter()
            .map(|p| p.1)
            .fold(f64::MAX, f64::min)
            .floor()
            .max(0.0) as i64;
        let y_max = points
            .iter()
            .map(|p| p.1)
            .fold(f64::MIN, f64::max)
            .ceil()
            .min(self.height as f64) as i64;

        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
        for y in y_min..y_max {
            let scan_y = y as f64 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let (x1, y1) = points[i];
                let (x2, y2) = points[(i + 1) % points.len()];
                if (y1 <= scan_y && scan_y < y2) || (y2 <= scan_y && scan_y < y1) {
                    crossings.push(x1 + (scan_y - y1) * (x2 - x1) / (y2 - y1));
                }
            }
            crossings.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in crossings.chunks_exact(2) {
                let from = pair[0].round() as i64;
                let to = pair[1].round() as i64;
                for x in from..to {
                    self.blend(x, y, color, opacity);
                }
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, opacity: f64) {
        self.stamp_disc(cx, cy, radius, color, opacity);
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], width: f64, color: Rgb) {
        let radius = (width / 2.0).max(0.5);
        for segment in points.windows(2) {
            let (x1, y1) = segment[0];
            let (x2, y2) = segment[1];
            let length = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
            let steps = (length * 2.0).ceil().max(1.0) as u32;
            for step in 0..=steps {
                let t = step as f64 / steps as f64;
                self.stamp_disc(x1 + t * (x2 - x1), y1 + t * (y2 - y1), radius, color, 1.0);
            }
        }
    }

    fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn into_raster(self) -> Raster {
        Raster::from_rgba(self.width, self.height, self.data)
            .expect("surface dimensions are valid")
    }
}
