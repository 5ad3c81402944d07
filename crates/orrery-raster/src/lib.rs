//! Orrery Raster - a software [`Surface`] backed by an RGBA image
//!
//! Pixels are covered when their centre falls inside a shape. Fills composite
//! with source-over alpha blending on straight (non-premultiplied) channels.

use image::{ImageFormat, Rgba, RgbaImage};
use orrery_core::{Color, OrreryError, Result};
use orrery_runtime::Surface;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::ops::Range;
use std::path::Path;
use std::rc::Rc;

/// Rasterizing surface. Clones share one pixel buffer, so the caller can keep
/// a handle after passing the surface to an orchestrator.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: Rc<RefCell<RgbaImage>>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: Rc::new(RefCell::new(RgbaImage::new(width, height))),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.borrow().width()
    }

    pub fn height(&self) -> u32 {
        self.image.borrow().height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let image = self.image.borrow();
        if x < image.width() && y < image.height() {
            Some(image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Copy of the current pixel buffer
    pub fn snapshot(&self) -> RgbaImage {
        self.image.borrow().clone()
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.image
            .borrow()
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| OrreryError::ImageError(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(target: "raster", "Wrote {}", path.display());
        Ok(())
    }

    fn fill_where(
        &mut self,
        xs: Range<u32>,
        ys: Range<u32>,
        color: Color,
        inside: impl Fn(f64, f64) -> bool,
    ) {
        let mut image = self.image.borrow_mut();
        for py in ys {
            for px in xs.clone() {
                if inside(px as f64 + 0.5, py as f64 + 0.5) {
                    blend(image.get_pixel_mut(px, py), color);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        let mut image = self.image.borrow_mut();
        if image.width() != width || image.height() != height {
            *image = RgbaImage::new(width, height);
        }
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let mut image = self.image.borrow_mut();
        let ys = span(y, height, image.height());
        let xs = span(x, width, image.width());
        for py in ys {
            for px in xs.clone() {
                image.put_pixel(px, py, Rgba([0, 0, 0, 0]));
            }
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let xs = span(x, width, self.width());
        let ys = span(y, height, self.height());
        self.fill_where(xs, ys, color, |_, _| true);
    }

    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, color: Color) {
        if !(radius > 0.0 && radius.is_finite()) {
            return;
        }
        let sweep = end - start;
        if !sweep.is_finite() {
            return;
        }
        let sweep = if sweep >= TAU { TAU } else { sweep.rem_euclid(TAU) };
        if sweep == 0.0 {
            return;
        }

        // The filled path is the circular segment cut off by the chord between
        // the arc's endpoints: inside the circle and beyond the chord along the
        // arc's bisector.
        let mid = start + sweep / 2.0;
        let (ux, uy) = (mid.cos(), mid.sin());
        let threshold = radius * (sweep / 2.0).cos();
        let full = sweep >= TAU;
        let r2 = radius * radius;

        let xs = span(cx - radius, 2.0 * radius, self.width());
        let ys = span(cy - radius, 2.0 * radius, self.height());
        self.fill_where(xs, ys, color, |px, py| {
            let (dx, dy) = (px - cx, py - cy);
            dx * dx + dy * dy <= r2 && (full || dx * ux + dy * uy >= threshold)
        });
    }
}

/// Pixel indices whose centres lie in `[start, start + len)`, clamped to `limit`
fn span(start: f64, len: f64, limit: u32) -> Range<u32> {
    let (lo, hi) = if len < 0.0 {
        (start + len, start)
    } else {
        (start, start + len)
    };
    let clamp = |v: f64| (v - 0.5).ceil().max(0.0).min(limit as f64) as u32;
    clamp(lo)..clamp(hi)
}

fn blend(dst: &mut Rgba<u8>, src: Color) {
    let sa = src.a.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let [dr, dg, db, da] = dst.0.map(|c| c as f32 / 255.0);
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
    *dst = Rgba(
        Color::new(
            channel(src.r, dr),
            channel(src.g, dg),
            channel(src.b, db),
            out_a,
        )
        .to_rgba8(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

    #[test]
    fn fill_rect_covers_pixel_centres() {
        let mut surface = RasterSurface::new(4, 4);
        surface.fill_rect(1.0, 1.0, 2.0, 2.0, RED);

        assert_eq!(surface.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(3, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn rects_are_clipped_and_normalized() {
        let mut surface = RasterSurface::new(4, 4);
        surface.fill_rect(3.0, 3.0, -2.0, 10.0, RED);
        assert_eq!(surface.pixel(1, 3), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(2, 3), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(3, 3), Some([0, 0, 0, 0]));

        surface.fill_rect(-100.0, -100.0, 1.0, 1.0, RED);
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn fade_overlay_darkens_by_a_fifth() {
        let mut surface = RasterSurface::new(2, 2);
        surface.fill_rect(0.0, 0.0, 2.0, 2.0, Color::WHITE);
        surface.fill_rect(0.0, 0.0, 2.0, 2.0, Color::new(0.0, 0.0, 0.0, 0.2));
        assert_eq!(surface.pixel(0, 0), Some([204, 204, 204, 255]));
    }

    #[test]
    fn translucent_fill_over_transparent_keeps_colour() {
        let mut surface = RasterSurface::new(1, 1);
        surface.fill_rect(0.0, 0.0, 1.0, 1.0, RED.with_alpha(0.4));
        assert_eq!(surface.pixel(0, 0), Some([255, 0, 0, 102]));
    }

    #[test]
    fn clear_rect_resets_to_transparent() {
        let mut surface = RasterSurface::new(3, 3);
        surface.fill_rect(0.0, 0.0, 3.0, 3.0, RED);
        surface.clear_rect(0.0, 0.0, 3.0, 1.0);
        assert_eq!(surface.pixel(2, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(2, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn full_sweep_fills_a_disc() {
        let mut surface = RasterSurface::new(10, 10);
        surface.fill_arc(5.0, 5.0, 3.0, 0.0, 2.0 * TAU, RED);
        assert_eq!(surface.pixel(5, 5), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(4, 2), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(9, 9), Some([0, 0, 0, 0]));
    }

    #[test]
    fn half_sweep_fills_one_side_of_the_chord() {
        let mut surface = RasterSurface::new(10, 10);
        // 0 to π runs clockwise through the bottom half (y grows downward)
        surface.fill_arc(5.0, 5.0, 3.0, 0.0, PI, RED);
        assert_eq!(surface.pixel(4, 6), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(4, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn degenerate_arcs_paint_nothing() {
        let mut surface = RasterSurface::new(10, 10);
        surface.fill_arc(5.0, 5.0, 0.0, 0.0, TAU, RED);
        surface.fill_arc(5.0, 5.0, -2.0, 0.0, TAU, RED);
        surface.fill_arc(5.0, 5.0, 3.0, 1.0, 1.0, RED);
        assert!(surface.snapshot().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn clones_share_pixels_and_resize() {
        let surface = RasterSurface::new(2, 2);
        let mut handle = surface.clone();
        handle.set_size(8, 6);
        handle.fill_rect(0.0, 0.0, 1.0, 1.0, RED);

        assert_eq!((surface.width(), surface.height()), (8, 6));
        assert_eq!(surface.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(8, 0), None);
    }

    #[test]
    fn save_png_reports_image_errors() {
        let surface = RasterSurface::new(2, 2);
        let err = surface
            .save_png("/nonexistent-dir/frame.png")
            .unwrap_err();
        assert!(matches!(err, OrreryError::ImageError(_)));
    }

    #[test]
    fn save_png_round_trips() {
        let mut surface = RasterSurface::new(3, 2);
        surface.fill_rect(0.0, 0.0, 1.0, 1.0, RED);
        let path = std::env::temp_dir().join(format!("orrery-raster-{}.png", std::process::id()));
        surface.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().into_rgba8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(0, 0).0, [255, 0, 0, 255]);
        let _ = std::fs::remove_file(&path);
    }
}
