// The drawable surface: an RGBA pixel buffer plus a tiny software stroker.
// Visual: whatever ends up in `pixels` is what gets composited into the
// window under the toolbar and what gets saved to storage.

use crate::curve::{flatten, smooth_path};
use crate::error::{Error, Result};
use crate::types::{Point, Rgba, Snapshot};

/// Distance between samples when flattening quadratics, in pixels.
const FLATTEN_STEP: f32 = 2.0;

pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>, // RGBA, row-major, starts fully transparent
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0; width * height * 4] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let i = (y * self.width + x) * 4;
        Rgba::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3])
    }

    /// Wipe to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Capture the whole raster.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { width: self.width, height: self.height, pixels: self.pixels.clone() }
    }

    /// Replace every pixel with `snap`. Sizes must match.
    pub fn put_snapshot(&mut self, snap: &Snapshot) -> Result<()> {
        if snap.width != self.width || snap.height != self.height {
            return Err(Error::SizeMismatch {
                expected: (self.width, self.height),
                actual: (snap.width, snap.height),
            });
        }
        self.pixels.copy_from_slice(&snap.pixels);
        Ok(())
    }

    /// Blit `image` at the origin, clipped to the canvas. Pixels outside the
    /// image keep their current value.
    pub fn draw_image(&mut self, image: &Snapshot) {
        let cols = image.width.min(self.width);
        let rows = image.height.min(self.height);
        for y in 0..rows {
            let src = y * image.width * 4;
            let dst = y * self.width * 4;
            self.pixels[dst..dst + cols * 4].copy_from_slice(&image.pixels[src..src + cols * 4]);
        }
    }

    /// Stroke the midpoint-smoothed path through `points` with round caps and joins.
    pub fn stroke_path(&mut self, points: &[Point], width: u32, color: Rgba) {
        let path = smooth_path(points);
        let radius = width.max(1) as f32 / 2.0;
        for line in flatten(&path, FLATTEN_STEP) {
            if let [only] = line.as_slice() {
                self.fill_capsule(*only, *only, radius, color);
                continue;
            }
            for seg in line.windows(2) {
                self.fill_capsule(seg[0], seg[1], radius, color);
            }
        }
    }

    /// Fill every pixel whose integer corner `(x, y)` lies within `radius` of
    /// segment a–b, the same coverage as a canvas translated by half a pixel.
    /// A zero-length segment fills a disc, which is also the round cap/join.
    fn fill_capsule(&mut self, a: Point, b: Point, radius: f32, color: Rgba) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let x0 = (a.x.min(b.x) - radius).floor().max(0.0) as usize;
        let y0 = (a.y.min(b.y) - radius).floor().max(0.0) as usize;
        let x1 = (a.x.max(b.x) + radius).ceil();
        let y1 = (a.y.max(b.y) + radius).ceil();
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }
        let x1 = (x1 as usize).min(self.width - 1);
        let y1 = (y1 as usize).min(self.height - 1);

        let r2 = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Point::new(x as f32, y as f32);
                if distance_sq_to_segment(p, a, b) <= r2 {
                    self.put_pixel(x, y, color);
                }
            }
        }
    }

    #[inline]
    fn put_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * 4;
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
        self.pixels[i + 3] = color.a;
    }
}

fn distance_sq_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (vx, vy) = (b.x - a.x, b.y - a.y);
    let (wx, wy) = (p.x - a.x, p.y - a.y);
    let len_sq = vx * vx + vy * vy;
    let t = if len_sq <= f32::EPSILON { 0.0 } else { ((wx * vx + wy * vy) / len_sq).clamp(0.0, 1.0) };
    let dx = p.x - (a.x + vx * t);
    let dy = p.y - (a.y + vy * t);
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::opaque(255, 0, 0);

    fn painted(canvas: &Canvas) -> usize {
        canvas.pixels().chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = Canvas::new(8, 4);
        assert_eq!(canvas.pixels().len(), 8 * 4 * 4);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn stroke_covers_path_and_leaves_far_pixels_alone() {
        let mut canvas = Canvas::new(40, 40);
        let points = [Point::new(5.0, 20.0), Point::new(20.0, 20.0), Point::new(35.0, 20.0)];
        canvas.stroke_path(&points, 6, RED);

        assert_eq!(canvas.pixel(5, 20), RED);
        assert_eq!(canvas.pixel(20, 20), RED);
        assert_eq!(canvas.pixel(35, 20), RED);
        assert_eq!(canvas.pixel(20, 22), RED);
        assert_eq!(canvas.pixel(20, 30), Rgba::TRANSPARENT);
        assert_eq!(canvas.pixel(0, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn single_point_draws_a_round_dab() {
        let mut canvas = Canvas::new(20, 20);
        canvas.stroke_path(&[Point::new(10.0, 10.0)], 6, RED);
        assert_eq!(canvas.pixel(10, 10), RED);
        assert_eq!(canvas.pixel(13, 10), RED);
        // corner of the bounding square is outside the disc
        assert_eq!(canvas.pixel(13, 13), Rgba::TRANSPARENT);
    }

    #[test]
    fn coverage_is_sampled_at_pixel_corners() {
        let mut canvas = Canvas::new(8, 8);
        canvas.stroke_path(&[Point::new(3.0, 3.0)], 2, RED);
        // radius 1 around the corner (3, 3) is a plus shape
        for (x, y) in [(3, 3), (2, 3), (4, 3), (3, 2), (3, 4)] {
            assert_eq!(canvas.pixel(x, y), RED, "({x}, {y})");
        }
        for (x, y) in [(2, 2), (4, 4), (2, 4), (4, 2)] {
            assert_eq!(canvas.pixel(x, y), Rgba::TRANSPARENT, "({x}, {y})");
        }
    }

    #[test]
    fn no_points_is_a_no_op() {
        let mut canvas = Canvas::new(10, 10);
        canvas.stroke_path(&[], 6, RED);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn strokes_near_edges_are_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.stroke_path(&[Point::new(-5.0, -5.0), Point::new(15.0, 15.0)], 4, RED);
        assert_eq!(canvas.pixel(0, 0), RED);
        assert_eq!(canvas.pixel(9, 9), RED);
    }

    #[test]
    fn snapshot_round_trips_through_put_snapshot() {
        let mut canvas = Canvas::new(16, 16);
        canvas.stroke_path(&[Point::new(2.0, 2.0), Point::new(12.0, 8.0)], 3, RED);
        let snap = canvas.snapshot();
        canvas.clear();
        assert_eq!(painted(&canvas), 0);
        canvas.put_snapshot(&snap).unwrap();
        assert_eq!(canvas.snapshot(), snap);
    }

    #[test]
    fn put_snapshot_rejects_other_sizes() {
        let mut canvas = Canvas::new(4, 4);
        let err = canvas.put_snapshot(&Snapshot::blank(5, 4)).unwrap_err();
        assert!(matches!(err, Error::SizeMismatch { .. }));
    }

    #[test]
    fn draw_image_clips_larger_images() {
        let mut canvas = Canvas::new(2, 2);
        let mut image = Snapshot::blank(3, 3);
        image.pixels.fill(200);
        canvas.draw_image(&image);
        assert_eq!(canvas.pixel(1, 1), Rgba::new(200, 200, 200, 200));
    }
}
