//! Software implementation of [`Surface`] backed by an RGBA8 pixel buffer.

use std::f32::consts::TAU;

use glam::{Affine2, Vec2};

use crate::{
    particle::Color,
    surface::{Path, Surface},
};

/// Straight (non-premultiplied) RGBA.
pub type Pixel = [u8; 4];

const CIRCLE_SEGMENTS: usize = 32;
const CURVE_SEGMENTS: usize = 12;

#[derive(Clone, Copy, Debug)]
struct DrawState {
    transform: Affine2,
    alpha: f32,
    fill: Color,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            alpha: 1.0,
            fill: Color::rgb(0, 0, 0),
        }
    }
}

pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,

    state: DrawState,
    saved: Vec<DrawState>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],

            state: DrawState::default(),
            saved: Vec::new(),
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Number of pixels with any coverage.
    pub fn painted(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] != 0).count()
    }

    fn fill_polygon(&mut self, local: &[Vec2]) {
        if local.len() < 3 || self.state.alpha <= 0.0 {
            return;
        }

        let points: Vec<Vec2> = local
            .iter()
            .map(|&p| self.state.transform.transform_point2(p))
            .collect();

        let (min, max) = points
            .iter()
            .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(min, max), &p| {
                (min.min(p), max.max(p))
            });

        if max.x < 0.0 || max.y < 0.0 || min.x >= self.width as f32 || min.y >= self.height as f32 {
            return;
        }

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil() as u32).min(self.width);
        let y1 = (max.y.ceil() as u32).min(self.height);

        let color = self.state.fill;
        let alpha = self.state.alpha;
        for y in y0..y1 {
            for x in x0..x1 {
                let sample = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if contains(&points, sample) {
                    let index = (y * self.width + x) as usize;
                    self.pixels[index] = blend(self.pixels[index], color, alpha);
                }
            }
        }
    }
}

/// Even-odd point in polygon test.
fn contains(polygon: &[Vec2], point: Vec2) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Source-over compositing of a solid colour.
fn blend(dst: Pixel, src: Color, alpha: f32) -> Pixel {
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return [0; 4];
    }

    let channel = |s: u8, d: u8| {
        let c = (s as f32 * alpha + d as f32 * dst_alpha * (1.0 - alpha)) / out_alpha;
        c.round().clamp(0.0, 255.0) as u8
    };

    [
        channel(src.r, dst[0]),
        channel(src.g, dst[1]),
        channel(src.b, dst[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0; 4]; width as usize * height as usize];
        self.state = DrawState::default();
        self.saved.clear();
    }

    fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(angle);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.state.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn set_fill(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        let outline: Vec<Vec2> = (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
                center + Vec2::from_angle(angle) * radius
            })
            .collect();
        self.fill_polygon(&outline);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2) {
        self.fill_polygon(&[
            min,
            min + Vec2::new(size.x, 0.0),
            min + size,
            min + Vec2::new(0.0, size.y),
        ]);
    }

    fn fill_path(&mut self, path: &Path) {
        for polygon in path.flatten(CURVE_SEGMENTS) {
            self.fill_polygon(&polygon);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLD: Color = Color::rgb(0xFF, 0xD7, 0x00);

    #[test]
    fn rect_fills_opaque_pixels() {
        let mut surface = RasterSurface::new(10, 10);
        surface.set_fill(GOLD);
        surface.fill_rect(Vec2::new(2.0, 2.0), Vec2::new(4.0, 4.0));

        assert_eq!(surface.pixel(3, 3), Some([0xFF, 0xD7, 0x00, 0xFF]));
        assert_eq!(surface.pixel(7, 7), Some([0; 4]));
        assert_eq!(surface.painted(), 16);
    }

    #[test]
    fn transform_stack_restores() {
        let mut surface = RasterSurface::new(20, 20);
        surface.set_fill(GOLD);

        surface.save();
        surface.translate(Vec2::new(10.0, 10.0));
        surface.fill_circle(Vec2::ZERO, 2.0);
        surface.restore();
        surface.fill_circle(Vec2::ZERO, 2.0);

        assert_eq!(surface.pixel(10, 10).map(|p| p[3]), Some(255));
        assert_eq!(surface.pixel(0, 0).map(|p| p[3]), Some(255));
        assert_eq!(surface.pixel(5, 5).map(|p| p[3]), Some(0));
    }

    #[test]
    fn rotation_turns_a_bar() {
        let mut surface = RasterSurface::new(20, 20);
        surface.set_fill(GOLD);
        surface.translate(Vec2::new(10.0, 10.0));
        surface.rotate(std::f32::consts::FRAC_PI_2);
        surface.fill_rect(Vec2::new(-8.0, -1.0), Vec2::new(16.0, 2.0));

        assert_eq!(surface.pixel(10, 3).map(|p| p[3]), Some(255));
        assert_eq!(surface.pixel(3, 10).map(|p| p[3]), Some(0));
    }

    #[test]
    fn global_alpha_blends_and_clamps() {
        let mut surface = RasterSurface::new(4, 4);
        surface.set_fill(GOLD);
        surface.set_global_alpha(0.5);
        surface.fill_rect(Vec2::ZERO, Vec2::splat(4.0));
        assert_eq!(surface.pixel(0, 0).map(|p| p[3]), Some(128));

        surface.clear();
        surface.set_global_alpha(-0.002);
        surface.fill_rect(Vec2::ZERO, Vec2::splat(4.0));
        assert_eq!(surface.painted(), 0);

        surface.set_global_alpha(3.0);
        surface.fill_rect(Vec2::ZERO, Vec2::splat(4.0));
        assert_eq!(surface.pixel(1, 1).map(|p| p[3]), Some(255));
    }

    #[test]
    fn resize_discards_contents() {
        let mut surface = RasterSurface::new(4, 4);
        surface.set_fill(GOLD);
        surface.fill_rect(Vec2::ZERO, Vec2::splat(4.0));

        surface.resize(8, 2);
        assert_eq!((surface.width(), surface.height()), (8, 2));
        assert_eq!(surface.pixels().len(), 16);
        assert_eq!(surface.as_bytes().len(), 64);
        assert_eq!(surface.painted(), 0);
    }

    #[test]
    fn off_surface_fills_are_ignored() {
        let mut surface = RasterSurface::new(4, 4);
        surface.set_fill(GOLD);
        surface.fill_circle(Vec2::new(-50.0, -50.0), 3.0);
        assert_eq!(surface.painted(), 0);
    }
}
