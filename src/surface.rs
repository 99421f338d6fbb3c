//! The 2D drawing boundary the particle system renders onto.
//!
//! Modelled on a canvas context: a fill colour and global alpha apply to every
//! subsequent fill, and `translate`/`rotate` compose onto the current transform,
//! which `save`/`restore` push and pop together with the fill state.

use glam::Vec2;

use crate::particle::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Cubic bézier from the current point through two control points.
    CurveTo(Vec2, Vec2, Vec2),
    Close,
}

/// A closed or open outline in local coordinates, filled as a whole.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, point: Vec2) -> Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    pub fn line_to(mut self, point: Vec2) -> Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    pub fn curve_to(mut self, c1: Vec2, c2: Vec2, end: Vec2) -> Self {
        self.commands.push(PathCommand::CurveTo(c1, c2, end));
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Flattens the path into polygons, approximating each curve with `segments` lines.
    pub fn flatten(&self, segments: usize) -> Vec<Vec<Vec2>> {
        let segments = segments.max(1);
        let mut polygons = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(point) => {
                    if current.len() > 2 {
                        polygons.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(point);
                }
                PathCommand::LineTo(point) => current.push(point),
                PathCommand::CurveTo(c1, c2, end) => {
                    let start = current.last().copied().unwrap_or(c1);
                    if current.is_empty() {
                        current.push(start);
                    }
                    for i in 1..=segments {
                        let t = i as f32 / segments as f32;
                        current.push(cubic_bezier(start, c1, c2, end, t));
                    }
                }
                PathCommand::Close => {
                    if current.len() > 2 {
                        polygons.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
            }
        }

        // Fills close open subpaths implicitly.
        if current.len() > 2 {
            polygons.push(current);
        }

        polygons
    }
}

fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resizes the backing store; contents are discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Clears the whole surface to transparent.
    fn clear(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);

    fn set_global_alpha(&mut self, alpha: f32);
    fn set_fill(&mut self, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn fill_rect(&mut self, min: Vec2, size: Vec2);
    fn fill_path(&mut self, path: &Path);
}
