use glam::Mat4;

use crate::resource::{Material, Model, Resource};
use crate::transform::Transform;

/// Drawing backend consumed by renderer components during
/// [`Scene::draw`](crate::Scene::draw).
pub trait Renderer {
    fn clear(&mut self);
    fn present(&mut self);
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn draw_model(&mut self, model: &Model, material: Option<&Material>, transform: Mat4);
}

/// Capability exposed by components that draw their owner.
pub trait RendererComponent {
    fn draw(&self, renderer: &mut dyn Renderer, transform: &Transform);
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub model: String,
    pub material: Option<String>,
    pub matrix: Mat4,
}

/// Renderer that records what it was asked to draw instead of drawing.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    width: u32,
    height: u32,
    frames: u64,
    total_draw_calls: usize,
    draw_calls: Vec<DrawCall>,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Draw calls issued since the last [`clear`](Renderer::clear).
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    pub fn total_draw_calls(&self) -> usize {
        self.total_draw_calls
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn clear(&mut self) {
        self.draw_calls.clear();
    }

    fn present(&mut self) {
        self.frames += 1;
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn draw_model(&mut self, model: &Model, material: Option<&Material>, transform: Mat4) {
        self.total_draw_calls += 1;
        self.draw_calls.push(DrawCall {
            model: model.name().to_string(),
            material: material.map(|material| material.name().to_string()),
            matrix: transform,
        });
    }
}
