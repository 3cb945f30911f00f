//! Rendering module
//!
//! Rendering is a read-only consumer of board state: a `Scene` is built from
//! a shared borrow of the board and handed to a `Renderer`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{Scene, Shape, build_scene};

/// Paints a frame
pub trait Renderer {
    fn render(&mut self, scene: &Scene);
}

/// Discards every frame (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _scene: &Scene) {}
}
