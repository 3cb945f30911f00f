//! Canvas 2D painter for the browser build

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Renderer;
use super::scene::{BACKGROUND_COLOR, BALL_COLOR, Color, Scene, Shape, css_color};

/// Paints scenes onto a `<canvas>`, scaled to fit the board
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    fn fill_circle(&self, center: Vec2, radius: f32, color: Color) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }

    fn paint(&self, scene: &Scene) -> Result<(), JsValue> {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let scale = (w / scene.width as f64).min(h / scene.height as f64);

        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.set_fill_style_str(&css_color(BACKGROUND_COLOR));
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.ctx.scale(scale, scale)?;

        self.ctx.set_font("16px sans-serif");
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");

        for shape in &scene.shapes {
            match shape {
                Shape::Circle {
                    center,
                    radius,
                    color,
                } => self.fill_circle(*center, *radius, *color)?,
                Shape::Ball { center, radius } => {
                    self.fill_circle(*center, *radius, BALL_COLOR)?
                }
                Shape::Slot {
                    origin,
                    size,
                    color,
                    label,
                } => {
                    self.ctx.set_fill_style_str(&css_color(*color));
                    self.ctx.fill_rect(
                        origin.x as f64 + 1.0,
                        origin.y as f64,
                        size.x as f64 - 2.0,
                        size.y as f64,
                    );
                    self.ctx.set_fill_style_str("#ffffff");
                    self.ctx.fill_text(
                        label,
                        (origin.x + size.x / 2.0) as f64,
                        (origin.y + size.y / 2.0) as f64,
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, scene: &Scene) {
        if let Err(e) = self.paint(scene) {
            log::warn!("Render error: {:?}", e);
        }
    }
}
