//! Canvas2D painter for the web build

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{RenderKind, RenderList};
use crate::platform::PlatformError;

/// Background behind the orbs
const BACKGROUND: &str = "#151718";

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    /// Device pixels per CSS pixel
    dpr: f64,
    size: (f64, f64),
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement, dpr: f64) -> Result<Self, PlatformError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| PlatformError::Unavailable("canvas 2d context"))?
            .ok_or(PlatformError::Unavailable("canvas 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::Unavailable("canvas 2d context"))?;
        Ok(Self {
            ctx,
            dpr,
            size: (canvas.width() as f64, canvas.height() as f64),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32, dpr: f64) {
        self.size = (width as f64, height as f64);
        self.dpr = dpr;
    }

    /// Paint one frame (coordinates in CSS pixels)
    pub fn paint(&self, frame: &RenderList) {
        let ctx = &self.ctx;
        let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, self.size.0, self.size.1);
        let _ = ctx.scale(self.dpr, self.dpr);

        for item in frame.items.iter().filter(|r| r.is_visible()) {
            let center = item.center();
            ctx.set_global_alpha(item.opacity.clamp(0.0, 1.0) as f64);
            ctx.set_fill_style_str(&item.color.to_css(1.0));
            if item.kind == RenderKind::Ball {
                ctx.set_shadow_color("rgba(0, 0, 0, 0.25)");
                ctx.set_shadow_blur(3.84);
                ctx.set_shadow_offset_y(2.0);
            } else {
                ctx.set_shadow_color("transparent");
            }
            ctx.begin_path();
            if ctx
                .arc(center.x as f64, center.y as f64, item.radius() as f64, 0.0, TAU)
                .is_ok()
            {
                ctx.fill();
            }
        }
    }
}
