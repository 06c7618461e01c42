//! Frame output for the presentation layer
//!
//! The simulation exposes plain circle descriptors; painting them is the
//! host's job (Canvas2D painter on the web build).

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;
use serde::Serialize;

use crate::palette::Rgba;
use crate::sim::{EntityId, SimState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderKind {
    Ball,
    Particle,
}

/// One circle to draw this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Renderable {
    pub kind: RenderKind,
    pub id: EntityId,
    /// Top-left of the unscaled bounding box
    pub position: Vec2,
    pub diameter: f32,
    pub color: Rgba,
    pub opacity: f32,
    /// Scale about the circle's center
    pub scale: f32,
}

impl Renderable {
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.diameter / 2.0)
    }

    /// Drawn radius after scaling
    pub fn radius(&self) -> f32 {
        self.diameter / 2.0 * self.scale
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.scale > 0.0
    }
}

/// Everything to draw for one frame, in paint order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderList {
    pub frame: u64,
    pub items: Vec<Renderable>,
}

impl RenderList {
    /// Particles first, then balls in spawn order (balls paint on top)
    pub fn collect(state: &SimState) -> Self {
        let config = &state.config;
        let mut items = Vec::with_capacity(state.particles.len() + state.balls.len());

        items.extend(state.particles.iter().map(|p| Renderable {
            kind: RenderKind::Particle,
            id: p.id,
            position: p.pos,
            diameter: config.particle_diameter,
            color: p.color,
            opacity: p.opacity,
            scale: p.scale,
        }));
        items.extend(state.balls.iter().map(|b| Renderable {
            kind: RenderKind::Ball,
            id: b.id,
            position: b.pos,
            diameter: config.ball_diameter,
            color: b.color,
            opacity: b.opacity,
            scale: b.scale,
        }));

        Self {
            frame: state.frames,
            items,
        }
    }

    pub fn balls(&self) -> impl Iterator<Item = &Renderable> {
        self.items.iter().filter(|r| r.kind == RenderKind::Ball)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Renderable> {
        self.items.iter().filter(|r| r.kind == RenderKind::Particle)
    }
}
