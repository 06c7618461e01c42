//! Simulation state and entity types
//!
//! Balls and particles are kept in insertion order, which is also spawn order.
//! Ids come from one counter, so they never collide within a frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::transition::Transition;
use crate::config::SimConfig;
use crate::palette::{PALETTE, Rgba};

/// Entity id shared by balls and particles
pub type EntityId = u32;

/// Ball lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Moving under physics, counts toward the population cap
    Live,
    /// Fading and shrinking; no longer integrated or counted
    Dying { fade: Transition },
}

/// A simulated ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: EntityId,
    /// Top-left corner of the ball's bounding box (screen pixels)
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub color: Rgba,
    pub opacity: f32,
    pub scale: f32,
    pub created_at: f64,
    pub phase: BallPhase,
}

impl Ball {
    pub fn new(id: EntityId, pos: Vec2, vel: Vec2, color: Rgba, created_at: f64) -> Self {
        Self {
            id,
            pos,
            vel,
            color,
            opacity: 1.0,
            scale: 1.0,
            created_at,
            phase: BallPhase::Live,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.phase, BallPhase::Live)
    }

    /// Milliseconds since creation
    pub fn age(&self, now_ms: f64) -> f64 {
        now_ms - self.created_at
    }
}

/// Explosion debris from a destroyed ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: EntityId,
    /// Where the burst started
    pub origin: Vec2,
    pub pos: Vec2,
    /// Unit direction of travel
    pub direction: Vec2,
    pub color: Rgba,
    pub opacity: f32,
    pub scale: f32,
    pub motion: Transition,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub config: SimConfig,
    /// Balls in spawn order (live and dying)
    pub balls: Vec<Ball>,
    /// Particles in creation order
    pub particles: Vec<Particle>,
    /// Time of the last advance (ms)
    pub time_ms: f64,
    /// Frames advanced so far
    pub frames: u64,
    /// Ids whose destroy transition finished; dropped on the next filter pass
    pub(crate) pending_removals: Vec<EntityId>,
    rng: Pcg32,
    next_id: EntityId,
}

impl SimState {
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            balls: Vec::new(),
            particles: Vec::new(),
            config,
            time_ms: 0.0,
            frames: 0,
            pending_removals: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Uniform velocity in [-spawn_speed, spawn_speed) on both axes
    pub fn sample_velocity(&mut self) -> Vec2 {
        let s = self.config.spawn_speed;
        if s <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(self.rng.random_range(-s..s), self.rng.random_range(-s..s))
    }

    /// Uniform pick from the palette
    pub fn sample_color(&mut self) -> Rgba {
        PALETTE[self.rng.random_range(0..PALETTE.len())]
    }

    /// Balls that count toward the population cap
    pub fn live_count(&self) -> usize {
        self.balls.iter().filter(|b| b.is_live()).count()
    }

    pub fn ball(&self, id: EntityId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Largest top-left coordinate that keeps a ball on screen
    pub fn max_corner(&self) -> Vec2 {
        Vec2::new(
            self.config.screen_width - self.config.ball_diameter,
            self.config.screen_height - self.config.ball_diameter,
        )
    }
}
