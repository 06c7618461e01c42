//! Inner Peace - a calm touch toy
//!
//! Core modules:
//! - `sim`: Deterministic ball simulation (spawn, physics, destroy sequence)
//! - `input`: Pointer events to spawn requests
//! - `renderer`: Per-frame circle descriptors for the presentation layer
//! - `platform`: Clock, frame scheduling and URL opening seams
//! - `ui`: Home and Relax screens
//! - `config`: Data-driven simulation tuning

pub mod config;
pub mod input;
pub mod palette;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use config::{ConfigError, SimConfig};
pub use palette::Rgba;

/// Simulation constants
pub mod consts {
    /// Ball diameter in pixels
    pub const BALL_SIZE: f32 = 50.0;
    /// Particle diameter in pixels
    pub const PARTICLE_SIZE: f32 = BALL_SIZE / 4.0;
    /// Maximum number of live balls
    pub const MAX_BALLS: usize = 20;
    /// Ball lifetime in milliseconds
    pub const BALL_LIFETIME_MS: f64 = 5000.0;

    /// Added to vertical velocity every frame (pixels/frame²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity multiplier applied every frame
    pub const FRICTION: f32 = 0.99;
    /// Velocity multiplier (sign-inverted) on wall contact
    pub const RESTITUTION: f32 = 0.97;
    /// Spawn velocity is sampled from [-SPAWN_SPEED, SPAWN_SPEED) per axis
    pub const SPAWN_SPEED: f32 = 7.5;

    /// Particles per destroyed ball
    pub const PARTICLE_COUNT: usize = 8;
    /// Distance each particle travels outward (pixels)
    pub const PARTICLE_TRAVEL: f32 = 100.0;
    /// Particle fly-out/fade duration
    pub const PARTICLE_FADE_MS: f64 = 500.0;
    /// Ball fade/shrink duration
    pub const BALL_FADE_MS: f64 = 300.0;

    /// Fallback screen size for headless runs
    pub const DEFAULT_SCREEN_WIDTH: f32 = 400.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 800.0;
}
