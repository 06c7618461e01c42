//! Deterministic simulation module
//!
//! All ball logic lives here. This module must be pure and deterministic:
//! - Time is passed in, never read
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod destroy;
pub mod engine;
pub mod lifecycle;
pub mod state;
pub mod tick;
pub mod transition;

pub use destroy::{begin_destroy, burst_direction};
pub use engine::Simulation;
pub use lifecycle::Lifecycle;
pub use state::{Ball, BallPhase, EntityId, Particle, SimState};
pub use tick::{advance, bounce_axis, integrate_ball};
pub use transition::{Easing, Transition};
