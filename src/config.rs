//! Simulation tuning
//!
//! Defaults reproduce the stock behavior exactly; hosts may override any field
//! from JSON (unknown fields rejected, missing fields defaulted).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration error
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON could not be parsed
    Parse(String),
    /// A field is out of its valid range
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {}", msg),
            Self::Invalid { field, reason } => write!(f, "invalid config `{}`: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// All engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub ball_diameter: f32,
    pub particle_diameter: f32,
    pub max_balls: usize,
    pub ball_lifetime_ms: f64,
    /// When false, balls live until evicted (no lifetime culling)
    pub lifetime_culling: bool,
    pub gravity: f32,
    pub friction: f32,
    pub restitution: f32,
    pub spawn_speed: f32,
    pub particle_count: usize,
    pub particle_travel: f32,
    pub particle_fade_ms: f64,
    pub ball_fade_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            ball_diameter: BALL_SIZE,
            particle_diameter: PARTICLE_SIZE,
            max_balls: MAX_BALLS,
            ball_lifetime_ms: BALL_LIFETIME_MS,
            lifetime_culling: true,
            gravity: GRAVITY,
            friction: FRICTION,
            restitution: RESTITUTION,
            spawn_speed: SPAWN_SPEED,
            particle_count: PARTICLE_COUNT,
            particle_travel: PARTICLE_TRAVEL,
            particle_fade_ms: PARTICLE_FADE_MS,
            ball_fade_ms: BALL_FADE_MS,
        }
    }
}

impl SimConfig {
    /// Default tuning for a given screen size
    pub fn with_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that a screen of the given size can contain one ball
    pub fn check_screen(&self, width: f32, height: f32) -> Result<(), ConfigError> {
        if !width.is_finite() || width < self.ball_diameter {
            return Err(invalid(
                "screen_width",
                format!("{} is smaller than one ball ({})", width, self.ball_diameter),
            ));
        }
        if !height.is_finite() || height < self.ball_diameter {
            return Err(invalid(
                "screen_height",
                format!("{} is smaller than one ball ({})", height, self.ball_diameter),
            ));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ball_diameter.is_finite() && self.ball_diameter > 0.0) {
            return Err(invalid("ball_diameter", "must be positive".into()));
        }
        if !(self.particle_diameter.is_finite() && self.particle_diameter > 0.0) {
            return Err(invalid("particle_diameter", "must be positive".into()));
        }
        self.check_screen(self.screen_width, self.screen_height)?;
        for (field, n, max) in [
            ("max_balls", self.max_balls, MAX_BALLS_LIMIT),
            ("particle_count", self.particle_count, PARTICLE_COUNT_LIMIT),
        ] {
            if n == 0 || n > max {
                return Err(invalid(field, format!("{} is outside [1, {}]", n, max)));
            }
        }
        for (field, ms) in [
            ("ball_lifetime_ms", self.ball_lifetime_ms),
            ("particle_fade_ms", self.particle_fade_ms),
            ("ball_fade_ms", self.ball_fade_ms),
        ] {
            if !(ms.is_finite() && ms > 0.0) {
                return Err(invalid(field, format!("{} is not a positive duration", ms)));
            }
        }
        for (field, k) in [("friction", self.friction), ("restitution", self.restitution)] {
            if !(0.0..=1.0).contains(&k) {
                return Err(invalid(field, format!("{} is outside [0, 1]", k)));
            }
        }
        if !(self.spawn_speed.is_finite() && self.spawn_speed >= 0.0) {
            return Err(invalid("spawn_speed", "must be non-negative".into()));
        }
        for (field, v) in [("gravity", self.gravity), ("particle_travel", self.particle_travel)] {
            if !v.is_finite() {
                return Err(invalid(field, "must be finite".into()));
            }
        }
        Ok(())
    }
}

/// Upper bound on `max_balls`
pub const MAX_BALLS_LIMIT: usize = 1000;
/// Upper bound on `particle_count` per burst
pub const PARTICLE_COUNT_LIMIT: usize = 64;

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
