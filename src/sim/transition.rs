//! Timed transitions
//!
//! A transition is pure data: it is sampled with the current time instead of
//! running on its own timer, so the simulation stays deterministic.

use serde::{Deserialize, Serialize};

/// Easing curve applied to raw progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress in [0, 1] to eased progress in [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// A transition started at `start_ms` lasting `duration_ms`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Transition {
    pub fn new(start_ms: f64, duration_ms: f64) -> Self {
        Self {
            start_ms,
            duration_ms,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Eased progress in [0, 1]
    pub fn value(&self, now_ms: f64) -> f32 {
        self.easing.apply(self.progress(now_ms))
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamped() {
        let t = Transition::new(1000.0, 500.0);
        assert_eq!(t.progress(900.0), 0.0);
        assert_eq!(t.progress(1250.0), 0.5);
        assert_eq!(t.progress(2000.0), 1.0);
        assert!(!t.is_complete(1499.0));
        assert!(t.is_complete(1500.0));
        assert_eq!(t.end_ms(), 1500.0);
    }

    #[test]
    fn test_ease_in_out_shape() {
        let e = Easing::EaseInOut;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        // slow start, monotonic
        assert!(e.apply(0.1) < 0.1);
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = e.apply(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_linear_value() {
        let t = Transition::new(0.0, 300.0).with_easing(Easing::Linear);
        assert!((t.value(150.0) - 0.5).abs() < 1e-6);
    }
}
