//! Pointer input
//!
//! Press and drag both spawn: every pointer-down and every pointer-move while
//! pressed asks the engine for a new ball at the event's local coordinates.

use serde::{Deserialize, Serialize};

use crate::sim::{EntityId, Simulation};

/// A pointer event in screen-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Cancel,
}

/// Maps pointer events to spawn requests
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    engaged: bool,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between a Down and the next Up/Cancel
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Route one event. Returns the spawned ball, if any.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        sim: &mut Simulation,
        now_ms: f64,
    ) -> Option<EntityId> {
        match event {
            PointerEvent::Down { x, y } => {
                self.engaged = true;
                sim.spawn(x, y, now_ms)
            }
            PointerEvent::Move { x, y } if self.engaged => sim.spawn(x, y, now_ms),
            PointerEvent::Move { .. } => None,
            PointerEvent::Up | PointerEvent::Cancel => {
                self.engaged = false;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use glam::Vec2;

    fn sim() -> Simulation {
        let mut sim = Simulation::new(SimConfig::default(), 9);
        sim.mount();
        sim
    }

    #[test]
    fn test_drag_spawns_along_path() {
        let mut sim = sim();
        let mut input = InputAdapter::new();

        assert!(input.handle(PointerEvent::Down { x: 10.0, y: 20.0 }, &mut sim, 0.0).is_some());
        for i in 1..=4 {
            let x = 10.0 + i as f32 * 15.0;
            assert!(input.handle(PointerEvent::Move { x, y: 20.0 }, &mut sim, i as f64).is_some());
        }
        input.handle(PointerEvent::Up, &mut sim, 5.0);

        let xs: Vec<f32> = sim.state().balls.iter().map(|b| b.pos.x).collect();
        assert_eq!(xs, [10.0, 25.0, 40.0, 55.0, 70.0]);
        assert_eq!(sim.state().balls[0].pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_hover_does_not_spawn() {
        let mut sim = sim();
        let mut input = InputAdapter::new();
        assert_eq!(input.handle(PointerEvent::Move { x: 1.0, y: 1.0 }, &mut sim, 0.0), None);

        input.handle(PointerEvent::Down { x: 1.0, y: 1.0 }, &mut sim, 0.0);
        input.handle(PointerEvent::Cancel, &mut sim, 1.0);
        assert!(!input.is_engaged());
        assert_eq!(input.handle(PointerEvent::Move { x: 2.0, y: 2.0 }, &mut sim, 2.0), None);
        assert_eq!(sim.state().balls.len(), 1);
    }

    #[test]
    fn test_release_then_lost_capture_stays_disengaged() {
        let mut sim = sim();
        let mut input = InputAdapter::new();
        input.handle(PointerEvent::Down { x: 5.0, y: 5.0 }, &mut sim, 0.0);
        input.handle(PointerEvent::Move { x: 500.0, y: 5.0 }, &mut sim, 1.0);
        input.handle(PointerEvent::Up, &mut sim, 2.0);
        input.handle(PointerEvent::Cancel, &mut sim, 2.0);
        assert!(!input.is_engaged());

        for i in 0..5 {
            let x = 20.0 + i as f32;
            assert_eq!(input.handle(PointerEvent::Move { x, y: 5.0 }, &mut sim, 3.0), None);
        }
        assert_eq!(sim.state().balls.len(), 2);
    }

    #[test]
    fn test_inactive_engine_ignores_input() {
        let mut sim = Simulation::new(SimConfig::default(), 9);
        let mut input = InputAdapter::new();
        assert_eq!(input.handle(PointerEvent::Down { x: 1.0, y: 1.0 }, &mut sim, 0.0), None);
        assert!(sim.state().balls.is_empty());
    }
}
