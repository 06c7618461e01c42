//! Ball simulation engine
//!
//! Owns the authoritative ball/particle state behind the readiness gate. Every
//! public operation is a silent no-op outside the Active lifecycle state.

use glam::Vec2;

use super::destroy::begin_destroy;
use super::lifecycle::Lifecycle;
use super::state::{Ball, EntityId, SimState};
use super::tick::{advance, flush_removals};
use crate::config::SimConfig;
use crate::palette::Rgba;

#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimState,
    lifecycle: Lifecycle,
}

impl Simulation {
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self {
            state: SimState::new(config, seed),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    /// Open the readiness gate
    pub fn mount(&mut self) -> bool {
        let changed = self.lifecycle.activate();
        if changed {
            log::info!(
                "simulation mounted ({}x{})",
                self.state.config.screen_width,
                self.state.config.screen_height
            );
        }
        changed
    }

    /// Close the readiness gate for good
    pub fn teardown(&mut self) -> bool {
        let changed = self.lifecycle.tear_down();
        if changed {
            log::info!("simulation torn down after {} frames", self.state.frames);
        }
        changed
    }

    /// Spawn a ball at screen coordinates with a random velocity and color.
    ///
    /// Returns the new ball's id, or None when the engine is not active.
    pub fn spawn(&mut self, x: f32, y: f32, now_ms: f64) -> Option<EntityId> {
        if !self.is_active() {
            return None;
        }
        let vel = self.state.sample_velocity();
        let color = self.state.sample_color();
        self.insert_ball(Vec2::new(x, y), vel, color, now_ms)
    }

    /// Spawn a ball with a chosen velocity and color (same capacity policy)
    pub fn spawn_with(
        &mut self,
        x: f32,
        y: f32,
        vel: Vec2,
        color: Rgba,
        now_ms: f64,
    ) -> Option<EntityId> {
        if !self.is_active() {
            return None;
        }
        self.insert_ball(Vec2::new(x, y), vel, color, now_ms)
    }

    fn insert_ball(&mut self, pos: Vec2, vel: Vec2, color: Rgba, now_ms: f64) -> Option<EntityId> {
        if !pos.is_finite() || !vel.is_finite() {
            log::debug!("dropping spawn at non-finite ({}, {})", pos.x, pos.y);
            return None;
        }

        // FIFO eviction: oldest live ball by spawn order
        if self.state.live_count() >= self.state.config.max_balls {
            if let Some(oldest) = self.state.balls.iter().find(|b| b.is_live()).map(|b| b.id) {
                log::debug!("evicting ball {} (cap {})", oldest, self.state.config.max_balls);
                begin_destroy(&mut self.state, oldest, now_ms);
            }
        }

        let id = self.state.next_entity_id();
        self.state.balls.push(Ball::new(id, pos, vel, color, now_ms));
        log::debug!("spawned ball {} at ({:.1}, {:.1})", id, pos.x, pos.y);
        Some(id)
    }

    /// Advance one frame. Returns false (and changes nothing) when not active.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        if !self.is_active() {
            return false;
        }
        advance(&mut self.state, now_ms);
        true
    }

    /// Remove a ball by id; absent ids are a no-op
    pub fn remove_ball(&mut self, id: EntityId) -> bool {
        if !self.is_active() {
            return false;
        }
        let before = self.state.balls.len();
        self.state.balls.retain(|b| b.id != id);
        before != self.state.balls.len()
    }

    /// Remove a particle by id; absent ids are a no-op
    pub fn remove_particle(&mut self, id: EntityId) -> bool {
        if !self.is_active() {
            return false;
        }
        let before = self.state.particles.len();
        self.state.particles.retain(|p| p.id != id);
        before != self.state.particles.len()
    }

    /// Queue a removal for the next frame's filter pass
    pub fn queue_removal(&mut self, id: EntityId) {
        if self.is_active() {
            self.state.pending_removals.push(id);
        }
    }

    /// Start the destroy sequence for a live ball
    pub fn destroy(&mut self, id: EntityId, now_ms: f64) -> bool {
        self.is_active() && begin_destroy(&mut self.state, id, now_ms)
    }

    /// Change the screen bounds; sizes that cannot hold a ball are rejected
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        match self.state.config.check_screen(width, height) {
            Ok(()) => {
                self.state.config.screen_width = width;
                self.state.config.screen_height = height;
                true
            }
            Err(e) => {
                log::warn!("ignoring resize: {}", e);
                false
            }
        }
    }

    /// Drop everything that is already queued for removal
    pub fn flush(&mut self) {
        if self.is_active() {
            flush_removals(&mut self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BallPhase;
    use proptest::prelude::*;

    fn active() -> Simulation {
        let mut sim = Simulation::new(SimConfig::with_screen(400.0, 800.0), 12345);
        sim.mount();
        sim
    }

    #[test]
    fn test_spawn_before_mount_dropped() {
        let mut sim = Simulation::new(SimConfig::default(), 1);
        assert_eq!(sim.spawn(10.0, 10.0, 0.0), None);
        assert!(!sim.advance(16.0));
        assert!(sim.state().balls.is_empty());
        assert_eq!(sim.state().frames, 0);
    }

    #[test]
    fn test_spawn_unclamped_until_first_step() {
        let mut sim = active();
        let id = sim.spawn(-30.0, 5000.0, 0.0).expect("active");
        assert_eq!(sim.state().ball(id).map(|b| b.pos), Some(Vec2::new(-30.0, 5000.0)));

        sim.advance(16.0);
        let pos = sim.state().ball(id).map(|b| b.pos).expect("ball");
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.y, 750.0);
    }

    #[test]
    fn test_spawn_non_finite_dropped() {
        let mut sim = active();
        assert_eq!(sim.spawn(f32::NAN, 100.0, 0.0), None);
        assert_eq!(sim.spawn(100.0, f32::INFINITY, 0.0), None);
        let red = Rgba::from_rgb8(255, 0, 0);
        assert_eq!(sim.spawn_with(10.0, 10.0, Vec2::new(f32::NAN, 0.0), red, 0.0), None);
        assert_eq!(sim.state().balls.len(), 0);

        let id = sim.spawn(100.0, 100.0, 0.0).expect("active");
        for i in 1..10 {
            sim.advance(i as f64 * 16.0);
        }
        let pos = sim.state().ball(id).map(|b| b.pos).expect("ball");
        assert!(pos.is_finite());
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut sim = active();
        let ids: Vec<_> = (0..20)
            .map(|i| sim.spawn(100.0, 100.0, i as f64).expect("active"))
            .collect();
        assert_eq!(sim.state().live_count(), 20);

        let newest = sim.spawn(200.0, 200.0, 20.0).expect("active");
        assert_eq!(sim.state().live_count(), 20);

        let oldest = sim.state().ball(ids[0]).expect("still fading");
        assert!(matches!(oldest.phase, BallPhase::Dying { .. }));
        assert!(ids[1..].iter().all(|id| sim.state().ball(*id).is_some_and(|b| b.is_live())));
        assert_eq!(sim.state().balls.last().map(|b| b.id), Some(newest));
        assert_eq!(sim.state().particles.len(), 8);

        // the next spawn evicts the next oldest, not the fading one again
        sim.spawn(200.0, 200.0, 21.0);
        assert!(!sim.state().ball(ids[1]).is_some_and(|b| b.is_live()));
        assert_eq!(sim.state().particles.len(), 16);
    }

    #[test]
    fn test_evicted_ball_removed_after_fade() {
        let mut sim = active();
        for i in 0..21 {
            sim.spawn(100.0, 100.0, i as f64);
        }
        let evicted = sim.state().balls[0].id;
        sim.advance(20.0 + 300.0);
        assert!(sim.state().ball(evicted).is_none());
        assert_eq!(sim.state().balls.len(), 20);
    }

    #[test]
    fn test_removal_idempotent() {
        let mut sim = active();
        let id = sim.spawn(50.0, 50.0, 0.0).expect("active");
        assert!(sim.remove_ball(id));
        assert!(!sim.remove_ball(id));
        assert!(!sim.remove_particle(777));

        sim.queue_removal(id);
        sim.flush();
        assert!(sim.state().balls.is_empty());
    }

    #[test]
    fn test_teardown_freezes_state() {
        let mut sim = active();
        sim.spawn(50.0, 50.0, 0.0);
        sim.advance(16.0);
        assert!(sim.teardown());
        let frames = sim.state().frames;
        let pos = sim.state().balls[0].pos;

        assert!(!sim.teardown());
        assert!(!sim.advance(32.0));
        assert_eq!(sim.spawn(10.0, 10.0, 32.0), None);
        assert!(!sim.destroy(sim.state().balls[0].id, 32.0));
        assert_eq!(sim.state().frames, frames);
        assert_eq!(sim.state().balls[0].pos, pos);
        assert!(!sim.mount());
    }

    #[test]
    fn test_spawn_with_example_velocity() {
        let mut sim = active();
        let color = crate::palette::PALETTE[0];
        let id = sim
            .spawn_with(100.0, 100.0, Vec2::new(5.0, 5.0), color, 0.0)
            .expect("active");
        sim.advance(16.0);
        let ball = sim.state().ball(id).expect("ball");
        assert!((ball.pos - Vec2::new(105.0, 105.0)).length() < 1e-4);
        assert!((ball.vel - Vec2::new(4.95, 5.445)).length() < 1e-4);
    }

    #[test]
    fn test_resize_rejects_tiny_screen() {
        let mut sim = active();
        assert!(!sim.resize(20.0, 800.0));
        assert_eq!(sim.state().config.screen_width, 400.0);
        assert!(sim.resize(1024.0, 768.0));
        assert_eq!(sim.state().max_corner(), Vec2::new(974.0, 718.0));
    }

    #[test]
    fn test_determinism() {
        let mut a = active();
        let mut b = active();
        for i in 0..30 {
            let t = i as f64 * 16.0;
            a.spawn(i as f32 * 10.0, 300.0, t);
            b.spawn(i as f32 * 10.0, 300.0, t);
            a.advance(t);
            b.advance(t);
        }
        assert_eq!(a.state().balls.len(), b.state().balls.len());
        for (x, y) in a.state().balls.iter().zip(&b.state().balls) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.color, y.color);
        }
    }

    proptest! {
        #[test]
        fn prop_live_count_never_exceeds_cap(
            spawns in prop::collection::vec((0.0f32..400.0, 0.0f32..800.0, any::<bool>()), 1..120),
        ) {
            let mut sim = active();
            let mut now = 0.0;
            for (x, y, tick) in spawns {
                now += 5.0;
                sim.spawn(x, y, now);
                if tick {
                    sim.advance(now);
                }
                prop_assert!(sim.state().live_count() <= 20);
            }
        }

        #[test]
        fn prop_overflow_evicts_smallest_created_at(extra in 1usize..40) {
            let mut sim = active();
            for i in 0..(20 + extra) {
                let live_before: Vec<(EntityId, f64)> = sim
                    .state()
                    .balls
                    .iter()
                    .filter(|b| b.is_live())
                    .map(|b| (b.id, b.created_at))
                    .collect();
                sim.spawn(100.0, 100.0, i as f64);
                if live_before.len() == 20 {
                    let oldest = live_before
                        .iter()
                        .min_by(|a, b| a.1.total_cmp(&b.1))
                        .map(|b| b.0)
                        .expect("non-empty");
                    prop_assert!(!sim.state().ball(oldest).is_some_and(|b| b.is_live()));
                    let evicted = live_before
                        .iter()
                        .filter(|(id, _)| !sim.state().ball(*id).is_some_and(|b| b.is_live()))
                        .count();
                    prop_assert_eq!(evicted, 1);
                }
            }
        }
    }
}
