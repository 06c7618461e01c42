//! Destroy sequence: a ball fades and shrinks while a ring of particles flies out
//!
//! Both halves are timed transitions sampled by `advance`; each entity queues
//! its own removal when its transition completes.

use std::f32::consts::TAU;

use glam::Vec2;

use super::state::{BallPhase, EntityId, Particle, SimState};
use super::transition::Transition;

/// Start the destroy sequence for a ball.
///
/// Returns false if the ball is unknown or already dying.
pub fn begin_destroy(state: &mut SimState, id: EntityId, now_ms: f64) -> bool {
    let Some(index) = state.balls.iter().position(|b| b.id == id) else {
        return false;
    };
    if !state.balls[index].is_live() {
        return false;
    }

    let fade = Transition::new(now_ms, state.config.ball_fade_ms);
    let ball = &mut state.balls[index];
    ball.phase = BallPhase::Dying { fade };
    let (origin, color) = (ball.pos, ball.color);

    let count = state.config.particle_count;
    for i in 0..count {
        let particle = Particle {
            id: state.next_entity_id(),
            origin,
            pos: origin,
            direction: burst_direction(i, count),
            color,
            opacity: 1.0,
            scale: 1.0,
            motion: Transition::new(now_ms, state.config.particle_fade_ms),
        };
        state.particles.push(particle);
    }

    log::debug!("ball {} destroyed at ({:.1}, {:.1})", id, origin.x, origin.y);
    true
}

/// Unit direction of particle `i` out of `count`, angle `i * 2π / count`
pub fn burst_direction(i: usize, count: usize) -> Vec2 {
    let angle = i as f32 * TAU / count as f32;
    Vec2::new(angle.cos(), angle.sin())
}

/// Sample fade transitions; queue removal of anything that finished
pub(crate) fn step_transitions(state: &mut SimState, now_ms: f64) {
    for ball in &mut state.balls {
        if let BallPhase::Dying { fade } = ball.phase {
            let remaining = 1.0 - fade.value(now_ms);
            ball.opacity = remaining;
            ball.scale = remaining;
            if fade.is_complete(now_ms) {
                state.pending_removals.push(ball.id);
            }
        }
    }

    let travel = state.config.particle_travel;
    for particle in &mut state.particles {
        let t = particle.motion.value(now_ms);
        particle.pos = particle.origin + particle.direction * travel * t;
        particle.opacity = 1.0 - t;
        particle.scale = 1.0 - t;
        if particle.motion.is_complete(now_ms) {
            state.pending_removals.push(particle.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::state::Ball;

    fn state_with_ball() -> (SimState, EntityId) {
        let mut state = SimState::new(SimConfig::default(), 1);
        let id = state.next_entity_id();
        let color = state.sample_color();
        state
            .balls
            .push(Ball::new(id, Vec2::new(120.0, 200.0), Vec2::new(1.0, 1.0), color, 0.0));
        (state, id)
    }

    #[test]
    fn test_burst_is_eight_equally_spaced() {
        let (mut state, id) = state_with_ball();
        assert!(begin_destroy(&mut state, id, 1000.0));
        assert_eq!(state.particles.len(), 8);

        for (i, p) in state.particles.iter().enumerate() {
            let expected = i as f32 * TAU / 8.0;
            let angle = p.direction.y.atan2(p.direction.x).rem_euclid(TAU);
            assert!((angle - expected).abs() < 1e-4, "particle {i}: {angle} vs {expected}");
            assert!((p.direction.length() - 1.0).abs() < 1e-6);
            assert_eq!(p.pos, Vec2::new(120.0, 200.0));
            assert_eq!(p.color, state.balls[0].color);
        }
    }

    #[test]
    fn test_destroy_only_once() {
        let (mut state, id) = state_with_ball();
        assert!(begin_destroy(&mut state, id, 0.0));
        assert!(!begin_destroy(&mut state, id, 10.0));
        assert_eq!(state.particles.len(), 8);
        assert!(!begin_destroy(&mut state, 999, 10.0));
    }

    #[test]
    fn test_particles_fly_out_and_fade() {
        let (mut state, id) = state_with_ball();
        begin_destroy(&mut state, id, 0.0);

        step_transitions(&mut state, 250.0);
        let p = &state.particles[0]; // angle 0 -> +x
        assert!((p.pos.x - 170.0).abs() < 1e-3);
        assert!((p.opacity - 0.5).abs() < 1e-6);
        assert!(state.pending_removals.is_empty());

        step_transitions(&mut state, 500.0);
        let p = &state.particles[0];
        assert!((p.pos.x - 220.0).abs() < 1e-3);
        assert_eq!(p.opacity, 0.0);
        assert_eq!(p.scale, 0.0);
        // ball (300 ms) and all 8 particles (500 ms) finished
        assert_eq!(state.pending_removals.len(), 9);
    }

    #[test]
    fn test_ball_fade_completes_before_particles() {
        let (mut state, id) = state_with_ball();
        begin_destroy(&mut state, id, 0.0);

        step_transitions(&mut state, 300.0);
        assert_eq!(state.balls[0].opacity, 0.0);
        assert_eq!(state.balls[0].scale, 0.0);
        assert_eq!(state.pending_removals, vec![id]);
    }
}
