//! Per-frame simulation step
//!
//! Velocities are in pixels per frame; one call to `advance` is one display
//! refresh. Order within a ball's update is fixed:
//! bounce/clamp -> gravity -> friction -> commit.

use glam::Vec2;

use super::destroy::{begin_destroy, step_transitions};
use super::state::{Ball, EntityId, SimState};
use crate::config::SimConfig;

/// Advance the simulation by one frame at wall-clock time `now_ms`
pub fn advance(state: &mut SimState, now_ms: f64) {
    state.time_ms = now_ms;
    state.frames += 1;

    step_transitions(state, now_ms);

    let mut expired: Vec<EntityId> = Vec::new();
    for ball in state.balls.iter_mut().filter(|b| b.is_live()) {
        if state.config.lifetime_culling && ball.age(now_ms) > state.config.ball_lifetime_ms {
            expired.push(ball.id);
        } else {
            integrate_ball(ball, &state.config);
        }
    }
    for id in expired {
        log::debug!("ball {} reached end of life", id);
        begin_destroy(state, id, now_ms);
    }

    flush_removals(state);
    log::trace!(
        "frame {}: {} balls ({} live), {} particles",
        state.frames,
        state.balls.len(),
        state.live_count(),
        state.particles.len()
    );
}

/// Move one ball by its velocity, bouncing off the screen edges
pub fn integrate_ball(ball: &mut Ball, config: &SimConfig) {
    let max = Vec2::new(
        config.screen_width - config.ball_diameter,
        config.screen_height - config.ball_diameter,
    );
    let next = ball.pos + ball.vel;

    let (x, vx) = bounce_axis(next.x, ball.vel.x, max.x, config.restitution);
    let (y, vy) = bounce_axis(next.y, ball.vel.y, max.y, config.restitution);

    let mut vel = Vec2::new(vx, vy);
    vel.y += config.gravity;
    vel *= config.friction;

    ball.vel = vel;
    ball.pos = Vec2::new(x, y);
}

/// Wall test on one axis: at or past either wall, reflect the velocity with
/// energy loss and clamp the position into `[0, max]`
pub fn bounce_axis(pos: f32, vel: f32, max: f32, restitution: f32) -> (f32, f32) {
    if pos <= 0.0 || pos >= max {
        (pos.min(max).max(0.0), vel * -restitution)
    } else {
        (pos, vel)
    }
}

/// Drop every queued id from the ball and particle lists.
///
/// Unknown or already-removed ids are ignored.
pub(crate) fn flush_removals(state: &mut SimState) {
    if state.pending_removals.is_empty() {
        return;
    }
    let pending = std::mem::take(&mut state.pending_removals);
    state.balls.retain(|b| !pending.contains(&b.id));
    state.particles.retain(|p| !pending.contains(&p.id));
}
