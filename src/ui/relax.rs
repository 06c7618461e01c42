//! Relax screen: touch to release orbs
//!
//! Ties the engine to the host: pointer events go through the input adapter,
//! each display refresh advances the engine once and re-registers the next
//! frame, and unmounting cancels the outstanding frame registration.

use crate::config::SimConfig;
use crate::input::{InputAdapter, PointerEvent};
use crate::platform::{Clock, FrameHandle, FrameScheduler};
use crate::renderer::RenderList;
use crate::sim::{EntityId, Lifecycle, Simulation};

pub struct RelaxScreen<C: Clock, F: FrameScheduler> {
    sim: Simulation,
    input: InputAdapter,
    clock: C,
    frames: F,
    /// Outstanding frame registration
    pending_frame: Option<FrameHandle>,
}

impl<C: Clock, F: FrameScheduler> RelaxScreen<C, F> {
    pub fn new(config: SimConfig, seed: u64, clock: C, frames: F) -> Self {
        Self {
            sim: Simulation::new(config, seed),
            input: InputAdapter::new(),
            clock,
            frames,
            pending_frame: None,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.sim.lifecycle()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    /// Screen became visible: open the gate and start the frame loop
    pub fn mount(&mut self) -> bool {
        if !self.sim.mount() {
            return false;
        }
        self.pending_frame = Some(self.frames.request_frame());
        true
    }

    /// Screen went away: close the gate and cancel the next frame.
    /// Safe to call repeatedly.
    pub fn unmount(&mut self) -> bool {
        let changed = self.sim.teardown();
        if let Some(handle) = self.pending_frame.take() {
            self.frames.cancel_frame(handle);
        }
        changed
    }

    pub fn on_pointer(&mut self, event: PointerEvent) -> Option<EntityId> {
        let now = self.clock.now_ms();
        self.input.handle(event, &mut self.sim, now)
    }

    /// Display refresh callback. Outside the active window nothing changes
    /// and no further frame is requested.
    pub fn on_frame(&mut self) -> bool {
        self.pending_frame = None;
        if !self.sim.is_active() {
            return false;
        }
        let now = self.clock.now_ms();
        self.sim.advance(now);
        self.pending_frame = Some(self.frames.request_frame());
        true
    }

    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.sim.resize(width, height)
    }

    pub fn render_list(&self) -> RenderList {
        RenderList::collect(self.sim.state())
    }
}

impl<C: Clock, F: FrameScheduler> Drop for RelaxScreen<C, F> {
    fn drop(&mut self) {
        self.unmount();
    }
}
