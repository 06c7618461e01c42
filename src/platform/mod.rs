//! Platform abstraction layer
//!
//! The host supplies three things to the screens:
//! - Time (`Clock`)
//! - Display-synchronized frame callbacks (`FrameScheduler`)
//! - Opening external links (`UrlOpener`)

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// Host-side failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// A host object (window, canvas, context) is missing
    Unavailable(&'static str),
    /// The host refused to open a URL
    OpenUrl(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(what) => write!(f, "{} is not available", what),
            Self::OpenUrl(url) => write!(f, "could not open {}", url),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Wall-clock time in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Milliseconds since construction, from `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Settable clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Registration handle for a requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Schedules one callback at the next display refresh
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Frame scheduler with no display: requests are recorded and pumped by the
/// caller. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct HeadlessFrames {
    inner: Rc<HeadlessInner>,
}

#[derive(Debug, Default)]
struct HeadlessInner {
    pending: Cell<Option<FrameHandle>>,
    next: Cell<i32>,
    requested: Cell<u32>,
    cancelled: Cell<u32>,
}

impl HeadlessFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending request, if any (i.e. "the display refreshed")
    pub fn take_pending(&self) -> Option<FrameHandle> {
        self.inner.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.inner.pending.get()
    }

    /// Total requests made
    pub fn requested(&self) -> u32 {
        self.inner.requested.get()
    }

    /// Total successful cancellations
    pub fn cancelled(&self) -> u32 {
        self.inner.cancelled.get()
    }
}

impl FrameScheduler for HeadlessFrames {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.inner.next.get() + 1);
        self.inner.next.set(handle.0);
        self.inner.requested.set(self.inner.requested.get() + 1);
        self.inner.pending.set(Some(handle));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.inner.pending.get() == Some(handle) {
            self.inner.pending.set(None);
            self.inner.cancelled.set(self.inner.cancelled.get() + 1);
        }
    }
}

/// Opens external links
pub trait UrlOpener {
    fn open_url(&mut self, url: &str) -> Result<(), PlatformError>;
}

/// Native stand-in: logs the link
#[derive(Debug, Clone, Copy, Default)]
pub struct LogUrlOpener;

impl UrlOpener for LogUrlOpener {
    fn open_url(&mut self, url: &str) -> Result<(), PlatformError> {
        log::info!("open link: {}", url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new(100.0);
        let view = clock.clone();
        clock.advance(16.5);
        assert_eq!(view.now_ms(), 116.5);
        view.set(0.0);
        assert_eq!(clock.now_ms(), 0.0);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_headless_frames() {
        let mut frames = HeadlessFrames::new();
        let probe = frames.clone();
        let h1 = frames.request_frame();
        assert_eq!(probe.pending(), Some(h1));
        assert_eq!(probe.take_pending(), Some(h1));
        assert_eq!(probe.pending(), None);

        let h2 = frames.request_frame();
        assert_ne!(h1, h2);
        frames.cancel_frame(h1); // stale
        assert_eq!(probe.cancelled(), 0);
        frames.cancel_frame(h2);
        assert_eq!(probe.cancelled(), 1);
        assert_eq!(probe.pending(), None);
        assert_eq!(probe.requested(), 2);
    }
}
