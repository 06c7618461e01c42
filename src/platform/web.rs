//! Browser implementations of the platform seams

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::{Clock, FrameHandle, FrameScheduler, PlatformError, UrlOpener};

pub fn window() -> Result<Window, PlatformError> {
    web_sys::window().ok_or(PlatformError::Unavailable("window"))
}

/// `Date.now()` clock
#[derive(Debug, Clone, Copy, Default)]
pub struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// `requestAnimationFrame` scheduler that always invokes the same callback
pub struct AnimationFrames {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrames {
    pub fn new(callback: impl FnMut(f64) + 'static) -> Result<Self, PlatformError> {
        Ok(Self {
            window: window()?,
            callback: Closure::<dyn FnMut(f64)>::new(callback),
        })
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&mut self) -> FrameHandle {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle.0, e);
        }
    }
}

/// Opens links in a new browser tab
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowUrlOpener;

impl UrlOpener for WindowUrlOpener {
    fn open_url(&mut self, url: &str) -> Result<(), PlatformError> {
        window()?
            .open_with_url_and_target(url, "_blank")
            .map_err(|_| PlatformError::OpenUrl(url.to_string()))?;
        Ok(())
    }
}
