//! Inner Peace entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, PointerEvent as DomPointerEvent};

    use inner_peace::SimConfig;
    use inner_peace::input::PointerEvent;
    use inner_peace::platform::web::{AnimationFrames, DateClock, WindowUrlOpener, window};
    use inner_peace::platform::PlatformError;
    use inner_peace::renderer::canvas::CanvasPainter;
    use inner_peace::ui::{HomeScreen, RelaxScreen, Screen};

    type Relax = RelaxScreen<DateClock, AnimationFrames>;

    /// App instance holding all state
    struct App {
        screen: Screen,
        home: HomeScreen,
        relax: Option<Relax>,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        /// Canvas size in CSS pixels
        size: (f32, f32),
        this: Weak<RefCell<App>>,
    }

    impl App {
        /// Build a fresh relax screen whose frame callback points back at this app
        fn new_relax(&self) -> Result<Relax, PlatformError> {
            let weak = self.this.clone();
            let frames = AnimationFrames::new(move |_time: f64| {
                if let Some(app) = weak.upgrade() {
                    app.borrow_mut().on_frame();
                }
            })?;
            let mut config = SimConfig::with_screen(self.size.0, self.size.1);
            if let Err(e) = config.validate() {
                log::warn!("{}; using the default screen size", e);
                config = SimConfig::default();
            }
            let seed = js_sys::Date::now() as u64;
            Ok(RelaxScreen::new(config, seed, DateClock, frames))
        }

        fn on_frame(&mut self) {
            let Some(relax) = self.relax.as_mut() else {
                return;
            };
            if relax.on_frame() {
                self.painter.paint(&relax.render_list());
            }
        }

        fn show(&mut self, screen: Screen) {
            if screen == Screen::Relax && self.relax.is_some() {
                return;
            }
            log::info!("show {} (was {})", screen.as_str(), self.screen.as_str());

            // leaving relax tears the engine down; a later visit starts fresh
            if let Some(mut relax) = self.relax.take() {
                relax.unmount();
            }
            set_visible("home", screen == Screen::Home);
            set_visible("relax", screen == Screen::Relax);
            // the canvas only has a layout size once visible
            self.resize();
            if screen == Screen::Relax {
                match self.new_relax() {
                    Ok(mut relax) => {
                        relax.mount();
                        self.relax = Some(relax);
                    }
                    Err(e) => log::error!("cannot start relax screen: {}", e),
                }
            }
            self.screen = screen;
        }

        fn resize(&mut self) {
            let Ok(window) = window() else { return };
            let dpr = window.device_pixel_ratio();
            let w = self.canvas.client_width();
            let h = self.canvas.client_height();
            let (pw, ph) = ((w as f64 * dpr) as u32, (h as f64 * dpr) as u32);
            self.canvas.set_width(pw);
            self.canvas.set_height(ph);
            self.painter.resize(pw, ph, dpr);
            self.size = (w as f32, h as f32);
            if let Some(relax) = self.relax.as_mut() {
                relax.resize(w as f32, h as f32);
            }
        }

        fn pointer(&mut self, event: PointerEvent) {
            if let Some(relax) = self.relax.as_mut() {
                relax.on_pointer(event);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn listen<E: JsCast + 'static>(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Inner Peace starting...");

        let window = window()?;
        let document = window.document().ok_or(PlatformError::Unavailable("document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(PlatformError::Unavailable("canvas"))?
            .dyn_into()
            .map_err(|_| PlatformError::Unavailable("canvas"))?;

        let painter = CanvasPainter::new(&canvas, window.device_pixel_ratio())?;
        let home = HomeScreen::new();
        fill_home(&document, &home);

        let app = Rc::new_cyclic(|this| {
            RefCell::new(App {
                screen: Screen::Home,
                home,
                relax: None,
                painter,
                canvas: canvas.clone(),
                size: (0.0, 0.0),
                this: this.clone(),
            })
        });
        app.borrow_mut().resize();

        // Pointer input (local coordinates)
        {
            let app = app.clone();
            let target = canvas.clone();
            listen(&canvas, "pointerdown", move |e: DomPointerEvent| {
                e.prevent_default();
                // keep receiving the release even if it happens off the canvas
                let _ = target.set_pointer_capture(e.pointer_id());
                let (x, y) = (e.offset_x() as f32, e.offset_y() as f32);
                app.borrow_mut().pointer(PointerEvent::Down { x, y });
            });
        }
        {
            let app = app.clone();
            listen(&canvas, "pointermove", move |e: DomPointerEvent| {
                let (x, y) = (e.offset_x() as f32, e.offset_y() as f32);
                app.borrow_mut().pointer(PointerEvent::Move { x, y });
            });
        }
        let releases = [
            ("pointerup", PointerEvent::Up),
            ("pointercancel", PointerEvent::Cancel),
            ("lostpointercapture", PointerEvent::Cancel),
        ];
        for (name, event) in releases {
            let app = app.clone();
            listen(&canvas, name, move |_e: DomPointerEvent| {
                app.borrow_mut().pointer(event);
            });
        }

        // Tabs
        for screen in Screen::ALL {
            let id = format!("tab-{}", screen.as_str().to_lowercase());
            if let Some(tab) = document.get_element_by_id(&id) {
                let app = app.clone();
                listen(&tab, "click", move |_e: web_sys::MouseEvent| {
                    app.borrow_mut().show(screen);
                });
            }
        }

        // Journey button
        if let Some(btn) = document.get_element_by_id("journey-btn") {
            let app = app.clone();
            listen(&btn, "click", move |_e: web_sys::MouseEvent| {
                if let Err(e) = app.borrow().home.begin_journey(&mut WindowUrlOpener) {
                    log::warn!("{}", e);
                }
            });
        }

        {
            let app = app.clone();
            listen(&window, "resize", move |_e: web_sys::Event| {
                app.borrow_mut().resize();
            });
        }

        let start = window
            .location()
            .hash()
            .ok()
            .and_then(|h| Screen::from_str(&h))
            .unwrap_or_default();
        app.borrow_mut().show(start);

        log::info!("Inner Peace running!");
        Ok(())
    }

    fn fill_home(document: &Document, home: &HomeScreen) {
        if let Some(el) = document.get_element_by_id("home-title") {
            el.set_text_content(Some(home.title));
        }
        if let Some(el) = document.get_element_by_id("journey-btn") {
            el.set_text_content(Some(home.button_label));
        }
        let Some(body) = document.get_element_by_id("home-messages") else {
            return;
        };
        for paragraph in &home.paragraphs {
            if let Ok(p) = document.create_element("p") {
                p.set_text_content(Some(paragraph.text));
                if paragraph.highlight {
                    let _ = p.set_attribute("class", "highlight");
                }
                let _ = body.append_child(&p);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("startup failed: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;

    env_logger::init();
    log::info!("Inner Peace (native) starting...");
    log::info!("Native mode runs a scripted headless session - run with `trunk serve` for the web version");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path))?;
            let config = inner_peace::SimConfig::from_json(&json)
                .with_context(|| format!("loading config {}", path))?;
            log::info!("loaded config from {}", path);
            config
        }
        None => inner_peace::SimConfig::default(),
    };

    headless::run(config, 600);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use inner_peace::SimConfig;
    use inner_peace::input::PointerEvent;
    use inner_peace::platform::{Clock, HeadlessFrames, ManualClock};
    use inner_peace::ui::RelaxScreen;

    /// 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Drag a finger across the screen, then watch everything settle and fade
    pub fn run(config: SimConfig, total_frames: usize) {
        let clock = ManualClock::new(0.0);
        let frames = HeadlessFrames::new();
        let (w, h) = (config.screen_width, config.screen_height);
        let mut screen = RelaxScreen::new(config, 0x5EED, clock.clone(), frames.clone());
        screen.mount();

        let drag_frames = 90;
        screen.on_pointer(PointerEvent::Down { x: w * 0.1, y: h * 0.2 });

        let mut peak_balls = 0;
        let mut peak_particles = 0;
        for frame in 0..total_frames {
            clock.advance(FRAME_MS);
            if frame < drag_frames {
                let t = frame as f32 / drag_frames as f32;
                screen.on_pointer(PointerEvent::Move {
                    x: w * (0.1 + 0.8 * t),
                    y: h * (0.2 + 0.3 * (t * std::f32::consts::TAU).sin().abs()),
                });
            } else if frame == drag_frames {
                screen.on_pointer(PointerEvent::Up);
            }

            if frames.take_pending().is_some() {
                screen.on_frame();
            }

            let state = screen.simulation().state();
            peak_balls = peak_balls.max(state.live_count());
            peak_particles = peak_particles.max(state.particles.len());
            if frame % 60 == 0 {
                log::info!(
                    "t={:>5.0}ms live={:>2} fading={:>2} particles={:>3}",
                    clock.now_ms(),
                    state.live_count(),
                    state.balls.len() - state.live_count(),
                    state.particles.len()
                );
            }
        }

        let last = screen.render_list();
        match serde_json::to_string(&last) {
            Ok(json) => log::debug!("final frame: {}", json),
            Err(e) => log::warn!("could not encode final frame: {}", e),
        }
        screen.unmount();

        println!(
            "{} frames, peak {} live balls, peak {} particles, {} items on the last frame",
            total_frames,
            peak_balls,
            peak_particles,
            last.items.len()
        );
    }
}
