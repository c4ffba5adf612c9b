//! Shape Bounce entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent};

    use shape_bounce::Settings;
    use shape_bounce::audio::AudioManager;
    use shape_bounce::platform::dom;
    use shape_bounce::platform::frame_loop::FrameLoop;
    use shape_bounce::platform::input::{Command, command_for_key};
    use shape_bounce::renderer::{RenderState, compose};
    use shape_bounce::sim::{Driver, FrameOutcome, RunToken, ShapeKind, Transition};

    /// App instance holding all state
    struct App {
        driver: Driver,
        render_state: Option<RenderState>,
        audio: AudioManager,
        frame_loop: FrameLoop,
        /// Token of the current run, if any
        token: Option<RunToken>,
        document: Document,
        /// Canvas size in CSS pixels
        logical_size: Vec2,
    }

    impl App {
        /// Render the current frame
        fn render(&mut self) {
            let frame = compose(&self.driver, self.logical_size);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update the live readouts
        fn update_hud(&self) {
            let stats = &self.driver.state().stats;
            dom::set_text(&self.document, "bounceCount", &stats.bounce_count.to_string());
            dom::set_text(&self.document, "bpmValue", &stats.tempo_bpm.to_string());
            dom::set_text(&self.document, "currentSpeed", &stats.speed_label());
        }

        /// Bring every control in line with the driver; rejected input snaps back
        fn sync_controls(&self) {
            let doc = &self.document;
            let settings = self.driver.settings();

            for (id, value) in [
                ("speedSlider", settings.speed),
                ("sizeSlider", settings.ball_size),
                ("tempoSlider", settings.tempo_increase),
            ] {
                if let Some(input) = dom::by_id::<HtmlInputElement>(doc, id) {
                    input.set_value_as_number(value as f64);
                }
            }
            dom::set_text(doc, "speedValue", &settings.speed.to_string());
            dom::set_text(doc, "sizeValue", &settings.ball_size.to_string());
            dom::set_text(doc, "tempoValue", &format!("{}%", settings.tempo_increase));

            for (id, on) in [
                ("trailToggle", settings.trails),
                ("glowToggle", settings.glow),
                ("particleToggle", settings.particles),
            ] {
                if let Some(el) = doc.get_element_by_id(id) {
                    dom::set_active(&el, on);
                }
            }

            let selected = self.driver.shape();
            for btn in dom::query_all(doc, ".shape-btn") {
                let kind = btn
                    .get_attribute("data-shape")
                    .as_deref()
                    .and_then(ShapeKind::from_str);
                dom::set_active(&btn, kind == Some(selected));
            }

            if let Some(btn) = doc.get_element_by_id("startBtn") {
                let running = self.driver.is_running();
                btn.set_text_content(Some(if running { "Stop" } else { "Start" }));
                dom::set_active(&btn, running);
            }
        }

        fn redraw(&mut self) {
            self.render();
            self.update_hud();
            self.sync_controls();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Shape Bounce starting...");

        let Some(document) = dom::document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = dom::by_id::<HtmlCanvasElement>(&document, "canvas") else {
            log::error!("No <canvas id=\"canvas\"> on the page");
            return;
        };

        let (logical_size, width, height) = fit_canvas(&canvas);
        let seed = js_sys::Date::now() as u64;
        let driver = Driver::new(seed, initial_settings(&canvas), logical_size);
        log::info!("Initialized with seed: {}", seed);

        let render_state = init_gpu(&canvas, width, height).await;

        let app = Rc::new(RefCell::new(App {
            driver,
            render_state,
            audio: AudioManager::new(),
            frame_loop: FrameLoop::new(),
            token: None,
            document: document.clone(),
            logical_size,
        }));

        setup_controls(&app, &document, &canvas);
        app.borrow_mut().redraw();

        log::info!("Shape Bounce ready");
    }

    /// Settings seeded from the canvas `data-settings` attribute, defaults otherwise
    fn initial_settings(canvas: &HtmlCanvasElement) -> Settings {
        let Some(json) = canvas.get_attribute("data-settings") else {
            return Settings::default();
        };
        Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring data-settings: {}", e);
            Settings::default()
        })
    }

    /// Match the backbuffer to the displayed size. Returns the CSS size and pixel size.
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (Vec2::new(client_w as f32, client_h as f32), width, height)
    }

    async fn init_gpu(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                None
            }
        }
    }

    fn setup_controls(app: &Rc<RefCell<App>>, document: &Document, canvas: &HtmlCanvasElement) {
        // Shape buttons
        for btn in dom::query_all(document, ".shape-btn") {
            let Some(kind) = btn
                .get_attribute("data-shape")
                .as_deref()
                .and_then(ShapeKind::from_str)
            else {
                log::warn!("Shape button without a known data-shape");
                continue;
            };
            let app = app.clone();
            dom::listen(&btn, "click", move |_| {
                apply_idle(&app, |d| d.select_shape(kind));
            });
        }

        // Sliders
        let sliders: [(&str, fn(&mut Driver, f32) -> bool); 3] = [
            ("speedSlider", Driver::set_speed),
            ("sizeSlider", Driver::set_ball_size),
            ("tempoSlider", Driver::set_tempo_increase),
        ];
        for (id, setter) in sliders {
            let Some(input) = dom::by_id::<HtmlInputElement>(document, id) else {
                continue;
            };
            let app = app.clone();
            let source = input.clone();
            dom::listen(&input, "input", move |_| {
                let value = source.value_as_number() as f32;
                apply_idle(&app, |d| setter(d, value));
            });
        }

        // Effect toggles
        let toggles: [(&str, fn(&mut Driver) -> bool); 3] = [
            ("trailToggle", Driver::toggle_trails),
            ("glowToggle", Driver::toggle_glow),
            ("particleToggle", Driver::toggle_particles),
        ];
        for (id, toggle) in toggles {
            if let Some(el) = document.get_element_by_id(id) {
                let app = app.clone();
                dom::listen(&el, "click", move |_| apply_idle(&app, toggle));
            }
        }

        // Start/stop button and canvas click
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let app = app.clone();
            dom::listen(&btn, "click", move |_| toggle_run(&app));
        }
        {
            let app = app.clone();
            dom::listen(canvas, "click", move |_| toggle_run(&app));
        }

        // Keyboard
        {
            let app = app.clone();
            dom::listen(document, "keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(command) = command_for_key(&key.code()) else {
                    return;
                };
                if command == Command::ToggleRun {
                    // Keep Space from scrolling the page or clicking a focused button
                    event.prevent_default();
                }
                handle_command(&app, command);
            });
        }

        // Window resize
        if let Some(window) = web_sys::window() {
            let app = app.clone();
            let canvas = canvas.clone();
            dom::listen(&window, "resize", move |_| resize(&app, &canvas));
        }
    }

    fn handle_command(app: &Rc<RefCell<App>>, command: Command) {
        match command {
            Command::ToggleRun => toggle_run(app),
            Command::Reset => apply_idle(app, Driver::reset),
            Command::SelectShape(kind) => apply_idle(app, |d| d.select_shape(kind)),
        }
    }

    /// Apply an idle-only change; a rejected change only resyncs the controls
    fn apply_idle(app: &Rc<RefCell<App>>, change: impl FnOnce(&mut Driver) -> bool) {
        let mut a = app.borrow_mut();
        if change(&mut a.driver) {
            a.render();
            a.update_hud();
        }
        a.sync_controls();
    }

    fn toggle_run(app: &Rc<RefCell<App>>) {
        let started = {
            let mut a = app.borrow_mut();
            let started = match a.driver.toggle() {
                Transition::Started(token) => {
                    a.audio.resume();
                    a.token = Some(token);
                    !a.frame_loop.is_pending()
                }
                Transition::Stopped => {
                    a.token = None;
                    a.frame_loop.cancel();
                    false
                }
            };
            a.redraw();
            started
        };
        if started {
            schedule(app);
        }
    }

    fn schedule(app: &Rc<RefCell<App>>) {
        let frame_loop = app.borrow().frame_loop.clone();
        let app = app.clone();
        frame_loop.schedule(move |_time| run_frame(app));
    }

    fn run_frame(app: Rc<RefCell<App>>) {
        let outcome = {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            let Some(token) = a.token else {
                return;
            };
            let outcome = a.driver.frame(token, &mut a.audio);
            if outcome == FrameOutcome::Reschedule {
                a.render();
                a.update_hud();
            }
            outcome
        };

        if outcome == FrameOutcome::Reschedule {
            schedule(&app);
        }
    }

    fn resize(app: &Rc<RefCell<App>>, canvas: &HtmlCanvasElement) {
        let (logical_size, width, height) = fit_canvas(canvas);
        let mut a = app.borrow_mut();
        a.logical_size = logical_size;
        a.driver.resize(logical_size);
        if let Some(render_state) = a.render_state.as_mut() {
            render_state.resize(width, height);
        }
        if !a.driver.is_running() {
            a.render();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use shape_bounce::Settings;
    use shape_bounce::audio::Tone;
    use shape_bounce::renderer::compose;
    use shape_bounce::sim::{Driver, FrameOutcome, ShapeKind};

    const FRAMES: u32 = 600;

    env_logger::init();
    log::info!("Shape Bounce (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to get the interactive page");

    let size = Vec2::new(800.0, 600.0);
    for kind in ShapeKind::ALL {
        let mut driver = Driver::new(42, Settings::default(), size);
        driver.select_shape(kind);
        let Some(token) = driver.start() else {
            continue;
        };

        let mut tones: Vec<Tone> = Vec::new();
        for _ in 0..FRAMES {
            if driver.frame(token, &mut tones) == FrameOutcome::Halt {
                break;
            }
        }
        driver.stop();

        let frame = compose(&driver, size);
        log::debug!("{}: last frame has {} draw commands", kind.as_str(), frame.commands().len());

        let stats = &driver.state().stats;
        println!(
            "{:<8} bounces {:>3}  tempo {:>3} bpm  speed {:>5}  tones {}",
            kind.as_str(),
            stats.bounce_count,
            stats.tempo_bpm,
            stats.speed_label(),
            tones.len()
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
