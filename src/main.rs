//! Circles entry point
//!
//! Web: WebGPU canvas plus DOM overlays, driven by requestAnimationFrame.
//! Native: a headless session played by the demo bot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, PointerEvent};

    use circles::audio::AudioManager;
    use circles::consts::HIGH_SCORE_KEY;
    use circles::persistence::{LocalStore, Observable};
    use circles::platform::DisplayMetrics;
    use circles::platform::web::read_metrics;
    use circles::renderer::{Overlay, OverlayAnimator, Scene, SdfRenderState, build_scene};
    use circles::sim::{Game, GameEvent, choose_tap};
    use circles::{Settings, Tuning};

    type WebGame = Game<Observable<LocalStore>, AudioManager>;

    struct App {
        game: WebGame,
        animator: OverlayAnimator,
        render_state: Option<SdfRenderState>,
        canvas: HtmlCanvasElement,
        metrics: DisplayMetrics,
        settings: Settings,
        last_time: f64,
        /// Bot taps the active circle
        demo_mode: bool,
    }

    impl App {
        fn update(&mut self, dt: f32) {
            self.game.advance(dt);

            if self.demo_mode {
                if let Some(point) = choose_tap(self.game.state()) {
                    self.game.tap(point);
                }
            }

            for event in self.game.take_events() {
                match event {
                    GameEvent::PhaseChanged { from, to } => {
                        log::debug!("Phase {} -> {}", from.as_str(), to.as_str());
                    }
                    GameEvent::BoardFull => log::info!("Board full at level {}", self.game.level()),
                    GameEvent::Reset => self.animator.on_reset(),
                    _ => {}
                }
            }

            self.animator.update(self.game.phase(), dt);
        }

        fn render(&mut self) {
            let scene = build_scene(self.game.state(), &self.animator, self.game.high_score());
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
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
            update_overlays(&scene);
        }

        /// Re-read canvas geometry after a resize or rotation
        fn refresh_metrics(&mut self) {
            let Some(window) = web_sys::window() else { return };
            self.metrics = read_metrics(&window, &self.canvas);
            let (width, height) = self.metrics.device_size();
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(width, height);
            }
            self.game.set_bounds(self.metrics.bounds());
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element(id: &str) -> Option<HtmlElement> {
        document()?.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_hidden(el: &HtmlElement, hidden: bool) {
        let _ = el.class_list().toggle_with_force("hidden", hidden);
    }

    fn set_slide(el: &HtmlElement, offset: f32) {
        let _ = el
            .style()
            .set_property("transform", &format!("translateY({}%)", offset * 100.0));
    }

    fn set_high_score_text(value: i64) {
        if let Some(el) = element("high-score") {
            el.set_text_content(Some(&format!("High Score: {}", value)));
        }
    }

    /// Mirror the scene's overlays into the DOM
    fn update_overlays(scene: &Scene) {
        if let Some(banner) = element("level-banner") {
            match scene.level_banner() {
                Some((level, offset)) => {
                    banner.set_text_content(Some(&format!("Level {}", level)));
                    set_slide(&banner, offset);
                    set_hidden(&banner, false);
                }
                None => set_hidden(&banner, true),
            }
        }

        if let Some(panel) = element("end-panel") {
            let (title, offset) = match scene.end_panel() {
                Some(Overlay::Won { .. }) => (Some("YOU WIN"), 0.0),
                Some(Overlay::Lost { offset, .. }) => (Some("YOU LOSE"), *offset),
                _ => (None, 0.0),
            };
            match title {
                Some(title) => {
                    if let Some(el) = element("end-title") {
                        el.set_text_content(Some(title));
                    }
                    set_slide(&panel, offset);
                    set_hidden(&panel, false);
                }
                None => {
                    set_hidden(&panel, true);
                    if let Some(dialog) = element("confirm-dialog") {
                        set_hidden(&dialog, true);
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Circles starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = element("loading") {
            set_hidden(&loading, true);
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let metrics = read_metrics(&window, &canvas);
        let (width, height) = metrics.device_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let tuning = Tuning::default();

        let mut store = Observable::new(LocalStore::new());
        store.subscribe(HIGH_SCORE_KEY, set_high_score_text);

        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let seed = js_sys::Date::now() as u64;
        let mut animator = OverlayAnimator::new(&tuning);
        animator.set_reduced_motion(settings.reduced_motion);
        let game = Game::with_tuning(metrics.bounds(), tuning, store, audio, seed);
        set_high_score_text(game.high_score() as i64);

        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            animator,
            render_state: None,
            canvas: canvas.clone(),
            metrics,
            settings,
            last_time: 0.0,
            demo_mode: false,
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match SdfRenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {:?}", e),
                        }
                    }
                    Err(e) => log::error!("No graphics adapter: {:?}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {:?}", e),
        }

        setup_input_handlers(&canvas, app.clone());
        setup_overlay_buttons(app.clone());

        app.borrow_mut().game.start();
        request_animation_frame(app);

        log::info!("Circles running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Tap / click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.game.sound_mut().resume();
                let point = a
                    .metrics
                    .to_device_point(event.offset_x() as f64, event.offset_y() as f64);
                let outcome = a.game.tap(point);
                log::debug!("Tap at {:?}: {:?}", point, outcome);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize / rotation
        {
            let app = app.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().refresh_metrics();
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    "i" | "I" => {
                        a.demo_mode = !a.demo_mode;
                        log::info!("Demo mode: {}", a.demo_mode);
                    }
                    "m" | "M" => {
                        a.settings.muted = !a.settings.muted;
                        let settings = a.settings.clone();
                        a.game.sound_mut().apply_settings(&settings);
                        settings.save();
                        log::info!("Muted: {}", settings.muted);
                    }
                    "r" | "R" if a.game.phase().is_finished() => {
                        a.game.reset();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = element(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_overlay_buttons(app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            on_click("reset-btn", move || {
                let mut a = app.borrow_mut();
                if a.game.phase().is_finished() {
                    a.game.reset();
                }
            });
        }

        // Clearing the high score asks first
        on_click("clear-btn", || {
            if let Some(dialog) = element("confirm-dialog") {
                set_hidden(&dialog, false);
            }
        });
        on_click("confirm-cancel", || {
            if let Some(dialog) = element("confirm-dialog") {
                set_hidden(&dialog, true);
            }
        });
        on_click("confirm-ok", move || {
            app.borrow_mut().game.clear_high_score();
            if let Some(dialog) = element("confirm-dialog") {
                set_hidden(&dialog, true);
            }
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            a.last_time = time;

            // Long gaps (background tab) still fire at most one pending delay
            a.update(dt.min(1.0));
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::Result;
    use clap::Parser;

    use circles::audio::SilentPlayer;
    use circles::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
    use circles::sim::{Bounds, Game, GameEvent, GamePhase, Insets, choose_tap};
    use circles::Tuning;

    /// Play a headless Circles session with the demo bot
    #[derive(Parser, Debug)]
    #[command(name = "circles", version)]
    struct Args {
        /// Canvas width in device pixels
        #[arg(long, default_value_t = 1080)]
        width: u32,
        /// Canvas height in device pixels
        #[arg(long, default_value_t = 1920)]
        height: u32,
        /// Device pixels per density-independent unit
        #[arg(long, default_value_t = 2.0)]
        density: f32,
        #[arg(long, default_value_t = 0)]
        inset_left: u32,
        #[arg(long, default_value_t = 0)]
        inset_top: u32,
        #[arg(long, default_value_t = 0)]
        inset_right: u32,
        #[arg(long, default_value_t = 0)]
        inset_bottom: u32,
        /// RNG seed (defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,
        /// JSON file holding the high score
        #[arg(long)]
        store: Option<PathBuf>,
        /// JSON tuning overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Stop after reaching this level
        #[arg(long)]
        max_levels: Option<u32>,
        /// Tap the oldest circle at this level instead of the newest
        #[arg(long)]
        mistake_at: Option<u32>,
        /// Reset the stored high score before playing
        #[arg(long)]
        clear_high_score: bool,
    }

    fn open_store(path: Option<PathBuf>) -> Box<dyn KeyValueStore> {
        match path {
            Some(path) => match JsonFileStore::open(&path) {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::warn!("{e:#} - high score will not persist");
                    Box::new(MemoryStore::new())
                }
            },
            None => Box::new(MemoryStore::new()),
        }
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path).unwrap_or_else(|e| {
                log::warn!("{e:#} - using default tuning");
                Tuning::default()
            }),
            None => Tuning::default(),
        };

        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });

        anyhow::ensure!(args.density > 0.0, "--density must be positive");
        let bounds = Bounds::new(args.width, args.height, args.density).with_insets(Insets {
            left: args.inset_left,
            top: args.inset_top,
            right: args.inset_right,
            bottom: args.inset_bottom,
        });

        let step = tuning.add_circle_delay;
        let mut game = Game::with_tuning(bounds, tuning, open_store(args.store), SilentPlayer, seed);
        if args.clear_high_score {
            game.clear_high_score();
        }
        log::info!(
            "Circles (native) {}x{} @{} seed {} - high score {}",
            bounds.width,
            bounds.height,
            bounds.density,
            seed,
            game.high_score()
        );

        game.start();
        loop {
            game.advance(step);
            for event in game.take_events() {
                match event {
                    GameEvent::CircleAdded(c) => {
                        log::debug!("Level {}: circle at ({}, {}) r={}", game.level(), c.x, c.y, c.r)
                    }
                    GameEvent::HighScoreChanged(score) => log::info!("High score {}", score),
                    _ => {}
                }
            }

            match game.phase() {
                GamePhase::Idle => {
                    if args.max_levels.is_some_and(|max| game.level() >= max) {
                        break;
                    }
                    let mistake = args.mistake_at == Some(game.level()) && game.circles().len() > 1;
                    let point = if mistake {
                        game.circles().first().map(|c| c.center())
                    } else {
                        choose_tap(game.state())
                    };
                    match point {
                        Some(point) => {
                            game.tap(point);
                        }
                        None => break,
                    }
                }
                GamePhase::AddingCircle => {}
                GamePhase::Won | GamePhase::Lost => break,
            }
        }

        println!(
            "{}: level {} with {} circles, high score {}",
            match game.phase() {
                GamePhase::Won => "Won",
                GamePhase::Lost => "Lost",
                _ => "Stopped",
            },
            game.level(),
            game.circles().len(),
            game.high_score()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = native::run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
