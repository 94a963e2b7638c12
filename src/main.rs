//! Catchfall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use catchfall::GameConfig;
    use catchfall::platform::{SystemClock, TimeSource, map_key};
    use catchfall::renderer::RenderState;
    use catchfall::sim::{GameEvent, GamePhase, GameSession};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        render_state: Option<RenderState>,
        clock: SystemClock,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64) -> Self {
            let clock = SystemClock::new();
            let session = GameSession::new(config, seed, clock.now_ms());
            Self {
                session,
                render_state: None,
                clock,
            }
        }

        /// Advance the session and draw
        fn frame(&mut self) {
            let now = self.clock.now_ms();
            self.session.frame(now);

            if let Some(ref mut render_state) = self.render_state {
                let frame = self.session.render_frame();
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
    }

    fn set_text(id: &str, text: &str) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(id: &str, visible: bool) {
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Score/timer text nodes and the overlays, updated as events arrive
    fn update_hud(event: &GameEvent) {
        match event {
            GameEvent::ScoreChanged { score } => set_text("score", &score.to_string()),
            GameEvent::TimeChanged { text, .. } => set_text("timer", text),
            GameEvent::Paused => set_visible("pause-menu", true),
            GameEvent::Resumed => set_visible("pause-menu", false),
            GameEvent::RoundReset => {
                set_visible("game-over", false);
                set_visible("pause-menu", false);
                set_visible("get-ready", true);
            }
            GameEvent::RoundStarted => set_visible("get-ready", false),
            GameEvent::RoundOver {
                final_score,
                high_score,
            } => {
                let screen = catchfall::sim::GameOverScreen::new(*final_score);
                set_text("game-over-title", &screen.lines[0]);
                set_text("final-score", &screen.lines[1]);
                set_text("replay-hint", &screen.lines[2]);
                if let Some(best) = high_score {
                    set_text("high-score", &best.to_string());
                }
                set_visible("game-over", true);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Catchfall starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("No #canvas element");
                return;
            }
        };

        let config = GameConfig::load();
        canvas.set_width(config.field_width as u32);
        canvas.set_height(config.field_height as u32);
        let (width, height) = (canvas.width(), canvas.height());

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, seed)));
        {
            let mut g = game.borrow_mut();
            g.session.subscribe(update_hud);
            set_text("score", "0");
            set_text("timer", &g.session.render_frame().time_text);
        }

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::default(),
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_keyboard(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Catchfall running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(command) = map_key(event.key().as_str()) else {
                return;
            };
            event.prevent_default();
            let mut g = game.borrow_mut();
            let now = g.clock.now_ms();
            command.apply(&mut g.session, now);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        fn pause_if_running(game: &Rc<RefCell<Game>>, reason: &str) {
            let mut g = game.borrow_mut();
            if g.session.phase() == GamePhase::Running && !g.session.is_getting_ready() {
                let now = g.clock.now_ms();
                g.session.toggle_pause(now);
                log::info!("Auto-paused ({})", reason);
            }
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    pause_if_running(&game, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                pause_if_running(&game, "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless round driven by the autopilot
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use catchfall::GameConfig;
    use catchfall::consts::FRAME_MS;
    use catchfall::platform::{ManualClock, TimeSource};
    use catchfall::sim::{GameEvent, GamePhase, GameSession};

    env_logger::init();
    log::info!("Catchfall (native) starting...");
    log::info!("Native mode runs a headless autopilot round - build for wasm32 to play");

    let config = GameConfig::load();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);

    let clock = ManualClock::new(0);
    let mut session = GameSession::new(config, seed, clock.now_ms());
    session.set_autopilot(true);
    session.subscribe(|event: &GameEvent| match event {
        GameEvent::TimeChanged { text, .. } => log::debug!("{}", text),
        GameEvent::RoundOver { final_score, .. } => {
            log::info!("Final score: {}", final_score)
        }
        _ => {}
    });

    while session.phase() != GamePhase::Over {
        let now = clock.advance(FRAME_MS);
        session.frame(now);
    }

    let frame = session.render_frame();
    match serde_json::to_string_pretty(&frame) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final frame: {}", e),
    }
    if let Some(best) = session.high_scores().top_score() {
        println!("High score: {}", best);
    }
}
