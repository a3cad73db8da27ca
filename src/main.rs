//! Balloon Pop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use balloon_pop::consts::*;
    use balloon_pop::renderer::{RenderState, build_scene};
    use balloon_pop::sim::{GameState, TickInput, UpgradeTier, tick};
    use balloon_pop::{Tuning, money_label};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        money_dirty: bool,
    }

    impl Game {
        fn new(seed: u64, viewport: Vec2, tuning: Tuning) -> Self {
            Self {
                state: GameState::new(seed, viewport, tuning),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                money_dirty: true,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // Input is consumed by the first tick of the frame
                let input = std::mem::take(&mut self.input);
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            for event in self.state.drain_events() {
                log::debug!("{:?}", event);
                if event.changes_money() {
                    self.money_dirty = true;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state);
                match render_state.render(&vertices) {
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

        /// Refresh the money display when it changed
        fn update_hud(&mut self, document: &Document) {
            if !self.money_dirty {
                return;
            }
            if let Some(el) = document.get_element_by_id("money") {
                el.set_text_content(Some(&money_label(self.state.wallet.money)));
            }
            self.money_dirty = false;
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Balloon Pop starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Simulation runs in CSS pixels, the surface in physical pixels
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let viewport = Vec2::new(client_w as f32, client_h as f32);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, viewport, Tuning::load())));

        log::info!("Game initialized with seed: {} ({}x{})", seed, client_w, client_h);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, (viewport.x, viewport.y)).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_input_handlers(&canvas, game.clone());
        setup_upgrade_buttons(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Balloon Pop running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().input.pointer_downs.push(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (every new finger is a tap)
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let rect = canvas_clone.get_bounding_client_rect();
                let touches = event.changed_touches();
                let mut g = game.borrow_mut();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let x = touch.client_x() as f32 - rect.left() as f32;
                        let y = touch.client_y() as f32 - rect.top() as f32;
                        g.input.pointer_downs.push(Vec2::new(x, y));
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_upgrade_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for tier in UpgradeTier::ALL {
            let Some(btn) = document.get_element_by_id(tier.button_id()) else {
                log::warn!("Upgrade button #{} not found", tier.button_id());
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.upgrades.push(tier);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Balloon Pop (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let tuning = balloon_pop::Tuning::load_from(path.as_deref());
    demo_session(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted 20 second session: pop every balloon each second, chase the
/// bonus sphere, buy an upgrade halfway through.
#[cfg(not(target_arch = "wasm32"))]
fn demo_session(tuning: balloon_pop::Tuning) {
    use balloon_pop::consts::{SIM_DT, SIM_HZ};
    use balloon_pop::money_label;
    use balloon_pop::sim::{GameState, TickInput, UpgradeTier, tick};
    use glam::Vec2;

    let mut state = GameState::new(2024, Vec2::new(1000.0, 800.0), tuning);
    let total_ticks = 20 * SIM_HZ;

    for t in 1..=total_ticks {
        let mut input = TickInput::default();
        if t % SIM_HZ == 0 {
            input
                .pointer_downs
                .extend(state.balloons.iter().filter(|b| b.is_active()).map(|b| b.pos));
            if let Some(sphere) = &state.bonus {
                input.pointer_downs.insert(0, sphere.pos);
            }
        }
        if t == total_ticks / 2 {
            input.upgrades.push(UpgradeTier::Large);
        }

        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            log::debug!("t={} {:?}", state.time_ticks, event);
        }
    }

    println!(
        "{} after {}s ({} per click)",
        money_label(state.wallet.money),
        total_ticks / SIM_HZ,
        state.wallet.money_per_click
    );
}
