//! Road Dodge entry point
//!
//! On the web this binds the game to the page and runs the frame loop.
//! Natively it plays a seeded session with an autopilot and reports the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent};

    use road_dodge::consts::*;
    use road_dodge::renderer::{Canvas2d, render};
    use road_dodge::sim::{Field, FrameStepper, GameEvent, GameState, Player};
    use road_dodge::{Direction, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        canvas: Canvas2d,
        stepper: FrameStepper,
        last_time: f64,
        shown_score: Option<u64>,
    }

    impl Game {
        fn new(state: GameState, canvas: Canvas2d) -> Self {
            Self {
                state,
                canvas,
                stepper: FrameStepper::new(),
                last_time: 0.0,
                shown_score: None,
            }
        }

        /// Run simulation ticks covering `dt_ms`
        fn update(&mut self, dt_ms: f64) {
            for event in self.stepper.advance(&mut self.state, dt_ms) {
                if let GameEvent::ObstacleCleared { id, points } = event {
                    log::debug!("Obstacle {} dodged (+{})", id, points);
                }
            }
        }

        fn render(&mut self) {
            render(&self.state, &mut self.canvas);
        }

        /// Mirror the score into the DOM HUD, if the page has one
        fn update_hud(&mut self) {
            let score = self.state.score();
            if self.shown_score == Some(score) {
                return;
            }
            self.shown_score = Some(score);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&score.to_string()));
            }
        }
    }

    /// Tuning from the canvas' `data-tuning` attribute, or the defaults
    fn load_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        let Some(json) = canvas.get_attribute("data-tuning") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using tuning from data-tuning");
                tuning
            }
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                Tuning::default()
            }
        }
    }

    /// Start loading an image; the canvas skips it until it arrives
    fn new_image(src: &str) -> Option<HtmlImageElement> {
        let img = HtmlImageElement::new().ok()?;
        img.set_src(src);
        Some(img)
    }

    /// Load an image and wait for it so its natural size is known
    async fn load_sprite(src: &str) -> Option<(HtmlImageElement, Option<(u32, u32)>)> {
        let img = new_image(src)?;
        let size = match JsFuture::from(img.decode()).await {
            Ok(_) => Some((img.natural_width(), img.natural_height())),
            Err(e) => {
                log::warn!("Could not load {}: {:?}", src, e);
                None
            }
        };
        Some((img, size))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Road Dodge starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"canvas\"> on the page");
            return;
        };

        let tuning = load_tuning(&canvas);

        let Some(background) = new_image(BACKGROUND_SRC) else {
            log::error!("Could not create background image");
            return;
        };
        let Some((player_img, natural_size)) = load_sprite(PLAYER_SRC).await else {
            log::error!("Could not create player image");
            return;
        };

        let field = Field::new(canvas.width() as f32, canvas.height() as f32);
        let player_size = Player::size_from_sprite(natural_size, &tuning);
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, field, player_size, tuning);

        let Some(surface) = Canvas2d::new(&canvas, background, player_img) else {
            log::error!("2D canvas context unavailable");
            return;
        };

        log::info!(
            "Game initialized with seed {} on a {}x{} canvas",
            seed,
            field.width,
            field.height
        );

        let game = Rc::new(RefCell::new(Game::new(state, surface)));
        {
            // Scene is visible before the start button is pressed
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }

        setup_input_handlers(game.clone());
        setup_start_button(game.clone());

        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(direction) = Direction::from_key(&event.key()) else {
                return;
            };
            // Arrows would otherwise scroll the page
            event.prevent_default();
            let mut g = game.borrow_mut();
            if !g.state.is_over() {
                g.stepper.queue_move(direction);
            }
        });
        let _ =
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let Some(btn) = document.get_element_by_id("start-button") else {
            log::warn!("No #start-button on the page; the game cannot start");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().stepper.request_start();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
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
        let over = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
            g.state.is_over()
        };

        // Game over is terminal: stop scheduling frames
        if over {
            log::info!("Frame loop stopped");
            return;
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
mod headless {
    use road_dodge::consts::*;
    use road_dodge::renderer::{RecordingCanvas, render};
    use road_dodge::sim::{Field, GameEvent, GameState, Player, TickInput, tick};
    use road_dodge::{Direction, Tuning};

    /// Longest session the autopilot plays (ms)
    const MAX_SESSION_MS: f64 = 120_000.0;
    /// Ticks between autopilot key presses (about 30 Hz key repeat)
    const KEY_REPEAT_TICKS: u64 = 8;
    /// Ticks between recorded frames (about 60 fps)
    const FRAME_TICKS: u64 = 4;
    /// How far above the car the autopilot looks for trouble (px)
    const LOOKAHEAD_PX: f32 = 160.0;

    /// Steer away from the closest obstacle that is about to land on the car
    fn autopilot(state: &GameState) -> Vec<Direction> {
        if state.time_ticks % KEY_REPEAT_TICKS != 0 {
            return Vec::new();
        }
        let player = state.player.collision_box();
        let threat = state
            .obstacles
            .iter()
            .map(|o| o.collision_box())
            .filter(|b| b.y > player.y - LOOKAHEAD_PX)
            .find(|b| b.x_max >= player.x_min && b.x_min <= player.x_max);

        match threat {
            Some(b) => {
                let room_left = b.x_min;
                let room_right = state.field.width - b.x_max;
                if room_left > room_right {
                    vec![Direction::Left]
                } else {
                    vec![Direction::Right]
                }
            }
            None => Vec::new(),
        }
    }

    pub fn run(seed: u64) {
        let tuning = Tuning::default();
        let field = Field::new(HEADLESS_CANVAS_WIDTH, HEADLESS_CANVAS_HEIGHT);
        let player_size = Player::size_from_sprite(None, &tuning);
        let mut state = GameState::new(seed, field, player_size, tuning);
        let mut canvas = RecordingCanvas::new();

        render(&state, &mut canvas);

        let max_ticks = (MAX_SESSION_MS / state.tuning.tick_ms) as u64;
        let mut input = TickInput {
            start: true,
            ..Default::default()
        };
        let mut dodged = 0usize;

        while !state.is_over() && state.time_ticks < max_ticks {
            let events = tick(&mut state, &input);
            dodged += events
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstacleCleared { .. }))
                .count();

            input = TickInput {
                moves: autopilot(&state),
                ..Default::default()
            };
            if state.time_ticks % FRAME_TICKS == 0 || state.is_over() {
                render(&state, &mut canvas);
            }
        }

        let outcome = if state.is_over() { "crashed" } else { "survived" };
        log::info!(
            "Seed {} {} after {:.1}s with score {}",
            seed,
            outcome,
            state.elapsed_ms / 1000.0,
            state.score()
        );
        println!(
            "seed {}: {} after {:.1}s, score {}, {} obstacles dodged, {} frames drawn",
            seed,
            outcome,
            state.elapsed_ms / 1000.0,
            state.score(),
            dodged,
            canvas.frames
        );
        for line in canvas.texts() {
            println!("  {}", line);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Road Dodge (native) starting...");
    log::info!("Native mode plays a headless session - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2024);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
