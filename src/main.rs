//! Sky Tap entry point
//!
//! On the web this wires the canvas, controls, timers and sounds to the sim.
//! Natively it plays a scripted headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlSelectElement, MouseEvent};

    use sky_tap::Settings;
    use sky_tap::audio::{AudioManager, SoundCue};
    use sky_tap::consts::*;
    use sky_tap::platform::{IntervalTask, request_frame};
    use sky_tap::renderer::shapes::to_canvas;
    use sky_tap::renderer::{Assets, CanvasRenderer};
    use sky_tap::sim::{
        CountdownFrame, Difficulty, GameEvent, GameState, countdown_step, handle_click, tick,
    };

    const CANVAS_ID: &str = "gameCanvas";
    const DIFFICULTY_ID: &str = "difficulty";
    const RESTART_ID: &str = "restartBtn";
    const GAME_OVER_ID: &str = "gameOver";
    const FINAL_SCORE_ID: &str = "finalScore";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        canvas: HtmlCanvasElement,
        /// Countdown timer; replaced (and so cancelled) on restart
        countdown: Option<IntervalTask>,
    }

    type SharedGame = Rc<RefCell<Game>>;

    impl Game {
        /// Play cues and update panels for everything the sim reported
        fn process_events(&mut self) {
            for event in self.state.drain_events() {
                if let Some(cue) = SoundCue::for_event(&event) {
                    self.audio.play(cue);
                }
                if let GameEvent::GameOver { score } = event {
                    show_game_over(&self.canvas, score);
                }
            }
        }

        fn restart(&mut self, difficulty: Difficulty) {
            self.state.restart(difficulty);
            hide_game_over(&self.canvas);
            log::info!("Game restarted ({})", difficulty.as_str());
        }
    }

    fn document() -> Result<web_sys::Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    fn difficulty_select() -> Option<HtmlSelectElement> {
        document()
            .ok()?
            .get_element_by_id(DIFFICULTY_ID)?
            .dyn_into::<HtmlSelectElement>()
            .ok()
    }

    /// Difficulty from the selector, "normal" when there is none
    fn selected_difficulty() -> Difficulty {
        difficulty_select()
            .map(|s| Difficulty::from_name(&s.value()))
            .unwrap_or_default()
    }

    fn set_display(el: &HtmlElement, value: &str) {
        let _ = el.style().set_property("display", value);
    }

    fn html_element(id: &str) -> Option<HtmlElement> {
        document()
            .ok()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn show_game_over(canvas: &HtmlCanvasElement, score: u64) {
        set_display(canvas, "none");
        if let Some(el) = html_element(FINAL_SCORE_ID) {
            el.set_text_content(Some(&format!("Your score: {}", score)));
        }
        if let Some(panel) = html_element(GAME_OVER_ID) {
            set_display(&panel, "block");
        }
    }

    fn hide_game_over(canvas: &HtmlCanvasElement) {
        if let Some(panel) = html_element(GAME_OVER_ID) {
            set_display(&panel, "none");
        }
        set_display(canvas, "block");
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sky Tap starting...");

        let document = document()?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let width = match canvas.width() {
            0 => DEFAULT_ARENA_WIDTH,
            w => w as f32,
        };
        let height = match canvas.height() {
            0 => DEFAULT_ARENA_HEIGHT,
            h => h as f32,
        };

        let settings = Settings::load();
        if let Some(select) = difficulty_select() {
            select.set_value(settings.difficulty.as_str());
        } else {
            log::warn!("No difficulty selector, using normal");
        }
        let difficulty = selected_difficulty();

        let seed = js_sys::Date::now() as u64;
        let state = GameState::with_arena(seed, difficulty, Vec2::new(width, height));
        log::info!("Game initialized with seed: {}", seed);

        let renderer = CanvasRenderer::new(ctx, width as f64, height as f64, Assets::new()?);
        let game = Rc::new(RefCell::new(Game {
            state,
            renderer,
            audio: AudioManager::new(&settings),
            settings,
            canvas: canvas.clone(),
            countdown: None,
        }));

        setup_click_handler(&canvas, game.clone())?;
        setup_difficulty_select(game.clone())?;
        setup_restart_button(game.clone())?;
        start_on_background(game)?;

        log::info!("Sky Tap running!");
        Ok(())
    }

    /// Begin the countdown once the background loads, or fails to
    fn start_on_background(game: SharedGame) -> Result<(), JsValue> {
        let g = game.borrow();
        let background = &g.renderer.assets().background;

        let on_load = {
            let game = game.clone();
            Closure::<dyn FnMut()>::new(move || start_countdown(game.clone()))
        };
        let on_error = {
            let game = game.clone();
            Closure::<dyn FnMut()>::new(move || {
                log::warn!("Background image failed to load, starting anyway");
                start_countdown(game.clone());
            })
        };
        background.set_onload(Some(on_load.as_ref().unchecked_ref()));
        background.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_load.forget();
        on_error.forget();

        g.renderer.assets().start_background();
        Ok(())
    }

    fn start_countdown(game: SharedGame) {
        let task = {
            let game = game.clone();
            IntervalTask::start(COUNTDOWN_STEP_MS, move || countdown_tick(&game))
        };
        match task {
            // Replacing an old task drops it, which cancels it
            Ok(task) => game.borrow_mut().countdown = Some(task),
            Err(e) => log::error!("Failed to start countdown: {:?}", e),
        }
    }

    fn countdown_tick(game: &SharedGame) {
        let mut g = game.borrow_mut();
        let Some(frame) = countdown_step(&mut g.state) else {
            return;
        };
        g.renderer.draw_countdown(frame);
        g.process_events();

        if frame == CountdownFrame::Go {
            if let Some(task) = g.countdown.as_mut() {
                task.cancel();
            }
            drop(g);
            schedule_frame(game.clone());
        }
    }

    fn schedule_frame(game: SharedGame) {
        if let Err(e) = request_frame(move |time| game_loop(game, time)) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }

    fn game_loop(game: SharedGame, time: f64) {
        let playing = {
            let mut g = game.borrow_mut();
            if !g.state.is_playing() {
                return;
            }

            tick(&mut g.state, time);
            g.renderer.render(&g.state, time);
            g.process_events();
            g.state.is_playing()
        };

        // Not rescheduling is how the loop ends
        if playing {
            schedule_frame(game);
        }
    }

    fn setup_click_handler(canvas: &HtmlCanvasElement, game: SharedGame) -> Result<(), JsValue> {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let point = to_canvas(
                Vec2::new(event.client_x() as f32, event.client_y() as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
            );
            let mut g = game.borrow_mut();
            if handle_click(&mut g.state, point).is_some() {
                g.process_events();
            }
        });
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_difficulty_select(game: SharedGame) -> Result<(), JsValue> {
        let Some(select) = difficulty_select() else {
            return Ok(());
        };

        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let difficulty = Difficulty::from_name(&select_clone.value());
            let mut g = game.borrow_mut();
            g.state.set_difficulty(difficulty);
            g.settings.difficulty = difficulty;
            g.settings.save();
        });
        select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_restart_button(game: SharedGame) -> Result<(), JsValue> {
        let Some(btn) = document()?.get_element_by_id(RESTART_ID) else {
            log::warn!("No restart button");
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().restart(selected_difficulty());
            start_countdown(game.clone());
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().inspect_err(|e| log::error!("Startup failed: {:?}", e))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_tap::sim::{Difficulty, GamePhase, GameState, countdown_step, handle_click, tick};

    env_logger::init();
    log::info!("Sky Tap (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let difficulty = args
        .next()
        .map(|s| Difficulty::from_name(&s))
        .unwrap_or_default();
    let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(30.0);

    let mut state = GameState::new(0x5EED, difficulty);
    while countdown_step(&mut state).is_some() && !state.is_playing() {}

    // Auto-player: reacts to a cloud 400ms after it appears and ignores the rest
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const REACTION_MS: f64 = 400.0;
    let mut now = 0.0;
    while now < seconds * 1000.0 && state.phase == GamePhase::Playing {
        tick(&mut state, now);
        let target = state
            .clouds
            .first()
            .filter(|c| c.age(now) >= REACTION_MS)
            .map(|c| c.center());
        if let Some(point) = target {
            handle_click(&mut state, point);
        }
        for event in state.drain_events() {
            log::debug!("{:>8.0}ms {:?}", now, event);
        }
        now += FRAME_MS;
    }

    println!(
        "difficulty={} score={} lives={} phase={:?} after {:.1}s",
        difficulty.as_str(),
        state.score,
        state.lives,
        state.phase,
        now / 1000.0
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
