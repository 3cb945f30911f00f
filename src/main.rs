//! ARKlinko entry point
//!
//! On the web: builds the board, wires drop input and runs the frame loop on
//! `requestAnimationFrame`. On native: a headless run that drops a batch of
//! balls and reports the landing distribution.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use arklinko::driver::FrameLoop;
    use arklinko::driver::web::AnimationLoop;
    use arklinko::renderer::CanvasRenderer;
    use arklinko::renderer::scene::multiplier_label;
    use arklinko::sim::{Board, Landing};
    use arklinko::{LandingHistory, Settings};

    pub type Game = FrameLoop<CanvasRenderer, Box<dyn FnMut(Landing)>>;

    thread_local! {
        pub static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
        pub static ANIMATION: RefCell<Option<AnimationLoop>> = const { RefCell::new(None) };
    }

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    fn set_text(selector: &str, text: &str) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(selector).ok().flatten());
        if let Some(el) = el {
            el.set_text_content(Some(text));
        }
    }

    /// Landing callback: surface the outcome in the HUD
    fn show_landing(landing: &Landing) {
        set_text("#hud-last .hud-value", &multiplier_label(landing.multiplier));
        let outcome = if landing.is_loss() { "loss" } else { "win" };
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("hud-last"))
        {
            let _ = el.set_attribute("class", &format!("hud-item {}", outcome));
        }
    }

    pub fn update_history_hud(history: &LandingHistory) {
        set_text("#hud-drops .hud-value", &history.total_drops().to_string());
        let mean = history
            .mean_multiplier()
            .map_or_else(|| "-".to_string(), |mean| format!("{:.2}x", mean));
        set_text("#hud-mean .hud-value", &mean);
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("ARKlinko starting...");

        // Persist the sanitized copy; a rejected stored board is replaced
        let settings = Settings::load();
        settings.save();
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()
            .map_err(|_| js_err("not a canvas"))?;

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let board = Board::with_seed(settings.board.clone(), seed).map_err(js_err)?;
        log::info!("Board initialized with seed: {}", seed);

        let renderer = CanvasRenderer::new(canvas.clone())?;
        let on_landed: Box<dyn FnMut(Landing)> = Box::new(|landing: Landing| show_landing(&landing));
        let history = LandingHistory::load();
        update_history_hud(&history);

        let game = Rc::new(RefCell::new(
            FrameLoop::new(board, renderer, on_landed)
                .with_max_balls(settings.max_balls)
                .with_auto_drop(settings.auto_drop_frames)
                .with_history(history),
        ));

        setup_input_handlers(&canvas, game.clone());

        let frame_game = game.clone();
        let show_fps = settings.show_fps;
        let show_history = settings.show_history;
        let mut last_time = 0.0;
        let mut fps = 0.0;
        let animation = AnimationLoop::start(move |time: f64| {
            let mut g = frame_game.borrow_mut();
            let before = g.history().total_drops();
            g.tick();
            if g.history().total_drops() != before {
                g.history().save();
                if show_history {
                    update_history_hud(g.history());
                }
            }

            if show_fps && last_time > 0.0 && time > last_time {
                fps = fps * 0.9 + (1000.0 / (time - last_time)) * 0.1;
                set_text("#hud-fps .hud-value", &format!("{:.0}", fps));
            }
            last_time = time;
        })?;

        GAME.with(|g| *g.borrow_mut() = Some(game));
        ANIMATION.with(|a| *a.borrow_mut() = Some(animation));

        log::info!("ARKlinko running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click/tap on the board drops a ball
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().request_drop();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Space/Enter drops a ball
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "Enter") {
                    game.borrow_mut().request_drop();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Drop a ball from the host page (e.g. after a bet is placed)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn drop_ball() -> Option<u32> {
    wasm_game::GAME.with(|g| {
        g.borrow()
            .as_ref()
            .and_then(|game| game.borrow_mut().request_drop())
    })
}

/// Forget every recorded landing and clear the stored history
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn reset_history() {
    wasm_game::GAME.with(|g| {
        if let Some(game) = g.borrow().as_ref() {
            let mut game = game.borrow_mut();
            game.history_mut().clear();
            game.history().save();
            wasm_game::update_history_hud(game.history());
        }
    });
    log::info!("Landing history reset");
}

/// Tear down the board view: cancels the pending animation frame
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop() {
    wasm_game::ANIMATION.with(|a| a.borrow_mut().take());
    wasm_game::GAME.with(|g| g.borrow_mut().take());
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arklinko::renderer::NullRenderer;
    use arklinko::sim::{Board, Landing};
    use arklinko::{FrameLoop, Settings};

    env_logger::init();
    log::info!("ARKlinko (native) starting headless run...");

    let settings = Settings::load();
    let drops: u32 = std::env::var("ARKLINKO_DROPS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1000);
    let seed = settings.seed.unwrap_or(0x5eed);

    let board = match Board::with_seed(settings.board.clone(), seed) {
        Ok(board) => board,
        Err(e) => {
            log::error!("Invalid board configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut frame_loop = FrameLoop::new(board, NullRenderer, |landing: Landing| {
        log::trace!("landing {:?}", landing);
    })
    .with_max_balls(settings.max_balls);

    // Stop even if a ball never settles
    let frame_limit = u64::from(drops).saturating_mul(2000).max(10_000);
    let mut dropped = 0;
    while dropped < drops || frame_loop.board().active_count() > 0 {
        if dropped < drops && frame_loop.request_drop().is_some() {
            dropped += 1;
        }
        frame_loop.tick();
        if frame_loop.frames() >= frame_limit {
            log::warn!(
                "Stopping after {} frames with {} balls still falling",
                frame_limit,
                frame_loop.board().active_count()
            );
            break;
        }
    }

    let history = frame_loop.history();
    log::info!(
        "{} balls landed in {} frames, mean multiplier {:.3}",
        history.total_drops(),
        frame_loop.frames(),
        history.mean_multiplier().unwrap_or(0.0)
    );

    let summary = serde_json::json!({
        "seed": seed,
        "drops": history.total_drops(),
        "frames": frame_loop.frames(),
        "slot_hits": history.slot_hits,
        "mean_multiplier": history.mean_multiplier(),
        "best_multiplier": history.best,
    });
    println!("{}", summary);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
