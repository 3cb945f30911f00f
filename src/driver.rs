//! Frame loop driver
//!
//! The host calls `FrameLoop::tick` once per animation frame. Each tick runs,
//! in order: physics for every falling ball, landing resolution (history and
//! the landing callback see each landing once), then rendering of a scene
//! built from a shared borrow of the board.

use crate::history::LandingHistory;
use crate::renderer::{Renderer, build_scene};
use crate::sim::{Board, Landing, RandomSource, SeededRandom};

/// Default cap on balls in flight
pub const DEFAULT_MAX_BALLS: usize = 10;

/// Update-then-render loop around one board session
pub struct FrameLoop<V, L, R = SeededRandom> {
    board: Board<R>,
    renderer: V,
    on_landed: L,
    history: LandingHistory,
    max_balls: usize,
    /// Drop a ball every N frames (0 = manual only)
    auto_drop_every: u32,
    frames: u64,
}

impl<V, L, R> FrameLoop<V, L, R>
where
    V: Renderer,
    L: FnMut(Landing),
    R: RandomSource,
{
    pub fn new(board: Board<R>, renderer: V, on_landed: L) -> Self {
        Self {
            board,
            renderer,
            on_landed,
            history: LandingHistory::new(),
            max_balls: DEFAULT_MAX_BALLS,
            auto_drop_every: 0,
            frames: 0,
        }
    }

    pub fn with_max_balls(mut self, max_balls: usize) -> Self {
        self.max_balls = max_balls.max(1);
        self
    }

    pub fn with_auto_drop(mut self, every_frames: u32) -> Self {
        self.auto_drop_every = every_frames;
        self
    }

    pub fn with_history(mut self, history: LandingHistory) -> Self {
        self.history = history;
        self
    }

    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    pub fn history(&self) -> &LandingHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut LandingHistory {
        &mut self.history
    }

    /// Frames ticked so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Drop a ball unless the in-flight cap is reached
    pub fn request_drop(&mut self) -> Option<u32> {
        if self.board.active_count() >= self.max_balls {
            log::debug!("Drop ignored: {} balls in flight", self.max_balls);
            return None;
        }
        Some(self.board.drop_ball())
    }

    /// Run one frame: physics, landings, render
    pub fn tick(&mut self) {
        self.frames += 1;

        if self.auto_drop_every > 0 && self.frames % u64::from(self.auto_drop_every) == 0 {
            self.request_drop();
        }

        let history = &mut self.history;
        let on_landed = &mut self.on_landed;
        self.board.step(|landing| {
            history.record(landing);
            on_landed(landing);
        });

        let scene = build_scene(&self.board);
        self.renderer.render(&scene);
    }
}

/// Browser scheduling via `requestAnimationFrame`
#[cfg(target_arch = "wasm32")]
pub mod web {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Repeating animation-frame callback, cancelled on drop
    pub struct AnimationLoop {
        handle: Rc<Cell<Option<i32>>>,
        callback: FrameCallback,
    }

    fn request_frame(closure: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
        web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .request_animation_frame(closure.as_ref().unchecked_ref())
    }

    impl AnimationLoop {
        /// Schedule `on_frame` every animation frame until the loop is dropped
        pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
        where
            F: FnMut(f64) + 'static,
        {
            let handle = Rc::new(Cell::new(None));
            let callback: FrameCallback = Rc::new(RefCell::new(None));

            let next_handle = handle.clone();
            let next_callback = callback.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                on_frame(time);
                if let Some(closure) = next_callback.borrow().as_ref() {
                    match request_frame(closure) {
                        Ok(id) => next_handle.set(Some(id)),
                        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                    }
                }
            }));

            if let Some(closure) = callback.borrow().as_ref() {
                handle.set(Some(request_frame(closure)?));
            }
            log::info!("Animation loop started");
            Ok(Self { handle, callback })
        }
    }

    impl Drop for AnimationLoop {
        fn drop(&mut self) {
            if let Some(id) = self.handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            // Breaks the closure's reference back to itself
            self.callback.borrow_mut().take();
            log::info!("Animation loop cancelled");
        }
    }
}
