//! Browser bridge for DotLink.
//!
//! One `GameRunner` lives in a `thread_local!`; the `#[wasm_bindgen]` free
//! functions below forward input into it and expose the packed frame buffer
//! to TypeScript.

use std::cell::RefCell;

use dotlink_engine::{DotLink, InputEvent, UiAction};
use wasm_bindgen::prelude::*;

pub mod dom;
pub mod runner;
pub mod storage;

pub use dom::DomPresenter;
pub use runner::GameRunner;
pub use storage::LocalStorageStore;

type WebGame = DotLink<DomPresenter, LocalStorageStore>;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner<WebGame>>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner<WebGame>) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

/// Queue a dialog button press. Called from DOM click handlers, which run
/// between ticks, so the runner is normally free.
pub(crate) fn dispatch_action(action: UiAction) {
    RUNNER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut borrow) => match borrow.as_mut() {
            Some(runner) => runner.push_input(InputEvent::Action(action)),
            None => log::warn!("{:?} before game_init", action),
        },
        Err(_) => log::warn!("{:?} dropped: runner busy", action),
    });
}

#[wasm_bindgen]
pub fn game_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 | 1;
    let game = DotLink::with_defaults(DomPresenter::new(), LocalStorageStore::new(), seed);
    let runner = GameRunner::new(game);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    with_runner(|r| r.init());
    log::info!("dotlink: initialized");
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_cancel() {
    with_runner(|r| r.push_input(InputEvent::PointerCancel));
}

/// Dialog button by code: 1 next level, 2 retry, 3 play again.
#[wasm_bindgen]
pub fn game_ui_action(code: u32) {
    match UiAction::from_code(code) {
        Some(action) => with_runner(|r| r.push_input(InputEvent::Action(action))),
        None => log::warn!("unknown ui action code {}", code),
    }
}

/// Replace the level table and restart at the current level.
#[wasm_bindgen]
pub fn game_load_levels(json: &str) {
    let result = with_runner(|r| r.with_game(|game, ctx| game.load_levels(ctx, json)));
    if let Err(err) = result {
        log::error!("level table rejected: {}", err);
    }
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_shapes_ptr() -> *const f32 {
    with_runner(|r| r.shapes_ptr())
}

#[wasm_bindgen]
pub fn get_shape_count() -> u32 {
    with_runner(|r| r.shape_count())
}

#[wasm_bindgen]
pub fn get_line_split() -> u32 {
    with_runner(|r| r.line_split())
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_shapes() -> u32 {
    with_runner(|r| r.max_shapes())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}
