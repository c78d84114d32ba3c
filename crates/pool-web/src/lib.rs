pub mod runner;

pub use runner::TableRunner;

use std::cell::RefCell;

use pool_engine::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<TableRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner, or log and return `fallback` before `pool_init`.
fn with_runner<R>(fallback: R, f: impl FnOnce(&mut TableRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("pool table not initialized; call pool_init() first");
            fallback
        }
    })
}

/// Seconds since page load, from `performance.now()`.
fn now_seconds() -> Option<f64> {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
}

/// Build the table from a scene JSON and an optional physics config JSON.
/// Replaces any previously loaded table.
#[wasm_bindgen]
pub fn pool_init(scene_json: &str, config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = TableRunner::from_json(scene_json, config_json.as_deref())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("pool-web: initialized");
    Ok(())
}

/// Advance one frame using the page clock.
#[wasm_bindgen]
pub fn pool_tick() {
    match now_seconds() {
        Some(now) => with_runner((), |r| r.tick(now)),
        None => log::warn!("performance clock unavailable; use pool_step(dt)"),
    }
}

/// Advance one frame by an explicit delta in seconds.
#[wasm_bindgen]
pub fn pool_step(dt: f32) {
    with_runner((), |r| r.step(dt));
}

/// Call when the page is hidden so the next frame does not see the whole pause.
#[wasm_bindgen]
pub fn pool_pause() {
    with_runner((), |r| r.pause());
}

#[wasm_bindgen]
pub fn pool_resize(width: f32, height: f32) {
    with_runner((), |r| r.table_mut().resize(width, height));
}

// ---- Input ----

#[wasm_bindgen]
pub fn pool_pointer_down(button: u32, x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerDown { button, x, y }));
}

#[wasm_bindgen]
pub fn pool_pointer_up(button: u32, x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerUp { button, x, y }));
}

#[wasm_bindgen]
pub fn pool_pointer_move(x: f32, y: f32) {
    with_runner((), |r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn pool_key_down(key_code: u32) {
    with_runner((), |r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn pool_key_up(key_code: u32) {
    with_runner((), |r| r.push_input(InputEvent::KeyUp { key_code }));
}

#[wasm_bindgen]
pub fn pool_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner((), |r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

// ---- Direct commands ----

/// Strike along the current camera ray on the next frame.
#[wasm_bindgen]
pub fn pool_strike() {
    with_runner((), |r| r.strike());
}

/// Reset camera and balls on the next frame.
#[wasm_bindgen]
pub fn pool_reset() {
    with_runner((), |r| r.reset());
}

#[wasm_bindgen]
pub fn pool_set_strike_power(power: f32) {
    with_runner((), |r| r.table_mut().set_strike_power(power));
}

#[wasm_bindgen]
pub fn pool_strike_power() -> f32 {
    with_runner(0.0, |r| r.table().strike_power())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(0, |r| r.instance_count())
}

/// Ball centers as a flat xyz array, copied out of wasm memory.
#[wasm_bindgen]
pub fn get_ball_centers() -> js_sys::Float32Array {
    with_runner(js_sys::Float32Array::new_with_length(0), |r| {
        js_sys::Float32Array::from(r.centers())
    })
}

/// Contacts of the last frame: kind, ball, other, speed per event.
#[wasm_bindgen]
pub fn get_contacts() -> js_sys::Float32Array {
    with_runner(js_sys::Float32Array::new_with_length(0), |r| {
        js_sys::Float32Array::from(r.contacts())
    })
}

#[wasm_bindgen]
pub fn get_contact_count() -> u32 {
    with_runner(0, |r| r.contact_count())
}

/// Camera uniform: view matrix, projection matrix, eye (36 floats, column-major).
#[wasm_bindgen]
pub fn get_camera_uniform() -> js_sys::Float32Array {
    with_runner(js_sys::Float32Array::new_with_length(0), |r| {
        js_sys::Float32Array::from(r.camera_uniform().as_floats())
    })
}

#[wasm_bindgen]
pub fn get_is_in_motion() -> bool {
    with_runner(false, |r| r.table().world().is_in_motion())
}
