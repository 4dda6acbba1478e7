//! `setInterval` / `requestAnimationFrame` wrappers

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// A running `setInterval`. Cancelled on `cancel()` or drop.
///
/// The callback may cancel its own task, but must not drop it: the closure
/// is owned here and has to outlive the call that is executing it.
pub struct IntervalTask {
    handle: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl IntervalTask {
    pub fn start(period_ms: i32, callback: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut()>::new(callback);
        let handle = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms,
        )?;
        Ok(Self {
            handle: Some(handle),
            _callback: callback,
        })
    }

    /// Stop the timer. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(w) = web_sys::window() {
                w.clear_interval_with_handle(handle);
            }
        }
    }
}

impl Drop for IntervalTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `callback` with the frame timestamp (ms) on the next display refresh
pub fn request_frame(callback: impl FnOnce(f64) + 'static) -> Result<(), JsValue> {
    let closure = Closure::once(callback);
    window()?.request_animation_frame(closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
