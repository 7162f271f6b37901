// Console plumbing. Everything here is a no-op off wasm32 so the simulation
// can be exercised by plain `cargo test`.

#[cfg(target_arch = "wasm32")]
use web_sys::console;
use wasm_bindgen::JsValue;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

pub fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    console::log_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

pub fn error(value: &JsValue) {
    #[cfg(target_arch = "wasm32")]
    console::error_1(value);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = value;
}

// Labels a console.time / console.timeEnd span for as long as it lives.
// Only active with the `profile` feature.
pub struct Timer<'a> {
    #[allow(dead_code)]
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        #[cfg(all(target_arch = "wasm32", feature = "profile"))]
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        #[cfg(all(target_arch = "wasm32", feature = "profile"))]
        console::time_end_with_label(self.name);
    }
}
