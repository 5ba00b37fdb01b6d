pub mod components;
pub mod switcher;

use wasm_bindgen::prelude::wasm_bindgen;

fn run() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    switcher::boot();
}

#[wasm_bindgen(start)]
pub fn start() {
    run();
}
