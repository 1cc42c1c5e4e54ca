pub mod actions;
pub mod components;
pub mod session;
pub mod state;

use leptos::prelude::*;
use components::app::App;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    mount_to_body(App);
}
