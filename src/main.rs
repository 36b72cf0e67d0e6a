use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    activity_board::init();
}

// Bin crates still want a main; wasm-bindgen calls `start()` on module init.
fn main() {}
