// Activity board front-end (Rust + WASM): fetches the activity collection,
// renders one card per activity, and wires the signup form plus per-participant
// removal buttons against the JSON API. Every mutation triggers a full
// re-fetch and re-render; nothing is kept client-side between passes.

use std::rc::Rc;

use gloo_console::error;
use wasm_bindgen_futures::spawn_local;

pub mod api;
pub mod board;
pub mod dom;
pub mod model;

pub use board::ActivityBoard;

/// Binds the board to the page and kicks off the first render. A missing
/// `#activities-list` aborts here; the rest of the page is left alone.
pub fn init() {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(board) = ActivityBoard::bind(&doc) else {
        error!("Missing #activities-list element — cannot render activities.");
        return;
    };

    let board = Rc::new(board);
    Rc::clone(&board).install();
    spawn_local(async move {
        board.render_activities().await;
    });
}
