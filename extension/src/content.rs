// Content script for solved.ac profile pages
// Minimal dependencies - no Dioxus, built with --no-default-features

use wasm_bindgen::prelude::*;

// Dummy main for binary target
fn main() {}

/// Called from the JavaScript glue once the wasm module is loaded.
/// Samples the page at most once and reports to the background worker.
#[wasm_bindgen]
pub fn run_content_script() {
    wasm_logger::init(wasm_logger::Config::default());
    log::debug!("Streak checker content script loaded");

    wasm_bindgen_futures::spawn_local(solved_streak_extension::scraper::run());
}
