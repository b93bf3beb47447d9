// Content-script sampling of a solved.ac profile page.
// The page is only read, never modified.

use gloo_timers::future::TimeoutFuture;
use streak_core::config::SETTLE_DELAY_MS;
use streak_core::platform::SettingsStore;
use streak_core::scrape::{
    classify_fill, is_streak_label, parse_streak_count, profile_username, DAY_CELL_SELECTOR,
    GRAPH_CONTAINER_SELECTOR, STREAK_LABEL_SELECTOR,
};
use streak_core::{Message, SolvedState, StatusSample};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::services::{now_millis, ChromeRuntime, ChromeSyncStore};

/// Entry point of the content script: sample the page once if it is the
/// configured user's profile.
pub async fn run() {
    let settings = match ChromeSyncStore.load().await {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to read settings: {:?}", e);
            return;
        }
    };

    if !settings.is_configured() {
        log::info!("No target username configured, skipping check");
        return;
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let path = window.location().pathname().unwrap_or_default();
    let page_user = profile_username(&path);
    log::debug!(
        "Target {}, page user {:?}",
        settings.target_username,
        page_user
    );

    let Some(page_user) = page_user.filter(|user| settings.is_target(user)) else {
        log::info!("Not the target's profile page, skipping check");
        return;
    };
    let username = page_user.to_string();

    // let client-side rendering draw the streak graph first
    TimeoutFuture::new(SETTLE_DELAY_MS).await;

    let sample = sample_page(&window, username);
    log::info!(
        "{}: {}, streak {:?}",
        sample.username,
        sample.solved,
        sample.streak_count
    );

    ChromeRuntime::publish(&Message::StatusSample(sample));
}

fn sample_page(window: &Window, username: String) -> StatusSample {
    let timestamp = now_millis();
    let (solved, streak_count) = match window.document() {
        Some(document) => (solved_state(window, &document), streak_count(&document)),
        None => (SolvedState::Unknown, None),
    };

    StatusSample {
        solved,
        username,
        streak_count,
        timestamp,
    }
}

/// Colour of the first day cell in the streak graph.
fn solved_state(window: &Window, document: &Document) -> SolvedState {
    let Some(container) = document
        .query_selector(GRAPH_CONTAINER_SELECTOR)
        .ok()
        .flatten()
    else {
        log::warn!(
            "Streak graph ({}) not found; the page layout may have changed",
            GRAPH_CONTAINER_SELECTOR
        );
        return SolvedState::Unknown;
    };

    let Some(cell) = container.query_selector(DAY_CELL_SELECTOR).ok().flatten() else {
        log::warn!("No day cell ({}) inside the streak graph", DAY_CELL_SELECTOR);
        return SolvedState::Unknown;
    };

    let fill = window
        .get_computed_style(&cell)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("fill").ok());
    log::debug!(
        "Most recent day cell at x={:?} y={:?}, fill {:?}",
        cell.get_attribute("x"),
        cell.get_attribute("y"),
        fill
    );

    let state = classify_fill(fill.as_deref());
    if state == SolvedState::Unknown {
        log::warn!("Day cell fill is missing or transparent: {:?}", fill);
    }
    state
}

/// Number in the `<b>` of the "current streak" label, if there is one.
fn streak_count(document: &Document) -> Option<u32> {
    let labels = document.query_selector_all(STREAK_LABEL_SELECTOR).ok()?;

    let label = (0..labels.length())
        .filter_map(|i| labels.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .find(|element| is_streak_label(&element.text_content().unwrap_or_default()));

    let Some(label) = label else {
        // no streak (0 days) also hides the label
        log::warn!("Current streak label not found");
        return None;
    };

    let text = label.query_selector("b").ok().flatten()?.text_content()?;
    let count = parse_streak_count(&text);
    if count.is_none() {
        log::warn!("No number in streak text {:?}", text.trim());
    }
    count
}
