//! Classification of what the content script reads off a profile page.
//!
//! The DOM walking itself lives in the extension crate; these functions take
//! the extracted strings so the heuristics can be tested on the host. They
//! never fail: anything unexpected reads as unknown or absent.
//!
//! The selectors and colours below track solved.ac's current markup and will
//! need updating when the site changes.

use crate::status::SolvedState;

/// Container of the streak graph.
pub const GRAPH_CONTAINER_SELECTOR: &str = "div.css-fpwzir svg";

/// Day cells of the streak graph; the first match is the most recent day.
pub const DAY_CELL_SELECTOR: &str = r#"rect[width="18"][height="18"][rx="5"]"#;

/// Candidates for the "current streak" label.
pub const STREAK_LABEL_SELECTOR: &str = "div.css-1midmz7";

/// Text the current-streak label starts with ("현재" = "current").
pub const STREAK_LABEL_PREFIX: &str = "현재";

/// Fill colours of a day without activity.
pub const NO_ACTIVITY_FILLS: [&str; 5] = [
    "rgb(221, 223, 224)",
    "#dddfe0",
    "rgb(235, 237, 238)",
    "#ebedee",
    "grey",
];

const INVISIBLE_FILLS: [&str; 3] = ["transparent", "rgba(0, 0, 0, 0)", "none"];

/// Classify the computed `fill` of the most recent day cell.
pub fn classify_fill(fill: Option<&str>) -> SolvedState {
    let Some(fill) = fill.map(|f| f.trim().to_lowercase()) else {
        return SolvedState::Unknown;
    };

    if NO_ACTIVITY_FILLS.contains(&fill.as_str()) {
        SolvedState::NotSolved
    } else if fill.is_empty() || INVISIBLE_FILLS.contains(&fill.as_str()) {
        SolvedState::Unknown
    } else {
        SolvedState::Solved
    }
}

/// Whether a label's text is the current-streak label.
pub fn is_streak_label(text: &str) -> bool {
    text.trim().starts_with(STREAK_LABEL_PREFIX)
}

/// First run of ASCII digits in `text`, e.g. `"12일"` → 12.
pub fn parse_streak_count(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Username from a `/profile/<name>` path.
pub fn profile_username(path: &str) -> Option<&str> {
    let mut parts = path.split('/');
    // leading empty segment before the first slash
    if parts.next() != Some("") || parts.next() != Some("profile") {
        return None;
    }
    parts.next().filter(|name| !name.is_empty())
}
