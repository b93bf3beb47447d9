// Core of the solved.ac streak reminder extension.
// Everything here is platform-free; the extension crate binds it to chrome.* APIs.

pub mod config;
pub mod notify;
pub mod orchestrator;
pub mod platform;
pub mod popup;
pub mod protocol;
pub mod schedule;
pub mod scrape;
pub mod status;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used items
pub use config::{Settings, SettingsChange, StoredSettings};
pub use orchestrator::Orchestrator;
pub use platform::Platform;
pub use protocol::{Message, Response};
pub use status::{InitialData, SolvedState, StatusSample, StatusSnapshot};
