mod settings_form;
mod status_card;

pub use settings_form::{SaveNotice, SettingsForm};
pub use status_card::StatusCard;
