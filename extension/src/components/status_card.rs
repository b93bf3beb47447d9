use dioxus::prelude::*;
use streak_core::popup::PopupStatus;

use crate::icons;

#[component]
pub fn StatusCard(
    status: PopupStatus,
    on_refresh: EventHandler<()>,
    on_open_profile: EventHandler<String>,
) -> Element {
    let class = status.css_class();
    let icon = status.icon();
    let message = status.message();
    let profile = status.profile_username().map(str::to_string);
    let (streak_line, checked_line) = match &status {
        PopupStatus::Ready(details) => (details.streak_line.clone(), details.checked_line.clone()),
        _ => (None, None),
    };

    rsx! {
        div { class: "status-card {class}",
            div { class: "status-header",
                span { class: "status-icon", "{icon}" }
                button {
                    class: "icon-button",
                    title: "Refresh",
                    onclick: move |_| on_refresh.call(()),
                    icons::RefreshCw { class: Some("icon".to_string()) }
                }
            }

            p { class: "status-message", "{message}" }

            if let Some(line) = streak_line {
                p { class: "status-detail",
                    icons::Flame { class: Some("icon-inline".to_string()) }
                    span { "{line}" }
                }
            }
            if let Some(line) = checked_line {
                p { class: "status-detail muted", "{line}" }
            }

            button {
                class: "profile-button",
                disabled: profile.is_none(),
                onclick: move |_| {
                    if let Some(username) = profile.clone() {
                        on_open_profile.call(username);
                    }
                },
                icons::ExternalLink { class: Some("icon-inline".to_string()) }
                span { "Go to profile" }
            }
        }
    }
}
