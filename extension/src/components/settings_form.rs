use dioxus::prelude::*;
use streak_core::popup::FormInput;

use crate::icons;

/// Feedback line under the save button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveNotice {
    pub text: String,
    pub is_error: bool,
}

impl SaveNotice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

#[component]
pub fn SettingsForm(
    form: Signal<FormInput>,
    saving: bool,
    notice: Option<SaveNotice>,
    on_save: EventHandler<()>,
) -> Element {
    let input = form();
    let save_label = if saving { "Saving..." } else { "Save" };

    rsx! {
        div { class: "settings",
            h2 { class: "settings-title",
                icons::Settings { class: Some("icon-inline".to_string()) }
                span { "Settings" }
            }

            label { class: "field",
                span { "solved.ac username" }
                input {
                    r#type: "text",
                    placeholder: "username",
                    autofocus: input.username.is_empty(),
                    value: "{input.username}",
                    oninput: move |e| form.with_mut(|f| f.username = e.value()),
                    onkeydown: move |e| {
                        if e.key() == Key::Enter {
                            on_save.call(());
                        }
                    }
                }
            }

            label { class: "field",
                span { "Check interval (minutes)" }
                input {
                    r#type: "number",
                    min: "1",
                    value: "{input.interval}",
                    oninput: move |e| form.with_mut(|f| f.interval = e.value()),
                }
            }

            label { class: "checkbox",
                input {
                    r#type: "checkbox",
                    checked: input.notify_not_solved,
                    onchange: move |_| form.with_mut(|f| f.notify_not_solved = !f.notify_not_solved),
                }
                span { "Notify when nothing was solved" }
            }

            label { class: "checkbox",
                input {
                    r#type: "checkbox",
                    checked: input.notify_unknown,
                    onchange: move |_| form.with_mut(|f| f.notify_unknown = !f.notify_unknown),
                }
                span { "Notify when the status is unknown" }
            }

            button {
                class: "save-button",
                disabled: saving,
                onclick: move |_| on_save.call(()),
                icons::Save { class: Some("icon-inline".to_string()) }
                span { "{save_label}" }
            }

            if let Some(notice) = notice {
                p { class: "notice", class: if notice.is_error { "error" },
                    "{notice.text}"
                }
            }
        }
    }
}
