pub mod scraper;
pub mod services;

#[cfg(feature = "popup")]
mod components;
#[cfg(feature = "popup")]
pub mod icons;

#[cfg(feature = "popup")]
pub use popup::run;

#[cfg(feature = "popup")]
mod popup {
    use dioxus::prelude::*;
    use gloo_timers::future::TimeoutFuture;
    use streak_core::config::profile_url;
    use streak_core::platform::{SettingsStore, TabOpener};
    use streak_core::popup::{
        default_interval_text, validate_form, FormError, FormInput, PopupStatus, StatusDetails,
        SAVED_MESSAGE, SAVE_FAILED_MESSAGE, SAVE_MESSAGE_TIMEOUT_MS,
    };
    use streak_core::StoredSettings;

    use crate::components::{SaveNotice, SettingsForm, StatusCard};
    use crate::services::{ChromeRuntime, ChromeSyncStore, ChromeTabs};

    /// Ask the background worker for settings and status and fill both panes.
    async fn load(mut status: Signal<PopupStatus>, mut form: Signal<FormInput>) {
        status.set(PopupStatus::Loading);

        match ChromeRuntime::initial_data().await {
            Ok(Some(data)) => {
                form.set(FormInput::from_settings(&data.settings()));
                status.set(PopupStatus::Ready(StatusDetails::from_initial(
                    &data,
                    &chrono::Local,
                )));
            }
            Ok(None) => {
                log::warn!("Background worker could not read storage");
                form.set(FormInput::default());
                status.set(PopupStatus::Failed);
            }
            Err(e) => {
                log::error!("Failed to load initial data: {:?}", e);
                form.set(FormInput::default());
                status.set(PopupStatus::Failed);
            }
        }
    }

    /// Show a save notice and hide it again after a while. `seq` is bumped on
    /// every notice so an older timeout cannot hide a newer one.
    fn show_notice(
        mut notice: Signal<Option<SaveNotice>>,
        mut seq: Signal<u32>,
        next: SaveNotice,
    ) {
        notice.set(Some(next));
        let current = seq() + 1;
        seq.set(current);
        spawn(async move {
            TimeoutFuture::new(SAVE_MESSAGE_TIMEOUT_MS).await;
            if seq() == current {
                notice.set(None);
            }
        });
    }

    #[component]
    fn App() -> Element {
        let mut status = use_signal(|| PopupStatus::Loading);
        let mut form = use_signal(FormInput::default);
        let mut saving = use_signal(|| false);
        let notice = use_signal(|| None::<SaveNotice>);
        let notice_seq = use_signal(|| 0u32);

        use_future(move || load(status, form));

        let on_save = move |_| {
            let settings = match validate_form(&form()) {
                Ok(settings) => settings,
                Err(e) => {
                    if e == FormError::InvalidInterval {
                        form.with_mut(|f| f.interval = default_interval_text());
                    }
                    show_notice(notice, notice_seq, SaveNotice::error(e.to_string()));
                    return;
                }
            };

            spawn(async move {
                saving.set(true);
                match ChromeSyncStore.save(&StoredSettings::from(&settings)).await {
                    Ok(()) => {
                        form.set(FormInput::from_settings(&settings));
                        status.set(PopupStatus::Ready(StatusDetails::pending(
                            &settings.target_username,
                        )));
                        show_notice(notice, notice_seq, SaveNotice::info(SAVED_MESSAGE));

                        if let Err(e) = ChromeRuntime::force_recheck().await {
                            log::warn!("Recheck request failed: {:?}", e);
                        }
                    }
                    Err(e) => {
                        log::error!("Failed to save settings: {:?}", e);
                        show_notice(notice, notice_seq, SaveNotice::error(SAVE_FAILED_MESSAGE));
                    }
                }
                saving.set(false);
            });
        };

        let on_refresh = move |_| {
            spawn(load(status, form));
        };

        let on_open_profile = move |username: String| {
            spawn(async move {
                if let Err(e) = ChromeTabs.open(&profile_url(&username)).await {
                    log::error!("Failed to open profile: {:?}", e);
                }
            });
        };

        rsx! {
            div { class: "popup",
                h1 { class: "title", "solved.ac streak checker" }

                StatusCard {
                    status: status(),
                    on_refresh: on_refresh,
                    on_open_profile: on_open_profile,
                }

                SettingsForm {
                    form: form,
                    saving: saving(),
                    notice: notice(),
                    on_save: on_save,
                }
            }
        }
    }

    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub fn run() {
        wasm_logger::init(wasm_logger::Config::default());
        log::info!("Streak checker popup starting...");
        dioxus::launch(App);
    }
}
