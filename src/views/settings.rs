use crate::preferences::Preferences;
use crate::types::FontStep;
use dioxus::prelude::*;

/// Floating accessibility menu: theme toggle and font size steps.
#[component]
pub fn PreferencesMenu(preferences: Signal<Preferences>) -> Element {
    let mut preferences = preferences;
    let dark_mode = preferences.read().dark_mode();
    let theme_label = if dark_mode { "Light mode" } else { "Dark mode" };

    rsx! {
        div { class: "user-preferences-menu", tabindex: "-1",
            button {
                class: "preferences-btn",
                r#type: "button",
                aria_label: "Toggle Dark Mode",
                title: "Toggle Dark Mode",
                onclick: move |_| preferences.with_mut(|prefs| prefs.toggle_dark_mode()),
                "{theme_label}"
            }
            button {
                class: "preferences-btn",
                r#type: "button",
                aria_label: "Increase Font Size",
                title: "Increase Font Size",
                onclick: move |_| preferences.with_mut(|prefs| prefs.step_font_size(FontStep::Increase)),
                "A+"
            }
            button {
                class: "preferences-btn",
                r#type: "button",
                aria_label: "Decrease Font Size",
                title: "Decrease Font Size",
                onclick: move |_| preferences.with_mut(|prefs| prefs.step_font_size(FontStep::Decrease)),
                "A-"
            }
        }
    }
}
