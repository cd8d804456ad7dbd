use dioxus::prelude::*;

/// Circular avatar placeholder. No picture upload exists yet, so this
/// always renders the initial-letter fallback.
#[component]
pub fn ProfileAvatar(name: String) -> Element {
    let initial = name.chars().next().unwrap_or('?');

    rsx! {
        div {
            class: "w-32 h-32 rounded-full border-4 border-background bg-blue-600 flex items-center justify-center text-white text-4xl font-bold",
            "{initial}"
        }
    }
}
