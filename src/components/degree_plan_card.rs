use dioxus::prelude::*;

use crate::components::icons::BookOpenIcon;

/// Degree plan card placeholder. Bears only the plan name; course
/// sequences are not rendered yet.
#[component]
pub fn DegreePlanCard(name: String) -> Element {
    rsx! {
        div {
            class: "w-56 h-40 border border-border rounded-lg p-4 flex-shrink-0 bg-card",
            div {
                class: "flex items-center gap-2",
                BookOpenIcon { class: "w-5 h-5" }
                p {
                    class: "font-semibold",
                    "{name}"
                }
            }
        }
    }
}
