use dioxus::prelude::*;

use crate::components::icons::UsersIcon;

/// Friends list placeholder. Renders an empty block until a friends
/// service backs it.
#[component]
pub fn FriendsList() -> Element {
    rsx! {
        div {
            class: "border border-border rounded-lg p-4",
            div {
                class: "flex items-center gap-2 mb-3",
                UsersIcon { class: "w-5 h-5" }
                h3 {
                    class: "font-semibold",
                    "Friends"
                }
            }
            div {
                class: "h-48 rounded-lg bg-muted"
            }
        }
    }
}
