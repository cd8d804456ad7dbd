use dioxus::prelude::*;

/// Semester card slot. Shows the semester label when one exists; an
/// unlabeled slot is an empty card awaiting a planned semester.
#[component]
pub fn SemesterCard(#[props(default = None)] label: Option<String>) -> Element {
    rsx! {
        div {
            class: "w-40 h-48 border border-border rounded-lg p-3 flex-shrink-0 bg-card",
            if let Some(label) = label {
                p {
                    class: "text-sm font-semibold text-muted-foreground",
                    "{label}"
                }
            }
        }
    }
}
