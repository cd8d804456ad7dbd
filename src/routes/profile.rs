use dioxus::prelude::*;

use crate::components::icons::{CalendarIcon, PenSquareIcon};
use crate::components::{DegreePlanCard, FriendsList, ProfileAvatar, SemesterCard};
use crate::models::StudentProfile;
use crate::utils::join_comma;

/// Empty slots shown after the planned semesters
const SEMESTER_PLACEHOLDER_SLOTS: usize = 4;

/// Student profile page. Purely presentational: renders the hardcoded
/// demo record in a two-column layout. The edit button and the card
/// rows are placeholders with no behavior behind them.
#[component]
pub fn Profile() -> Element {
    let profile = StudentProfile::demo();
    let majors = join_comma(&profile.majors);

    rsx! {
        div {
            class: "min-h-screen bg-background",
            div {
                class: "flex justify-center max-w-[1200px] mx-auto gap-8 px-6 py-12",

                // Left column: avatar, edit affordance, friends
                aside {
                    class: "w-[280px] flex-shrink-0 flex flex-col gap-6",
                    div {
                        class: "flex flex-col items-center gap-4",
                        ProfileAvatar { name: profile.name.clone() }
                        button {
                            class: "px-6 py-2 border border-border rounded-full font-semibold hover:bg-accent transition flex items-center gap-2",
                            PenSquareIcon { class: "w-4 h-4" }
                            "Edit Profile"
                        }
                    }
                    FriendsList {}
                }

                // Right column: identity, academics, semester and plan rows
                main {
                    class: "flex-1 min-w-0",

                    // Identity header
                    div {
                        class: "mb-8",
                        h1 {
                            class: "text-3xl font-bold",
                            "{profile.name}"
                        }
                        p {
                            class: "text-muted-foreground",
                            "{profile.email}"
                        }
                        p {
                            class: "text-sm text-muted-foreground",
                            "Cohort of {profile.cohort}"
                        }
                    }

                    // Academics
                    div {
                        class: "mb-8 space-y-1",
                        p {
                            strong { "Major: " }
                            "{majors}"
                        }
                        p {
                            strong { "Minor: " }
                            "{profile.minors}"
                        }
                        p {
                            strong { "HASS Pathway: " }
                            "{profile.pathway}"
                        }
                    }

                    // Semesters
                    section {
                        class: "mb-8",
                        div {
                            class: "flex items-center gap-2 mb-3",
                            CalendarIcon { class: "w-5 h-5" }
                            h2 {
                                class: "text-xl font-semibold",
                                "Semesters"
                            }
                        }
                        div {
                            class: "flex gap-4 overflow-x-auto pb-2",
                            for semester in profile.semesters.iter() {
                                SemesterCard { label: Some(semester.clone()) }
                            }
                            for _ in 0..SEMESTER_PLACEHOLDER_SLOTS {
                                SemesterCard {}
                            }
                        }
                    }

                    // Degree plans
                    section {
                        h2 {
                            class: "text-xl font-semibold mb-3",
                            "Degree Plans"
                        }
                        div {
                            class: "flex gap-4 overflow-x-auto pb-2",
                            for plan in profile.degree_plans.iter() {
                                DegreePlanCard { name: plan.clone() }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_row_quantities() {
        // One labeled card, four empty slots
        let profile = StudentProfile::demo();
        assert_eq!(profile.semesters.len(), 1);
        assert_eq!(SEMESTER_PLACEHOLDER_SLOTS, 4);
    }
}
