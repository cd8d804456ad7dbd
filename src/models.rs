// Display records for the profile page
// No backing service exists yet; the demo record stands in until one does.

use serde::{Deserialize, Serialize};

/// A student's profile as shown on the profile page.
///
/// Everything is display text. Majors, semesters, and degree plans keep
/// their listed order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub email: String,
    /// Entering class year
    pub cohort: String,
    pub majors: Vec<String>,
    pub minors: String,
    /// HASS pathway name, or "Undecided"
    pub pathway: String,
    pub semesters: Vec<String>,
    pub degree_plans: Vec<String>,
}

impl StudentProfile {
    /// Hardcoded demo record rendered by the profile page.
    pub fn demo() -> Self {
        Self {
            name: "Maggie Trebilcock".to_string(),
            email: "trebim2@rpi.edu".to_string(),
            cohort: "2028".to_string(),
            majors: vec!["Computer Science".to_string()],
            minors: "None".to_string(),
            pathway: "Undecided".to_string(),
            semesters: vec!["SPRING 2025".to_string()],
            degree_plans: vec!["Plan A".to_string(), "Plan B".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_identity_fields() {
        let profile = StudentProfile::demo();
        assert_eq!(profile.name, "Maggie Trebilcock");
        assert_eq!(profile.email, "trebim2@rpi.edu");
        assert_eq!(profile.cohort, "2028");
    }

    #[test]
    fn test_demo_academics() {
        let profile = StudentProfile::demo();
        assert_eq!(profile.majors, vec!["Computer Science"]);
        assert_eq!(profile.minors, "None");
        assert_eq!(profile.pathway, "Undecided");
    }

    #[test]
    fn test_demo_has_one_semester() {
        let profile = StudentProfile::demo();
        assert_eq!(profile.semesters, vec!["SPRING 2025"]);
    }

    #[test]
    fn test_demo_has_two_degree_plans() {
        let profile = StudentProfile::demo();
        assert_eq!(profile.degree_plans.len(), 2);
    }
}
