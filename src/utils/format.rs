/// Join a list of labels with ", " for inline display (e.g. majors)
pub fn join_comma(items: &[String]) -> String {
    items.join(", ")
}
