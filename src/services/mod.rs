// Domain services
// Pure scheduling logic with no UI dependencies

pub mod ics;
pub mod optimizer;
