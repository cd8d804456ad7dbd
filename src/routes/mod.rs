use dioxus::prelude::*;

pub mod profile;

use profile::Profile;

/// App routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Profile {},
}
