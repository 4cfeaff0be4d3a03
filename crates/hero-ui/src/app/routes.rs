//! Routing definitions for the console.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/hero")]
    Heroes,
    #[not_found]
    #[at("/404")]
    NotFound,
}
