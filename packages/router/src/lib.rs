#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod navigation;
pub mod query;
pub mod route_definition;

mod error;
mod resolve;
mod router_cfg;
mod state;

/// Components making up the routing tree.
pub mod components {
    mod route;
    pub use route::*;

    mod router;
    pub use router::*;
}

/// The state shared between a router and its routes.
pub mod contexts {
    mod router;
    pub use router::*;
}

pub use error::RouterError;
pub use navigation::{navigate, NavigateOptions, Navigator};
pub use router_cfg::{
    ParseModeError, RouterConfig, RouterMode, RoutingCallback, BASE_PATH_ENV, MODE_ENV,
};
pub use state::{ActiveRoute, RouteId, RouterState};

/// A collection of useful items most applications might need.
pub mod prelude {
    pub use crate::components::*;
    pub use crate::contexts::*;
    pub use crate::navigation::*;
    pub use crate::query::Query;
    pub use crate::route_definition::*;
    pub use crate::{
        ActiveRoute, RouteId, RouterConfig, RouterError, RouterMode, RouterState,
    };
}
