use thiserror::Error;

use crate::router_cfg::ParseModeError;

/// Errors surfaced by the [`Router`](crate::components::Router) lifecycle and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// `mount` was called on a router that is already listening for navigations.
    #[error("the router is already mounted")]
    AlreadyMounted,

    /// `unmount` was called on a router that was never mounted.
    #[error("the router is not mounted")]
    NotMounted,

    /// The router was unmounted and cannot be mounted again.
    #[error("the router has been torn down")]
    TornDown,

    /// The routing mode could not be read from the configuration.
    #[error(transparent)]
    InvalidMode(#[from] ParseModeError),
}
