use std::{fmt, rc::Rc, str::FromStr};

use rsv_history::Location;
use thiserror::Error;

use crate::{contexts::RouterContext, error::RouterError, query::normalize_path};

/// The environment variable selecting the [`RouterMode`] in [`RouterConfig::from_env`].
pub const MODE_ENV: &str = "RSV_ROUTER_MODE";

/// The environment variable holding the base path in [`RouterConfig::from_env`].
pub const BASE_PATH_ENV: &str = "RSV_BASE_PATH";

/// A callback run after every routing update. Returning a route replaces the current location.
pub type RoutingCallback = Rc<dyn Fn(&RouterContext) -> Option<String>>;

/// Where the router keeps the route inside the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RouterMode {
    /// The route is the document path and query, e.g. `https://host/users/1?tab=posts`.
    #[default]
    History,
    /// The route lives in the fragment, e.g. `https://host/#/users/1?tab=posts`.
    Hash,
}

/// The error returned when a string does not name a [`RouterMode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(r#"unknown router mode "{0}", expected "history" or "hash""#)]
pub struct ParseModeError(String);

impl FromStr for RouterMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "history" => Ok(Self::History),
            "hash" => Ok(Self::Hash),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

impl fmt::Display for RouterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::History => f.write_str("history"),
            Self::Hash => f.write_str("hash"),
        }
    }
}

impl RouterMode {
    /// Extract the route (path plus optional `?query`) from a location.
    ///
    /// In history mode `prefix` is stripped from the front of the path when present.
    pub fn route_from_location(&self, location: &Location, prefix: Option<&str>) -> String {
        match self {
            Self::History => {
                let mut path = location.pathname.as_str();
                let stripped = prefix
                    .and_then(|p| path.strip_prefix(p))
                    .filter(|rest| rest.is_empty() || rest.starts_with('/'));
                if let Some(rest) = stripped {
                    path = rest;
                }
                format!("{}{}", normalize_path(path), location.search)
            }
            Self::Hash => match location.fragment() {
                "" => String::from("/"),
                fragment => fragment.to_string(),
            },
        }
    }

    /// Turn a route into the URL handed to the history.
    ///
    /// Hash mode writes the route into the fragment. History mode prepends `prefix` to absolute
    /// routes and leaves everything else untouched.
    pub fn url_for(&self, route: &str, prefix: Option<&str>) -> String {
        match (self, prefix) {
            (Self::Hash, _) => format!("#{route}"),
            (Self::History, Some(prefix)) if route.starts_with('/') => format!("{prefix}{route}"),
            (Self::History, _) => route.to_string(),
        }
    }
}

/// Global configuration options for the router.
///
/// This implements [`Default`] and follows the builder pattern:
///
/// ```rust
/// # use rsv_router::prelude::*;
/// let cfg = RouterConfig::default()
///     .mode(RouterMode::Hash)
///     .on_update(|ctx| (ctx.path() == "/old").then(|| String::from("/new")));
/// ```
#[derive(Clone, Default)]
pub struct RouterConfig {
    pub(crate) mode: RouterMode,
    pub(crate) prefix: Option<String>,
    pub(crate) on_update: Option<RoutingCallback>,
}

impl RouterConfig {
    /// Read the mode and base path from [`MODE_ENV`] and [`BASE_PATH_ENV`].
    ///
    /// Unset variables keep their defaults; an unknown mode is an error.
    pub fn from_env() -> Result<Self, RouterError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, RouterError> {
        let mut cfg = Self::default();

        if let Some(mode) = lookup(MODE_ENV) {
            cfg.mode = mode.parse()?;
        }
        if let Some(prefix) = lookup(BASE_PATH_ENV) {
            cfg = cfg.prefix(prefix);
        }

        Ok(cfg)
    }

    /// Select where the route lives in the URL.
    ///
    /// Defaults to [`RouterMode::History`].
    pub fn mode(self, mode: RouterMode) -> Self {
        Self { mode, ..self }
    }

    /// Serve the app below a base path, e.g. `/my-app`.
    ///
    /// The prefix is stripped from the document path before routing and prepended when
    /// navigating. It only applies to [`RouterMode::History`]. Empty prefixes and `/` are ignored.
    pub fn prefix(self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_end_matches('/');
        let prefix = match prefix {
            "" => None,
            p if p.starts_with('/') => Some(p.to_string()),
            p => Some(format!("/{p}")),
        };

        Self { prefix, ..self }
    }

    /// A function to be called whenever the routing is updated.
    ///
    /// The callback runs after the context has been updated, but before subscribers are notified.
    /// If it returns a route, the router replaces the current location with it and routes again.
    ///
    /// Defaults to [`None`].
    pub fn on_update(self, callback: impl Fn(&RouterContext) -> Option<String> + 'static) -> Self {
        Self {
            on_update: Some(Rc::new(callback)),
            ..self
        }
    }

    /// The configured mode.
    pub fn current_mode(&self) -> RouterMode {
        self.mode
    }

    /// The configured base path.
    pub fn current_prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("mode", &self.mode)
            .field("prefix", &self.prefix)
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn location(pathname: &str, search: &str, hash: &str) -> Location {
        Location {
            pathname: pathname.to_string(),
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    #[test]
    fn parses_modes() {
        assert_eq!("history".parse::<RouterMode>(), Ok(RouterMode::History));
        assert_eq!(" Hash ".parse::<RouterMode>(), Ok(RouterMode::Hash));
        assert!("fragment".parse::<RouterMode>().is_err());
        assert_eq!(RouterMode::Hash.to_string(), "hash");
    }

    #[test]
    fn history_mode_reads_the_path() {
        let loc = location("/foo/", "?bar=baz", "#ignored");
        assert_eq!(
            RouterMode::History.route_from_location(&loc, None),
            "/foo?bar=baz"
        );
    }

    #[test]
    fn history_mode_strips_the_prefix() {
        let loc = location("/app/users/1", "", "");
        assert_eq!(
            RouterMode::History.route_from_location(&loc, Some("/app")),
            "/users/1"
        );
        assert_eq!(
            RouterMode::History.route_from_location(&location("/app", "", ""), Some("/app")),
            "/"
        );
        assert_eq!(
            RouterMode::History.route_from_location(&location("/application", "", ""), Some("/app")),
            "/application"
        );
    }

    #[test]
    fn hash_mode_reads_the_fragment() {
        let loc = location("/ignored", "?ignored=1", "#/foo?bar=baz");
        assert_eq!(
            RouterMode::Hash.route_from_location(&loc, None),
            "/foo?bar=baz"
        );
        assert_eq!(
            RouterMode::Hash.route_from_location(&location("/", "", ""), None),
            "/"
        );
    }

    #[test]
    fn urls_for_each_mode() {
        assert_eq!(RouterMode::Hash.url_for("/foo", Some("/app")), "#/foo");
        assert_eq!(RouterMode::History.url_for("/foo", None), "/foo");
        assert_eq!(RouterMode::History.url_for("/foo", Some("/app")), "/app/foo");
        assert_eq!(RouterMode::History.url_for("?x=1", Some("/app")), "?x=1");
    }

    #[test]
    fn prefixes_are_normalized() {
        assert_eq!(RouterConfig::default().prefix("app/").current_prefix(), Some("/app"));
        assert_eq!(RouterConfig::default().prefix("/").current_prefix(), None);
    }

    #[test]
    fn reads_from_lookup() {
        let env = HashMap::from([
            (MODE_ENV, String::from("hash")),
            (BASE_PATH_ENV, String::from("/my-app")),
        ]);
        let cfg = RouterConfig::from_lookup(|key| env.get(key).cloned()).unwrap();

        assert_eq!(cfg.current_mode(), RouterMode::Hash);
        assert_eq!(cfg.current_prefix(), Some("/my-app"));
    }

    #[test]
    fn unknown_mode_is_an_error() {
        let err = RouterConfig::from_lookup(|key| (key == MODE_ENV).then(|| String::from("nope")))
            .unwrap_err();

        assert!(matches!(err, RouterError::InvalidMode(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn modes_deserialize_from_lowercase() {
        let mode: RouterMode = serde_json::from_str(r#""hash""#).unwrap();
        assert_eq!(mode, RouterMode::Hash);
        assert_eq!(serde_json::to_string(&RouterMode::History).unwrap(), r#""history""#);
    }
}
