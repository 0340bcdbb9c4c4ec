/// The marker that turns a pattern segment into a dynamic one.
pub const DYNAMIC_MARKER: char = ':';

/// A single `/`-separated part of a [`RoutePattern`](super::RoutePattern).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Static(String),
    /// Matches any non-empty path segment and binds it under this name.
    Dynamic(String),
}

impl Segment {
    pub(crate) fn parse(raw: &str) -> Self {
        match raw.strip_prefix(DYNAMIC_MARKER) {
            Some(name) => Self::Dynamic(name.to_string()),
            None => Self::Static(raw.to_string()),
        }
    }

    /// The parameter name, if this is a dynamic segment.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::Dynamic(name) => Some(name),
            Self::Static(_) => None,
        }
    }
}
