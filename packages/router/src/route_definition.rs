//! Route patterns and the matcher that tests a path against them.
//!
//! A pattern is a `/`-separated list of [`Segment`]s. Static segments must equal the path segment
//! exactly, dynamic segments (`:name`) accept any non-empty path segment and bind it as a
//! parameter:
//!
//! ```rust
//! # use rsv_router::prelude::*;
//! let pattern = RoutePattern::parse("/baz/:id").unwrap();
//! let params = pattern.matches("/baz/123").unwrap();
//! assert_eq!(params["id"], "123");
//!
//! assert!(pattern.matches("/baz").is_none());
//! assert!(pattern.matches("/baz/123/more").is_none());
//! ```

use std::{collections::BTreeMap, fmt, str::FromStr};

use thiserror::Error;

mod matcher;
pub use matcher::*;

mod segment;
pub use segment::*;

/// Parameters bound by the dynamic segments of a matched pattern.
pub type Params = BTreeMap<String, String>;

/// An error produced while parsing a [`RoutePattern`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A dynamic segment without a name, e.g. `/users/:`.
    #[error(r#"empty parameter name in pattern "{pattern}""#)]
    EmptyParameterName {
        /// The offending pattern.
        pattern: String,
    },

    /// Two dynamic segments share a name, e.g. `/:id/:id`.
    #[error(r#"parameter "{name}" appears more than once in pattern "{pattern}""#)]
    DuplicateParameter {
        /// The offending pattern.
        pattern: String,
        /// The repeated parameter name.
        name: String,
    },
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/`, `/about` or `/users/:id/posts`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();

        for raw in split_segments(pattern) {
            let segment = Segment::parse(raw);

            if let Segment::Dynamic(name) = &segment {
                if name.is_empty() {
                    return Err(PatternError::EmptyParameterName {
                        pattern: pattern.to_string(),
                    });
                }

                let duplicate = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Dynamic(other) if other == name));
                if duplicate {
                    return Err(PatternError::DuplicateParameter {
                        pattern: pattern.to_string(),
                        name: name.clone(),
                    });
                }
            }

            segments.push(segment);
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the pattern has no dynamic segments.
    pub fn is_static(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Static(_)))
    }

    /// Test `path` against this pattern, returning the bound parameters on a match.
    ///
    /// `path` must not contain a query string.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let path = split_segments(path);
        if path.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                Segment::Static(expected) if expected == value => {}
                Segment::Static(_) => return None,
                Segment::Dynamic(_) if value.is_empty() => return None,
                Segment::Dynamic(name) => {
                    params.insert(name.clone(), value.to_string());
                }
            }
        }

        Some(params)
    }
}

impl FromStr for RoutePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Split a path or pattern on `/`, dropping the empty segments produced by a single leading or
/// trailing slash. Interior empty segments (`/a//b`) are kept.
pub(crate) fn split_segments(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);

    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}
