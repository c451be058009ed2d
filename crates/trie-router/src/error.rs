//! Registration errors
//!
//! Every variant is produced by [`Router::register`](crate::Router::register)
//! and its shorthands. Matching never fails; a miss is `None`.

use thiserror::Error;

/// Why a pattern was rejected before the tree was touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternFault {
    /// Pattern is the empty string
    #[error("pattern is empty")]
    Empty,
    /// Pattern does not start with `/`
    #[error("pattern must start with '/'")]
    MissingLeadingSlash,
    /// Pattern other than `/` ends with `/`
    #[error("pattern must not end with '/'")]
    TrailingSlash,
    /// Pattern contains `//`
    #[error("pattern must not contain empty segments ('//')")]
    EmptySegment,
}

/// Errors raised while registering a route
#[derive(Debug, Error)]
pub enum RouterError {
    /// Malformed pattern text
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: PatternFault,
    },

    /// A `:name(expr)` segment whose expression does not compile
    #[error("invalid regex in segment `{segment}` of route `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        segment: String,
        source: regex::Error,
    },

    /// Incompatible segment kinds, or mismatched names, at one trie position
    #[error("route `{pattern}` conflicts: segment `{incoming}` cannot be registered alongside existing `{existing}`")]
    RouteConflict {
        pattern: String,
        existing: String,
        incoming: String,
    },

    /// Same method and full pattern registered twice
    #[error("route `{pattern}` is already registered for method {method}")]
    DuplicateRoute { method: String, pattern: String },
}

impl RouterError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: PatternFault) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
    }

    pub(crate) fn conflict(pattern: &str, existing: &str, incoming: &str) -> Self {
        Self::RouteConflict {
            pattern: pattern.to_string(),
            existing: existing.to_string(),
            incoming: incoming.to_string(),
        }
    }

    /// The pattern the failed registration was given
    pub fn pattern(&self) -> &str {
        match self {
            Self::InvalidPattern { pattern, .. }
            | Self::InvalidRegex { pattern, .. }
            | Self::RouteConflict { pattern, .. }
            | Self::DuplicateRoute { pattern, .. } => pattern,
        }
    }
}
