//! Path utilities for pattern validation and request path splitting
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

use crate::error::{PatternFault, RouterError};

/// Checks a registration pattern and returns its segments
///
/// # Rules
///
/// - Must not be empty
/// - Must start with `/`
/// - Must not end with `/` (except root `/`)
/// - Must not contain `//`
///
/// The root pattern `/` yields no segments.
///
/// # Examples
///
/// ```
/// use trie_router::path::pattern_segments;
///
/// assert_eq!(pattern_segments("/").unwrap(), Vec::<&str>::new());
/// assert_eq!(pattern_segments("/users/:id").unwrap(), vec!["users", ":id"]);
///
/// assert!(pattern_segments("").is_err());
/// assert!(pattern_segments("users").is_err()); // Missing leading /
/// assert!(pattern_segments("/users/").is_err()); // Trailing /
/// assert!(pattern_segments("/users//new").is_err()); // Double //
/// ```
pub fn pattern_segments(pattern: &str) -> Result<Vec<&str>, RouterError> {
    let fault = if pattern.is_empty() {
        Some(PatternFault::Empty)
    } else if !pattern.starts_with('/') {
        Some(PatternFault::MissingLeadingSlash)
    } else if pattern != "/" && pattern.ends_with('/') {
        Some(PatternFault::TrailingSlash)
    } else if pattern.contains("//") {
        Some(PatternFault::EmptySegment)
    } else {
        None
    };

    if let Some(reason) = fault {
        return Err(RouterError::invalid_pattern(pattern, reason));
    }

    if pattern == "/" {
        return Ok(Vec::new());
    }

    Ok(pattern[1..].split('/').collect())
}

/// Splits an incoming request path into segments
///
/// Leading and trailing slashes are trimmed first, so `/user/`, `user` and
/// `/user` all give `["user"]`. A path that trims to nothing gives no
/// segments and therefore addresses the root. Interior empty segments are
/// kept.
///
/// # Examples
///
/// ```
/// use trie_router::path::request_segments;
///
/// assert_eq!(request_segments("/user/home/"), vec!["user", "home"]);
/// assert!(request_segments("/").is_empty());
/// assert_eq!(request_segments("/a//b"), vec!["a", "", "b"]);
/// ```
pub fn request_segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}
