//! Pattern parsing for route segments
//!
//! Pure functional parsing of one `/`-delimited pattern segment into a typed kind.
//! All functions are **pure**: same input → same output, no side effects.

/// Represents different types of route pattern segments
///
/// # Examples
///
/// ```
/// use trie_router::route::pattern::{classify_segment, SegmentKind};
///
/// // Literal segment
/// let seg = classify_segment("about");
/// assert!(matches!(seg, SegmentKind::Static(_)));
///
/// // Path parameter
/// let seg = classify_segment(":id");
/// assert!(matches!(seg, SegmentKind::Param(_)));
///
/// // Regex-constrained parameter
/// let seg = classify_segment(":id([0-9]+)");
/// assert!(matches!(seg, SegmentKind::Regex { .. }));
///
/// // Wildcard
/// let seg = classify_segment("*");
/// assert_eq!(seg, SegmentKind::Wildcard);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Exact text
    Static(String),
    /// `:name`, captures one segment
    Param(String),
    /// `:name(expr)`, captures one segment that satisfies `expr`
    Regex { name: String, source: String },
    /// `*` as a whole segment
    Wildcard,
}

impl SegmentKind {
    /// Parameter name for capturing kinds
    pub fn param_name(&self) -> Option<&str> {
        match self {
            SegmentKind::Param(name) | SegmentKind::Regex { name, .. } => Some(name),
            SegmentKind::Static(_) | SegmentKind::Wildcard => None,
        }
    }
}

/// Classifies a segment into a pattern type (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Wildcard**: exactly `*`
/// 2. **Regex**: `:name(expr)`, split on the *first* `(` so the expression
///    may contain its own parentheses, and the segment must end with `)`
/// 3. **Param**: any other segment starting with `:`
/// 4. **Static**: Any other text
///
/// `*` is only special as a whole segment; `*abc` is static text.
/// A `:` segment with an unterminated `(` is a param whose name keeps the
/// parenthesis (`:id(abc` → param `id(abc`).
///
/// # Examples
///
/// ```
/// use trie_router::route::pattern::{classify_segment, SegmentKind};
///
/// assert_eq!(
///     classify_segment(":date((\\d+)-(\\d+))"),
///     SegmentKind::Regex { name: "date".into(), source: "(\\d+)-(\\d+)".into() }
/// );
/// ```
pub fn classify_segment(segment: &str) -> SegmentKind {
    if segment == "*" {
        return SegmentKind::Wildcard;
    }

    match segment.strip_prefix(':') {
        Some(rest) => rest
            .split_once('(')
            .and_then(|(name, tail)| {
                tail.strip_suffix(')').map(|source| SegmentKind::Regex {
                    name: name.to_string(),
                    source: source.to_string(),
                })
            })
            .unwrap_or_else(|| SegmentKind::Param(rest.to_string())),
        None => SegmentKind::Static(segment.to_string()),
    }
}
