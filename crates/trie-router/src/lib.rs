//! # Trie Router
//!
//! A per-method routing trie that maps `(method, path)` to a bound handler
//! and the path parameters captured along the way. Supported segments:
//! - Static routes (`/about`)
//! - Path parameters (`/users/:id`)
//! - Regex-constrained parameters (`/users/:id([0-9]+)`)
//! - Wildcards (`/files/*`), which may swallow every remaining segment
//!
//! ## Matching Order
//!
//! At every level the most specific child wins, and a branch that dead-ends
//! deeper in the tree falls back to its less specific siblings:
//!
//! 1. literal
//! 2. regex (in registration order)
//! 3. param
//! 4. wildcard
//!
//! ## Lifecycle
//!
//! Routes are registered once during startup through `&mut Router`. After
//! that the router is only read: [`Router::match_route`] takes `&self`, keeps
//! its captures local to the call, and can be shared across threads behind an
//! `Arc` as long as `H` is `Send + Sync`.
//!
//! ## Example
//!
//! ```
//! use trie_router::Router;
//!
//! let mut router = Router::new();
//! router.get("/", "home").unwrap();
//! router.get("/users/:id([0-9]+)", "user_by_id").unwrap();
//! router.get("/users/:name", "user_by_name").unwrap();
//! router.post("/upload/*", "upload").unwrap();
//!
//! let route_match = router.match_route("GET", "/users/42").unwrap();
//! assert_eq!(route_match.handler(), Some(&"user_by_id"));
//! assert_eq!(route_match.param("id"), Some("42"));
//! assert_eq!(route_match.full_route(), "/users/:id([0-9]+)");
//!
//! let route_match = router.match_route("POST", "/upload/2024/photo.png").unwrap();
//! assert_eq!(route_match.handler(), Some(&"upload"));
//!
//! assert!(router.match_route("DELETE", "/").is_none());
//! ```

use std::collections::HashMap;

use tracing::{debug, trace, warn};

// ============================================================================
// Module Declarations
// ============================================================================

mod config;
mod error;
pub mod path;
pub mod route;
pub mod tree;

pub use config::{RouterConfig, WildcardMode};
pub use error::{PatternFault, RouterError};
pub use route::pattern::{classify_segment, SegmentKind};
pub use tree::matcher::Params;
pub use tree::{Node, NodeKind};

// ============================================================================
// Core Types
// ============================================================================

/// Result of matching a request path
///
/// Holds the terminal node, which may be a pass-through prefix without a
/// handler, and the parameters captured on the way down.
#[derive(Debug)]
pub struct RouteMatch<'r, H> {
    node: &'r Node<H>,
    params: Params,
}

impl<'r, H> RouteMatch<'r, H> {
    /// The matched trie node
    pub fn node(&self) -> &'r Node<H> {
        self.node
    }

    /// Handler bound to the matched node, if any
    pub fn handler(&self) -> Option<&'r H> {
        self.node.handler()
    }

    /// Whether the match can be dispatched
    ///
    /// A path that ends on an intermediate node (`/order` when only
    /// `/order/create` is registered) is found but not routable; callers
    /// usually answer it with 404.
    pub fn is_routable(&self) -> bool {
        self.node.handler().is_some()
    }

    /// Registered pattern of the matched node, e.g. `/users/:id`
    pub fn full_route(&self) -> &'r str {
        self.node.full_route()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Gets one captured parameter
    ///
    /// # Examples
    ///
    /// ```
    /// use trie_router::Router;
    ///
    /// let mut router = Router::new();
    /// router.get("/param/:id/again/:id", ()).unwrap();
    ///
    /// // Same name bound twice: the deeper segment wins
    /// let route_match = router.match_route("GET", "/param/123/again/456").unwrap();
    /// assert_eq!(route_match.param("id"), Some("456"));
    /// ```
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}

/// Main router: one routing trie per HTTP method
///
/// Method tokens are opaque keys; any string works and each gets its own
/// tree on first registration.
#[derive(Debug, Clone)]
pub struct Router<H> {
    trees: HashMap<String, Node<H>>,
    config: RouterConfig,
}

impl<H> Router<H> {
    /// Creates a new router with default settings
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Creates a router with explicit matching options
    ///
    /// # Examples
    ///
    /// ```
    /// use trie_router::{Router, RouterConfig, WildcardMode};
    ///
    /// let config = RouterConfig::default().with_wildcard_mode(WildcardMode::SingleSegment);
    /// let mut router = Router::with_config(config);
    /// router.post("/order/*", ()).unwrap();
    ///
    /// assert!(router.match_route("POST", "/order/delete").is_some());
    /// assert!(router.match_route("POST", "/order/delete/123").is_none());
    /// ```
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            trees: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers `handler` for `method` and `pattern`
    ///
    /// # Pattern Grammar
    ///
    /// - `/` or `/seg/seg/...`; no trailing `/`, no empty segments
    /// - `name`: literal text
    /// - `:name`: path parameter
    /// - `:name(expr)`: parameter constrained by a regex
    /// - `*`: wildcard (whole segment only)
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidPattern`] for malformed pattern text
    /// - [`RouterError::InvalidRegex`] when an expression does not compile
    /// - [`RouterError::RouteConflict`] when a wildcard would share a position
    ///   with a param or regex, or a param/regex reuses a position under a
    ///   different name
    /// - [`RouterError::DuplicateRoute`] when the pattern already has a handler
    ///
    /// A failed registration leaves the router unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use trie_router::{Router, RouterError};
    ///
    /// let mut router = Router::new();
    /// router.register("GET", "/a/*", 1).unwrap();
    ///
    /// let err = router.register("GET", "/a/:id", 2).unwrap_err();
    /// assert!(matches!(err, RouterError::RouteConflict { .. }));
    /// ```
    pub fn register(&mut self, method: &str, pattern: &str, handler: H) -> Result<(), RouterError> {
        let result = self.register_internal(method, pattern, handler);
        match &result {
            Ok(()) => debug!(method, pattern, "registered route"),
            Err(err) => warn!(method, pattern, error = %err, "rejected route"),
        }
        result
    }

    /// Internal helper for registration (used by `register` and the shorthands)
    fn register_internal(&mut self, method: &str, pattern: &str, handler: H) -> Result<(), RouterError> {
        let segments = path::pattern_segments(pattern)?;
        let path = Node::compile_all(pattern, &segments)?;

        let root = self.trees.entry(method.to_string()).or_insert_with(|| {
            debug!(method, "created routing tree");
            Node::root()
        });
        root.insert(method, pattern, path, handler)
    }

    /// Registers and returns the router (functional builder)
    ///
    /// # Examples
    ///
    /// ```
    /// use trie_router::Router;
    ///
    /// let router = Router::new()
    ///     .with_route("GET", "/user", "list")
    ///     .and_then(|r| r.with_route("GET", "/user/:id", "show"))
    ///     .unwrap();
    ///
    /// assert_eq!(router.len(), 2);
    /// ```
    pub fn with_route(mut self, method: &str, pattern: &str, handler: H) -> Result<Self, RouterError> {
        self.register(method, pattern, handler)?;
        Ok(self)
    }

    pub fn get(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.register("GET", pattern, handler)
    }

    pub fn post(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.register("POST", pattern, handler)
    }

    pub fn put(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.register("PUT", pattern, handler)
    }

    pub fn delete(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.register("DELETE", pattern, handler)
    }

    pub fn patch(&mut self, pattern: &str, handler: H) -> Result<(), RouterError> {
        self.register("PATCH", pattern, handler)
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Matches a request path against the tree for `method`
    ///
    /// Returns `None` when the method has no routes or no branch reaches the
    /// end of the path. A returned match may sit on a node without a handler;
    /// see [`RouteMatch::is_routable`].
    ///
    /// Leading and trailing slashes of `path` are ignored, so `/user/` finds
    /// the same node as `/user`. A path with no segments left (`""`, `"//"`)
    /// always addresses the root; it is never offered to a root-level param
    /// as an empty capture.
    pub fn match_route(&self, method: &str, path: &str) -> Option<RouteMatch<'_, H>> {
        let Some(root) = self.trees.get(method) else {
            trace!(method, path, "no routes for method");
            return None;
        };

        let segments = path::request_segments(path);
        let mut params = Params::new();
        match tree::matcher::search(root, &segments, 0, &mut params, self.config.wildcard_mode) {
            Some(node) => {
                trace!(method, path, route = node.full_route(), "matched route");
                Some(RouteMatch { node, params })
            }
            None => {
                trace!(method, path, "no matching route");
                None
            }
        }
    }

    /// Matches and requires a bound handler
    ///
    /// # Examples
    ///
    /// ```
    /// use trie_router::Router;
    ///
    /// let mut router = Router::new();
    /// router.post("/order/create", "create").unwrap();
    ///
    /// let (handler, params) = router.find_handler("POST", "/order/create").unwrap();
    /// assert_eq!(*handler, "create");
    /// assert!(params.is_empty());
    ///
    /// // `/order` exists only as a prefix
    /// assert!(router.match_route("POST", "/order").is_some());
    /// assert!(router.find_handler("POST", "/order").is_none());
    /// ```
    pub fn find_handler(&self, method: &str, path: &str) -> Option<(&H, Params)> {
        let route_match = self.match_route(method, path)?;
        let handler = route_match.handler()?;
        Some((handler, route_match.into_params()))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Methods that have at least one tree, sorted
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// Every registered `(method, pattern)` pair, sorted
    pub fn routes(&self) -> Vec<(&str, &str)> {
        let mut routes = Vec::new();
        for (method, root) in &self.trees {
            let mut nodes = Vec::new();
            root.collect_routes(&mut nodes);
            routes.extend(nodes.into_iter().map(|node| (method.as_str(), node.full_route())));
        }
        routes.sort_unstable();
        routes
    }

    /// Number of registered routes across all methods
    pub fn len(&self) -> usize {
        self.trees
            .values()
            .map(|root| {
                let mut nodes = Vec::new();
                root.collect_routes(&mut nodes);
                nodes.len()
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Root of the tree for `method`
    pub fn tree(&self, method: &str) -> Option<&Node<H>> {
        self.trees.get(method)
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}
