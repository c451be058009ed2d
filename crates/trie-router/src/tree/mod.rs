//! Per-method routing trie
//!
//! One [`Node`] tree per HTTP method. Each node keeps its literal children in a
//! map and its capturing children in a small sum type, so a wildcard
//! can never sit next to a param or regex child at the same position.

use std::collections::HashMap;

use regex::Regex;

use crate::error::RouterError;
use crate::route::{classify_segment, SegmentKind};

pub mod matcher;

/// Classification of a trie node
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Per-method root, segment text `/`
    Root,
    /// Literal segment
    Static,
    /// `:name`
    Param { name: String },
    /// `:name(source)`, with `regex` compiled from `source`
    Regex {
        name: String,
        source: String,
        regex: Regex,
    },
    /// `*`
    Wildcard,
}

impl NodeKind {
    /// Name the captured segment is stored under
    pub fn param_name(&self) -> Option<&str> {
        match self {
            NodeKind::Param { name } | NodeKind::Regex { name, .. } => Some(name),
            NodeKind::Root | NodeKind::Static | NodeKind::Wildcard => None,
        }
    }

    /// Expression text of a regex node
    pub fn regex_source(&self) -> Option<&str> {
        match self {
            NodeKind::Regex { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether a regex node accepts `segment`; false for every other kind
    fn accepts(&self, segment: &str) -> bool {
        match self {
            NodeKind::Regex { regex, .. } => regex.is_match(segment),
            _ => false,
        }
    }
}

/// Capturing children of a node
///
/// Params and regexes may share a position; a wildcard owns it alone.
#[derive(Debug, Clone)]
pub(crate) enum DynamicChild<H> {
    Captures {
        param: Option<Box<Node<H>>>,
        regexes: Vec<Node<H>>,
    },
    Wildcard(Box<Node<H>>),
}

impl<H> DynamicChild<H> {
    /// Segment text reported when an incoming registration collides with this slot
    fn existing_segment(&self) -> &str {
        match self {
            DynamicChild::Captures {
                param: Some(param), ..
            } => &param.segment,
            DynamicChild::Captures { regexes, .. } => regexes
                .first()
                .map(|node| node.segment.as_str())
                .unwrap_or_default(),
            DynamicChild::Wildcard(node) => &node.segment,
        }
    }
}

/// A vertex of a routing trie
#[derive(Debug, Clone)]
pub struct Node<H> {
    kind: NodeKind,
    segment: String,
    full_route: String,
    handler: Option<H>,
    statics: HashMap<String, Node<H>>,
    dynamic: Option<DynamicChild<H>>,
}

impl<H> Node<H> {
    pub(crate) fn root() -> Self {
        Self::new(NodeKind::Root, "/".to_string(), "/".to_string())
    }

    fn new(kind: NodeKind, segment: String, full_route: String) -> Self {
        Self {
            kind,
            segment,
            full_route,
            handler: None,
            statics: HashMap::new(),
            dynamic: None,
        }
    }

    /// Builds the detached node for one pattern segment, compiling its regex
    fn compile(pattern: &str, segment: &str, full_route: String) -> Result<Self, RouterError> {
        let kind = match classify_segment(segment) {
            SegmentKind::Static(_) => NodeKind::Static,
            SegmentKind::Param(name) => NodeKind::Param { name },
            SegmentKind::Regex { name, source } => {
                let regex = Regex::new(&source).map_err(|err| RouterError::InvalidRegex {
                    pattern: pattern.to_string(),
                    segment: segment.to_string(),
                    source: err,
                })?;
                NodeKind::Regex {
                    name,
                    source,
                    regex,
                }
            }
            SegmentKind::Wildcard => NodeKind::Wildcard,
        };
        Ok(Self::new(kind, segment.to_string(), full_route))
    }

    /// Compiles every segment of a pattern up front so that a bad regex is
    /// reported before the tree is modified
    pub(crate) fn compile_all(pattern: &str, segments: &[&str]) -> Result<Vec<Self>, RouterError> {
        let mut full_route = String::with_capacity(pattern.len());
        segments
            .iter()
            .map(|segment| {
                full_route.push('/');
                full_route.push_str(segment);
                Self::compile(pattern, segment, full_route.clone())
            })
            .collect()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Classification of this node
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Pattern text at this position (`user`, `:id`, `:id([0-9]+)`, `*`, or `/` for roots)
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Pattern from the root down to this node, e.g. `/user/:id`
    ///
    /// Suitable as a low-cardinality route name for metrics and logs.
    pub fn full_route(&self) -> &str {
        &self.full_route
    }

    /// Bound handler; `None` for pass-through nodes
    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    pub fn static_child(&self, segment: &str) -> Option<&Node<H>> {
        self.statics.get(segment)
    }

    pub fn param_child(&self) -> Option<&Node<H>> {
        match &self.dynamic {
            Some(DynamicChild::Captures { param, .. }) => param.as_deref(),
            _ => None,
        }
    }

    /// Regex children in registration order
    pub fn regex_children(&self) -> &[Node<H>] {
        match &self.dynamic {
            Some(DynamicChild::Captures { regexes, .. }) => regexes,
            _ => &[],
        }
    }

    pub fn wildcard_child(&self) -> Option<&Node<H>> {
        match &self.dynamic {
            Some(DynamicChild::Wildcard(node)) => Some(node.as_ref()),
            _ => None,
        }
    }

    /// All direct children: literals, then regexes, then param, then wildcard
    pub fn children(&self) -> impl Iterator<Item = &Node<H>> {
        self.statics
            .values()
            .chain(self.regex_children())
            .chain(self.param_child())
            .chain(self.wildcard_child())
    }

    /// Depth-first collection of every node that carries a handler
    pub(crate) fn collect_routes<'a>(&'a self, out: &mut Vec<&'a Node<H>>) {
        if self.handler.is_some() {
            out.push(self);
        }
        for child in self.children() {
            child.collect_routes(out);
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Walks `path` from this node, creating missing nodes, and binds `handler`
    /// at the end of it
    ///
    /// Conflicts can only be found on nodes that already exist, which the walk
    /// visits before creating anything, so an error leaves the tree unchanged.
    pub(crate) fn insert(
        &mut self,
        method: &str,
        pattern: &str,
        path: Vec<Node<H>>,
        handler: H,
    ) -> Result<(), RouterError> {
        let mut node = self;
        for fresh in path {
            node = node.child_or_create(pattern, fresh)?;
        }

        if node.handler.is_some() {
            return Err(RouterError::DuplicateRoute {
                method: method.to_string(),
                pattern: pattern.to_string(),
            });
        }
        node.handler = Some(handler);
        Ok(())
    }

    fn child_or_create(&mut self, pattern: &str, fresh: Node<H>) -> Result<&mut Node<H>, RouterError> {
        match fresh.kind {
            NodeKind::Param { .. } => self.param_or_create(pattern, fresh),
            NodeKind::Regex { .. } => self.regex_or_create(pattern, fresh),
            NodeKind::Wildcard => self.wildcard_or_create(pattern, fresh),
            NodeKind::Root | NodeKind::Static => Ok(self
                .statics
                .entry(fresh.segment.clone())
                .or_insert(fresh)),
        }
    }

    fn param_or_create(&mut self, pattern: &str, fresh: Node<H>) -> Result<&mut Node<H>, RouterError> {
        let incoming = fresh.segment.clone();
        let dynamic = self.dynamic.get_or_insert_with(|| DynamicChild::Captures {
            param: None,
            regexes: Vec::new(),
        });

        match dynamic {
            DynamicChild::Captures { param, .. } => match param {
                Some(existing) => {
                    if existing.segment == incoming {
                        Ok(existing.as_mut())
                    } else {
                        Err(RouterError::conflict(pattern, &existing.segment, &incoming))
                    }
                }
                None => Ok(param.insert(Box::new(fresh)).as_mut()),
            },
            DynamicChild::Wildcard(existing) => {
                Err(RouterError::conflict(pattern, &existing.segment, &incoming))
            }
        }
    }

    /// Regex children are keyed by expression text
    fn regex_or_create(&mut self, pattern: &str, fresh: Node<H>) -> Result<&mut Node<H>, RouterError> {
        let incoming = fresh.segment.clone();
        let source = fresh.kind.regex_source().unwrap_or_default().to_string();
        let dynamic = self.dynamic.get_or_insert_with(|| DynamicChild::Captures {
            param: None,
            regexes: Vec::new(),
        });

        match dynamic {
            DynamicChild::Captures { regexes, .. } => {
                match regexes
                    .iter()
                    .position(|child| child.kind.regex_source() == Some(source.as_str()))
                {
                    Some(index) if regexes[index].segment != incoming => Err(
                        RouterError::conflict(pattern, &regexes[index].segment, &incoming),
                    ),
                    Some(index) => Ok(&mut regexes[index]),
                    None => {
                        regexes.push(fresh);
                        let last = regexes.len() - 1;
                        Ok(&mut regexes[last])
                    }
                }
            }
            DynamicChild::Wildcard(existing) => {
                Err(RouterError::conflict(pattern, &existing.segment, &incoming))
            }
        }
    }

    fn wildcard_or_create(&mut self, pattern: &str, fresh: Node<H>) -> Result<&mut Node<H>, RouterError> {
        let incoming = fresh.segment.clone();
        let dynamic = self
            .dynamic
            .get_or_insert_with(|| DynamicChild::Wildcard(Box::new(fresh)));

        match dynamic {
            DynamicChild::Wildcard(existing) => Ok(existing.as_mut()),
            captures => Err(RouterError::conflict(
                pattern,
                captures.existing_segment(),
                &incoming,
            )),
        }
    }
}
