//! Backtracking search over one method's trie
//!
//! Children are tried most specific first at every level:
//! literal, then regex (in registration order), then param, then wildcard.
//! A branch that dead-ends deeper down hands control back to the next sibling
//! kind, undoing any capture it made on the way.

use std::collections::HashMap;

use super::{DynamicChild, Node};
use crate::config::WildcardMode;

/// Captured path parameters, name → segment text
pub type Params = HashMap<String, String>;

/// Finds the node addressed by `segments[index..]` below `node`
///
/// Returns the terminal node whether or not it carries a handler.
pub(crate) fn search<'n, H>(
    node: &'n Node<H>,
    segments: &[&str],
    index: usize,
    params: &mut Params,
    mode: WildcardMode,
) -> Option<&'n Node<H>> {
    if index == segments.len() {
        return Some(node);
    }
    let segment = segments[index];

    if let Some(child) = node.statics.get(segment) {
        if let Some(found) = search(child, segments, index + 1, params, mode) {
            return Some(found);
        }
    }

    match &node.dynamic {
        Some(DynamicChild::Captures { param, regexes }) => {
            for child in regexes.iter().filter(|child| child.kind.accepts(segment)) {
                if let Some(found) = capture_and_search(child, segments, index, params, mode) {
                    return Some(found);
                }
            }
            param
                .as_deref()
                .and_then(|child| capture_and_search(child, segments, index, params, mode))
        }
        Some(DynamicChild::Wildcard(child)) => {
            search(child.as_ref(), segments, index + 1, params, mode).or_else(|| {
                // Trailing `*` swallows the rest of the path
                (mode == WildcardMode::Absorb && child.handler.is_some()).then_some(child.as_ref())
            })
        }
        None => None,
    }
}

/// Binds `segments[index]` under the child's parameter name and descends
///
/// On failure the binding is rolled back to whatever an outer segment had
/// stored under the same name, so a dead branch never clobbers it.
fn capture_and_search<'n, H>(
    child: &'n Node<H>,
    segments: &[&str],
    index: usize,
    params: &mut Params,
    mode: WildcardMode,
) -> Option<&'n Node<H>> {
    let Some(name) = child.kind.param_name() else {
        return search(child, segments, index + 1, params, mode);
    };

    let previous = params.insert(name.to_string(), segments[index].to_string());
    let found = search(child, segments, index + 1, params, mode);
    if found.is_none() {
        match previous {
            Some(value) => params.insert(name.to_string(), value),
            None => params.remove(name),
        };
    }
    found
}
