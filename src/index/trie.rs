//! Map-keyed trie of suffix rules.
//!
//! Each node owns its children by label and holds at most one terminal.
//! Wildcard rules are stored under the literal `*` segment.
use std::collections::HashMap;

use crate::rule::{RuleKind, WILDCARD};
use crate::types::Labels;

/// Terminal entry stored on the node that ends a rule's path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    /// Position of the rule in the owning list
    pub rule: usize,
    pub kind: RuleKind,
    /// Declared in the private domains section
    pub private: bool,
}

impl Terminal {
    pub fn new(rule: usize, kind: RuleKind, private: bool) -> Self {
        Self {
            rule,
            kind,
            private,
        }
    }
}

/// Result of a lookup: the prevailing terminal and the path depth at which
/// it was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMatch {
    pub terminal: Terminal,
    /// Number of hostname labels consumed by the rule's path
    pub depth: usize,
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: HashMap<Box<str>, Node>,
    terminal: Option<Terminal>,
}

/// Trie over root-first rule paths
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    root: Node,
    len: usize,
}

impl RuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a terminal at `path` (root-first).
    ///
    /// Returns `false` and leaves the index unchanged if the path already
    /// ends in a terminal.
    pub fn insert(&mut self, path: &[&str], terminal: Terminal) -> bool {
        let mut node = &mut self.root;
        for &label in path {
            node = node.children.entry(Box::from(label)).or_default();
        }
        if node.terminal.is_some() {
            return false;
        }
        node.terminal = Some(terminal);
        self.len += 1;
        true
    }

    /// Terminal stored exactly at `path`, if any.
    pub fn get(&self, path: &[&str]) -> Option<&Terminal> {
        let mut node = &self.root;
        for &label in path {
            node = node.children.get(label)?;
        }
        node.terminal.as_ref()
    }

    /// Check if a rule ends exactly at `path`.
    pub fn contains(&self, path: &[&str]) -> bool {
        self.get(path).is_some()
    }

    /// Find the prevailing rule for a hostname.
    ///
    /// Walks the literal child and the `*` child at every depth. The deepest
    /// exception wins over anything else found on the walk; otherwise the
    /// deepest terminal wins. Private terminals are skipped at every depth
    /// when `ignore_private` is set.
    pub fn longest_prefix(&self, name: &Labels<'_>, ignore_private: bool) -> Option<IndexMatch> {
        let labels: Vec<&str> = name.root_first().collect();
        let mut search = Search {
            labels: &labels,
            ignore_private,
            exception: None,
            deepest: None,
        };
        search.visit(&self.root, 0);
        search.exception.or(search.deepest)
    }

    /// Number of terminals in the index
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

struct Search<'a> {
    labels: &'a [&'a str],
    ignore_private: bool,
    exception: Option<IndexMatch>,
    deepest: Option<IndexMatch>,
}

impl Search<'_> {
    fn visit(&mut self, node: &Node, depth: usize) {
        if let Some(terminal) = node.terminal {
            if !(self.ignore_private && terminal.private) {
                let found = IndexMatch { terminal, depth };
                let slot = if terminal.kind == RuleKind::Exception {
                    &mut self.exception
                } else {
                    &mut self.deepest
                };
                // First path explored wins ties: literal children go before `*`
                if slot.map_or(true, |current| depth > current.depth) {
                    *slot = Some(found);
                }
            }
        }

        let Some(&label) = self.labels.get(depth) else {
            return;
        };
        if let Some(child) = node.children.get(label) {
            self.visit(child, depth + 1);
        }
        if label != WILDCARD {
            if let Some(child) = node.children.get(WILDCARD) {
                self.visit(child, depth + 1);
            }
        }
    }
}
