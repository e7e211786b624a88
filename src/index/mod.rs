//! Label-keyed rule index.
//!
//! Rules are stored in a trie keyed by root-first labels, so finding the
//! prevailing rule costs O(k) node visits for a hostname of k labels
//! instead of testing every rule.
//!
//! ## Example
//!
//! ```
//! use suffix_engine_r::index::{RuleIndex, Terminal};
//! use suffix_engine_r::{Labels, RuleKind};
//!
//! let mut index = RuleIndex::new();
//! index.insert(&["uk", "co"], Terminal::new(0, RuleKind::Normal, false));
//!
//! let found = index
//!     .longest_prefix(&Labels::new("www.example.co.uk"), false)
//!     .unwrap();
//! assert_eq!(found.depth, 2);
//! ```

mod trie;

pub use trie::{IndexMatch, RuleIndex, Terminal};
