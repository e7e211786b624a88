//! Suffix Engine - Public Suffix List matching for Rust
//!
//! This library splits hostnames into their registrable parts using the
//! rules of the Public Suffix List:
//! - Normal, wildcard (`*.`) and exception (`!`) rules
//! - ICANN and private rule tiers
//! - Trie-indexed longest-match lookup
//! - A bundled, lazily parsed default list
//! - LRU-cached resolution with hot list reload
//!
//! # Example
//!
//! ```rust
//! use suffix_engine_r::{resolve, ResolveOptions, SuffixList};
//!
//! let list_text = "
//! // uk : https://en.wikipedia.org/wiki/.uk
//! uk
//! co.uk
//! // jp
//! *.kawasaki.jp
//! !city.kawasaki.jp
//! ";
//!
//! let list = SuffixList::parse(list_text).unwrap();
//!
//! let domain = resolve("www.example.co.uk", &list, &ResolveOptions::default()).unwrap();
//! assert_eq!(domain.tld(), Some("co.uk"));
//! assert_eq!(domain.sld(), Some("example"));
//! assert_eq!(domain.trd(), Some("www"));
//! assert_eq!(domain.domain().as_deref(), Some("example.co.uk"));
//!
//! // Exceptions carve a registrable name out of a wildcard
//! let domain = resolve("city.kawasaki.jp", &list, &ResolveOptions::default()).unwrap();
//! assert_eq!(domain.tld(), Some("kawasaki.jp"));
//! assert_eq!(domain.sld(), Some("city"));
//!
//! // A bare suffix is never registrable
//! assert!(resolve("co.uk", &list, &ResolveOptions::default()).is_err());
//! ```
//!
//! # List Syntax
//!
//! One rule per line, in the first whitespace-delimited token:
//! ```text
//! com            normal rule
//! *.ck           wildcard: every label under ck is a suffix
//! !www.ck        exception: www.ck is registrable despite *.ck
//! // comment
//! // ===BEGIN PRIVATE DOMAINS===
//! ```
//!
//! Rules after the private domains sentinel are tagged private and can be
//! skipped per lookup with [`ResolveOptions::with_ignore_private`].

pub mod decompose;
pub mod domain;
pub mod error;
pub mod index;
pub mod list;
pub mod normalize;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod rule;
pub mod types;

// Re-export commonly used items
pub use decompose::Decomposition;
pub use domain::Domain;
pub use error::{DomainErrorKind, Result, SuffixError};
pub use list::SuffixList;
pub use normalize::normalize;
pub use parser::{parse_rules, parse_rules_from_file, ParseOptions};
pub use rule::{Rule, RuleKind};
pub use types::{Labels, TextRule};

// Re-export default list handling
pub use registry::{
    clear_default, default_definition, default_list, is_default_loaded, reload_default,
    set_default,
};

// Re-export resolver types
pub use resolver::{resolve, ResolveOptions, Resolver, ResolverOptions, DEFAULT_CACHE_SIZE};

/// Resolve a hostname against the default list.
///
/// `parse("www.google.com")` yields `tld = com`, `sld = google`, `trd = www`.
///
/// # Errors
///
/// Same as [`resolve`]: `DomainInvalid` for malformed input and
/// `DomainNotAllowed` when the hostname is itself a public suffix.
pub fn parse(name: &str) -> Result<Domain> {
    resolve(name, &default_list(), &ResolveOptions::default())
}

/// Check a hostname against the default list. Never fails.
pub fn valid(name: &str) -> bool {
    parse(name).is_ok()
}

/// Registrable domain (`sld.tld`) of a hostname under the default list.
pub fn registrable_domain(name: &str) -> Option<String> {
    parse(name).ok().and_then(|d| d.domain())
}
