//! Resolver module.
//!
//! Turns hostnames into [`Domain`] values against a suffix list. The free
//! function [`resolve`] works on any list; [`Resolver`] owns a list snapshot
//! plus an LRU cache of outcomes and can be reloaded while other threads are
//! resolving.

use std::num::NonZeroUsize;
use std::sync::Arc;

use log::info;
use lru::LruCache;
use parking_lot::{Mutex, RwLock};

use crate::domain::Domain;
use crate::error::{DomainErrorKind, Result, SuffixError};
use crate::list::SuffixList;
use crate::normalize::normalize;
use crate::registry::default_list;
use crate::rule::Rule;
use crate::types::Labels;

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Cached outcome for a normalized hostname
type CacheValue = std::result::Result<Domain, DomainErrorKind>;

/// Per-lookup resolution options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Match against ICANN rules only, skipping the private domains section
    pub ignore_private: bool,
    /// Reject hostnames that only matched the default `*` rule
    pub strict: bool,
}

impl ResolveOptions {
    /// Create new resolve options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set ICANN-only matching.
    pub fn with_ignore_private(mut self, ignore_private: bool) -> Self {
        self.ignore_private = ignore_private;
        self
    }

    /// Set strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Resolver builder options.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Options applied to every lookup
    pub resolve: ResolveOptions,
    /// LRU cache size for resolution outcomes
    pub cache_size: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            resolve: ResolveOptions::default(),
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl ResolverOptions {
    /// Create new resolver options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    /// Set the options applied to every lookup.
    pub fn with_resolve_options(mut self, resolve: ResolveOptions) -> Self {
        self.resolve = resolve;
        self
    }
}

/// Resolve a hostname against `list`.
///
/// Normalizes the name, finds the prevailing rule and splits the name
/// around it.
///
/// # Errors
///
/// - `DomainInvalid { kind: InvalidInput }` for blank input, a leading dot,
///   empty labels or a URI scheme
/// - `DomainInvalid { kind: Unlisted }` in strict mode when no listed rule matched
/// - `DomainNotAllowed` when the matched rule leaves no registrable label
pub fn resolve(name: &str, list: &SuffixList, options: &ResolveOptions) -> Result<Domain> {
    let name = normalize(name)?;
    resolve_normalized(&name, list, options).map_err(|kind| SuffixError::from_kind(kind, name))
}

fn resolve_normalized(name: &str, list: &SuffixList, options: &ResolveOptions) -> CacheValue {
    let labels = Labels::new(name);
    let listed = list.lookup(&labels, options.ignore_private);
    if listed.is_none() && options.strict {
        return Err(DomainErrorKind::Unlisted);
    }

    let rule = listed.unwrap_or_else(|| list.find_labels(&labels, options.ignore_private));
    let parts = rule.decompose(&labels);
    if !parts.is_registrable() {
        return Err(DomainErrorKind::NotAllowed);
    }
    Ok(parts.into_domain(listed.is_some()))
}

/// Hostname resolver over an application-owned suffix list.
pub struct Resolver {
    list: RwLock<Arc<SuffixList>>,
    options: ResolveOptions,
    cache: Mutex<LruCache<String, CacheValue>>,
}

impl Resolver {
    /// Create a resolver over `list`.
    pub fn new(list: Arc<SuffixList>, options: ResolverOptions) -> Self {
        let cache_size = NonZeroUsize::new(options.cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            list: RwLock::new(list),
            options: options.resolve,
            cache: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Create a resolver over the process-wide default list.
    pub fn with_default_list(options: ResolverOptions) -> Self {
        Self::new(default_list(), options)
    }

    /// Snapshot of the current list.
    pub fn list(&self) -> Arc<SuffixList> {
        Arc::clone(&self.list.read())
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve a hostname, serving repeated names from the cache.
    pub fn resolve(&self, name: &str) -> Result<Domain> {
        let name = normalize(name)?;

        let mut cache = self.cache.lock();
        if let Some(cached) = cache.get(&name) {
            return cached
                .clone()
                .map_err(|kind| SuffixError::from_kind(kind, name.as_str()));
        }

        // Resolve while holding the cache lock so a concurrent reload cannot
        // slip a result computed against the old list into the new cache.
        let list = self.list();
        let outcome = resolve_normalized(&name, &list, &self.options);
        cache.put(name.clone(), outcome.clone());

        outcome.map_err(|kind| SuffixError::from_kind(kind, name))
    }

    /// Check whether a hostname resolves. Never fails.
    pub fn is_valid(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Registrable domain (`sld.tld`) of a hostname, if it has one.
    pub fn registrable_domain(&self, name: &str) -> Option<String> {
        self.resolve(name).ok().and_then(|d| d.domain())
    }

    /// The rule prevailing for a hostname under this resolver's options.
    pub fn find_rule(&self, name: &str) -> Result<Rule> {
        let name = normalize(name)?;
        let list = self.list();
        Ok(list.find(&name, self.options.ignore_private).clone())
    }

    /// Install a new list and drop every cached outcome.
    ///
    /// Returns the previous list; lookups already holding it are unaffected.
    pub fn reload(&self, list: SuffixList) -> Arc<SuffixList> {
        let mut cache = self.cache.lock();
        let previous = std::mem::replace(&mut *self.list.write(), Arc::new(list));
        cache.clear();
        info!(
            "resolver reloaded suffix list: {} -> {} rules",
            previous.len(),
            self.list().len()
        );
        previous
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Number of cached outcomes
    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = r#"
com
uk
co.uk
*.do
*.ck
!www.ck
// ===BEGIN PRIVATE DOMAINS===
blogspot.com
"#;

    fn list() -> SuffixList {
        SuffixList::parse(LIST).unwrap()
    }

    fn resolver() -> Resolver {
        Resolver::new(Arc::new(list()), ResolverOptions::new())
    }

    #[test]
    fn test_resolve_basic() {
        let list = list();
        let options = ResolveOptions::default();

        let d = resolve("google.com", &list, &options).unwrap();
        assert_eq!(d.to_parts(), [None, Some("google"), Some("com")]);

        let d = resolve("www.google.com", &list, &options).unwrap();
        assert_eq!(d.to_parts(), [Some("www"), Some("google"), Some("com")]);

        let d = resolve("foo.verybritish.co.uk", &list, &options).unwrap();
        assert_eq!(d.to_parts(), [Some("foo"), Some("verybritish"), Some("co.uk")]);
    }

    #[test]
    fn test_resolve_rejects_bare_suffix() {
        let list = list();
        let options = ResolveOptions::default();
        for name in ["com", "co.uk", "example.do", "do"] {
            let err = resolve(name, &list, &options).unwrap_err();
            assert!(err.is_not_allowed(), "{} should not be allowed, got {:?}", name, err);
        }
    }

    #[test]
    fn test_resolve_wildcard_and_exception() {
        let list = list();
        let options = ResolveOptions::default();

        let d = resolve("www.example.do", &list, &options).unwrap();
        assert_eq!(d.to_parts(), [None, Some("www"), Some("example.do")]);

        let d = resolve("www.ck", &list, &options).unwrap();
        assert_eq!(d.to_parts(), [None, Some("www"), Some("ck")]);

        let d = resolve("foo.www.ck", &list, &options).unwrap();
        assert_eq!(d.to_parts(), [Some("foo"), Some("www"), Some("ck")]);
    }

    #[test]
    fn test_resolve_invalid_input() {
        let list = list();
        let err = resolve("http://www.google.com", &list, &ResolveOptions::default()).unwrap_err();
        assert_eq!(err.domain_kind(), Some(DomainErrorKind::InvalidInput));
    }

    #[test]
    fn test_resolve_unlisted_lenient_and_strict() {
        let list = list();

        let d = resolve("example.tldnotlisted", &list, &ResolveOptions::default()).unwrap();
        assert_eq!(d.tld(), Some("tldnotlisted"));
        assert_eq!(d.sld(), Some("example"));
        assert!(!d.is_listed());
        assert!(!d.is_valid());

        let strict = ResolveOptions::new().with_strict(true);
        let err = resolve("example.tldnotlisted", &list, &strict).unwrap_err();
        assert_eq!(err.domain_kind(), Some(DomainErrorKind::Unlisted));

        let err = resolve("tldnotlisted", &list, &ResolveOptions::default()).unwrap_err();
        assert!(err.is_not_allowed());
    }

    #[test]
    fn test_resolve_ignore_private() {
        let list = list();
        let d = resolve("me.blogspot.com", &list, &ResolveOptions::default()).unwrap();
        assert_eq!(d.to_parts(), [None, Some("me"), Some("blogspot.com")]);

        let icann = ResolveOptions::new().with_ignore_private(true);
        let d = resolve("me.blogspot.com", &list, &icann).unwrap();
        assert_eq!(d.to_parts(), [Some("me"), Some("blogspot"), Some("com")]);
    }

    #[test]
    fn test_resolver_caches_outcomes() {
        let resolver = resolver();
        assert_eq!(resolver.cache_len(), 0);

        let first = resolver.resolve("www.google.com").unwrap();
        let second = resolver.resolve("WWW.Google.com.").unwrap();
        assert_eq!(first, second);
        assert_eq!(resolver.cache_len(), 1);

        assert!(resolver.resolve("example.do").unwrap_err().is_not_allowed());
        assert!(resolver.resolve("example.do").unwrap_err().is_not_allowed());
        assert_eq!(resolver.cache_len(), 2);

        resolver.clear_cache();
        assert_eq!(resolver.cache_len(), 0);
    }

    #[test]
    fn test_resolver_invalid_input_is_not_cached() {
        let resolver = resolver();
        assert!(!resolver.is_valid(""));
        assert!(!resolver.is_valid("http://google.com"));
        assert_eq!(resolver.cache_len(), 0);
    }

    #[test]
    fn test_resolver_zero_cache_size() {
        let resolver = Resolver::new(Arc::new(list()), ResolverOptions::new().with_cache_size(0));
        assert!(resolver.is_valid("google.com"));
        assert!(resolver.is_valid("google.co.uk"));
        assert_eq!(resolver.cache_len(), 1);
    }

    #[test]
    fn test_resolver_registrable_domain() {
        let resolver = resolver();
        assert_eq!(
            resolver.registrable_domain("a.b.verybritish.co.uk").as_deref(),
            Some("verybritish.co.uk")
        );
        assert_eq!(resolver.registrable_domain("co.uk"), None);
    }

    #[test]
    fn test_resolver_find_rule() {
        let resolver = resolver();
        assert_eq!(resolver.find_rule("foo.www.ck").unwrap().rule(), "!www.ck");
        assert!(resolver.find_rule("google.net").unwrap().is_default());
        assert!(resolver.find_rule("").is_err());
    }

    #[test]
    fn test_resolver_reload_installs_new_list() {
        let resolver = resolver();
        assert!(resolver.is_valid("google.com"));
        let held = resolver.list();

        let previous = resolver.reload(SuffixList::parse("net").unwrap());
        assert_eq!(previous.len(), held.len());
        assert_eq!(resolver.cache_len(), 0);

        // The old snapshot keeps working
        let d = resolve("www.google.com", &held, &ResolveOptions::default()).unwrap();
        assert_eq!(d.tld(), Some("com"));

        // The resolver now only knows `net`
        let d = resolver.resolve("www.google.com").unwrap();
        assert!(!d.is_listed());
        assert_eq!(resolver.list().len(), 1);
    }

    #[test]
    fn test_resolver_concurrent_readers() {
        let resolver = Arc::new(resolver());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let resolver = Arc::clone(&resolver);
                std::thread::spawn(move || {
                    for j in 0..200 {
                        let name = format!("host{}.site{}.co.uk", j, i);
                        let d = resolver.resolve(&name).unwrap();
                        assert_eq!(d.tld(), Some("co.uk"));
                        assert_eq!(d.sld().map(String::from), Some(format!("site{}", i)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
