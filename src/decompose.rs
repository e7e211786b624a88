//! Splitting a hostname around its matched public suffix.
//!
//! The trie walk already tells us how many labels the suffix spans, so the
//! split is plain index arithmetic: `trd . sld . tld` where `sld` is the
//! single label directly left of the suffix.

use crate::domain::Domain;

/// A hostname split by a rule, before it is assembled into a [`Domain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition<'a> {
    /// Labels left of the suffix, leaf-first
    pub remainder: &'a [&'a str],
    /// The public suffix as a dotted string, `None` if the rule did not match
    pub suffix: Option<String>,
}

impl<'a> Decomposition<'a> {
    pub(crate) fn new(remainder: &'a [&'a str], suffix: &[&str]) -> Self {
        Self {
            remainder,
            suffix: Some(suffix.join(".")),
        }
    }

    pub(crate) fn unmatched(remainder: &'a [&'a str]) -> Self {
        Self {
            remainder,
            suffix: None,
        }
    }

    /// The registered domain is the public suffix plus one additional label.
    pub fn is_registrable(&self) -> bool {
        self.suffix.is_some() && !self.remainder.is_empty()
    }

    /// The registrable label, directly left of the suffix.
    pub fn sld(&self) -> Option<&'a str> {
        self.suffix.as_ref()?;
        self.remainder.last().copied()
    }

    /// Everything left of the registrable label, joined with dots.
    pub fn trd(&self) -> Option<String> {
        self.suffix.as_ref()?;
        match self.remainder.len() {
            0 | 1 => None,
            n => Some(self.remainder[..n - 1].join(".")),
        }
    }

    /// Assemble the resolution result. `listed` records whether a concrete
    /// list rule (rather than the default `*`) produced this split.
    pub fn into_domain(self, listed: bool) -> Domain {
        let sld = self.sld().map(str::to_string);
        let trd = self.trd();
        Domain::with_listed(self.suffix, sld, trd, listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_remainder_labels() {
        let parts = Decomposition::new(&[], &["co", "uk"]);
        assert!(!parts.is_registrable());
        assert_eq!(parts.sld(), None);
        assert_eq!(parts.trd(), None);
        let domain = parts.into_domain(true);
        assert_eq!(domain.tld(), Some("co.uk"));
        assert_eq!(domain.sld(), None);
    }

    #[test]
    fn test_one_remainder_label() {
        let parts = Decomposition::new(&["google"], &["com"]);
        assert!(parts.is_registrable());
        assert_eq!(parts.sld(), Some("google"));
        assert_eq!(parts.trd(), None);
    }

    #[test]
    fn test_many_remainder_labels() {
        let parts = Decomposition::new(&["a", "b", "verybritish"], &["co", "uk"]);
        assert_eq!(parts.sld(), Some("verybritish"));
        assert_eq!(parts.trd().as_deref(), Some("a.b"));

        let domain = parts.into_domain(true);
        assert_eq!(domain.name(), "a.b.verybritish.co.uk");
    }

    #[test]
    fn test_unmatched_has_nothing() {
        let parts = Decomposition::unmatched(&["google", "com"]);
        assert!(!parts.is_registrable());
        assert_eq!(parts.sld(), None);
        assert_eq!(parts.trd(), None);
    }
}
