use std::fmt;

use serde::{Deserialize, Serialize};

use crate::list::SuffixList;
use crate::types::Labels;

/// Resolution result: a hostname split into `trd . sld . tld`.
///
/// `tld` is the public suffix (not necessarily a single label), `sld` the
/// registrable label and `trd` whatever is left of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Domain {
    tld: Option<String>,
    sld: Option<String>,
    trd: Option<String>,
    /// A concrete list rule, not the default `*`, produced this result
    #[serde(default)]
    listed: bool,
}

impl Domain {
    /// Create a domain from its parts, as if matched by a listed rule.
    pub fn new(tld: Option<String>, sld: Option<String>, trd: Option<String>) -> Self {
        Self::with_listed(tld, sld, trd, true)
    }

    pub(crate) fn with_listed(
        tld: Option<String>,
        sld: Option<String>,
        trd: Option<String>,
        listed: bool,
    ) -> Self {
        Self {
            tld,
            sld,
            trd,
            listed,
        }
    }

    pub fn tld(&self) -> Option<&str> {
        self.tld.as_deref()
    }

    pub fn sld(&self) -> Option<&str> {
        self.sld.as_deref()
    }

    pub fn trd(&self) -> Option<&str> {
        self.trd.as_deref()
    }

    /// False when only the default `*` rule applied.
    pub fn is_listed(&self) -> bool {
        self.listed
    }

    /// `[trd, sld, tld]`
    pub fn to_parts(&self) -> [Option<&str>; 3] {
        [self.trd(), self.sld(), self.tld()]
    }

    /// Full hostname, skipping missing parts.
    pub fn name(&self) -> String {
        self.to_parts()
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Registrable domain (`sld.tld`), if there is one.
    pub fn domain(&self) -> Option<String> {
        match (&self.sld, &self.tld) {
            (Some(sld), Some(tld)) => Some(format!("{sld}.{tld}")),
            _ => None,
        }
    }

    /// Full name when the domain has a subdomain part.
    pub fn subdomain(&self) -> Option<String> {
        if self.is_subdomain() {
            Some(self.name())
        } else {
            None
        }
    }

    pub fn is_domain(&self) -> bool {
        self.tld.is_some() && self.sld.is_some()
    }

    pub fn is_subdomain(&self) -> bool {
        self.is_domain() && self.trd.is_some()
    }

    /// A registrable domain without a subdomain part.
    pub fn is_a_domain(&self) -> bool {
        self.is_domain() && !self.is_subdomain()
    }

    /// A concrete rule matched and left at least a registrable label.
    pub fn is_valid(&self) -> bool {
        self.listed && self.is_domain()
    }

    /// Re-check the name against `list`; the domain keeps no reference to
    /// the list that produced it.
    pub fn is_valid_in(&self, list: &SuffixList) -> bool {
        let name = self.name();
        let labels = Labels::new(&name);
        list.find(&name, false).allow(&labels)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
