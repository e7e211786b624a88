use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::decompose::Decomposition;
use crate::error::{Result, SuffixError};
use crate::types::Labels;

/// Wildcard label used both in rule text and as a trie path segment
pub const WILDCARD: &str = "*";

/// Exception marker at the start of a rule
pub const BANG: char = '!';

/// The three rule kinds of the suffix list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// `co.uk`: the listed labels are the public suffix
    Normal,
    /// `*.ck`: any single label left of the listed labels is part of the suffix
    Wildcard,
    /// `!www.ck`: carves a registrable name out of a wildcard
    Exception,
}

/// One suffix list entry.
///
/// `labels` is always root-first and never contains the marker. For
/// exceptions the leftmost label of the value is kept apart in `label`: it
/// must be present for the rule to match but is not part of the suffix.
#[derive(Debug, Clone)]
pub enum Rule {
    Normal {
        value: String,
        labels: Vec<String>,
        private: bool,
    },
    Wildcard {
        value: String,
        labels: Vec<String>,
        private: bool,
    },
    Exception {
        value: String,
        labels: Vec<String>,
        label: String,
        private: bool,
    },
}

impl Rule {
    /// Create a rule from its list token (`com`, `*.uk`, `!bl.uk`, `*`).
    pub fn parse(token: &str, private: bool) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SuffixError::InvalidRule("empty rule".to_string()));
        }

        if let Some(value) = token.strip_prefix(BANG) {
            let mut leaf_first = split_labels(token, value)?;
            let label = leaf_first.remove(0);
            leaf_first.reverse();
            return Ok(Rule::Exception {
                value: value.to_string(),
                labels: leaf_first,
                label,
                private,
            });
        }

        if token == WILDCARD {
            return Ok(Rule::Wildcard {
                value: String::new(),
                labels: Vec::new(),
                private,
            });
        }

        if let Some(rest) = token.strip_prefix(WILDCARD) {
            let value = rest
                .strip_prefix('.')
                .ok_or_else(|| SuffixError::InvalidRule(token.to_string()))?;
            let mut labels = split_labels(token, value)?;
            labels.reverse();
            return Ok(Rule::Wildcard {
                value: value.to_string(),
                labels,
                private,
            });
        }

        let mut labels = split_labels(token, token)?;
        labels.reverse();
        Ok(Rule::Normal {
            value: token.to_string(),
            labels,
            private,
        })
    }

    /// The prevailing rule when nothing in the list matches: `*`.
    pub fn default_rule() -> Self {
        Rule::Wildcard {
            value: String::new(),
            labels: Vec::new(),
            private: false,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Normal { .. } => RuleKind::Normal,
            Rule::Wildcard { .. } => RuleKind::Wildcard,
            Rule::Exception { .. } => RuleKind::Exception,
        }
    }

    /// Rule text without its marker (`uk` for `*.uk`, `bl.uk` for `!bl.uk`).
    pub fn value(&self) -> &str {
        match self {
            Rule::Normal { value, .. }
            | Rule::Wildcard { value, .. }
            | Rule::Exception { value, .. } => value,
        }
    }

    /// Rule text as written in the list.
    pub fn rule(&self) -> String {
        match self {
            Rule::Normal { value, .. } => value.clone(),
            Rule::Wildcard { value, .. } if value.is_empty() => WILDCARD.to_string(),
            Rule::Wildcard { value, .. } => format!("{WILDCARD}.{value}"),
            Rule::Exception { value, .. } => format!("{BANG}{value}"),
        }
    }

    /// Root-first labels that form the suffix part of the rule.
    pub fn labels(&self) -> &[String] {
        match self {
            Rule::Normal { labels, .. }
            | Rule::Wildcard { labels, .. }
            | Rule::Exception { labels, .. } => labels,
        }
    }

    pub fn is_private(&self) -> bool {
        match self {
            Rule::Normal { private, .. }
            | Rule::Wildcard { private, .. }
            | Rule::Exception { private, .. } => *private,
        }
    }

    /// True for the bare `*` rule.
    pub fn is_default(&self) -> bool {
        matches!(self, Rule::Wildcard { labels, .. } if labels.is_empty())
    }

    /// Number of levels counted for precedence. Equals the number of
    /// hostname labels the rule reports as public suffix.
    pub fn length(&self) -> usize {
        match self {
            Rule::Normal { labels, .. } | Rule::Exception { labels, .. } => labels.len(),
            Rule::Wildcard { labels, .. } => labels.len() + 1,
        }
    }

    /// Root-first trie path: wildcards end in `*`, exceptions end in the
    /// excluded leftmost label.
    pub fn index_path(&self) -> Vec<&str> {
        let mut path: Vec<&str> = self.labels().iter().map(String::as_str).collect();
        match self {
            Rule::Normal { .. } => {}
            Rule::Wildcard { .. } => path.push(WILDCARD),
            Rule::Exception { label, .. } => path.push(label),
        }
        path
    }

    /// Check whether the rule applies to the hostname's tail.
    pub fn matches(&self, name: &Labels<'_>) -> bool {
        match self {
            Rule::Normal { labels, .. } => name.ends_with(labels.as_slice()),
            Rule::Wildcard { labels, .. } => {
                name.len() > labels.len() && name.ends_with(labels.as_slice())
            }
            Rule::Exception { labels, label, .. } => {
                name.len() > labels.len()
                    && name.ends_with(labels.as_slice())
                    && name.root_first().nth(labels.len()) == Some(label.as_str())
            }
        }
    }

    /// Split the hostname into the labels left of the suffix and the suffix.
    ///
    /// A non-matching rule, or a one-label exception (whose suffix is empty),
    /// yields no suffix.
    pub fn decompose<'a>(&self, name: &'a Labels<'_>) -> Decomposition<'a> {
        let suffix_len = self.length();
        if !self.matches(name) || suffix_len == 0 {
            return Decomposition::unmatched(name.as_slice());
        }
        Decomposition::new(name.head(suffix_len), name.tail(suffix_len))
    }

    /// True if the rule matches and leaves a registrable label.
    pub fn allow(&self, name: &Labels<'_>) -> bool {
        self.decompose(name).is_registrable()
    }
}

/// Split a rule value into leaf-first labels, rejecting empty ones.
fn split_labels(token: &str, value: &str) -> Result<Vec<String>> {
    let labels: Vec<String> = value.split('.').map(str::to_string).collect();
    if labels.iter().any(|l| l.is_empty() || l == WILDCARD) {
        return Err(SuffixError::InvalidRule(token.to_string()));
    }
    Ok(labels)
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.value() == other.value()
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.value().hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rule())
    }
}
