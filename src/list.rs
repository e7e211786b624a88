//! Suffix list: the rule set plus its compiled index.

use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;

use crate::error::{Result, SuffixError};
use crate::index::{RuleIndex, Terminal};
use crate::parser::{parse_rules, parse_rules_from_file, ParseOptions};
use crate::rule::{Rule, RuleKind};
use crate::types::{Labels, TextRule};

/// The prevailing rule when no listed rule matches
static DEFAULT_RULE: Lazy<Rule> = Lazy::new(Rule::default_rule);

/// A collection of suffix rules indexed for longest-match lookup.
///
/// A list is built once and then only read; share it behind an `Arc`.
/// `add` needs `&mut self`, so a list other threads are reading can only be
/// extended by building a new one.
#[derive(Debug, Clone, Default)]
pub struct SuffixList {
    rules: Vec<Rule>,
    index: RuleIndex,
}

impl SuffixList {
    /// Create an empty list. Every lookup falls back to the default rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse suffix list text, keeping the private domains section.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parse suffix list text with explicit options.
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self> {
        let text_rules = parse_rules(text, options)?;
        Self::from_text_rules(&text_rules)
    }

    /// Read and parse a suffix list file.
    pub fn from_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Self> {
        let text_rules = parse_rules_from_file(path, options)?;
        Self::from_text_rules(&text_rules)
    }

    /// Build a list from already constructed rules.
    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut list = Self::new();
        for rule in rules {
            list.add(rule);
        }
        list
    }

    fn from_text_rules(text_rules: &[TextRule]) -> Result<Self> {
        let mut list = Self::new();
        list.rules.reserve(text_rules.len());

        for text_rule in text_rules {
            let rule = Rule::parse(&text_rule.value, text_rule.private).map_err(|e| {
                SuffixError::ParseErrorAtLine {
                    line: text_rule.line_num,
                    message: e.to_string(),
                }
            })?;
            list.add(rule);
        }

        debug!(
            "parsed suffix list: {} rules ({} private)",
            list.len(),
            list.rules.iter().filter(|r| r.is_private()).count()
        );
        Ok(list)
    }

    /// Add a rule and insert it into the index.
    ///
    /// Returns `false` if the rule is already listed or another rule already
    /// ends at the same index path; the list is unchanged in that case.
    pub fn add(&mut self, rule: Rule) -> bool {
        if self.contains(&rule) {
            warn!("skipping duplicate suffix rule {}", rule);
            return false;
        }

        let terminal = Terminal::new(self.rules.len(), rule.kind(), rule.is_private());
        if !self.index.insert(&rule.index_path(), terminal) {
            warn!("skipping suffix rule {}: path already taken by another rule", rule);
            return false;
        }

        self.rules.push(rule);
        true
    }

    /// Builder form of [`SuffixList::add`].
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Remove all rules.
    pub fn clear(&mut self) {
        self.rules.clear();
        self.index = RuleIndex::new();
    }

    /// Rules in insertion order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn index(&self) -> &RuleIndex {
        &self.index
    }

    /// Check if an equal rule (same kind and value) is listed.
    pub fn contains(&self, rule: &Rule) -> bool {
        self.index
            .get(&rule.index_path())
            .map_or(false, |t| self.rules[t.rule] == *rule)
    }

    /// Find the prevailing rule for a normalized hostname.
    ///
    /// Never fails: when nothing matches, the default `*` rule is returned.
    pub fn find(&self, name: &str, ignore_private: bool) -> &Rule {
        self.find_labels(&Labels::new(name), ignore_private)
    }

    /// [`SuffixList::find`] over an already split hostname.
    pub fn find_labels(&self, name: &Labels<'_>, ignore_private: bool) -> &Rule {
        self.lookup(name, ignore_private).unwrap_or(&*DEFAULT_RULE)
    }

    /// The listed rule prevailing for `name`, or `None` when only the
    /// default rule would apply.
    pub fn lookup(&self, name: &Labels<'_>, ignore_private: bool) -> Option<&Rule> {
        self.index
            .longest_prefix(name, ignore_private)
            .map(|found| &self.rules[found.terminal.rule])
    }

    /// All rules matching a normalized hostname, in list order.
    pub fn select(&self, name: &str, ignore_private: bool) -> Vec<&Rule> {
        let labels = Labels::new(name);
        self.rules
            .iter()
            .filter(|r| !(ignore_private && r.is_private()))
            .filter(|r| r.matches(&labels))
            .collect()
    }

    /// Linear-scan equivalent of [`SuffixList::find`].
    ///
    /// An exception rule prevails over any other match; otherwise the rule
    /// with the most levels wins (first listed on ties).
    pub fn find_linear(&self, name: &str, ignore_private: bool) -> &Rule {
        let matching = self.select(name, ignore_private);
        if let Some(exception) = matching
            .iter()
            .filter(|r| r.kind() == RuleKind::Exception)
            .max_by_key(|r| r.labels().len())
        {
            return *exception;
        }

        let mut prevailing: Option<&Rule> = None;
        for rule in matching {
            if prevailing.map_or(true, |p| rule.length() > p.length()) {
                prevailing = Some(rule);
            }
        }
        prevailing.unwrap_or(&*DEFAULT_RULE)
    }
}

impl PartialEq for SuffixList {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl Eq for SuffixList {}
