/// Label view over a normalized hostname.
///
/// Labels are stored leaf-first (`www`, `google`, `com`), the order they are
/// written in. Rule matching walks them root-first through [`Labels::root_first`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Labels<'a> {
    labels: Vec<&'a str>,
}

impl<'a> Labels<'a> {
    /// Split a normalized (lowercased, no trailing dot) hostname into labels.
    pub fn new(name: &'a str) -> Self {
        if name.is_empty() {
            return Self::default();
        }
        Self {
            labels: name.split('.').collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in leaf-first order.
    pub fn as_slice(&self) -> &[&'a str] {
        &self.labels
    }

    /// Labels in root-first order (`com`, `google`, `www`).
    pub fn root_first(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.labels.iter().rev().copied()
    }

    /// The rightmost `n` labels, leaf-first. Saturates at the full sequence.
    pub fn tail(&self, n: usize) -> &[&'a str] {
        let n = n.min(self.labels.len());
        &self.labels[self.labels.len() - n..]
    }

    /// Everything left of the rightmost `n` labels, leaf-first.
    pub fn head(&self, n: usize) -> &[&'a str] {
        let n = n.min(self.labels.len());
        &self.labels[..self.labels.len() - n]
    }

    /// True if the hostname's root-first labels start with `path`.
    pub fn ends_with<S: AsRef<str>>(&self, path: &[S]) -> bool {
        path.len() <= self.labels.len()
            && self
                .root_first()
                .zip(path.iter())
                .all(|(label, expected)| label == expected.as_ref())
    }
}

/// Parsed list line before it is turned into a [`crate::Rule`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRule {
    /// Rule text including its `!` or `*.` marker
    pub value: String,
    /// Declared after the private domains sentinel
    pub private: bool,
    /// Line number in the original text (for error reporting)
    pub line_num: usize,
}
