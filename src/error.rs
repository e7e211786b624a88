use thiserror::Error;

/// Classifies domain rejections for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    /// Blank input, leading dot, empty label or a URI scheme marker
    InvalidInput,
    /// Only the default `*` rule matched (reported in strict mode only)
    Unlisted,
    /// A rule matched but leaves no registrable label beneath the suffix
    NotAllowed,
}

/// Suffix engine error types
#[derive(Error, Debug)]
pub enum SuffixError {
    #[error("`{name}' is not a valid domain")]
    DomainInvalid { kind: DomainErrorKind, name: String },

    #[error("`{0}' is not allowed according to Registry policy")]
    DomainNotAllowed(String),

    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SuffixError {
    /// Build the domain error matching `kind` for `name`.
    pub fn from_kind(kind: DomainErrorKind, name: impl Into<String>) -> Self {
        match kind {
            DomainErrorKind::NotAllowed => SuffixError::DomainNotAllowed(name.into()),
            kind => SuffixError::DomainInvalid {
                kind,
                name: name.into(),
            },
        }
    }

    /// Returns the domain rejection kind, or `None` for list and I/O errors.
    pub fn domain_kind(&self) -> Option<DomainErrorKind> {
        match self {
            SuffixError::DomainInvalid { kind, .. } => Some(*kind),
            SuffixError::DomainNotAllowed(_) => Some(DomainErrorKind::NotAllowed),
            _ => None,
        }
    }

    /// True for every rejection of a hostname, including `DomainNotAllowed`.
    pub fn is_domain_invalid(&self) -> bool {
        self.domain_kind().is_some()
    }

    /// True only when a rule matched but does not allow the hostname.
    pub fn is_not_allowed(&self) -> bool {
        matches!(self, SuffixError::DomainNotAllowed(_))
    }
}

pub type Result<T> = std::result::Result<T, SuffixError>;
