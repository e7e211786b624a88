use crate::error::{DomainErrorKind, Result, SuffixError};

/// URI scheme separator; hostnames never contain it
const SCHEME_MARKER: &str = "://";

/// Normalize a hostname for lookup.
///
/// Trims surrounding whitespace, ASCII-lowercases, and strips one trailing
/// dot (fully qualified names). Rejects blank input, a leading dot, empty
/// labels and anything carrying a URI scheme. Normalizing an already
/// normalized name returns it unchanged.
pub fn normalize(name: &str) -> Result<String> {
    let trimmed = name.trim();
    let invalid = || SuffixError::DomainInvalid {
        kind: DomainErrorKind::InvalidInput,
        name: trimmed.to_string(),
    };

    if trimmed.is_empty() || trimmed.starts_with('.') || trimmed.contains(SCHEME_MARKER) {
        return Err(invalid());
    }

    let name = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if name.is_empty() || name.split('.').any(str::is_empty) {
        return Err(invalid());
    }

    Ok(name.to_ascii_lowercase())
}
