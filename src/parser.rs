use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::error::{Result, SuffixError};
use crate::types::TextRule;

/// Regex pattern for a single rule token
/// Format: `*`, or an optional `!` / `*.` marker followed by dot-separated labels
static RULE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\*|(?:!|\*\.)?[^\s.!*]+(?:\.[^\s.!*]+)*)$")
        .expect("RULE_PATTERN: hardcoded regex is invalid")
});

/// Comment marker of the suffix list format
pub const COMMENT_TOKEN: &str = "//";

/// Sentinel comment opening the private domains section
pub const PRIVATE_TOKEN: &str = "===BEGIN PRIVATE DOMAINS===";

/// List parsing options.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Keep rules declared after the private domains sentinel
    pub private_domains: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            private_domains: true,
        }
    }
}

impl ParseOptions {
    /// Create new parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include or drop the private domains section.
    pub fn with_private_domains(mut self, private_domains: bool) -> Self {
        self.private_domains = private_domains;
        self
    }
}

/// Parse suffix list text into rule lines.
///
/// Blank lines and `//` comments are skipped. Everything after the
/// [`PRIVATE_TOKEN`] sentinel is tagged private, or dropped entirely when
/// `private_domains` is off. Only the first whitespace-delimited token of a
/// line is the rule.
pub fn parse_rules(text: &str, options: &ParseOptions) -> Result<Vec<TextRule>> {
    let mut rules = Vec::new();
    let mut private = false;

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix(COMMENT_TOKEN) {
            if comment.contains(PRIVATE_TOKEN) {
                if !options.private_domains {
                    break;
                }
                private = true;
            }
            continue;
        }

        let rule = parse_single_rule(line, line_num, private)?;
        rules.push(rule);
    }

    Ok(rules)
}

/// Parse suffix list rules from a file.
pub fn parse_rules_from_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Vec<TextRule>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        SuffixError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to read suffix list '{}': {}", path.display(), e),
        ))
    })?;
    parse_rules(&text, options)
}

/// Parse a single rule line
fn parse_single_rule(line: &str, line_num: usize, private: bool) -> Result<TextRule> {
    // Trailing commentary after the first token is ignored
    let token = line.split_whitespace().next().unwrap_or_default();

    if !RULE_PATTERN.is_match(token) {
        return Err(SuffixError::ParseErrorAtLine {
            line: line_num,
            message: format!("Invalid rule format: {}", token),
        });
    }

    Ok(TextRule {
        value: token.to_string(),
        private,
        line_num,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_pattern_regex_compiles() {
        // Forces Lazy evaluation; an invalid pattern panics with the expect message
        assert!(RULE_PATTERN.is_match("com"));
    }

    #[test]
    fn test_rule_pattern_accepts_list_syntax() {
        for token in ["com", "co.uk", "*.uk", "!bl.uk", "*", "公司.cn", "xn--55qx5d.cn"] {
            assert!(RULE_PATTERN.is_match(token), "{} should be accepted", token);
        }
        for token in ["co..uk", ".uk", "uk.", "*uk", "!", "foo.*.uk", "a!b.uk", "**.uk"] {
            assert!(!RULE_PATTERN.is_match(token), "{} should be rejected", token);
        }
    }

    #[test]
    fn test_parse_simple_rules() {
        let text = "// ac : http://en.wikipedia.org/wiki/.ac\nac\ncom.ac\n\n*.ar\n!congresodelalengua3.ar\n";
        let rules = parse_rules(text, &ParseOptions::default()).unwrap();
        let values: Vec<&str> = rules.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["ac", "com.ac", "*.ar", "!congresodelalengua3.ar"]);
        assert!(rules.iter().all(|r| !r.private));
        assert_eq!(rules[0].line_num, 2);
    }

    #[test]
    fn test_parse_ignores_trailing_commentary() {
        let text = "com   some trailing words\n\tnet\t// comment\n";
        let rules = parse_rules(text, &ParseOptions::default()).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].value, "com");
        assert_eq!(rules[1].value, "net");
    }

    #[test]
    fn test_parse_private_section() {
        let text = r#"
// ===BEGIN ICANN DOMAINS===
com
// ===END ICANN DOMAINS===
// ===BEGIN PRIVATE DOMAINS===
blogspot.com
github.io
// ===END PRIVATE DOMAINS===
"#;
        let rules = parse_rules(text, &ParseOptions::default()).unwrap();
        assert_eq!(rules.len(), 3);
        assert!(!rules[0].private);
        assert!(rules[1].private);
        assert!(rules[2].private);
    }

    #[test]
    fn test_parse_without_private_domains() {
        let text = "com\n// ===BEGIN PRIVATE DOMAINS===\nblogspot.com\n";
        let options = ParseOptions::new().with_private_domains(false);
        let rules = parse_rules(text, &options).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].value, "com");
    }

    #[test]
    fn test_parse_invalid_rule_reports_line() {
        let text = "com\n\nco..uk\n";
        let err = parse_rules(text, &ParseOptions::default()).unwrap_err();
        match err {
            SuffixError::ParseErrorAtLine { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("co..uk"), "got: {}", message);
            }
            other => panic!("expected ParseErrorAtLine, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_text() {
        let rules = parse_rules("", &ParseOptions::default()).unwrap();
        assert!(rules.is_empty());
        let rules = parse_rules("// only a comment\n\n", &ParseOptions::default()).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_parse_rules_from_file() {
        use std::io::Write;
        let dir = std::env::temp_dir().join("suffix_engine_parser_test");
        let _ = fs::create_dir_all(&dir);
        let file_path = dir.join("list.dat");
        let mut f = fs::File::create(&file_path).unwrap();
        writeln!(f, "// uk").unwrap();
        writeln!(f, "uk").unwrap();
        writeln!(f, "co.uk").unwrap();
        drop(f);

        let rules = parse_rules_from_file(&file_path, &ParseOptions::default()).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].value, "co.uk");

        let _ = fs::remove_file(&file_path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_parse_rules_from_missing_file() {
        let result = parse_rules_from_file("/nonexistent/path/list.dat", &ParseOptions::default());
        let err = result.unwrap_err();
        assert!(matches!(err, SuffixError::IoError(_)));
        assert!(format!("{}", err).contains("/nonexistent/path/list.dat"));
    }
}
