//! Pattern→style rule sets keyed by file extension.

use crate::style::{COMMENT, KEYWORD, STRING, Style};
use regex::Regex;
use std::path::Path;

/// One immutable pattern→style pair. Patterns are full regexes here (profiles
/// are built from trusted rule sets, not user input).
pub struct HighlightRule {
    pub pattern: Regex,
    pub style: Style,
}

/// An ordered rule set applied in declared order; later rules paint over
/// earlier ones on overlap.
pub struct HighlightProfile {
    pub name: &'static str,
    pub rules: Vec<HighlightRule>,
}

const KEYWORDS: &[&str] = &[
    "def", "class", "import", "from", "as", "return", "if", "else", "elif", "for", "while", "try",
    "except", "with", "in", "is", "not", "and", "or",
];

impl HighlightProfile {
    /// The source-code profile: word-bounded keywords, quoted string runs,
    /// then `#` line comments. Comment rules come last so a `#` inside text
    /// still reads as a comment over any earlier keyword coloring.
    pub fn source_code() -> Self {
        let mut rules = Vec::new();
        for word in KEYWORDS {
            rules.push(HighlightRule {
                pattern: compile(&format!(r"\b{word}\b")),
                style: Style::fg(KEYWORD),
            });
        }
        rules.push(HighlightRule {
            pattern: compile(r#""[^"]*""#),
            style: Style::fg(STRING),
        });
        rules.push(HighlightRule {
            pattern: compile(r"'[^']*'"),
            style: Style::fg(STRING),
        });
        rules.push(HighlightRule {
            pattern: compile(r"#.*"),
            style: Style::fg(COMMENT),
        });
        Self {
            name: "source_code",
            rules,
        }
    }

    /// Profile for a path, if its extension is in `extensions` (compared
    /// case-insensitively, without the leading dot). One-shot decoration at
    /// open time; there is no re-lex on edit.
    pub fn for_path(path: &Path, extensions: &[String]) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
            .then(Self::source_code)
    }
}

fn compile(pattern: &str) -> Regex {
    // Profile patterns are compile-time constants; a failure here is a
    // programming error, not a runtime condition.
    Regex::new(pattern).expect("builtin highlight pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn default_exts() -> Vec<String> {
        ["py", "md", "html"].map(str::to_string).to_vec()
    }

    #[test]
    fn for_path_matches_known_extensions() {
        let exts = default_exts();
        assert!(HighlightProfile::for_path(&PathBuf::from("notes.py"), &exts).is_some());
        assert!(HighlightProfile::for_path(&PathBuf::from("README.MD"), &exts).is_some());
        assert!(HighlightProfile::for_path(&PathBuf::from("plain.txt"), &exts).is_none());
        assert!(HighlightProfile::for_path(&PathBuf::from("no_extension"), &exts).is_none());
    }

    #[test]
    fn source_code_rules_are_ordered_keywords_first() {
        let profile = HighlightProfile::source_code();
        assert_eq!(profile.rules.len(), KEYWORDS.len() + 3);
        let last = profile.rules.last().unwrap();
        assert!(last.pattern.is_match("# trailing comment"));
    }

    #[test]
    fn keyword_patterns_are_word_bounded() {
        let profile = HighlightProfile::source_code();
        let def_rule = &profile.rules[0];
        assert!(def_rule.pattern.is_match("def main():"));
        assert!(!def_rule.pattern.is_match("undefined"));
    }
}
