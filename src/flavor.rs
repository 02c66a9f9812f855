use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::Regexp;

// "parse error: 1:5 (4): rule literal: no match found"
static REPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:parse error:\s*)?(\d+):(\d+)(?:\s*\(\d+\))?:\s*(.*)$")
        .expect("report pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flavor {
    #[default]
    #[serde(rename = "javascript")]
    JavaScript,
    Java,
    #[serde(rename = "dotnet")]
    DotNet,
    Pcre,
    PosixBre,
    PosixEre,
    #[serde(rename = "gnugrep-bre", alias = "gnugrep")]
    GnuGrepBre,
    #[serde(rename = "gnugrep-ere")]
    GnuGrepEre,
}

/// One flag letter a flavor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagInfo {
    pub ch: char,
    pub name: &'static str,
    pub description: &'static str,
}

const fn flag(ch: char, name: &'static str, description: &'static str) -> FlagInfo {
    FlagInfo {
        ch,
        name,
        description,
    }
}

const JAVASCRIPT_FLAGS: &[FlagInfo] = &[
    flag('d', "hasIndices", "Generate indices for substring matches"),
    flag('g', "global", "Find all matches rather than stopping after the first"),
    flag('i', "ignoreCase", "Case-insensitive matching"),
    flag('m', "multiline", "^ and $ match line boundaries"),
    flag('s', "dotAll", ". matches newlines"),
    flag('u', "unicode", "Enable full Unicode matching"),
    flag('y', "sticky", "Matches only from the lastIndex property"),
];

const JAVA_FLAGS: &[FlagInfo] = &[
    flag('d', "UNIX_LINES", "Only \\n is recognized as line terminator"),
    flag('i', "CASE_INSENSITIVE", "Case-insensitive matching (US-ASCII)"),
    flag('m', "MULTILINE", "^ and $ match at line boundaries"),
    flag('s', "DOTALL", ". matches any character including line terminators"),
    flag('u', "UNICODE_CASE", "Unicode-aware case folding"),
    flag('x', "COMMENTS", "Permit whitespace and comments in pattern"),
    flag('U', "UNICODE_CHARACTER_CLASS", "Unicode version of predefined character classes"),
];

const DOTNET_FLAGS: &[FlagInfo] = &[
    flag('i', "IgnoreCase", "Case-insensitive matching"),
    flag('m', "Multiline", "^ and $ match at line boundaries"),
    flag('s', "Singleline", ". matches newline characters"),
    flag('n', "ExplicitCapture", "Only named groups are captured"),
    flag('x', "IgnorePatternWhitespace", "Ignore unescaped whitespace and allow # comments"),
];

const PCRE_FLAGS: &[FlagInfo] = &[
    flag('i', "caseless", "Case-insensitive matching"),
    flag('m', "multiline", "^ and $ match at newlines"),
    flag('s', "dotall", ". matches newlines"),
    flag('x', "extended", "Ignore whitespace and allow comments"),
    flag('J', "dupnames", "Allow duplicate named groups"),
    flag('U', "ungreedy", "Invert greediness of quantifiers"),
    flag('n', "no_auto_capture", "Plain (...) groups are non-capturing"),
];

/// Syntax a flavor understands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSet {
    pub lookahead: bool,
    pub lookbehind: bool,
    pub lookbehind_unlimited: bool,
    pub named_groups: bool,
    pub atomic_groups: bool,
    pub possessive_quantifiers: bool,
    pub recursive_patterns: bool,
    pub conditional_patterns: bool,
    pub unicode_properties: bool,
    pub posix_classes: bool,
    pub balanced_groups: bool,
    pub inline_modifiers: bool,
    pub comments: bool,
    pub branch_reset: bool,
    pub backtracking_control: bool,
    pub callouts: bool,
    pub script_runs: bool,
    pub non_atomic_lookaround: bool,
    pub pattern_start_options: bool,
}

impl Flavor {
    pub const ALL: [Flavor; 8] = [
        Flavor::JavaScript,
        Flavor::Java,
        Flavor::DotNet,
        Flavor::Pcre,
        Flavor::PosixBre,
        Flavor::PosixEre,
        Flavor::GnuGrepBre,
        Flavor::GnuGrepEre,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Flavor::JavaScript => "javascript",
            Flavor::Java => "java",
            Flavor::DotNet => "dotnet",
            Flavor::Pcre => "pcre",
            Flavor::PosixBre => "posix-bre",
            Flavor::PosixEre => "posix-ere",
            Flavor::GnuGrepBre => "gnugrep-bre",
            Flavor::GnuGrepEre => "gnugrep-ere",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Flavor::JavaScript => "JavaScript (ECMAScript 2018+) regular expressions",
            Flavor::Java => "Java (java.util.regex.Pattern) regular expressions",
            Flavor::DotNet => ".NET (System.Text.RegularExpressions) regular expressions",
            Flavor::Pcre => "Perl Compatible Regular Expressions (PCRE2)",
            Flavor::PosixBre => "POSIX Basic Regular Expressions (IEEE Std 1003.1)",
            Flavor::PosixEre => "POSIX Extended Regular Expressions (IEEE Std 1003.1)",
            Flavor::GnuGrepBre => "GNU grep Basic Regular Expressions (BRE with GNU extensions)",
            Flavor::GnuGrepEre => "GNU grep Extended Regular Expressions (like grep -E)",
        }
    }

    /// Flag letters valid after the pattern or in inline modifiers.
    /// POSIX and GNU grep take their flags from the command line, so they have none.
    pub fn supported_flags(self) -> &'static [FlagInfo] {
        match self {
            Flavor::JavaScript => JAVASCRIPT_FLAGS,
            Flavor::Java => JAVA_FLAGS,
            Flavor::DotNet => DOTNET_FLAGS,
            Flavor::Pcre => PCRE_FLAGS,
            Flavor::PosixBre | Flavor::PosixEre | Flavor::GnuGrepBre | Flavor::GnuGrepEre => &[],
        }
    }

    pub fn flag_info(self, ch: char) -> Option<&'static FlagInfo> {
        self.supported_flags().iter().find(|info| info.ch == ch)
    }

    pub fn features(self) -> FeatureSet {
        match self {
            Flavor::JavaScript => FeatureSet {
                lookahead: true,
                lookbehind: true,
                named_groups: true,
                unicode_properties: true,
                ..FeatureSet::default()
            },
            Flavor::Java => FeatureSet {
                lookahead: true,
                lookbehind: true,
                named_groups: true,
                atomic_groups: true,
                possessive_quantifiers: true,
                unicode_properties: true,
                posix_classes: true,
                inline_modifiers: true,
                comments: true,
                ..FeatureSet::default()
            },
            Flavor::DotNet => FeatureSet {
                lookahead: true,
                lookbehind: true,
                lookbehind_unlimited: true,
                named_groups: true,
                atomic_groups: true,
                possessive_quantifiers: true,
                conditional_patterns: true,
                unicode_properties: true,
                balanced_groups: true,
                inline_modifiers: true,
                comments: true,
                ..FeatureSet::default()
            },
            Flavor::Pcre => FeatureSet {
                lookahead: true,
                lookbehind: true,
                named_groups: true,
                atomic_groups: true,
                possessive_quantifiers: true,
                recursive_patterns: true,
                conditional_patterns: true,
                unicode_properties: true,
                posix_classes: true,
                inline_modifiers: true,
                comments: true,
                branch_reset: true,
                backtracking_control: true,
                callouts: true,
                script_runs: true,
                non_atomic_lookaround: true,
                pattern_start_options: true,
                ..FeatureSet::default()
            },
            Flavor::PosixBre | Flavor::PosixEre | Flavor::GnuGrepBre | Flavor::GnuGrepEre => {
                FeatureSet {
                    posix_classes: true,
                    ..FeatureSet::default()
                }
            }
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown flavor '{name}' (available: {available})")]
pub struct UnknownFlavor {
    pub name: String,
    pub available: String,
}

impl FromStr for Flavor {
    type Err = UnknownFlavor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "gnugrep" {
            return Ok(Flavor::GnuGrepBre);
        }
        Flavor::ALL
            .into_iter()
            .find(|flavor| flavor.name() == name)
            .ok_or_else(|| UnknownFlavor {
                name: s.to_string(),
                available: Flavor::ALL
                    .iter()
                    .map(|flavor| flavor.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// 1-based location of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Structured failure reported by a flavor parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub position: Option<Position>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    pub fn at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            position: Some(Position { line, column }),
        }
    }

    /// Recovers position and message from a generated-grammar report such as
    /// `parse error: 1:5 (4): rule literal: no match found`. Reports that do
    /// not carry a position are kept whole as the message.
    pub fn from_report(report: &str) -> Self {
        let report = report.trim();
        let Some(caps) = REPORT_RE.captures(report) else {
            return Self::new(report);
        };
        let line = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let column = caps.get(2).and_then(|m| m.as_str().parse().ok());
        let message = caps.get(3).map(|m| m.as_str().trim()).unwrap_or_default();
        // Nested reports repeat the offset: "... (12): actual message".
        let message = match message.split_once("): ") {
            Some((_, rest)) => rest,
            None => message,
        };
        match (line, column) {
            (Some(line), Some(column)) => Self::at(message, line, column),
            _ => Self::new(report),
        }
    }

    /// Caller-facing display: the pattern with a caret under the offending column.
    pub fn display_with_caret(&self, pattern: &str) -> String {
        let mut out = String::from("Error parsing pattern:\n\n");
        out.push_str("  ");
        out.push_str(pattern);
        out.push('\n');
        if let Some(position) = self.position {
            let len = pattern.chars().count();
            if position.column >= 1 && position.column <= len {
                out.push_str("  ");
                out.push_str(&" ".repeat(position.column - 1));
                out.push_str("^\n");
            }
        }
        out.push('\n');
        out.push_str(&self.message);
        out.push('\n');
        out
    }
}

/// Implemented by each flavor's grammar.
pub trait FlavorParser {
    fn flavor(&self) -> Flavor;

    fn parse(&self, pattern: &str) -> Result<Regexp, ParseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavor_names_round_trip() {
        for flavor in Flavor::ALL {
            assert_eq!(flavor.name().parse::<Flavor>(), Ok(flavor));
        }
        assert_eq!("gnugrep".parse::<Flavor>(), Ok(Flavor::GnuGrepBre));
        assert_eq!("PCRE".parse::<Flavor>(), Ok(Flavor::Pcre));
    }

    #[test]
    fn unknown_flavor_lists_alternatives() {
        let err = "perl".parse::<Flavor>().unwrap_err();
        assert!(err.to_string().contains("perl"));
        assert!(err.to_string().contains("posix-ere"));
    }

    #[test]
    fn flag_tables() {
        assert_eq!(Flavor::JavaScript.flag_info('g').map(|f| f.name), Some("global"));
        assert_eq!(Flavor::Pcre.flag_info('J').map(|f| f.name), Some("dupnames"));
        assert!(Flavor::PosixBre.supported_flags().is_empty());
        assert!(Flavor::DotNet.features().balanced_groups);
        assert!(!Flavor::JavaScript.features().atomic_groups);
    }

    #[test]
    fn report_with_position() {
        let err = ParseError::from_report("parse error: 1:5 (4): rule literal: no match found");
        assert_eq!(err.position, Some(Position { line: 1, column: 5 }));
        assert_eq!(err.message, "rule literal: no match found");
    }

    #[test]
    fn report_without_position() {
        let err = ParseError::from_report("unexpected end of input");
        assert_eq!(err.position, None);
        assert_eq!(err.message, "unexpected end of input");
    }

    #[test]
    fn caret_points_at_column() {
        let err = ParseError::at("unterminated group", 1, 3);
        let shown = err.display_with_caret("ab(c");
        assert!(shown.contains("  ab(c\n    ^\n"));
        assert!(shown.ends_with("unterminated group\n"));
    }

    #[test]
    fn caret_omitted_past_end() {
        let err = ParseError::at("boom", 1, 9);
        assert!(!err.display_with_caret("abc").contains('^'));
    }
}
