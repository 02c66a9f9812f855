use serde::de::{Error as _, Unexpected};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Root of a pattern: the alternation branches, in rendering order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Regexp {
    pub matches: Vec<Match>,
    /// Trailing flags such as `gi`; empty when the flavor has none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flags: String,
    /// PCRE2 pattern start options such as `(*UTF)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PatternOption>,
}

impl Regexp {
    pub fn new(matches: Vec<Match>) -> Self {
        Self {
            matches,
            flags: String::new(),
            options: Vec::new(),
        }
    }

    /// A regexp with a single branch.
    pub fn single(fragments: Vec<MatchFragment>) -> Self {
        Self::new(vec![Match::new(fragments)])
    }

    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = flags.into();
        self
    }

    pub fn with_options(mut self, options: Vec<PatternOption>) -> Self {
        self.options = options;
        self
    }
}

/// One alternation branch: a concatenation of fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub fragments: Vec<MatchFragment>,
}

impl Match {
    pub fn new(fragments: Vec<MatchFragment>) -> Self {
        Self { fragments }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchFragment {
    pub content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
}

impl MatchFragment {
    pub fn new(content: Content) -> Self {
        Self {
            content,
            repeat: None,
        }
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = Some(repeat);
        self
    }
}

impl From<Content> for MatchFragment {
    fn from(content: Content) -> Self {
        Self::new(content)
    }
}

/// Quantifier. `max == None` means unbounded; serialized trees may also
/// spell that as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repeat {
    pub min: u32,
    #[serde(default, deserialize_with = "deserialize_max")]
    pub max: Option<u32>,
    #[serde(default = "default_greedy")]
    pub greedy: bool,
    #[serde(default)]
    pub possessive: bool,
}

fn default_greedy() -> bool {
    true
}

fn deserialize_max<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    match Option::<i64>::deserialize(deserializer)? {
        None | Some(-1) => Ok(None),
        Some(n) => u32::try_from(n)
            .map(Some)
            .map_err(|_| D::Error::invalid_value(Unexpected::Signed(n), &"-1 or a repeat count")),
    }
}

impl Repeat {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self {
            min,
            max,
            greedy: true,
            possessive: false,
        }
    }

    /// `*`
    pub fn star() -> Self {
        Self::new(0, None)
    }

    /// `+`
    pub fn plus() -> Self {
        Self::new(1, None)
    }

    /// `?`
    pub fn optional() -> Self {
        Self::new(0, Some(1))
    }

    /// `{n}`
    pub fn exactly(n: u32) -> Self {
        Self::new(n, Some(n))
    }

    /// `{n,}`
    pub fn at_least(n: u32) -> Self {
        Self::new(n, None)
    }

    /// `{n,m}`
    pub fn between(min: u32, max: u32) -> Self {
        Self::new(min, Some(max))
    }

    pub fn lazy(mut self) -> Self {
        self.greedy = false;
        self
    }

    pub fn possessive(mut self) -> Self {
        self.possessive = true;
        self
    }

    /// Whether the fragment may be skipped entirely.
    pub fn can_skip(&self) -> bool {
        self.min == 0
    }

    /// Whether the fragment may be repeated more than once.
    pub fn can_loop(&self) -> bool {
        self.max != Some(1)
    }
}

/// The polymorphic payload of a [`MatchFragment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", rename_all = "snake_case")]
pub enum Content {
    Literal {
        text: String,
    },
    AnyCharacter,
    Anchor {
        kind: AnchorKind,
    },
    Escape(Escape),
    Charset(Charset),
    Subexp(Subexp),
    BackReference(BackReference),
    UnicodePropertyEscape {
        property: String,
        #[serde(default)]
        negated: bool,
    },
    Conditional(Conditional),
    RecursiveRef {
        target: String,
    },
    BranchReset {
        regexp: Box<Regexp>,
    },
    BacktrackControl {
        verb: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        arg: String,
    },
    Callout(Callout),
    Comment {
        text: String,
    },
    QuotedLiteral {
        text: String,
    },
    InlineModifier(InlineModifier),
    BalancedGroup(BalancedGroup),
    /// A node kind this build does not know about, e.g. one added by a newer
    /// flavor. Rendered as a generic box; serialized as just its `type`.
    #[serde(skip)]
    Unknown {
        kind: String,
    },
}

const KNOWN_KINDS: &[&str] = &[
    "literal",
    "any_character",
    "anchor",
    "escape",
    "charset",
    "subexp",
    "back_reference",
    "unicode_property_escape",
    "conditional",
    "recursive_ref",
    "branch_reset",
    "backtrack_control",
    "callout",
    "comment",
    "quoted_literal",
    "inline_modifier",
    "balanced_group",
];

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| D::Error::missing_field("type"))?;
        if !KNOWN_KINDS.contains(&kind) {
            return Ok(Content::Unknown {
                kind: kind.to_string(),
            });
        }
        Content::deserialize(value).map_err(D::Error::custom)
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Content::Unknown { kind } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", kind)?;
                map.end()
            }
            known => Content::serialize(known, serializer),
        }
    }
}

impl Content {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal { text: text.into() }
    }

    pub fn anchor(kind: AnchorKind) -> Self {
        Self::Anchor { kind }
    }

    /// A numbered capture group around `regexp`.
    pub fn group(number: u32, regexp: Regexp) -> Self {
        Self::Subexp(Subexp::new(GroupKind::Capture, number, regexp))
    }

    /// Snake-case name of the node kind, as used in serialized trees.
    pub fn kind_name(&self) -> &str {
        match self {
            Content::Literal { .. } => "literal",
            Content::AnyCharacter => "any_character",
            Content::Anchor { .. } => "anchor",
            Content::Escape(_) => "escape",
            Content::Charset(_) => "charset",
            Content::Subexp(_) => "subexp",
            Content::BackReference(_) => "back_reference",
            Content::UnicodePropertyEscape { .. } => "unicode_property_escape",
            Content::Conditional(_) => "conditional",
            Content::RecursiveRef { .. } => "recursive_ref",
            Content::BranchReset { .. } => "branch_reset",
            Content::BacktrackControl { .. } => "backtrack_control",
            Content::Callout(_) => "callout",
            Content::Comment { .. } => "comment",
            Content::QuotedLiteral { .. } => "quoted_literal",
            Content::InlineModifier(_) => "inline_modifier",
            Content::BalancedGroup(_) => "balanced_group",
            Content::Unknown { kind } => kind.as_str(),
        }
    }
}

/// Zero-width position assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnchorKind {
    /// `^`
    Start,
    /// `$`
    End,
    /// `\b`
    WordBoundary,
    /// `\B`
    NonWordBoundary,
    /// `\A`
    StringStart,
    /// `\Z`
    StringEnd,
    /// `\z`
    AbsoluteEnd,
    /// `\<`
    WordStart,
    /// `\>`
    WordEnd,
    /// `\b{g}`
    GraphemeClusterBoundary,
    /// `\G` in Java and .NET
    EndOfPreviousMatch,
    /// `\G` in PCRE
    FirstMatchPosition,
    /// `\K`
    ResetMatchStart,
    Other(String),
}

impl AnchorKind {
    pub fn as_str(&self) -> &str {
        match self {
            AnchorKind::Start => "start",
            AnchorKind::End => "end",
            AnchorKind::WordBoundary => "word_boundary",
            AnchorKind::NonWordBoundary => "non_word_boundary",
            AnchorKind::StringStart => "string_start",
            AnchorKind::StringEnd => "string_end",
            AnchorKind::AbsoluteEnd => "absolute_end",
            AnchorKind::WordStart => "word_start",
            AnchorKind::WordEnd => "word_end",
            AnchorKind::GraphemeClusterBoundary => "grapheme_cluster_boundary",
            AnchorKind::EndOfPreviousMatch => "end_of_previous_match",
            AnchorKind::FirstMatchPosition => "first_match_position",
            AnchorKind::ResetMatchStart => "reset_match_start",
            AnchorKind::Other(name) => name.as_str(),
        }
    }
}

impl From<String> for AnchorKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "start" => AnchorKind::Start,
            "end" => AnchorKind::End,
            "word_boundary" => AnchorKind::WordBoundary,
            "non_word_boundary" => AnchorKind::NonWordBoundary,
            "string_start" => AnchorKind::StringStart,
            "string_end" => AnchorKind::StringEnd,
            "absolute_end" => AnchorKind::AbsoluteEnd,
            "word_start" => AnchorKind::WordStart,
            "word_end" => AnchorKind::WordEnd,
            "grapheme_cluster_boundary" => AnchorKind::GraphemeClusterBoundary,
            "end_of_previous_match" => AnchorKind::EndOfPreviousMatch,
            "first_match_position" => AnchorKind::FirstMatchPosition,
            "reset_match_start" => AnchorKind::ResetMatchStart,
            _ => AnchorKind::Other(value),
        }
    }
}

impl From<AnchorKind> for String {
    fn from(value: AnchorKind) -> Self {
        match value {
            AnchorKind::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// Backslash escapes such as `\d` or `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escape {
    /// Escape category, e.g. `digit`, `non_word`, `tab`.
    #[serde(default)]
    pub kind: String,
    /// The escape code as written, without the backslash.
    #[serde(default)]
    pub code: String,
    /// Display text chosen by the parser; may be empty.
    #[serde(default)]
    pub value: String,
}

impl Escape {
    pub fn new(kind: impl Into<String>, code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            code: code.into(),
            value: value.into(),
        }
    }
}

/// Bracketed character class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Charset {
    #[serde(default)]
    pub inverted: bool,
    pub items: Vec<CharsetItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CharsetItem {
    Literal {
        text: String,
    },
    Range {
        first: String,
        last: String,
    },
    Escape(Escape),
    PosixClass {
        name: String,
        #[serde(default)]
        negated: bool,
    },
    /// `\q{abc|def}` in JavaScript `v` mode.
    StringDisjunction {
        alternatives: Vec<String>,
    },
    /// A bracketed class nested inside another, e.g. the `[0-9]` in `[\w--[0-9]]`.
    Class(Charset),
    SetOperation {
        op: SetOp,
        operands: Vec<CharsetItem>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOp {
    Intersection,
    Subtraction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GroupKind {
    Capture,
    NamedCapture,
    NonCapture,
    PositiveLookahead,
    NegativeLookahead,
    PositiveLookbehind,
    NegativeLookbehind,
    NonAtomicPositiveLookahead,
    NonAtomicPositiveLookbehind,
    Atomic,
    ScriptRun,
    AtomicScriptRun,
    Other(String),
}

impl GroupKind {
    pub fn as_str(&self) -> &str {
        match self {
            GroupKind::Capture => "capture",
            GroupKind::NamedCapture => "named_capture",
            GroupKind::NonCapture => "non_capture",
            GroupKind::PositiveLookahead => "positive_lookahead",
            GroupKind::NegativeLookahead => "negative_lookahead",
            GroupKind::PositiveLookbehind => "positive_lookbehind",
            GroupKind::NegativeLookbehind => "negative_lookbehind",
            GroupKind::NonAtomicPositiveLookahead => "non_atomic_positive_lookahead",
            GroupKind::NonAtomicPositiveLookbehind => "non_atomic_positive_lookbehind",
            GroupKind::Atomic => "atomic",
            GroupKind::ScriptRun => "script_run",
            GroupKind::AtomicScriptRun => "atomic_script_run",
            GroupKind::Other(name) => name.as_str(),
        }
    }
}

impl From<String> for GroupKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "capture" => GroupKind::Capture,
            "named_capture" => GroupKind::NamedCapture,
            "non_capture" => GroupKind::NonCapture,
            "positive_lookahead" => GroupKind::PositiveLookahead,
            "negative_lookahead" => GroupKind::NegativeLookahead,
            "positive_lookbehind" => GroupKind::PositiveLookbehind,
            "negative_lookbehind" => GroupKind::NegativeLookbehind,
            "non_atomic_positive_lookahead" => GroupKind::NonAtomicPositiveLookahead,
            "non_atomic_positive_lookbehind" => GroupKind::NonAtomicPositiveLookbehind,
            "atomic" => GroupKind::Atomic,
            "script_run" => GroupKind::ScriptRun,
            "atomic_script_run" => GroupKind::AtomicScriptRun,
            _ => GroupKind::Other(value),
        }
    }
}

impl From<GroupKind> for String {
    fn from(value: GroupKind) -> Self {
        match value {
            GroupKind::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// Parenthesized group of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subexp {
    pub kind: GroupKind,
    /// Capture number; zero for non-capturing kinds.
    #[serde(default)]
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub regexp: Box<Regexp>,
}

impl Subexp {
    pub fn new(kind: GroupKind, number: u32, regexp: Regexp) -> Self {
        Self {
            kind,
            number,
            name: None,
            regexp: Box::new(regexp),
        }
    }

    pub fn named(number: u32, name: impl Into<String>, regexp: Regexp) -> Self {
        Self {
            kind: GroupKind::NamedCapture,
            number,
            name: Some(name.into()),
            regexp: Box::new(regexp),
        }
    }
}

/// `\1`, `\k<name>`, or a relative reference such as `\g{-1}` (negative number).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackReference {
    #[serde(default)]
    pub number: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// `(?(cond)yes|no)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub condition: Condition,
    pub true_branch: Box<Regexp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_branch: Option<Box<Regexp>>,
}

/// What a conditional tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Whether a group (by number or name) has matched.
    Group(BackReference),
    /// `(R)` or `(R1)` / `(R&name)`.
    Recursion { target: String },
    /// `(DEFINE)`
    Define,
    /// A lookaround used as the condition.
    Assertion(Subexp),
    /// Any other condition text.
    Text { text: String },
}

/// PCRE2 callout: `(?C)`, `(?C3)`, `(?C"text")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

/// `(?i)`, `(?-s)`, or scoped `(?i:...)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineModifier {
    #[serde(default)]
    pub enable: String,
    #[serde(default)]
    pub disable: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp: Option<Box<Regexp>>,
}

/// .NET `(?<name-other>...)` or `(?<-other>...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancedGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub other_name: String,
    pub regexp: Box<Regexp>,
}

/// `(*UTF)`, `(*LIMIT_MATCH=10)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternOption {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl PatternOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}
