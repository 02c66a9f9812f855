use crate::ast::{
    AnchorKind, BackReference, BalancedGroup, Callout, CharsetItem, Condition, Escape, GroupKind,
    InlineModifier, PatternOption, Repeat, SetOp, Subexp,
};
use crate::flavor::Flavor;

pub fn anchor_label(kind: &AnchorKind) -> &str {
    match kind {
        AnchorKind::Start => "Start of line",
        AnchorKind::End => "End of line",
        AnchorKind::WordBoundary => "Word boundary",
        AnchorKind::NonWordBoundary => "Non-word boundary",
        AnchorKind::WordStart => "Start of word",
        AnchorKind::WordEnd => "End of word",
        AnchorKind::StringStart => "Start of input",
        AnchorKind::StringEnd => "End of input",
        AnchorKind::AbsoluteEnd => "Absolute end",
        AnchorKind::EndOfPreviousMatch => "End of previous match",
        AnchorKind::FirstMatchPosition => "First match position",
        AnchorKind::ResetMatchStart => "Reset match start",
        AnchorKind::GraphemeClusterBoundary => "Grapheme cluster boundary",
        AnchorKind::Other(name) => name.as_str(),
    }
}

/// The parser's display value, else a description of the escape kind, else
/// the escape as written.
pub fn escape_label(escape: &Escape) -> String {
    if !escape.value.is_empty() {
        return escape.value.clone();
    }
    let described = match escape.kind.as_str() {
        "digit" => "digit",
        "non_digit" => "non-digit",
        "word" => "word",
        "non_word" => "non-word",
        "whitespace" => "whitespace",
        "non_whitespace" => "non-whitespace",
        "horizontal_whitespace" => "horizontal whitespace",
        "non_horizontal_whitespace" => "non-horizontal whitespace",
        "vertical_whitespace" => "vertical whitespace",
        "non_vertical_whitespace" => "non-vertical whitespace",
        "non_newline" => "non-newline",
        "newline_sequence" => "newline sequence",
        "extended_grapheme" => "extended grapheme cluster",
        "newline" => "newline",
        "carriage_return" => "carriage return",
        "tab" => "tab",
        "form_feed" => "form feed",
        "alert" => "alert (bell)",
        "escape" => "escape",
        _ => "",
    };
    if !described.is_empty() {
        described.to_string()
    } else if !escape.code.is_empty() {
        format!("\\{}", escape.code)
    } else {
        "escape".to_string()
    }
}

pub fn back_reference_label(reference: &BackReference) -> String {
    match &reference.name {
        Some(name) if !name.is_empty() => format!("back reference '{name}'"),
        _ if reference.number < 0 => format!("back reference {}", reference.number),
        _ => format!("back reference #{}", reference.number),
    }
}

pub fn unicode_property_label(property: &str, negated: bool) -> String {
    if negated {
        format!("NOT Unicode {property}")
    } else {
        format!("Unicode {property}")
    }
}

pub fn recursive_ref_label(target: &str) -> String {
    match target {
        "R" | "0" => "recurse whole pattern".to_string(),
        "" => "recurse".to_string(),
        _ if target.starts_with(['+', '-']) || target.starts_with(|c: char| c.is_ascii_digit()) => {
            format!("recurse to group {target}")
        }
        _ => format!("recurse to '{target}'"),
    }
}

pub fn backtrack_label(verb: &str, arg: &str) -> String {
    let with_arg = |bare: &str, prefix: &str| {
        if arg.is_empty() {
            bare.to_string()
        } else {
            format!("{prefix} '{arg}'")
        }
    };
    match verb {
        "ACCEPT" => "accept match".to_string(),
        "FAIL" | "F" => "force fail".to_string(),
        "COMMIT" => "commit (no retry)".to_string(),
        "MARK" | "" => with_arg("mark", "mark"),
        "PRUNE" => with_arg("prune", "prune"),
        "SKIP" => with_arg("skip", "skip to"),
        "THEN" => with_arg("then (try next alt)", "then"),
        _ if arg.is_empty() => format!("*{verb}"),
        _ => format!("*{verb}:{arg}"),
    }
}

pub fn callout_label(callout: &Callout) -> String {
    match callout.number {
        Some(number) => format!("callout ({number})"),
        None => format!("callout \"{}\"", callout.text),
    }
}

pub fn group_title(subexp: &Subexp) -> String {
    match &subexp.kind {
        GroupKind::Capture => format!("group #{}", subexp.number),
        GroupKind::NamedCapture => match &subexp.name {
            Some(name) => format!("group #{} '{name}'", subexp.number),
            None => format!("group #{}", subexp.number),
        },
        GroupKind::NonCapture => "non-capturing group".to_string(),
        GroupKind::PositiveLookahead => "positive lookahead".to_string(),
        GroupKind::NegativeLookahead => "negative lookahead".to_string(),
        GroupKind::PositiveLookbehind => "positive lookbehind".to_string(),
        GroupKind::NegativeLookbehind => "negative lookbehind".to_string(),
        GroupKind::NonAtomicPositiveLookahead => "non-atomic lookahead".to_string(),
        GroupKind::NonAtomicPositiveLookbehind => "non-atomic lookbehind".to_string(),
        GroupKind::Atomic => "atomic group".to_string(),
        GroupKind::ScriptRun => "script run".to_string(),
        GroupKind::AtomicScriptRun => "atomic script run".to_string(),
        GroupKind::Other(name) => name.clone(),
    }
}

pub fn balanced_group_title(group: &BalancedGroup) -> String {
    match &group.name {
        Some(name) if !name.is_empty() => {
            format!("balanced group '{name}' (pop '{}')", group.other_name)
        }
        _ => format!("balance (pop '{}')", group.other_name),
    }
}

pub fn modifier_label(modifier: &InlineModifier) -> String {
    match (modifier.enable.is_empty(), modifier.disable.is_empty()) {
        (false, false) => format!("flags: +{} -{}", modifier.enable, modifier.disable),
        (false, true) => format!("flags: +{}", modifier.enable),
        (true, false) => format!("flags: -{}", modifier.disable),
        (true, true) => "flags".to_string(),
    }
}

pub fn condition_title(condition: &Condition) -> String {
    match condition {
        Condition::Group(reference) => match &reference.name {
            Some(name) if !name.is_empty() => format!("if '{name}' matched"),
            _ => format!("if group {} matched", reference.number.unsigned_abs()),
        },
        Condition::Recursion { target } => match target.as_str() {
            "" | "R" => "if in recursion".to_string(),
            _ => format!("if in recursion to '{target}'"),
        },
        Condition::Define => "DEFINE".to_string(),
        Condition::Assertion(subexp) => match subexp.kind {
            GroupKind::PositiveLookahead | GroupKind::NonAtomicPositiveLookahead => {
                "if followed by...".to_string()
            }
            GroupKind::NegativeLookahead => "if not followed by...".to_string(),
            GroupKind::PositiveLookbehind | GroupKind::NonAtomicPositiveLookbehind => {
                "if preceded by...".to_string()
            }
            GroupKind::NegativeLookbehind => "if not preceded by...".to_string(),
            _ => "if assertion".to_string(),
        },
        Condition::Text { text } if text == "DEFINE" => "DEFINE".to_string(),
        Condition::Text { text } => format!("if {text}"),
    }
}

pub fn posix_class_label(name: &str, negated: bool) -> String {
    let described = match name {
        "alnum" => "alphanumeric",
        "alpha" => "alphabetic",
        "blank" => "blank (space/tab)",
        "cntrl" => "control character",
        "digit" => "digit",
        "graph" => "visible character",
        "lower" => "lowercase",
        "print" => "printable",
        "punct" => "punctuation",
        "space" => "whitespace",
        "upper" => "uppercase",
        "xdigit" => "hex digit",
        other => other,
    };
    if negated {
        format!("NOT {described}")
    } else {
        described.to_string()
    }
}

/// One line of a charset box.
pub fn charset_item_label(item: &CharsetItem) -> String {
    match item {
        CharsetItem::Literal { text } => format!("\"{text}\""),
        CharsetItem::Range { first, last } => format!("\"{first}\" - \"{last}\""),
        CharsetItem::Escape(escape) => escape_label(escape),
        CharsetItem::PosixClass { name, negated } => posix_class_label(name, *negated),
        CharsetItem::StringDisjunction { alternatives } => alternatives
            .iter()
            .map(|alt| format!("\"{alt}\""))
            .collect::<Vec<_>>()
            .join(" or "),
        CharsetItem::Class(charset) => {
            let inner = charset
                .items
                .iter()
                .map(charset_item_label)
                .collect::<Vec<_>>()
                .join(", ");
            if charset.inverted {
                format!("[not {inner}]")
            } else {
                format!("[{inner}]")
            }
        }
        CharsetItem::SetOperation { op, operands } => {
            let joiner = match op {
                SetOp::Intersection => " and ",
                SetOp::Subtraction => " except ",
            };
            operands
                .iter()
                .map(charset_item_label)
                .collect::<Vec<_>>()
                .join(joiner)
        }
    }
}

/// Text under a loop path. Empty for the plain `*`, `+` and `{1}` shapes.
pub fn repeat_label(repeat: &Repeat) -> String {
    let count = match repeat.max {
        Some(max) if max == repeat.min && max == 1 => String::new(),
        Some(max) if max == repeat.min => format!("{max} times"),
        None if repeat.min <= 1 => String::new(),
        None => format!("{}+ times", repeat.min),
        Some(max) => format!("{} to {max} times", repeat.min),
    };
    match (repeat.possessive, count.is_empty()) {
        (true, false) => format!("{count} (possessive)"),
        (true, true) => "possessive".to_string(),
        (false, _) => count,
    }
}

/// Name of a flag letter in the flags box.
pub fn flag_label(flavor: Flavor, ch: char) -> String {
    if flavor == Flavor::JavaScript {
        let label = match ch {
            'd' => "hasIndices",
            'g' => "global",
            'i' => "ignore case",
            'm' => "multiline",
            's' => "dotAll",
            'u' => "unicode",
            'y' => "sticky",
            _ => "",
        };
        if !label.is_empty() {
            return label.to_string();
        }
    }
    match flavor.flag_info(ch) {
        Some(info) => info.name.to_string(),
        None => format!("'{ch}'"),
    }
}

pub fn options_label(options: &[PatternOption]) -> String {
    let parts = options
        .iter()
        .map(|option| match &option.value {
            Some(value) => format!("*{}={value}", option.name),
            None => format!("*{}", option.name),
        })
        .collect::<Vec<_>>();
    format!("Options: {}", parts.join(", "))
}
