mod alternation;
pub(crate) mod boxes;
mod conditional;
mod group;
pub(crate) mod labels;
mod path;
mod repeat;
mod spacing;
mod text;
pub(crate) mod types;

pub use path::PathBuilder;
pub use spacing::{space_horizontally, space_vertically};
pub use text::measure_text;
pub use types::*;

use std::cell::RefCell;

use crate::ast::{Content, Match, MatchFragment, Regexp};
use crate::config::Config;
use crate::svg::{Group, Path};
use boxes::{comment_box, label_box, quoted_box};

/// Per-call layout state: the configuration, how many groups enclose the
/// node being laid out, and an optional sink for every computed box.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub config: &'a Config,
    pub depth: u32,
    trace: Option<&'a RefCell<Vec<BoxRecord>>>,
}

impl<'a> LayoutContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            depth: 0,
            trace: None,
        }
    }

    /// Like [`LayoutContext::new`], also appending each computed box to `trace`.
    pub fn traced(config: &'a Config, trace: &'a RefCell<Vec<BoxRecord>>) -> Self {
        Self {
            trace: Some(trace),
            ..Self::new(config)
        }
    }

    /// Context for the contents of a group one level deeper.
    pub fn nested(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    fn record(&self, kind: &str, node: RenderedNode) -> RenderedNode {
        if let Some(trace) = self.trace {
            trace.borrow_mut().push(BoxRecord {
                kind: kind.to_string(),
                depth: self.depth,
                bbox: node.bbox,
            });
        }
        node
    }
}

fn empty_node() -> RenderedNode {
    RenderedNode::new(Group::default(), BoundingBox::default())
}

/// Lays out a full pattern: a single branch directly, several as an
/// alternation.
pub fn layout_regexp(ctx: LayoutContext<'_>, regexp: &Regexp) -> RenderedNode {
    let node = match regexp.matches.as_slice() {
        [] => empty_node(),
        [single] => layout_match(ctx, single),
        branches => alternation::layout_alternation(ctx, branches),
    };
    ctx.record("regexp", node)
}

/// Lays out a concatenation left to right, joined by one connector path.
pub fn layout_match(ctx: LayoutContext<'_>, matched: &Match) -> RenderedNode {
    if matched.fragments.is_empty() {
        return ctx.record("match", empty_node());
    }

    let items = matched
        .fragments
        .iter()
        .map(|fragment| layout_fragment(ctx, fragment))
        .collect();
    let (items, bbox) = space_horizontally(items, ctx.config.horizontal_gap);

    let mut children = Vec::with_capacity(items.len() + 1);
    if items.len() > 1 {
        let mut path = PathBuilder::new();
        for pair in items.windows(2) {
            path.move_to(pair[0].bbox.anchor_right, bbox.anchor_y)
                .line_to(pair[1].bbox.anchor_left, bbox.anchor_y);
        }
        children.push(
            Path::stroked(path.build(), &ctx.config.line_color, ctx.config.line_width).into(),
        );
    }
    children.extend(items.into_iter().map(|item| item.element));

    ctx.record("match", RenderedNode::new(Group::with_class("match", children), bbox))
}

fn layout_fragment(ctx: LayoutContext<'_>, fragment: &MatchFragment) -> RenderedNode {
    let content = layout_content(ctx, &fragment.content);
    match &fragment.repeat {
        Some(repeat) => ctx.record("repeat", repeat::layout_repeat(ctx, content, repeat)),
        None => content,
    }
}

/// Maps one node kind to its drawing rule. Total: unknown kinds become a
/// generic `<kind>` box.
pub fn layout_content(ctx: LayoutContext<'_>, content: &Content) -> RenderedNode {
    let node = match content {
        Content::Literal { text } | Content::QuotedLiteral { text } => {
            quoted_box(ctx, text, "literal")
        }
        Content::AnyCharacter => label_box(ctx, "any character", "any-character"),
        Content::Anchor { kind } => label_box(ctx, labels::anchor_label(kind), "anchor"),
        Content::Escape(escape) => label_box(ctx, &labels::escape_label(escape), "escape"),
        Content::Charset(charset) => {
            let items: Vec<String> = charset.items.iter().map(labels::charset_item_label).collect();
            let title = if charset.inverted { "None of:" } else { "One of:" };
            boxes::boxed_list(ctx, title, &items, "charset")
        }
        Content::Subexp(subexp) => {
            group::layout_group(ctx, &labels::group_title(subexp), &subexp.regexp)
        }
        Content::BackReference(reference) => {
            label_box(ctx, &labels::back_reference_label(reference), "escape")
        }
        Content::UnicodePropertyEscape { property, negated } => label_box(
            ctx,
            &labels::unicode_property_label(property, *negated),
            "escape",
        ),
        Content::Conditional(conditional) => conditional::layout_conditional(ctx, conditional),
        Content::RecursiveRef { target } => {
            label_box(ctx, &labels::recursive_ref_label(target), "recursive-ref")
        }
        Content::BranchReset { regexp } => group::layout_group(ctx, "branch reset", regexp),
        Content::BacktrackControl { verb, arg } => {
            label_box(ctx, &labels::backtrack_label(verb, arg), "backtrack-control")
        }
        Content::Callout(callout) => label_box(ctx, &labels::callout_label(callout), "callout"),
        Content::Comment { text } => comment_box(ctx, text),
        Content::InlineModifier(modifier) => group::layout_modifier(ctx, modifier),
        Content::BalancedGroup(balanced) => {
            group::layout_group(ctx, &labels::balanced_group_title(balanced), &balanced.regexp)
        }
        Content::Unknown { kind } => label_box(ctx, &format!("<{kind}>"), "unknown"),
    };
    ctx.record(content.kind_name(), node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AnchorKind, Repeat};

    fn literal(text: &str) -> MatchFragment {
        MatchFragment::new(Content::literal(text))
    }

    #[test]
    fn empty_regexp_is_zero_box() {
        let config = Config::default();
        let node = layout_regexp(LayoutContext::new(&config), &Regexp::default());
        assert_eq!(node.bbox, BoundingBox::default());
        assert_eq!(node.element.render(), "<g></g>");
    }

    #[test]
    fn single_fragment_has_no_connector() {
        let config = Config::default();
        let node = layout_regexp(LayoutContext::new(&config), &Regexp::single(vec![literal("a")]));
        assert!(!node.element.render().contains("<path"));
    }

    #[test]
    fn match_connects_every_sibling() {
        let config = Config::default();
        let regexp = Regexp::single(vec![
            MatchFragment::new(Content::anchor(AnchorKind::Start)),
            literal("a"),
            literal("b"),
        ]);
        let node = layout_regexp(LayoutContext::new(&config), &regexp);
        let svg = node.element.render();
        assert_eq!(svg.matches("<path").count(), 1);
        let d = svg
            .split("d=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .expect("connector path");
        assert_eq!(d.matches('M').count(), 2);
        assert_eq!(d.matches('L').count(), 2);
    }

    #[test]
    fn unknown_kind_renders_generic_box() {
        let config = Config::default();
        let node = layout_content(
            LayoutContext::new(&config),
            &Content::Unknown {
                kind: "future_thing".to_string(),
            },
        );
        assert!(node.element.render().contains("&lt;future_thing&gt;"));
    }

    #[test]
    fn trace_records_every_box_with_depth() {
        let config = Config::default();
        let trace = RefCell::new(Vec::new());
        let inner = Regexp::single(vec![literal("a").with_repeat(Repeat::star())]);
        let regexp = Regexp::single(vec![MatchFragment::new(Content::group(1, inner))]);
        layout_regexp(LayoutContext::traced(&config, &trace), &regexp);
        let records = trace.into_inner();
        let literal = records
            .iter()
            .find(|r| r.kind == "literal")
            .expect("literal recorded");
        assert_eq!(literal.depth, 1);
        let group = records
            .iter()
            .find(|r| r.kind == "subexp")
            .expect("group recorded");
        assert_eq!(group.depth, 0);
        assert!(records.iter().any(|r| r.kind == "repeat"));
        assert!(records.iter().all(|r| r.bbox.anchor_in_bounds()));
    }
}
