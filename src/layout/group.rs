use crate::ast::{InlineModifier, Regexp};

use super::boxes::{Frame, framed, label_box};
use super::labels::modifier_label;
use super::{LayoutContext, RenderedNode, layout_regexp};

/// Frames a nested pattern one level deeper. The frame is filled for the
/// depth it sits at: neutral at the top level, then the palette in turn.
pub(super) fn layout_group(ctx: LayoutContext<'_>, title: &str, regexp: &Regexp) -> RenderedNode {
    let fill = ctx.config.subexp_fill_for_depth(ctx.depth);
    tracing::trace!(depth = ctx.depth, title, fill, "group");
    let content = layout_regexp(ctx.nested(), regexp);
    framed(
        ctx,
        Frame {
            title,
            class: "subexp",
            fill: Some(fill),
            connect: true,
        },
        content,
    )
}

/// `(?i)` is a plain label; `(?i:...)` frames its scope.
pub(super) fn layout_modifier(ctx: LayoutContext<'_>, modifier: &InlineModifier) -> RenderedNode {
    let label = modifier_label(modifier);
    match &modifier.regexp {
        Some(regexp) => {
            let content = layout_regexp(ctx, regexp);
            framed(
                ctx,
                Frame {
                    title: &label,
                    class: "inline-modifier",
                    fill: None,
                    connect: true,
                },
                content,
            )
        }
        None => label_box(ctx, &label, "inline-modifier"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Content, MatchFragment};
    use crate::config::Config;

    fn group_of(inner: Vec<MatchFragment>) -> Regexp {
        Regexp::single(inner)
    }

    #[test]
    fn fill_follows_depth() {
        let config = Config::default();
        let inner = group_of(vec![MatchFragment::new(Content::literal("a"))]);
        let outer = group_of(vec![MatchFragment::new(Content::group(2, inner))]);
        let svg = layout_group(LayoutContext::new(&config), "group #1", &outer)
            .element
            .render();
        let outer_at = svg.find(r#"fill="none""#).expect("neutral outer frame");
        let inner_at = svg.find(r##"fill="#cce5ff""##).expect("first palette color");
        assert!(outer_at < inner_at);
    }

    #[test]
    fn depth_is_restored_for_siblings() {
        let config = Config::default();
        let ctx = LayoutContext::new(&config).nested();
        let before = ctx.depth;
        layout_group(ctx, "group #1", &Regexp::default());
        assert_eq!(ctx.depth, before);
    }

    #[test]
    fn scoped_modifier_frames_content() {
        let config = Config::default();
        let modifier = InlineModifier {
            enable: "i".to_string(),
            disable: "s".to_string(),
            regexp: Some(Box::new(group_of(vec![MatchFragment::new(Content::literal("a"))]))),
        };
        let svg = layout_modifier(LayoutContext::new(&config), &modifier)
            .element
            .render();
        assert!(svg.contains(r#"class="inline-modifier-label">flags: +i -s</text>"#));
        assert!(svg.contains(r#"class="literal""#));
    }

    #[test]
    fn global_modifier_is_a_label() {
        let config = Config::default();
        let modifier = InlineModifier {
            enable: String::new(),
            disable: "m".to_string(),
            regexp: None,
        };
        let svg = layout_modifier(LayoutContext::new(&config), &modifier)
            .element
            .render();
        assert!(svg.starts_with(r#"<g class="inline-modifier">"#));
        assert!(svg.contains(">flags: -m</text>"));
    }
}
