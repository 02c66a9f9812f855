use crate::ast::Regexp;
use crate::config::Config;
use crate::layout::boxes::{boxed_list, options_banner};
use crate::layout::labels::{flag_label, options_label};
use crate::layout::{LayoutContext, layout_regexp};
use crate::svg::{Element, Line, Svg, fmt_num};
use once_cell::sync::Lazy;

static DEFAULT_CONFIG: Lazy<Config> = Lazy::new(Config::default);

/// Renders `ast` as a standalone SVG document. Never fails: every node kind
/// has a drawing, and identical inputs give byte-identical output.
pub fn render(ast: &Regexp, config: &Config) -> String {
    compose(LayoutContext::new(config), ast).render()
}

/// [`render`] with the default configuration.
pub fn render_default(ast: &Regexp) -> String {
    render(ast, &DEFAULT_CONFIG)
}

/// Owns a [`Config`] for repeated renders. Holds no per-render state, so one
/// instance may serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: Config,
}

impl Renderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn render(&self, ast: &Regexp) -> String {
        render(ast, &self.config)
    }
}

/// Lays out the root pattern and places it with its entry and exit lines,
/// the flags box to the right and the options banner on top.
pub(crate) fn compose(ctx: LayoutContext<'_>, ast: &Regexp) -> Svg {
    let cfg = ctx.config;
    let padding = cfg.padding;
    let diagram = layout_regexp(ctx, ast);
    let bbox = diagram.bbox;

    let mut width = bbox.width + 2.0 * padding;
    let mut height = bbox.height + 2.0 * padding;

    let flags = (!ast.flags.is_empty()).then(|| {
        let items: Vec<String> = ast
            .flags
            .chars()
            .map(|ch| flag_label(cfg.flavor, ch))
            .collect();
        boxed_list(ctx, "Flags:", &items, "flags")
    });
    if let Some(flags) = &flags {
        width += flags.bbox.width + padding;
        height = height.max(flags.bbox.height + 2.0 * padding);
    }

    let banner = (!ast.options.is_empty()).then(|| options_banner(ctx, &options_label(&ast.options)));
    let banner_height = banner
        .as_ref()
        .map_or(0.0, |banner| banner.bbox.height + padding / 2.0);
    if let Some(banner) = &banner {
        width = width.max(banner.bbox.width + 2.0 * padding);
        height += banner_height;
    }

    let top = banner_height + padding;
    let anchor_y = top + bbox.anchor_y - bbox.y;
    let left = padding - bbox.x;
    let mut children: Vec<Element> = vec![
        Line::horizontal(padding / 2.0, left + bbox.anchor_left, anchor_y, &cfg.line_color, cfg.line_width).into(),
        Line::horizontal(
            left + bbox.anchor_right,
            padding + bbox.width + padding / 2.0,
            anchor_y,
            &cfg.line_color,
            cfg.line_width,
        )
        .into(),
        diagram.element.translated(left, top - bbox.y),
    ];
    if let Some(banner) = banner {
        children.push(banner.element.translated(padding, padding / 2.0));
    }
    if let Some(flags) = flags {
        children.push(flags.element.translated(padding + bbox.width + padding / 2.0, top));
    }

    tracing::debug!(
        width,
        height,
        elements = children.iter().map(Element::count).sum::<usize>(),
        "composed diagram"
    );

    Svg {
        width,
        height,
        style: style_sheet(cfg),
        children,
    }
}

/// CSS embedded in every document. Child combinators keep a class fill from
/// reaching the boxes nested inside a group.
pub fn style_sheet(cfg: &Config) -> String {
    let small = fmt_num(cfg.font_size - 2.0);
    let mut css = String::new();
    css.push_str(&format!(
        "text {{ font-family: {}; font-size: {}px; fill: {}; }}",
        cfg.font_family,
        fmt_num(cfg.font_size),
        cfg.text_color
    ));
    for (class, fill) in [
        ("literal", &cfg.literal_fill),
        ("escape", &cfg.escape_fill),
        ("charset", &cfg.charset_fill),
        ("anchor", &cfg.anchor_fill),
        ("any-character", &cfg.any_char_fill),
        ("flags", &cfg.flags_fill),
        ("inline-modifier", &cfg.flags_fill),
        ("recursive-ref", &cfg.recursive_ref_fill),
        ("callout", &cfg.callout_fill),
        ("backtrack-control", &cfg.backtrack_control_fill),
    ] {
        css.push_str(&format!(" .{class} > rect {{ fill: {fill}; }}"));
    }
    css.push_str(&format!(
        " .conditional > rect {{ fill: {}; stroke: {}; stroke-width: {}; }}",
        cfg.conditional_fill,
        cfg.subexp_stroke,
        fmt_num(cfg.line_width)
    ));
    css.push_str(&format!(
        " .condition-label > rect {{ fill: {}; stroke: {}; }}",
        cfg.background_color, cfg.subexp_stroke
    ));
    css.push_str(&format!(
        " .comment > rect {{ fill: {}; stroke: {}; stroke-dasharray: 4,2; }}",
        cfg.comment_fill, cfg.comment_stroke
    ));
    css.push_str(&format!(
        " .comment-text {{ fill: {}; font-style: italic; }}",
        cfg.comment_text_color
    ));
    css.push_str(&format!(
        " .unknown > rect {{ fill: {}; stroke: {}; stroke-dasharray: 2,2; }}",
        cfg.background_color, cfg.line_color
    ));
    css.push_str(&format!(" .anchor > text {{ fill: {}; }}", cfg.anchor_text_color));
    css.push_str(&format!(" .quote {{ fill: {}; }}", cfg.text_color));
    css.push_str(&format!(
        " .subexp-label, .charset-label, .flags-label, .conditional-label, .inline-modifier-label {{ font-size: {small}px; font-style: italic; }}"
    ));
    css.push_str(&format!(
        " .repeat-label {{ fill: {}; font-size: {small}px; }}",
        cfg.repeat_label_color
    ));
    css
}
