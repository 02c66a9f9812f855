use std::path::Path;

use regex_railroad::{
    Config, Content, LayoutDump, MatchFragment, Regexp, Renderer, Repeat, render, render_default,
};

const FIXTURES: [&str; 6] = [
    "literal.json",
    "alternation.json",
    "group.json",
    "nested_groups.json",
    "kitchen_sink.json",
    "future_kind.json",
];

fn load_fixture(name: &str) -> Regexp {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    serde_json::from_str(&input).unwrap_or_else(|err| panic!("{name}: invalid AST: {err}"))
}

fn assert_well_formed(svg: &str, fixture: &str) {
    assert!(svg.starts_with("<svg"), "{fixture}: missing <svg");
    assert!(svg.ends_with("</svg>"), "{fixture}: missing </svg>");
    assert!(
        svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#),
        "{fixture}: missing namespace"
    );
    assert!(svg.contains("viewBox=\"0 0 "), "{fixture}: missing viewBox");
    assert_eq!(
        svg.matches("<g").count(),
        svg.matches("</g>").count(),
        "{fixture}: unbalanced groups"
    );
    assert_eq!(
        svg.matches("<text").count(),
        svg.matches("</text>").count(),
        "{fixture}: unbalanced text"
    );
}

fn repeated(content: Content, repeat: Repeat) -> Regexp {
    Regexp::single(vec![MatchFragment::new(content).with_repeat(repeat)])
}

/// The `fill` attribute of every `<rect>` that carries one, in document order.
fn rect_fills(svg: &str) -> Vec<&str> {
    svg.match_indices("<rect")
        .filter_map(|(at, _)| {
            let rect = &svg[at..];
            let rect = &rect[..rect.find("/>")?];
            let start = rect.find(r#"fill=""#)? + r#"fill=""#.len();
            rect[start..].split('"').next()
        })
        .collect()
}

#[test]
fn every_fixture_renders_well_formed() {
    for name in FIXTURES {
        let svg = render_default(&load_fixture(name));
        assert_well_formed(&svg, name);
    }
}

#[test]
fn rendering_is_deterministic() {
    for name in FIXTURES {
        let ast = load_fixture(name);
        assert_eq!(render_default(&ast), render_default(&ast), "{name}");
        let modern = Config::modern();
        assert_eq!(render(&ast, &modern), render(&ast, &modern), "{name}");
    }
}

#[test]
fn every_box_keeps_its_anchor_inside() {
    for name in FIXTURES {
        let dump = LayoutDump::from_ast(&load_fixture(name), &Config::default());
        assert!(!dump.boxes.is_empty(), "{name}: no boxes recorded");
        for record in &dump.boxes {
            assert!(
                record.anchor_in_bounds(),
                "{name}: {} box anchor {} outside {}..{}",
                record.kind,
                record.anchor_y,
                record.y,
                record.y + record.height
            );
        }
    }
}

#[test]
fn literal_scenario() {
    let svg = render_default(&load_fixture("literal.json"));
    assert_eq!(svg.matches(r#"<g class="literal">"#).count(), 1);
    assert!(svg.contains(
        r#"<tspan class="quote">&quot;</tspan><tspan>abc</tspan><tspan class="quote">&quot;</tspan>"#
    ));
}

#[test]
fn alternation_scenario() {
    let svg = render_default(&load_fixture("alternation.json"));
    assert_eq!(svg.matches(r#"<g class="literal">"#).count(), 3);
    assert_eq!(svg.matches("<path").count(), 6);
    assert!(!svg.contains("skip-path"));
    assert!(!svg.contains("loop-path"));
}

#[test]
fn group_numbering_scenario() {
    let svg = render_default(&load_fixture("group.json"));
    assert_eq!(svg.matches(r#"<g class="subexp">"#).count(), 1);
    assert!(svg.contains(r#"class="subexp-label">group #1</text>"#));
    let frame = svg.find(r#"<g class="subexp">"#).expect("group frame");
    let literal = svg.find("<tspan>abc</tspan>").expect("literal inside");
    assert!(frame < literal);
}

#[test]
fn nested_groups_scenario() {
    let svg = render_default(&load_fixture("nested_groups.json"));
    assert_eq!(rect_fills(&svg), vec!["none", "#cce5ff", "#cce5ff"]);
    assert!(svg.contains(">group #2</text>"));
    assert!(svg.contains(">group #3</text>"));
}

#[test]
fn depth_colors_cycle_through_palette() {
    let config = Config {
        subexp_colors: vec!["#111111".to_string(), "#222222".to_string()],
        ..Config::default()
    };
    let mut ast = Regexp::single(vec![MatchFragment::new(Content::literal("x"))]);
    for number in (1..=4).rev() {
        ast = Regexp::single(vec![MatchFragment::new(Content::group(number, ast))]);
    }
    let svg = render(&ast, &config);
    assert_eq!(rect_fills(&svg), vec!["none", "#111111", "#222222", "#111111"]);
}

#[test]
fn quantifier_shape_law() {
    let cases = [
        (Repeat::star(), true, true),
        (Repeat::plus(), false, true),
        (Repeat::optional(), true, false),
        (Repeat::exactly(3), false, true),
        (Repeat::between(0, 5), true, true),
        (Repeat::at_least(2).lazy(), false, true),
    ];
    for (repeat, skip, looped) in cases {
        let svg = render_default(&repeated(Content::literal("a"), repeat));
        assert_eq!(svg.contains("skip-path"), skip, "{repeat:?}");
        assert_eq!(svg.contains("loop-path"), looped, "{repeat:?}");
    }
    let counted = render_default(&repeated(Content::literal("a"), Repeat::exactly(3)));
    assert!(counted.contains(r#"class="repeat-label">3 times</text>"#));
}

#[test]
fn kitchen_sink_labels() {
    let svg = render_default(&load_fixture("kitchen_sink.json"));
    for expected in [
        ">Start of line</text>",
        ">End of line</text>",
        ">None of:</text>",
        ">&quot;a&quot; - &quot;z&quot;</text>",
        ">punctuation</text>",
        ">2 to 4 times</text>",
        ">group #1 &apos;word&apos;</text>",
        ">NOT Unicode Letter</text>",
        ">back reference &apos;word&apos;</text>",
        ">possessive</text>",
        "># note &lt;here&gt;</text>",
        "<tspan>a.b</tspan>",
        ">recurse whole pattern</text>",
        ">skip to &apos;x&apos;</text>",
        ">callout (3)</text>",
        ">flags: +i</text>",
        ">if group 1 matched</text>",
        ">then</text>",
        ">else</text>",
        ">branch reset</text>",
        ">balanced group &apos;open&apos; (pop &apos;close&apos;)</text>",
        ">Options: *UTF, *LIMIT_MATCH=10</text>",
        ">Flags:</text>",
        ">hasIndices</text>",
        ">sticky</text>",
    ] {
        assert!(svg.contains(expected), "missing {expected}");
    }
}

#[test]
fn unknown_kinds_never_fail() {
    let ast = repeated(
        Content::Unknown {
            kind: "lookaround_v2".to_string(),
        },
        Repeat::plus(),
    );
    let svg = render_default(&ast);
    assert_well_formed(&svg, "unknown");
    assert!(svg.contains("&lt;lookaround_v2&gt;"));
}

#[test]
fn unknown_kinds_load_from_json() {
    let ast = load_fixture("future_kind.json");
    let fragment = &ast.matches[0].fragments[1];
    assert_eq!(
        fragment.content,
        Content::Unknown {
            kind: "lookaround_v2".to_string()
        }
    );
    assert_eq!(fragment.repeat, Some(Repeat::star()));

    let svg = render_default(&ast);
    assert!(svg.contains(">&lt;lookaround_v2&gt;</text>"));
    assert!(svg.contains("skip-path"));
    assert!(svg.contains("loop-path"));
    assert!(svg.contains("<tspan>x</tspan>"));
    assert!(svg.contains("<tspan>y</tspan>"));
}

#[test]
fn quoted_font_family_keeps_markup_well_formed() {
    let config = Config {
        font_family: "\"Fira Code\", monospace".to_string(),
        ..Config::default()
    };
    let svg = render(&load_fixture("kitchen_sink.json"), &config);
    assert_well_formed(&svg, "kitchen_sink.json");
    assert!(svg.contains(r#"font-family="&quot;Fira Code&quot;, monospace""#));
    assert!(!svg.contains(r#"font-family="""#));
}

#[test]
fn renderer_is_shareable_across_threads() {
    let renderer = Renderer::new(Config::default());
    let ast = load_fixture("kitchen_sink.json");
    let expected = renderer.render(&ast);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| renderer.render(&ast)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("render thread"), expected);
        }
    });
}
