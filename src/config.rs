use crate::flavor::Flavor;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Width of one character relative to the font size for monospace faces.
const MONOSPACE_ADVANCE: f64 = 0.6;

/// Dimensions, typography and colors used by one render pass.
///
/// Read-only while rendering; clone it freely to share between threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub padding: f64,
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
    pub corner_radius: f64,
    /// Radius of alternation and quantifier curves.
    pub curve_radius: f64,
    /// Horizontal room reserved on each side of an alternation.
    pub connector_width: f64,
    pub arrow_size: f64,

    pub font_family: String,
    pub font_size: f64,
    /// Approximate advance of one character at `font_size`.
    pub char_width: f64,

    pub background_color: String,
    pub text_color: String,
    pub line_color: String,
    pub line_width: f64,

    pub literal_fill: String,
    pub charset_fill: String,
    pub escape_fill: String,
    pub anchor_fill: String,
    pub anchor_text_color: String,
    pub any_char_fill: String,
    /// Fill of groups at depth 0.
    pub subexp_fill: String,
    pub subexp_stroke: String,
    /// Fills cycled through for groups at depth 1 and deeper.
    pub subexp_colors: Vec<String>,
    pub flags_fill: String,
    pub repeat_label_color: String,
    pub recursive_ref_fill: String,
    pub callout_fill: String,
    pub backtrack_control_fill: String,
    pub conditional_fill: String,
    pub comment_fill: String,
    pub comment_stroke: String,
    pub comment_text_color: String,
    pub options_fill: String,
    pub options_stroke: String,

    /// Selects the names shown in the flags box.
    pub flavor: Flavor,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            padding: 10.0,
            horizontal_gap: 10.0,
            vertical_gap: 5.0,
            corner_radius: 3.0,
            curve_radius: 10.0,
            connector_width: 20.0,
            arrow_size: 5.0,
            font_family: "monospace".to_string(),
            font_size: 14.0,
            char_width: 8.4,
            background_color: "transparent".to_string(),
            text_color: "#000".to_string(),
            line_color: "#000".to_string(),
            line_width: 2.0,
            literal_fill: "#ff6b6b".to_string(),
            charset_fill: "#cbcbba".to_string(),
            escape_fill: "#bada55".to_string(),
            anchor_fill: "#6b6659".to_string(),
            anchor_text_color: "#fff".to_string(),
            any_char_fill: "#dae9e5".to_string(),
            subexp_fill: "none".to_string(),
            subexp_stroke: "#908c83".to_string(),
            subexp_colors: vec![
                "#cce5ff".to_string(),
                "#d4edda".to_string(),
                "#fff3cd".to_string(),
                "#f8d7da".to_string(),
                "#e2d5f0".to_string(),
            ],
            flags_fill: "#c8e0f9".to_string(),
            repeat_label_color: "#666".to_string(),
            recursive_ref_fill: "#c9b3ff".to_string(),
            callout_fill: "#ffd699".to_string(),
            backtrack_control_fill: "#ffb3a7".to_string(),
            conditional_fill: "#b3e5fc".to_string(),
            comment_fill: "#e8e8e8".to_string(),
            comment_stroke: "#999".to_string(),
            comment_text_color: "#666".to_string(),
            options_fill: "#e8e8e8".to_string(),
            options_stroke: "#999".to_string(),
            flavor: Flavor::default(),
        }
    }
}

impl Config {
    /// Softer palette with rounder boxes and a slightly smaller face.
    pub fn modern() -> Self {
        let font_size = 13.0;
        Self {
            padding: 12.0,
            horizontal_gap: 12.0,
            vertical_gap: 6.0,
            corner_radius: 6.0,
            curve_radius: 12.0,
            connector_width: 24.0,
            font_family: "ui-monospace, SFMono-Regular, Menlo, Consolas, monospace".to_string(),
            font_size,
            char_width: Self::char_width_for(font_size),
            text_color: "#1c2430".to_string(),
            line_color: "#4b5563".to_string(),
            line_width: 1.5,
            literal_fill: "#fca5a5".to_string(),
            charset_fill: "#e5e7eb".to_string(),
            escape_fill: "#bef264".to_string(),
            anchor_fill: "#475569".to_string(),
            any_char_fill: "#ccfbf1".to_string(),
            subexp_stroke: "#94a3b8".to_string(),
            subexp_colors: vec![
                "#dbeafe".to_string(),
                "#dcfce7".to_string(),
                "#fef9c3".to_string(),
                "#fce7f3".to_string(),
                "#ede9fe".to_string(),
            ],
            flags_fill: "#e0f2fe".to_string(),
            repeat_label_color: "#6b7280".to_string(),
            ..Self::default()
        }
    }

    /// Character advance for a monospace face at `font_size`.
    pub fn char_width_for(font_size: f64) -> f64 {
        font_size * MONOSPACE_ADVANCE
    }

    /// Fill of a group box that sits `depth` groups deep.
    pub fn subexp_fill_for_depth(&self, depth: u32) -> &str {
        if depth == 0 || self.subexp_colors.is_empty() {
            return &self.subexp_fill;
        }
        let index = (depth as usize - 1) % self.subexp_colors.len();
        &self.subexp_colors[index]
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    flavor: Option<String>,
    padding: Option<f64>,
    horizontal_gap: Option<f64>,
    vertical_gap: Option<f64>,
    corner_radius: Option<f64>,
    curve_radius: Option<f64>,
    connector_width: Option<f64>,
    arrow_size: Option<f64>,
    font_family: Option<String>,
    font_size: Option<f64>,
    char_width: Option<f64>,
    background_color: Option<String>,
    text_color: Option<String>,
    line_color: Option<String>,
    line_width: Option<f64>,
    literal_fill: Option<String>,
    charset_fill: Option<String>,
    escape_fill: Option<String>,
    anchor_fill: Option<String>,
    anchor_text_color: Option<String>,
    any_char_fill: Option<String>,
    subexp_fill: Option<String>,
    subexp_stroke: Option<String>,
    subexp_colors: Option<Vec<String>>,
    flags_fill: Option<String>,
    repeat_label_color: Option<String>,
    recursive_ref_fill: Option<String>,
    callout_fill: Option<String>,
    backtrack_control_fill: Option<String>,
    conditional_fill: Option<String>,
    comment_fill: Option<String>,
    comment_stroke: Option<String>,
    comment_text_color: Option<String>,
    options_fill: Option<String>,
    options_stroke: Option<String>,
}

fn parse_config_file(contents: &str) -> anyhow::Result<ConfigFile> {
    match serde_json::from_str(contents) {
        Ok(parsed) => Ok(parsed),
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid config: {json_err}; as JSON5: {json5_err}")
        }),
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed = parse_config_file(&contents)?;
    let config = apply_config_file(parsed)?;
    tracing::debug!(path = %path.display(), flavor = %config.flavor, "loaded config");
    Ok(config)
}

fn apply_config_file(parsed: ConfigFile) -> anyhow::Result<Config> {
    let mut config = match parsed.theme.as_deref() {
        Some("modern") => Config::modern(),
        Some("classic") | Some("default") | None => Config::default(),
        Some(other) => {
            tracing::debug!(theme = other, "unknown theme, using defaults");
            Config::default()
        }
    };

    if let Some(name) = parsed.flavor.as_deref() {
        config.flavor = name.parse()?;
    }

    // A new font size rescales the glyph advance unless one is given.
    if let Some(v) = parsed.font_size {
        config.font_size = v;
        config.char_width = Config::char_width_for(v);
    }
    if let Some(v) = parsed.char_width {
        config.char_width = v;
    }

    macro_rules! apply {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = parsed.$field {
                config.$field = v;
            })*
        };
    }
    apply!(
        padding,
        horizontal_gap,
        vertical_gap,
        corner_radius,
        curve_radius,
        connector_width,
        arrow_size,
        font_family,
        background_color,
        text_color,
        line_color,
        line_width,
        literal_fill,
        charset_fill,
        escape_fill,
        anchor_fill,
        anchor_text_color,
        any_char_fill,
        subexp_fill,
        subexp_stroke,
        subexp_colors,
        flags_fill,
        repeat_label_color,
        recursive_ref_fill,
        callout_fill,
        backtrack_control_fill,
        conditional_fill,
        comment_fill,
        comment_stroke,
        comment_text_color,
        options_fill,
        options_stroke,
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "regex-railroad-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).expect("write temp config");
        path
    }

    #[test]
    fn depth_zero_is_neutral() {
        let config = Config::default();
        assert_eq!(config.subexp_fill_for_depth(0), "none");
        assert_eq!(config.subexp_fill_for_depth(1), "#cce5ff");
        assert_eq!(config.subexp_fill_for_depth(5), "#e2d5f0");
        assert_eq!(config.subexp_fill_for_depth(6), "#cce5ff");
    }

    #[test]
    fn empty_palette_falls_back_to_neutral() {
        let config = Config {
            subexp_colors: Vec::new(),
            ..Config::default()
        };
        assert_eq!(config.subexp_fill_for_depth(3), "none");
    }

    #[test]
    fn no_path_yields_defaults() {
        let config = load_config(None).expect("default config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn json_overrides_apply_on_top_of_theme() {
        let path = write_temp(
            "strict.json",
            r##"{"theme": "modern", "padding": 4, "literalFill": "#123456", "flavor": "pcre"}"##,
        );
        let config = load_config(Some(&path)).expect("config loads");
        std::fs::remove_file(&path).ok();
        assert_eq!(config.padding, 4.0);
        assert_eq!(config.literal_fill, "#123456");
        assert_eq!(config.flavor, Flavor::Pcre);
        assert_eq!(config.corner_radius, Config::modern().corner_radius);
    }

    #[test]
    fn json5_is_accepted() {
        let path = write_temp(
            "relaxed.json5",
            "{\n  // smaller text\n  fontSize: 10,\n  subexpColors: ['#eee',],\n}\n",
        );
        let config = load_config(Some(&path)).expect("json5 config loads");
        std::fs::remove_file(&path).ok();
        assert_eq!(config.font_size, 10.0);
        assert_eq!(config.char_width, 6.0);
        assert_eq!(config.subexp_colors, vec!["#eee".to_string()]);
    }

    #[test]
    fn unknown_flavor_is_an_error() {
        let path = write_temp("bad-flavor.json", r#"{"flavor": "perl6"}"#);
        let result = load_config(Some(&path));
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
