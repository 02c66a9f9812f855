use crate::config::Config;

use super::TextBlock;

/// Estimated width of a single line: one fixed advance per character.
pub fn measure_text(text: &str, config: &Config) -> f64 {
    text.chars().count() as f64 * config.char_width
}

/// Splits `text` on newlines and measures the widest line. Each line is
/// `font_size` tall.
pub(super) fn measure_label(text: &str, config: &Config) -> TextBlock {
    let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let width = lines
        .iter()
        .map(|line| measure_text(line, config))
        .fold(0.0, f64::max);
    let height = lines.len() as f64 * config.font_size;
    TextBlock {
        lines,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_chars_not_bytes() {
        let config = Config::default();
        assert_eq!(measure_text("abc", &config), 3.0 * 8.4);
        assert_eq!(measure_text("été", &config), 3.0 * 8.4);
    }

    #[test]
    fn multi_line_label() {
        let config = Config::default();
        let block = measure_label("ab\nlonger", &config);
        assert_eq!(block.lines, vec!["ab", "longer"]);
        assert_eq!(block.width, 6.0 * 8.4);
        assert_eq!(block.height, 28.0);
    }
}
