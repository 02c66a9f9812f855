use crate::ast::Regexp;
use crate::config::Config;
use crate::layout::{BoundingBox, BoxRecord, LayoutContext};
use crate::render::compose;
use serde::Serialize;
use std::cell::RefCell;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Every box computed while laying out one pattern, in completion order
/// (children before their parents).
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub boxes: Vec<BoxDump>,
}

#[derive(Debug, Serialize)]
pub struct BoxDump {
    pub kind: String,
    pub depth: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub anchor_left: f64,
    pub anchor_right: f64,
    pub anchor_y: f64,
}

impl From<BoxRecord> for BoxDump {
    fn from(record: BoxRecord) -> Self {
        let BoundingBox {
            x,
            y,
            width,
            height,
            anchor_left,
            anchor_right,
            anchor_y,
        } = record.bbox;
        Self {
            kind: record.kind,
            depth: record.depth,
            x,
            y,
            width,
            height,
            anchor_left,
            anchor_right,
            anchor_y,
        }
    }
}

impl BoxDump {
    pub fn anchor_in_bounds(&self) -> bool {
        self.y <= self.anchor_y && self.anchor_y <= self.y + self.height
    }
}

impl LayoutDump {
    pub fn from_ast(ast: &Regexp, config: &Config) -> Self {
        let trace = RefCell::new(Vec::new());
        let svg = compose(LayoutContext::traced(config, &trace), ast);
        let boxes = trace.into_inner().into_iter().map(BoxDump::from).collect();
        Self {
            width: svg.width,
            height: svg.height,
            boxes,
        }
    }
}

pub fn write_layout_dump(path: &Path, ast: &Regexp, config: &Config) -> anyhow::Result<()> {
    let dump = LayoutDump::from_ast(ast, config);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Content, MatchFragment};

    #[test]
    fn root_box_is_last() {
        let ast = Regexp::single(vec![
            MatchFragment::new(Content::literal("a")),
            MatchFragment::new(Content::AnyCharacter),
        ]);
        let dump = LayoutDump::from_ast(&ast, &Config::default());
        let kinds: Vec<&str> = dump.boxes.iter().map(|b| b.kind.as_str()).collect();
        assert_eq!(kinds, vec!["literal", "any_character", "match", "regexp"]);
        assert!(dump.boxes.iter().all(BoxDump::anchor_in_bounds));
    }

    #[test]
    fn dump_serializes_to_json() {
        let ast = Regexp::single(vec![MatchFragment::new(Content::literal("a"))]);
        let path = std::env::temp_dir().join(format!("regex-railroad-dump-{}.json", std::process::id()));
        write_layout_dump(&path, &ast, &Config::default()).expect("dump written");
        let written = std::fs::read_to_string(&path).expect("dump readable");
        std::fs::remove_file(&path).ok();
        let value: serde_json::Value = serde_json::from_str(&written).expect("valid json");
        assert_eq!(value["boxes"][0]["kind"], "literal");
        assert_eq!(value["boxes"][0]["anchor_y"], 12.0);
    }
}
