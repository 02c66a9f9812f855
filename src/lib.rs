pub mod ast;
pub mod config;
pub mod flavor;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod svg;

pub use ast::*;
pub use config::{Config, load_config};
pub use flavor::{FeatureSet, FlagInfo, Flavor, FlavorParser, ParseError, Position, UnknownFlavor};
pub use layout_dump::{LayoutDump, write_layout_dump};
pub use render::{Renderer, render, render_default};
