//! SVG renderer: options, path generation, and document assembly

pub mod options;
pub mod path;
pub mod svg;

pub use options::{OptionOverrides, RenderOptions};
pub use svg::{render_svg, SvgBuilder};
