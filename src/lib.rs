//! Patch Illustrator - render modular-synthesizer patch diagrams as SVG
//!
//! This library turns a declarative patch description (modules, ports, knobs,
//! connections) into a vector image. The pipeline has two stages: the config
//! normalizer resolves definition templates and knob encodings into a
//! canonical model, and the renderer computes pixel geometry and emits SVG.
//!
//! # Example
//!
//! ```rust
//! use patch_illustrator::{render, RawPatch};
//!
//! let raw: RawPatch = serde_json::from_value(serde_json::json!({
//!     "modules": [
//!         {"name": "Osc", "outputs": ["out"]},
//!         {"name": "Amp", "inputs": ["in"], "position": {"x": 200, "y": 0}}
//!     ],
//!     "connections": [{"from": "Osc:out", "to": "Amp:in"}]
//! })).unwrap();
//!
//! let svg = render(raw).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod renderer;

pub use config::{normalize, KnobSpec, Offset, Patch, RawPatch};
pub use error::ValidationError;
pub use layout::{compute, PatchLayout};
pub use renderer::{render_svg, OptionOverrides, RenderOptions};

/// Render a raw patch description to SVG with default options.
///
/// Every invocation is a pure function of its input: the port-position lookup
/// and element list are built and discarded per call, so concurrent use from
/// independent call sites is safe.
pub fn render(raw: RawPatch) -> Result<String, ValidationError> {
    render_with_options(raw, OptionOverrides::default())
}

/// Render a raw patch description with caller-supplied option overrides.
///
/// Options merge field by field, later wins: built-in defaults, then the
/// patch's own `options` map, then `overrides`.
pub fn render_with_options(
    raw: RawPatch,
    overrides: OptionOverrides,
) -> Result<String, ValidationError> {
    let patch = config::normalize(raw)?;

    let mut options = RenderOptions::default();
    if let Some(patch_options) = &patch.options {
        options = options.overlay(patch_options);
    }
    let options = options.overlay(&overrides);

    let layout = layout::compute(&patch, &options);
    Ok(renderer::render_svg(&layout, &options))
}
