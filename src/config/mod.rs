//! Patch configuration: raw input model and the normalization pass
//!
//! Raw configurations arrive through serde with most fields optional and two
//! accepted knob encodings. `normalize` resolves definitions and knob
//! overrides into the canonical [`Patch`] the layout pass consumes.

pub mod normalize;
pub mod raw;

pub use normalize::{normalize, Connection, Definition, Module, Patch};
pub use raw::{KnobOverride, KnobSpec, Offset, RawKnobs, RawModule, RawPatch};
