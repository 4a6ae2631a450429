//! Raw patch configuration as supplied by callers
//!
//! This is the serde boundary of the crate: everything here mirrors the loose
//! shape of a patch description (JSON or TOML) before normalization. Optional
//! fields stay optional; `normalize` turns them into the canonical model and
//! reports structural problems as [`ValidationError`](crate::ValidationError).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::renderer::OptionOverrides;

/// An x/y offset in pixels, relative to some origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rotary control specification.
///
/// `value` is either a normalized fraction in [0,1] (continuous dial) or, when
/// `positions` is set and the value is a whole number, a direct index into
/// `positions` (discrete dial). Both share the backing field and are told
/// apart by integrality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnobSpec {
    pub name: String,
    /// Dial value; defaults to the 12-o'clock midpoint
    #[serde(default = "default_knob_value")]
    pub value: f64,
    /// Explicit placement relative to the module origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Offset>,
    /// Dial radius override in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Discrete position labels; when set, integral values index into this list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<String>>,
}

fn default_knob_value() -> f64 {
    0.5
}

impl KnobSpec {
    /// Create a continuous knob with the given value
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            position: None,
            radius: None,
            positions: None,
        }
    }
}

/// A reusable module template, keyed by name in the raw `definitions` mapping
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawDefinition {
    /// Module type; defaults to the definition's own key
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub knobs: Vec<KnobSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// The two accepted knob encodings on a module instance.
///
/// The legacy form is a positional list of fully-specified knobs; the newer
/// form overrides a definition's knobs by name. Parsing them into an explicit
/// variant here keeps `normalize` free of runtime type inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawKnobs {
    /// Ordered list used verbatim, bypassing the definition's knob list
    List(Vec<KnobSpec>),
    /// Per-knob overrides applied on top of the definition's knob list
    Named(BTreeMap<String, KnobOverride>),
}

/// A single named knob override: a bare number (the value) or a detail object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KnobOverride {
    Value(f64),
    Detailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Offset>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f64>,
    },
}

/// One module instance as written in the raw configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawModule {
    /// Unique identifier; required, validated during normalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Name of a definition supplying defaults for this instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Module type; falls back to the definition reference, then `"default"`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Offset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knobs: Option<RawKnobs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// A directed link between two ports, each written as `"<module>:<port>"`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawConnection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A complete raw patch description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub definitions: BTreeMap<String, RawDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<RawModule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<RawConnection>>,
    /// Rendering option overrides carried inside the patch itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionOverrides>,
}
