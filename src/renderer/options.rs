//! Rendering options and their merge rules

use serde::{Deserialize, Serialize};

/// Geometric and stylistic options for the rendered patch.
///
/// Each field affects exactly one aspect of the layout; there is no
/// interaction between them beyond shared padding arithmetic. Constructed
/// once per render call from the defaults, the patch-level `options` map, and
/// caller overrides, in that precedence order (later wins).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Default module width in pixels, used when the module declares none
    pub module_width: f64,
    /// Default module height in pixels
    pub module_height: f64,
    /// Radius of port circles
    pub port_radius: f64,
    /// Default knob dial radius
    pub knob_radius: f64,
    /// Vertical distance between ports on a module edge
    pub port_spacing: f64,
    /// Horizontal distance between auto-placed knobs
    pub knob_spacing: f64,
    /// Canvas padding around the outermost modules
    pub padding: f64,
    /// Canvas background fill
    pub background_color: String,
    /// Module body fill
    pub module_color: String,
    /// Port circle fill
    pub port_color: String,
    /// Module outline stroke width
    pub stroke_width: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_width: 120.0,
            module_height: 250.0,
            port_radius: 5.0,
            knob_radius: 15.0,
            port_spacing: 20.0,
            knob_spacing: 30.0,
            padding: 20.0,
            background_color: "#f5f5f5".to_string(),
            module_color: "#e0e0e0".to_string(),
            port_color: "#555".to_string(),
            stroke_width: 2.0,
        }
    }
}

impl RenderOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default module width
    pub fn with_module_width(mut self, width: f64) -> Self {
        self.module_width = width;
        self
    }

    /// Set the default module height
    pub fn with_module_height(mut self, height: f64) -> Self {
        self.module_height = height;
        self
    }

    /// Set the port circle radius
    pub fn with_port_radius(mut self, radius: f64) -> Self {
        self.port_radius = radius;
        self
    }

    /// Set the default knob dial radius
    pub fn with_knob_radius(mut self, radius: f64) -> Self {
        self.knob_radius = radius;
        self
    }

    /// Set the vertical port spacing
    pub fn with_port_spacing(mut self, spacing: f64) -> Self {
        self.port_spacing = spacing;
        self
    }

    /// Set the horizontal knob spacing
    pub fn with_knob_spacing(mut self, spacing: f64) -> Self {
        self.knob_spacing = spacing;
        self
    }

    /// Set the canvas padding
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the canvas background color
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Set the module body color
    pub fn with_module_color(mut self, color: impl Into<String>) -> Self {
        self.module_color = color.into();
        self
    }

    /// Set the port circle color
    pub fn with_port_color(mut self, color: impl Into<String>) -> Self {
        self.port_color = color.into();
        self
    }

    /// Set the module outline stroke width
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Apply a set of overrides on top of these options, field by field
    pub fn overlay(mut self, overrides: &OptionOverrides) -> Self {
        if let Some(v) = overrides.module_width {
            self.module_width = v;
        }
        if let Some(v) = overrides.module_height {
            self.module_height = v;
        }
        if let Some(v) = overrides.port_radius {
            self.port_radius = v;
        }
        if let Some(v) = overrides.knob_radius {
            self.knob_radius = v;
        }
        if let Some(v) = overrides.port_spacing {
            self.port_spacing = v;
        }
        if let Some(v) = overrides.knob_spacing {
            self.knob_spacing = v;
        }
        if let Some(v) = overrides.padding {
            self.padding = v;
        }
        if let Some(v) = &overrides.background_color {
            self.background_color = v.clone();
        }
        if let Some(v) = &overrides.module_color {
            self.module_color = v.clone();
        }
        if let Some(v) = &overrides.port_color {
            self.port_color = v.clone();
        }
        if let Some(v) = overrides.stroke_width {
            self.stroke_width = v;
        }
        self
    }
}

/// Partial rendering options, as carried in a patch's `options` map.
///
/// Field names follow the wire format (`moduleWidth`, `portColor`, ...).
/// Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knob_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knob_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert_eq!(opts.module_width, 120.0);
        assert_eq!(opts.module_height, 250.0);
        assert_eq!(opts.port_radius, 5.0);
        assert_eq!(opts.knob_radius, 15.0);
        assert_eq!(opts.padding, 20.0);
        assert_eq!(opts.background_color, "#f5f5f5");
    }

    #[test]
    fn test_builder_pattern() {
        let opts = RenderOptions::new()
            .with_module_width(100.0)
            .with_padding(10.0)
            .with_port_color("#000");

        assert_eq!(opts.module_width, 100.0);
        assert_eq!(opts.padding, 10.0);
        assert_eq!(opts.port_color, "#000");
        // Untouched fields keep defaults
        assert_eq!(opts.module_height, 250.0);
    }

    #[test]
    fn test_overlay_wins_field_by_field() {
        let overrides: OptionOverrides =
            serde_json::from_str(r##"{"moduleWidth": 80, "portColor": "#111"}"##).unwrap();
        let opts = RenderOptions::default().overlay(&overrides);

        assert_eq!(opts.module_width, 80.0);
        assert_eq!(opts.port_color, "#111");
        assert_eq!(opts.knob_radius, 15.0);
    }

    #[test]
    fn test_unknown_override_keys_are_ignored() {
        let overrides: OptionOverrides =
            serde_json::from_str(r#"{"glowIntensity": 3}"#).unwrap();
        assert_eq!(overrides, OptionOverrides::default());
    }
}
