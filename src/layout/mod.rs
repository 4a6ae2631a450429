//! Layout pass: absolute pixel geometry for a canonical patch
//!
//! `compute` takes a normalized [`Patch`] and produces a [`PatchLayout`] with
//! the canvas size, placed modules, ports, knob dials, and resolved
//! connection endpoints. The port-position lookup is local to one call; no
//! state survives between renders.

pub mod dial;
pub mod types;

pub use dial::DialGeometry;
pub use types::{
    BoundingBox, ConnectionLayout, KnobLayout, ModuleLayout, PatchLayout, Point, PortLayout,
    PortSide,
};

use std::collections::HashMap;

use crate::config::{Module, Patch};
use crate::renderer::RenderOptions;

/// Extra canvas height reserved above the modules when a title is present
const TITLE_BAND_HEIGHT: f64 = 40.0;

/// Vertical offset of the first port below the module's top edge,
/// leaving room for the name label
const PORT_BLOCK_TOP: f64 = 40.0;

/// Distance of the auto-placed knob row above the module's bottom edge
const KNOB_ROW_OFFSET: f64 = 40.0;

/// Compute the full geometry for one render call.
///
/// Connections whose endpoints cannot be resolved to a placed port are
/// reported through `tracing::warn!` and dropped; everything else still
/// renders.
pub fn compute(patch: &Patch, opts: &RenderOptions) -> PatchLayout {
    let title_height = if patch.title.is_some() {
        TITLE_BAND_HEIGHT
    } else {
        0.0
    };
    let top_padding = opts.padding + title_height;

    // Pass 1: canvas sizing from the maximum module extents
    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;
    for module in &patch.modules {
        let (w, h) = module_size(module, opts);
        max_x = max_x.max(module.position.x + w);
        max_y = max_y.max(module.position.y + h);
    }
    let width = max_x + opts.padding * 2.0;
    let height = max_y + opts.padding + top_padding;

    // Pass 2: module, port, and knob placement. Every placed port records its
    // absolute center keyed "<module>:<port>" for connection resolution.
    let mut port_lookup: HashMap<String, Point> = HashMap::new();
    let mut modules = Vec::with_capacity(patch.modules.len());

    for module in &patch.modules {
        let (w, h) = module_size(module, opts);
        let bounds = BoundingBox::new(
            module.position.x + opts.padding,
            module.position.y + top_padding,
            w,
            h,
        );

        let mut ports = Vec::with_capacity(module.inputs.len() + module.outputs.len());
        for (i, input) in module.inputs.iter().enumerate() {
            let center = Point::new(bounds.x, bounds.y + PORT_BLOCK_TOP + i as f64 * opts.port_spacing);
            port_lookup.insert(port_key(&module.name, input), center);
            ports.push(PortLayout {
                name: input.clone(),
                side: PortSide::Input,
                center,
            });
        }
        for (i, output) in module.outputs.iter().enumerate() {
            let center = Point::new(
                bounds.right(),
                bounds.y + PORT_BLOCK_TOP + i as f64 * opts.port_spacing,
            );
            port_lookup.insert(port_key(&module.name, output), center);
            ports.push(PortLayout {
                name: output.clone(),
                side: PortSide::Output,
                center,
            });
        }

        let knob_count = module.knobs.len();
        let knobs = module
            .knobs
            .iter()
            .enumerate()
            .map(|(i, knob)| {
                let center = match knob.position {
                    Some(offset) => Point::new(bounds.x + offset.x, bounds.y + offset.y),
                    None => {
                        // Evenly distributed along a centered row near the bottom
                        let slot = i as f64 - (knob_count as f64 - 1.0) / 2.0;
                        Point::new(
                            bounds.x + w / 2.0 + slot * opts.knob_spacing,
                            bounds.bottom() - KNOB_ROW_OFFSET,
                        )
                    }
                };
                KnobLayout {
                    name: knob.name.clone(),
                    center,
                    radius: knob.radius.unwrap_or(opts.knob_radius),
                    dial: dial::resolve(knob),
                }
            })
            .collect();

        modules.push(ModuleLayout {
            name: module.name.clone(),
            bounds,
            ports,
            knobs,
        });
    }

    // Pass 3: connection resolution against the port lookup
    let mut connections = Vec::with_capacity(patch.connections.len());
    for conn in &patch.connections {
        match (port_lookup.get(&conn.from), port_lookup.get(&conn.to)) {
            (Some(&from), Some(&to)) => connections.push(ConnectionLayout {
                from,
                to,
                color: conn.color.clone(),
            }),
            _ => {
                tracing::warn!(
                    from = %conn.from,
                    to = %conn.to,
                    "connection references unknown port, skipping"
                );
            }
        }
    }

    PatchLayout {
        width,
        height,
        title: patch.title.clone(),
        modules,
        connections,
    }
}

fn module_size(module: &Module, opts: &RenderOptions) -> (f64, f64) {
    (
        module.width.unwrap_or(opts.module_width),
        module.height.unwrap_or(opts.module_height),
    )
}

fn port_key(module: &str, port: &str) -> String {
    format!("{}:{}", module, port)
}
