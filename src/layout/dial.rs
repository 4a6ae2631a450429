//! Knob dial geometry
//!
//! A knob displays its value as a progress ring plus an indicator line. The
//! displayed fraction comes from the knob's value: discrete knobs (those with
//! a `positions` list and a whole-number value) index into their label list,
//! continuous knobs use the value directly. Out-of-range values are clamped
//! so the ring and label always stay well-defined.

use crate::config::KnobSpec;
use crate::layout::types::Point;

/// Angle of the ring's starting point: 6 o'clock, in degrees.
/// SVG angles grow clockwise with y pointing down.
pub const RING_START_DEGREES: f64 = 90.0;

/// Resolved display state for one knob dial
#[derive(Debug, Clone, PartialEq)]
pub struct DialGeometry {
    /// Displayed fraction of a full turn, clamped to [0, 1]
    pub fraction: f64,
    /// Text shown above the ring: a position label or a rounded percentage
    pub label: String,
}

/// Compute the displayed fraction and label for a knob.
pub fn resolve(knob: &KnobSpec) -> DialGeometry {
    if let Some(positions) = knob.positions.as_deref().filter(|p| !p.is_empty()) {
        let last = positions.len() - 1;

        if knob.value.is_finite() && knob.value.fract() == 0.0 {
            // Whole number: a direct index into the position list
            let index = (knob.value.max(0.0) as usize).min(last);
            let fraction = if last > 0 {
                index as f64 / last as f64
            } else {
                1.0
            };
            return DialGeometry {
                fraction,
                label: positions[index].clone(),
            };
        }

        // Fractional value: normalized, with the nearest position as label
        let fraction = knob.value.clamp(0.0, 1.0);
        let index = ((fraction * last as f64).round() as usize).min(last);
        return DialGeometry {
            fraction,
            label: positions[index].clone(),
        };
    }

    let fraction = knob.value.clamp(0.0, 1.0);
    DialGeometry {
        fraction,
        label: format!("{:.0}", fraction * 100.0),
    }
}

/// Point on the dial circle at the given fraction of a full clockwise turn
/// from the 6-o'clock starting angle.
pub fn point_at(center: Point, radius: f64, fraction: f64) -> Point {
    let radians = (RING_START_DEGREES + fraction * 360.0).to_radians();
    Point::new(
        center.x + radians.cos() * radius,
        center.y + radians.sin() * radius,
    )
}
