//! SVG path `d` string generation for connector curves and dial ring arcs

use crate::layout::dial;
use crate::layout::Point;

/// Build the `d` attribute for a connection curve.
///
/// The curve runs from the source port through a control point at the
/// horizontal midpoint (keeping the source's y), reaches the vertical
/// midpoint, then continues with a smooth quadratic segment to the
/// destination. The reflection of the control point gives the path its
/// gentle S shape.
pub fn connection_d(from: Point, to: Point) -> String {
    let mid_x = (from.x + to.x) / 2.0;
    let mid_y = (from.y + to.y) / 2.0;
    format!(
        "M{:.2} {:.2} Q{:.2} {:.2} {:.2} {:.2} T{:.2} {:.2}",
        from.x, from.y, mid_x, from.y, mid_x, mid_y, to.x, to.y
    )
}

/// Build the `d` attribute for a partial progress ring.
///
/// The arc starts at the 6-o'clock angle and sweeps clockwise by
/// `fraction * 360` degrees, switching to the large-arc flag past the
/// halfway point. A full ring (fraction >= 1) is drawn as a circle element
/// instead, not through this path.
pub fn ring_arc_d(center: Point, radius: f64, fraction: f64) -> String {
    let start = dial::point_at(center, radius, 0.0);
    let end = dial::point_at(center, radius, fraction);
    let large_arc = if fraction > 0.5 { 1 } else { 0 };
    format!(
        "M{:.2} {:.2} A{:.2} {:.2} 0 {} 1 {:.2} {:.2}",
        start.x, start.y, radius, radius, large_arc, end.x, end.y
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_d_through_midpoints() {
        let d = connection_d(Point::new(0.0, 0.0), Point::new(100.0, 40.0));
        assert_eq!(d, "M0.00 0.00 Q50.00 0.00 50.00 20.00 T100.00 40.00");
    }

    #[test]
    fn test_ring_arc_starts_at_six_oclock() {
        let d = ring_arc_d(Point::new(0.0, 0.0), 10.0, 0.25);
        assert!(d.starts_with("M0.00 10.00"), "unexpected start: {}", d);
        // Quarter turn clockwise ends at 9 o'clock
        assert!(d.ends_with("-10.00 0.00"), "unexpected end: {}", d);
    }

    #[test]
    fn test_ring_arc_large_flag_past_half() {
        let small = ring_arc_d(Point::new(0.0, 0.0), 10.0, 0.4);
        let large = ring_arc_d(Point::new(0.0, 0.0), 10.0, 0.6);
        assert!(small.contains(" 0 0 1 "));
        assert!(large.contains(" 0 1 1 "));
    }
}
