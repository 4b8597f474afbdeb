// SPDX-License-Identifier: GPL-3.0-only

//! Arc layout for the dial overlays
//!
//! Options are laid out along a circular arc anchored to the right
//! edge of the viewport, sweeping downward from the top of the arc.
//! All math is pure so the layout can be tested without a window.

use crate::constants::dial;
use std::f32::consts::PI;

/// A resolved option position, in viewport coordinates (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialPoint {
    pub x: f32,
    pub y: f32,
}

/// Arc radius for a viewport.
///
/// The height term reserves room for the bottom control bar so the
/// dial never collides with it on short viewports.
pub fn dial_radius(width: f32, height: f32) -> f32 {
    width.min(height - dial::HEIGHT_MARGIN) * dial::RADIUS_FACTOR
}

/// Angle of option `index` out of `count`, in radians.
///
/// Options occupy a third of the full circle starting at the top of
/// the arc (-π/2), so dials with few options stay near the top edge.
pub fn option_angle(index: usize, count: usize) -> f32 {
    let count = count.max(1);
    (index as f32 / count as f32) * dial::ARC_FRACTION * 2.0 * PI - PI / 2.0
}

/// Position of option `index` out of `count` in a `width` x `height`
/// viewport
pub fn option_position(index: usize, count: usize, width: f32, height: f32) -> DialPoint {
    let radius = dial_radius(width, height);
    let angle = option_angle(index, count);
    DialPoint {
        x: width - angle.cos() * radius - dial::RIGHT_INSET,
        y: angle.sin() * radius + height / 4.0,
    }
}

/// Position of the dial's close affordance
pub fn close_position(width: f32, height: f32) -> DialPoint {
    DialPoint {
        x: width - dial::CLOSE_RIGHT_INSET,
        y: height / 4.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn close_to(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_radius_tracks_smaller_dimension() {
        // Height minus margin is the limiting dimension here
        assert!(close_to(dial_radius(1000.0, 500.0), 400.0 * 0.35));
        // Width limits when the viewport is tall
        assert!(close_to(dial_radius(400.0, 2000.0), 400.0 * 0.35));
    }

    #[test]
    fn test_first_option_sits_at_arc_top() {
        assert!(close_to(option_angle(0, 5), -PI / 2.0));
        // cos(-π/2) = 0: x is the right inset, y is the arc center
        let p = option_position(0, 5, 800.0, 600.0);
        assert!(close_to(p.x, 800.0 - dial::RIGHT_INSET));
        let radius = dial_radius(800.0, 600.0);
        assert!(close_to(p.y, 600.0 / 4.0 - radius));
    }

    #[test]
    fn test_angles_advance_through_a_third_circle() {
        let count = 5;
        let step = option_angle(1, count) - option_angle(0, count);
        assert!(close_to(step, dial::ARC_FRACTION * 2.0 * PI / count as f32));
        // The last option stays short of a full third
        let sweep = option_angle(count - 1, count) - option_angle(0, count);
        assert!(sweep < dial::ARC_FRACTION * 2.0 * PI);
    }

    #[test]
    fn test_positions_are_distinct() {
        let count = 5;
        let points: Vec<_> = (0..count)
            .map(|i| option_position(i, count, 800.0, 600.0))
            .collect();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(!close_to(a.x, b.x) || !close_to(a.y, b.y));
            }
        }
    }

    #[test]
    fn test_single_option_does_not_divide_by_zero() {
        assert!(close_to(option_angle(0, 1), -PI / 2.0));
        let p = option_position(0, 1, 800.0, 600.0);
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn test_options_descend_down_the_arc() {
        // sin grows over the swept range, so later options sit lower
        let count = 5;
        let ys: Vec<_> = (0..count)
            .map(|i| option_position(i, count, 800.0, 600.0).y)
            .collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_close_affordance_position() {
        let p = close_position(800.0, 600.0);
        assert!(close_to(p.x, 800.0 - dial::CLOSE_RIGHT_INSET));
        assert!(close_to(p.y, 150.0));
    }
}
