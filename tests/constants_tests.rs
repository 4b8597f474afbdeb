// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use obscura::constants::{dial, exposure, zoom};

#[test]
fn test_exposure_scales_are_symmetric() {
    // Both dials keep zero in the middle so reset lands on a real option
    for steps in [exposure::COARSE_STEPS, exposure::FINE_STEPS] {
        assert_eq!(steps.len() % 2, 1, "Dial needs a center option");
        assert_eq!(steps[steps.len() / 2], 0);
        for (negative, positive) in steps.iter().zip(steps.iter().rev()) {
            assert_eq!(*negative, -*positive);
        }
    }
}

#[test]
fn test_exposure_scales_are_sorted() {
    for steps in [exposure::COARSE_STEPS, exposure::FINE_STEPS] {
        let mut sorted = steps;
        sorted.sort();
        assert_eq!(sorted, steps);
    }
}

#[test]
fn test_zoom_envelope_defaults() {
    assert!(zoom::DEFAULT_MIN <= zoom::DEFAULT_NEUTRAL);
    assert!(zoom::DEFAULT_NEUTRAL <= zoom::DEFAULT_MAX);
    assert!(zoom::DEFAULT_MIN > 0.0, "Zoom factors are multiplicative");
}

#[test]
fn test_dial_arc_stays_on_screen() {
    // A full-circle arc would wrap options behind the close button
    assert!(dial::ARC_FRACTION > 0.0);
    assert!(dial::ARC_FRACTION <= 0.5);
    assert!(dial::RADIUS_FACTOR < 0.5, "Dial must fit inside the viewport");
}
