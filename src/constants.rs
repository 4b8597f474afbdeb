// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Exposure compensation steps offered by the exposure dial
///
/// Two scales exist because exposure-bias ranges differ wildly between
/// devices: integrated webcams usually report a wide bias range (use the
/// coarse steps), while fixed-exposure sensors report a narrow one.
pub mod exposure {
    /// Coarse exposure steps for devices with a wide bias range
    pub const COARSE_STEPS: [i32; 5] = [-10, -5, 0, 5, 10];

    /// Fine exposure steps for devices with a narrow bias range
    pub const FINE_STEPS: [i32; 5] = [-2, -1, 0, 1, 2];

    /// Bias range span at or above which the coarse scale is selected
    pub const COARSE_RANGE_SPAN: i64 = 20;
}

/// Zoom envelope defaults used when the device reports no zoom control
pub mod zoom {
    /// Minimum zoom factor
    pub const DEFAULT_MIN: f32 = 1.0;

    /// Neutral (default) zoom factor
    pub const DEFAULT_NEUTRAL: f32 = 1.0;

    /// Maximum zoom factor
    pub const DEFAULT_MAX: f32 = 8.0;
}

/// Dial overlay geometry constants
pub mod dial {
    /// Fraction of the viewport used for the dial radius
    pub const RADIUS_FACTOR: f32 = 0.35;

    /// Height subtracted from the viewport before the radius is derived
    pub const HEIGHT_MARGIN: f32 = 100.0;

    /// Horizontal inset from the right viewport edge
    pub const RIGHT_INSET: f32 = 90.0;

    /// Fraction of a full circle swept by the dial arc
    pub const ARC_FRACTION: f32 = 1.0 / 3.0;

    /// Diameter of a dial option button
    pub const OPTION_SIZE: f32 = 50.0;

    /// Inset from the right edge for the dial close button
    pub const CLOSE_RIGHT_INSET: f32 = 30.0;
}

/// UI constants
pub mod ui {
    /// Capture button size (outer)
    pub const CAPTURE_BUTTON_OUTER: f32 = 60.0;

    /// Capture button size (inner)
    pub const CAPTURE_BUTTON_INNER: f32 = 50.0;

    /// Capture button border radius
    pub const CAPTURE_BUTTON_RADIUS: f32 = 25.0;

    /// Overlay button/container background transparency
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.6;

    /// Status label text size on the capture screen
    pub const STATUS_LABEL_TEXT_SIZE: u16 = 12;

    /// Milliseconds a confirmation notice stays on screen
    pub const NOTICE_DISPLAY_MS: u64 = 2000;
}

/// Preview pipeline constants
pub mod preview {
    /// Preferred preview resolution (width, height)
    pub const PREFERRED_RESOLUTION: (u32, u32) = (1280, 720);

    /// Number of memory-mapped capture buffers
    pub const BUFFER_COUNT: u32 = 4;

    /// Frames discarded after stream start while auto-exposure settles
    pub const WARMUP_FRAMES: u32 = 3;

    /// Delay before reopening the device after a stream error, in ms
    pub const RETRY_DELAY_MS: u64 = 1000;
}
