// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera backend

use crate::constants::{exposure, zoom};
use std::path::PathBuf;
use std::sync::Arc;

/// Which physical camera is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// User-facing camera (selfie)
    Front,
    /// World-facing camera
    #[default]
    Back,
}

impl Facing {
    /// The opposite facing
    pub fn toggled(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facing::Front => write!(f, "front"),
            Facing::Back => write!(f, "back"),
        }
    }
}

/// Exposure dial scale, chosen from the device's exposure-bias range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExposureScale {
    /// Wide bias range: steps of 5 from -10 to +10
    Coarse,
    /// Narrow bias range: steps of 1 from -2 to +2
    #[default]
    Fine,
}

impl ExposureScale {
    /// The ordered dial options for this scale
    pub fn options(self) -> &'static [i32] {
        match self {
            ExposureScale::Coarse => &exposure::COARSE_STEPS,
            ExposureScale::Fine => &exposure::FINE_STEPS,
        }
    }

    /// Whether a value is a member of this scale's option set
    pub fn contains(self, value: i32) -> bool {
        self.options().contains(&value)
    }

    /// Largest positive step of this scale
    pub fn max_step(self) -> i32 {
        *self.options().last().unwrap_or(&0)
    }
}

/// Range of a hardware control, as reported by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRange {
    /// Minimum value
    pub min: i64,
    /// Maximum value
    pub max: i64,
    /// Step size (at least 1)
    pub step: i64,
    /// Default value
    pub default: i64,
}

impl ControlRange {
    /// Create a range, forcing a sane step
    pub fn new(min: i64, max: i64, step: i64, default: i64) -> Self {
        Self {
            min,
            max,
            step: step.max(1),
            default,
        }
    }

    /// Range span (max - min)
    pub fn span(&self) -> i64 {
        self.max - self.min
    }
}

/// A photo format reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraFormat {
    /// Photo width in pixels
    pub photo_width: u32,
    /// Photo height in pixels
    pub photo_height: u32,
    /// Slowest reported frame rate
    pub min_fps: u32,
    /// Fastest reported frame rate
    pub max_fps: u32,
}

/// Immutable capability envelope of one camera device.
///
/// Fetched once per facing when the device becomes active; dependent
/// session state (zoom) is re-derived from this snapshot, never from
/// stale bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    /// Human-readable device name (V4L2 card)
    pub name: String,
    /// Device node path, e.g. `/dev/video0`
    pub path: String,
    /// Facing classification
    pub facing: Facing,
    /// Minimum zoom factor
    pub min_zoom: f32,
    /// Device-reported default zoom factor
    pub neutral_zoom: f32,
    /// Maximum zoom factor
    pub max_zoom: f32,
    /// Hardware zoom control range, when the device exposes one
    pub zoom_control: Option<ControlRange>,
    /// Hardware exposure-bias control range, when the device exposes one
    pub exposure_control: Option<ControlRange>,
    /// Exposure dial scale derived from the bias range
    pub exposure_scale: ExposureScale,
    /// Reported photo formats, largest first
    pub formats: Vec<CameraFormat>,
}

impl Default for DeviceSnapshot {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            facing: Facing::default(),
            min_zoom: zoom::DEFAULT_MIN,
            neutral_zoom: zoom::DEFAULT_NEUTRAL,
            max_zoom: zoom::DEFAULT_MAX,
            zoom_control: None,
            exposure_control: None,
            exposure_scale: ExposureScale::default(),
            formats: Vec::new(),
        }
    }
}

impl DeviceSnapshot {
    /// Clamp a zoom request into this device's envelope
    pub fn clamp_zoom(&self, value: f32) -> f32 {
        value.clamp(self.min_zoom, self.max_zoom)
    }

    /// The best (largest) photo format, if any were reported
    pub fn best_format(&self) -> Option<&CameraFormat> {
        self.formats.first()
    }
}

/// Kind of a captured media item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// A captured media item handed from the capture pipeline to review.
///
/// Ownership moves into the review screen; once save or discard ran, the
/// reference is gone and no further action is possible.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedMedia {
    /// Temp file holding the capture
    pub path: PathBuf,
    /// Photo or video
    pub kind: MediaKind,
}

/// One decoded RGBA preview frame
#[derive(Clone)]
pub struct CameraFrame {
    /// Tightly packed RGBA pixels
    pub rgba: Arc<[u8]>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CameraFrame({}x{}, {} bytes)",
            self.width,
            self.height,
            self.rgba.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_toggle_is_involution() {
        assert_eq!(Facing::Back.toggled(), Facing::Front);
        assert_eq!(Facing::Back.toggled().toggled(), Facing::Back);
    }

    #[test]
    fn test_exposure_scale_membership() {
        assert!(ExposureScale::Coarse.contains(5));
        assert!(!ExposureScale::Coarse.contains(7));
        assert!(ExposureScale::Fine.contains(1));
        assert!(!ExposureScale::Fine.contains(5));
    }

    #[test]
    fn test_best_format_is_largest_reported() {
        let mut snapshot = DeviceSnapshot::default();
        assert!(snapshot.best_format().is_none());

        // Formats arrive sorted largest first from enumeration
        snapshot.formats = vec![
            CameraFormat {
                photo_width: 1920,
                photo_height: 1080,
                min_fps: 15,
                max_fps: 30,
            },
            CameraFormat {
                photo_width: 640,
                photo_height: 480,
                min_fps: 15,
                max_fps: 60,
            },
        ];
        let best = snapshot.best_format().unwrap();
        assert_eq!((best.photo_width, best.photo_height), (1920, 1080));
    }

    #[test]
    fn test_control_range_step_never_zero() {
        let range = ControlRange::new(0, 10, 0, 5);
        assert_eq!(range.step, 1);
        assert_eq!(range.span(), 10);
    }
}
