// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend: V4L2 device registry, per-device controller, and
//! photo encoding
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   DeviceRegistry    │  ← Enumeration, facing selection
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraController   │  ← Open device, zoom/exposure controls
//! └──────────┬──────────┘
//!            │
//!            ▼
//!        ┌──────┐
//!        │ V4L2 │
//!        └──────┘
//! ```
//!
//! The controller is the sole owner of the control-side device handle;
//! preview streaming runs on its own thread in [`frame_loop`].

pub mod frame_loop;
pub mod types;
pub mod v4l2;

pub use types::*;

use crate::constants::exposure;
use crate::errors::CaptureError;
use std::path::PathBuf;
use tracing::{debug, warn};
use v4l::prelude::*;

/// Known capture devices, refreshed by enumeration
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<DeviceSnapshot>,
}

impl DeviceRegistry {
    pub fn new(devices: Vec<DeviceSnapshot>) -> Self {
        Self { devices }
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn devices(&self) -> &[DeviceSnapshot] {
        &self.devices
    }

    /// Pick the first device with the requested facing, falling back to
    /// the first device when none matches. `None` when no device exists.
    pub fn device_for(&self, facing: Facing) -> Option<&DeviceSnapshot> {
        self.devices
            .iter()
            .find(|d| d.facing == facing)
            .or_else(|| self.devices.first())
    }

    pub fn by_path(&self, path: &str) -> Option<&DeviceSnapshot> {
        self.devices.iter().find(|d| d.path == path)
    }
}

/// Control-side handle for one open camera.
///
/// Owns the V4L2 device handle used for zoom and exposure controls.
/// Frame traffic goes through the separate preview stream so control
/// writes never block on buffer dequeues.
pub struct CameraController {
    device: Device,
    snapshot: DeviceSnapshot,
}

impl CameraController {
    pub fn open(snapshot: DeviceSnapshot) -> Result<Self, CaptureError> {
        let device = Device::with_path(&snapshot.path).map_err(|e| {
            CaptureError::DeviceFailure(format!("Cannot open {}: {}", snapshot.path, e))
        })?;
        Ok(Self { device, snapshot })
    }

    /// Drive hardware zoom toward a display-scale factor.
    ///
    /// Devices without a zoom control report `Ok(false)`; the caller
    /// falls back to cropping at capture time.
    pub fn apply_zoom(&self, factor: f32) -> Result<bool, CaptureError> {
        let Some(range) = self.snapshot.zoom_control else {
            return Ok(false);
        };

        let span = (self.snapshot.max_zoom - self.snapshot.min_zoom).max(f32::EPSILON);
        let normalized = ((factor - self.snapshot.min_zoom) / span).clamp(0.0, 1.0);
        let value = range.min + (normalized * range.span() as f32).round() as i64;
        let value = value.clamp(range.min, range.max);

        debug!(factor, value, "Applying hardware zoom");
        v4l2::set_control_value(&self.device, v4l2::V4L2_CID_ZOOM_ABSOLUTE, value)
            .map_err(CaptureError::DeviceFailure)?;
        Ok(true)
    }

    /// Drive the hardware exposure bias toward a dial step.
    ///
    /// The step is mapped piecewise onto the driver range so that step
    /// zero always lands on the driver default. Devices without the
    /// control report `Ok(false)`.
    pub fn apply_exposure(&self, step: i32) -> Result<bool, CaptureError> {
        let Some(range) = self.snapshot.exposure_control else {
            return Ok(false);
        };

        let value = exposure_bias_value(step, self.snapshot.exposure_scale, range);
        debug!(step, value, "Applying exposure bias");
        v4l2::set_control_value(&self.device, v4l2::V4L2_CID_AUTO_EXPOSURE_BIAS, value)
            .map_err(CaptureError::DeviceFailure)?;
        Ok(true)
    }
}

/// Map a dial step onto the driver's bias range.
///
/// Negative steps interpolate between range minimum and the driver
/// default, positive steps between the default and range maximum, so
/// asymmetric driver ranges keep zero at the default.
fn exposure_bias_value(step: i32, scale: ExposureScale, range: ControlRange) -> i64 {
    let max_step = scale.max_step() as f32;
    let fraction = (step as f32 / max_step).clamp(-1.0, 1.0);

    let value = if fraction < 0.0 {
        range.default as f32 + fraction.abs() * (range.min - range.default) as f32
    } else {
        range.default as f32 + fraction * (range.max - range.default) as f32
    };

    (value.round() as i64).clamp(range.min, range.max)
}

/// Encode a preview frame to a JPEG file, applying a centered crop for
/// zoom the hardware did not provide.
///
/// `crop_factor` of 1.0 (or hardware-zoomed devices) keeps the full
/// frame. Returns the written path.
pub fn encode_photo(
    frame: &CameraFrame,
    crop_factor: f32,
    output: PathBuf,
) -> Result<PathBuf, String> {
    let image = image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba.to_vec())
        .ok_or_else(|| "Frame buffer does not match its dimensions".to_string())?;

    let image = if crop_factor > 1.0 {
        let crop_w = ((frame.width as f32 / crop_factor).round() as u32).max(1);
        let crop_h = ((frame.height as f32 / crop_factor).round() as u32).max(1);
        let x = (frame.width - crop_w) / 2;
        let y = (frame.height - crop_h) / 2;
        image::imageops::crop_imm(&image, x, y, crop_w, crop_h).to_image()
    } else {
        image
    };

    let rgb = image::DynamicImage::ImageRgba8(image).to_rgb8();
    rgb.save_with_format(&output, image::ImageFormat::Jpeg)
        .map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;

    Ok(output)
}

/// Grab and encode a single photo without a running preview.
///
/// CLI path: opens the device, captures one warmed-up frame, writes it
/// as JPEG to `output`.
pub fn capture_one_shot(device_path: &str, output: PathBuf) -> Result<PathBuf, String> {
    let frame = v4l2::grab_frame(device_path)?;
    if frame.rgba.is_empty() {
        warn!(path = %device_path, "Empty frame from device");
        return Err("Device produced an empty frame".into());
    }
    encode_photo(&frame, 1.0, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn snapshot(facing: Facing, path: &str) -> DeviceSnapshot {
        DeviceSnapshot {
            name: format!("{} camera", facing),
            path: path.to_string(),
            facing,
            ..DeviceSnapshot::default()
        }
    }

    #[test]
    fn test_registry_prefers_matching_facing() {
        let registry = DeviceRegistry::new(vec![
            snapshot(Facing::Back, "/dev/video0"),
            snapshot(Facing::Front, "/dev/video2"),
        ]);
        assert_eq!(
            registry.device_for(Facing::Front).map(|d| d.path.as_str()),
            Some("/dev/video2")
        );
        assert_eq!(
            registry.device_for(Facing::Back).map(|d| d.path.as_str()),
            Some("/dev/video0")
        );
    }

    #[test]
    fn test_registry_falls_back_to_first_device() {
        let registry = DeviceRegistry::new(vec![snapshot(Facing::Back, "/dev/video0")]);
        assert_eq!(
            registry.device_for(Facing::Front).map(|d| d.path.as_str()),
            Some("/dev/video0")
        );
    }

    #[test]
    fn test_registry_empty_yields_none() {
        let registry = DeviceRegistry::default();
        assert!(registry.device_for(Facing::Back).is_none());
    }

    #[test]
    fn test_exposure_bias_zero_is_driver_default() {
        let range = ControlRange::new(-24, 24, 1, 4);
        assert_eq!(exposure_bias_value(0, ExposureScale::Coarse, range), 4);
    }

    #[test]
    fn test_exposure_bias_extremes_hit_range_ends() {
        let range = ControlRange::new(-24, 24, 1, 0);
        assert_eq!(exposure_bias_value(10, ExposureScale::Coarse, range), 24);
        assert_eq!(exposure_bias_value(-10, ExposureScale::Coarse, range), -24);
        assert_eq!(exposure_bias_value(2, ExposureScale::Fine, range), 24);
    }

    #[test]
    fn test_exposure_bias_asymmetric_range() {
        // Default sits off-center; halves interpolate independently
        let range = ControlRange::new(-12, 24, 1, 0);
        assert_eq!(exposure_bias_value(-5, ExposureScale::Coarse, range), -6);
        assert_eq!(exposure_bias_value(5, ExposureScale::Coarse, range), 12);
    }

    #[test]
    fn test_encode_photo_crops_center() {
        let frame = CameraFrame {
            rgba: Arc::from(vec![255u8; 8 * 8 * 4].into_boxed_slice()),
            width: 8,
            height: 8,
        };
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("photo.jpg");

        let written = encode_photo(&frame, 2.0, out.clone()).expect("encode");
        assert_eq!(written, out);

        let image = image::open(&out).expect("reopen");
        assert_eq!((image.width(), image.height()), (4, 4));
    }

    #[test]
    fn test_encode_photo_no_crop_at_unit_zoom() {
        let frame = CameraFrame {
            rgba: Arc::from(vec![0u8; 4 * 2 * 4].into_boxed_slice()),
            width: 4,
            height: 2,
        };
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("full.jpg");

        encode_photo(&frame, 1.0, out.clone()).expect("encode");
        let image = image::open(&out).expect("reopen");
        assert_eq!((image.width(), image.height()), (4, 2));
    }
}
