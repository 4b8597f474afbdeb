// SPDX-License-Identifier: GPL-3.0-only

//! Per-session camera parameters
//!
//! Holds the user-adjustable capture state (facing, zoom, exposure,
//! flash, torch) and enforces the active device's envelope on every
//! mutation. Values never leave the envelope; out-of-range requests
//! are clamped or rejected, not stored.

use crate::backends::camera::{DeviceSnapshot, Facing};
use tracing::warn;

/// Flash behavior for the next capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashMode {
    #[default]
    Off,
    On,
}

impl FlashMode {
    pub fn toggled(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Off,
        }
    }

    pub fn is_on(self) -> bool {
        self == FlashMode::On
    }
}

/// Continuous torch illumination, independent of capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TorchMode {
    #[default]
    Off,
    On,
}

impl TorchMode {
    pub fn toggled(self) -> Self {
        match self {
            TorchMode::Off => TorchMode::On,
            TorchMode::On => TorchMode::Off,
        }
    }

    pub fn is_on(self) -> bool {
        self == TorchMode::On
    }
}

/// The adjustable capture parameters for the active device.
///
/// Constructed from a [`DeviceSnapshot`] and re-derived whenever the
/// facing changes; zoom and exposure are always valid for the device
/// the snapshot describes.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    device: DeviceSnapshot,
    zoom: f32,
    exposure: i32,
    flash: FlashMode,
    torch: TorchMode,
}

impl SessionParams {
    /// Start a session at the device's neutral zoom and zero exposure
    pub fn new(device: DeviceSnapshot) -> Self {
        let zoom = device.clamp_zoom(device.neutral_zoom);
        Self {
            device,
            zoom,
            exposure: 0,
            flash: FlashMode::default(),
            torch: TorchMode::default(),
        }
    }

    pub fn device(&self) -> &DeviceSnapshot {
        &self.device
    }

    pub fn facing(&self) -> Facing {
        self.device.facing
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn exposure(&self) -> i32 {
        self.exposure
    }

    pub fn flash(&self) -> FlashMode {
        self.flash
    }

    pub fn torch(&self) -> TorchMode {
        self.torch
    }

    /// Set zoom, clamped into the device envelope. Returns the stored
    /// value.
    pub fn set_zoom(&mut self, factor: f32) -> f32 {
        self.zoom = self.device.clamp_zoom(factor);
        self.zoom
    }

    /// Reset zoom to the device's neutral factor
    pub fn reset_zoom(&mut self) {
        self.zoom = self.device.clamp_zoom(self.device.neutral_zoom);
    }

    /// Set exposure to one of the dial steps of the active scale.
    ///
    /// Values outside the step set are rejected and `false` returned.
    pub fn set_exposure(&mut self, step: i32) -> bool {
        if !self.device.exposure_scale.contains(step) {
            warn!(step, "Rejected exposure value outside the dial steps");
            return false;
        }
        self.exposure = step;
        true
    }

    /// Reset exposure to the neutral step
    pub fn reset_exposure(&mut self) {
        self.exposure = 0;
    }

    pub fn toggle_flash(&mut self) {
        self.flash = self.flash.toggled();
    }

    pub fn toggle_torch(&mut self) {
        self.torch = self.torch.toggled();
    }

    /// Swap in the device for the other facing.
    ///
    /// Zoom resets to the new device's neutral factor and exposure to
    /// zero; flash and torch selections survive the swap.
    pub fn switch_device(&mut self, device: DeviceSnapshot) {
        self.device = device;
        self.zoom = self.device.clamp_zoom(self.device.neutral_zoom);
        self.exposure = 0;
    }

    /// Crop factor the capture path must apply when the device has no
    /// hardware zoom control
    pub fn software_crop_factor(&self) -> f32 {
        if self.device.zoom_control.is_some() {
            1.0
        } else {
            (self.zoom / self.device.min_zoom.max(f32::EPSILON)).max(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::ExposureScale;

    fn device(min: f32, neutral: f32, max: f32) -> DeviceSnapshot {
        DeviceSnapshot {
            name: "Test camera".into(),
            path: "/dev/video9".into(),
            min_zoom: min,
            neutral_zoom: neutral,
            max_zoom: max,
            ..DeviceSnapshot::default()
        }
    }

    #[test]
    fn test_zoom_clamps_above_envelope() {
        let mut session = SessionParams::new(device(1.0, 2.0, 16.0));
        assert_eq!(session.set_zoom(50.0), 16.0);
        assert_eq!(session.zoom(), 16.0);
    }

    #[test]
    fn test_zoom_clamps_below_envelope() {
        let mut session = SessionParams::new(device(1.0, 2.0, 16.0));
        assert_eq!(session.set_zoom(0.0), 1.0);
    }

    #[test]
    fn test_zoom_in_range_stored_exactly() {
        let mut session = SessionParams::new(device(1.0, 2.0, 16.0));
        assert_eq!(session.set_zoom(4.5), 4.5);
    }

    #[test]
    fn test_new_session_starts_at_neutral() {
        let session = SessionParams::new(device(1.0, 2.0, 16.0));
        assert_eq!(session.zoom(), 2.0);
        assert_eq!(session.exposure(), 0);
    }

    #[test]
    fn test_exposure_rejects_non_member_step() {
        let mut session = SessionParams::new(device(1.0, 1.0, 8.0));
        // Default scale is fine: -2..2 in steps of 1
        assert!(!session.set_exposure(5));
        assert_eq!(session.exposure(), 0);
        assert!(session.set_exposure(-2));
        assert_eq!(session.exposure(), -2);
    }

    #[test]
    fn test_exposure_coarse_scale_members() {
        let mut snapshot = device(1.0, 1.0, 8.0);
        snapshot.exposure_scale = ExposureScale::Coarse;
        let mut session = SessionParams::new(snapshot);
        assert!(session.set_exposure(-10));
        assert!(!session.set_exposure(-3));
        assert_eq!(session.exposure(), -10);
    }

    #[test]
    fn test_flash_and_torch_toggle_roundtrip() {
        let mut session = SessionParams::new(device(1.0, 1.0, 8.0));
        session.toggle_flash();
        session.toggle_torch();
        assert!(session.flash().is_on());
        assert!(session.torch().is_on());
        session.toggle_flash();
        assert!(!session.flash().is_on());
    }

    #[test]
    fn test_switch_device_resets_zoom_to_new_neutral() {
        let mut session = SessionParams::new(device(1.0, 1.0, 16.0));
        session.set_zoom(8.0);
        session.set_exposure(1);
        session.toggle_flash();

        let mut front = device(1.0, 3.0, 10.0);
        front.facing = Facing::Front;
        session.switch_device(front);

        assert_eq!(session.zoom(), 3.0);
        assert_eq!(session.exposure(), 0);
        assert_eq!(session.facing(), Facing::Front);
        // Flash selection survives the swap
        assert!(session.flash().is_on());
    }

    #[test]
    fn test_reset_helpers() {
        let mut session = SessionParams::new(device(1.0, 2.0, 16.0));
        session.set_zoom(9.0);
        session.set_exposure(2);
        session.reset_zoom();
        session.reset_exposure();
        assert_eq!(session.zoom(), 2.0);
        assert_eq!(session.exposure(), 0);
    }

    #[test]
    fn test_software_crop_only_without_hw_zoom() {
        let mut session = SessionParams::new(device(1.0, 1.0, 8.0));
        session.set_zoom(2.0);
        assert_eq!(session.software_crop_factor(), 2.0);

        let mut hw = device(1.0, 1.0, 10.0);
        hw.zoom_control = Some(crate::backends::camera::ControlRange::new(0, 100, 1, 0));
        let mut session = SessionParams::new(hw);
        session.set_zoom(4.0);
        assert_eq!(session.software_crop_factor(), 1.0);
    }
}
