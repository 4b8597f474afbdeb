// SPDX-License-Identifier: GPL-3.0-only

//! Camera control handlers
//!
//! Handles device enumeration, facing switches, frame arrival, and the
//! zoom/exposure/flash/torch parameters.

use crate::app::session::SessionParams;
use crate::app::state::{AppModel, Message};
use crate::backends::camera::{CameraController, CameraFrame, DeviceRegistry, DeviceSnapshot};
use crate::flash;
use cosmic::Task;
use tracing::{debug, error, info, warn};

impl AppModel {
    // =========================================================================
    // Camera Control Handlers
    // =========================================================================

    pub(crate) fn handle_devices_enumerated(
        &mut self,
        devices: Vec<DeviceSnapshot>,
    ) -> Task<cosmic::Action<Message>> {
        info!(count = devices.len(), "Camera enumeration finished");
        self.registry = DeviceRegistry::new(devices);

        if matches!(self.screen, crate::app::state::Screen::Capture) {
            return self.start_active_device();
        }
        Task::none()
    }

    /// Open the device matching the session facing (or the default
    /// facing when no session exists yet) and start its preview.
    pub(crate) fn start_active_device(&mut self) -> Task<cosmic::Action<Message>> {
        let facing = self
            .session
            .as_ref()
            .map(|s| s.facing())
            .unwrap_or_default();

        let Some(snapshot) = self.registry.device_for(facing).cloned() else {
            warn!("No capture device available");
            self.session = None;
            self.controller = None;
            return Task::none();
        };

        info!(name = %snapshot.name, path = %snapshot.path, "Activating camera");
        self.current_frame = None;
        self.frames_this_window = 0;
        self.fps_window_start = None;
        self.measured_fps = 0;

        match CameraController::open(snapshot.clone()) {
            Ok(controller) => self.controller = Some(controller),
            Err(e) => {
                error!(error = %e, "Cannot open camera controls");
                self.controller = None;
            }
        }

        match self.session.as_mut() {
            Some(session) => session.switch_device(snapshot),
            None => self.session = Some(SessionParams::new(snapshot)),
        }

        // The preview subscription keys on the session's device path and
        // restarts on its own.
        Task::none()
    }

    pub(crate) fn handle_preview_frame(
        &mut self,
        frame: CameraFrame,
    ) -> Task<cosmic::Action<Message>> {
        self.record_frame_for_fps();
        self.current_frame = Some(frame);
        Task::none()
    }

    // =========================================================================
    // Parameter Handlers
    // =========================================================================

    pub(crate) fn handle_set_zoom(&mut self, factor: f32) -> Task<cosmic::Action<Message>> {
        let Some(session) = self.session.as_mut() else {
            return Task::none();
        };

        let applied = session.set_zoom(factor);
        debug!(requested = factor, applied, "Zoom selected");

        if let Some(controller) = &self.controller {
            if let Err(e) = controller.apply_zoom(applied) {
                warn!(error = %e, "Hardware zoom failed");
            }
        }

        self.overlay = self.overlay.close();
        Task::none()
    }

    pub(crate) fn handle_reset_zoom(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(session) = self.session.as_mut() else {
            return Task::none();
        };
        session.reset_zoom();
        let zoom = session.zoom();
        debug!(zoom, "Zoom reset");

        if let Some(controller) = &self.controller {
            if let Err(e) = controller.apply_zoom(zoom) {
                warn!(error = %e, "Hardware zoom reset failed");
            }
        }
        Task::none()
    }

    pub(crate) fn handle_set_exposure(&mut self, step: i32) -> Task<cosmic::Action<Message>> {
        let Some(session) = self.session.as_mut() else {
            return Task::none();
        };

        if !session.set_exposure(step) {
            return Task::none();
        }
        debug!(step, "Exposure selected");

        if let Some(controller) = &self.controller {
            if let Err(e) = controller.apply_exposure(step) {
                warn!(error = %e, "Hardware exposure failed");
            }
        }

        self.overlay = self.overlay.close();
        Task::none()
    }

    pub(crate) fn handle_reset_exposure(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(session) = self.session.as_mut() else {
            return Task::none();
        };
        session.reset_exposure();
        debug!("Exposure reset");

        if let Some(controller) = &self.controller {
            if let Err(e) = controller.apply_exposure(0) {
                warn!(error = %e, "Hardware exposure reset failed");
            }
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_flash(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(session) = self.session.as_mut() else {
            return Task::none();
        };
        session.toggle_flash();
        info!(flash = ?session.flash(), "Flash toggled");
        Task::none()
    }

    pub(crate) fn handle_toggle_torch(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(session) = self.session.as_mut() else {
            return Task::none();
        };
        session.toggle_torch();
        let torch = session.torch();
        info!(?torch, "Torch toggled");

        if torch.is_on() {
            for device in &self.flash_devices {
                if let Err(e) = device.torch(0.5) {
                    warn!(device = device.name(), error = %e, "Torch on failed");
                }
            }
        } else {
            flash::all_off(&self.flash_devices);
        }
        Task::none()
    }

    /// Switch between the front and back cameras.
    ///
    /// The new device's envelope replaces the old one: zoom returns to
    /// the new neutral factor and exposure to zero.
    pub(crate) fn handle_toggle_facing(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(session) = self.session.as_ref() else {
            return Task::none();
        };

        let target = session.facing().toggled();
        let Some(snapshot) = self.registry.device_for(target).cloned() else {
            warn!(?target, "No device for the requested facing");
            return Task::none();
        };

        if snapshot.path == session.device().path {
            info!(?target, "Only one camera present, facing unchanged");
            return Task::none();
        }

        info!(name = %snapshot.name, ?target, "Switching camera facing");
        self.overlay = self.overlay.close();
        self.current_frame = None;

        match CameraController::open(snapshot.clone()) {
            Ok(controller) => self.controller = Some(controller),
            Err(e) => {
                error!(error = %e, "Cannot open camera controls");
                self.controller = None;
            }
        }

        if let Some(session) = self.session.as_mut() {
            session.switch_device(snapshot);
        }
        Task::none()
    }
}
