// SPDX-License-Identifier: GPL-3.0-only

//! Permission gate handlers
//!
//! Runs the capability probes and guards the transition from the gate
//! to the capture screen.

use crate::app::state::{AppModel, Message, Screen};
use crate::errors::{Capability, PermissionError};
use crate::fl;
use crate::permissions::{self, PermissionState};
use crate::storage;
use cosmic::Task;
use tracing::{info, warn};

impl AppModel {
    // =========================================================================
    // Permission Handlers
    // =========================================================================

    /// Probe all capabilities off the UI thread
    pub(crate) fn handle_refresh_permissions(&mut self) -> Task<cosmic::Action<Message>> {
        let library = storage::library_dir(&self.config.save_folder_name);
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || PermissionState {
                    camera: permissions::request_camera(),
                    microphone: permissions::request_microphone(),
                    library: permissions::request_library(&library),
                })
                .await
                .unwrap_or_default()
            },
            |state| cosmic::Action::App(Message::PermissionsProbed(state)),
        )
    }

    pub(crate) fn handle_permissions_probed(
        &mut self,
        state: PermissionState,
    ) -> Task<cosmic::Action<Message>> {
        info!(
            camera = ?state.camera,
            microphone = ?state.microphone,
            library = ?state.library,
            "Capability probes finished"
        );
        self.permissions = state;
        Task::none()
    }

    /// Leave the gate when the required grants exist.
    ///
    /// The camera grant is mandatory; the microphone probe merely has
    /// to be answered, denial included.
    pub(crate) fn handle_continue_to_capture(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.permissions.is_ready() {
            let error = PermissionError::Denied(Capability::Camera);
            warn!(%error, "Capture screen refused");
            return self.show_notice(fl!("permission-camera-required"));
        }

        self.screen = Screen::Capture;
        self.start_active_device()
    }
}
