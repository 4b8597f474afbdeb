// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles the shutter, the review screen, and the save/discard flow.

use crate::app::state::{AppModel, CaptureSequence, Message, Screen, apply_save_outcome, begin_capture};
use crate::backends::camera::{self, CapturedMedia, MediaKind};
use crate::errors::{Capability, CaptureError, PermissionError, StorageError};
use crate::fl;
use crate::flash;
use crate::{notify, storage};
use cosmic::Task;
use tracing::{error, info, warn};

/// Milliseconds the LED flash burns before the frame is taken
const FLASH_LEAD_MS: u64 = 300;

impl AppModel {
    // =========================================================================
    // Capture Operations Handlers
    // =========================================================================

    /// Create a delayed task that sends a message after the specified
    /// milliseconds
    pub(crate) fn delay_task(millis: u64, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(millis)).await;
                message
            },
            cosmic::Action::App,
        )
    }

    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.permissions.shutter_allowed() {
            let error = PermissionError::Denied(Capability::Library);
            warn!(%error, "Shutter refused");
            return self.show_notice(fl!("permission-library-required"));
        }

        let flash_wanted = self
            .session
            .as_ref()
            .is_some_and(|s| s.flash().is_on() && !self.flash_devices.is_empty());

        match begin_capture(&mut self.capture, self.current_frame.is_some(), flash_wanted) {
            Ok(CaptureSequence::FlashLead) => {
                info!("Flash enabled, firing before capture");
                flash::all_on(&self.flash_devices);
                Self::delay_task(FLASH_LEAD_MS, Message::FlashComplete)
            }
            Ok(CaptureSequence::Immediate) => self.capture_photo(),
            Err(CaptureError::Busy) => {
                warn!("Shutter pressed while a capture is in flight");
                Task::none()
            }
            Err(err) => {
                // Not ready yet, retry is pressing the shutter again
                warn!(error = %err, "Capture refused");
                Task::none()
            }
        }
    }

    pub(crate) fn handle_flash_complete(&mut self) -> Task<cosmic::Action<Message>> {
        let task = self.capture_photo();

        // Back to torch level, or dark, once the frame is grabbed
        let torch_on = self.session.as_ref().is_some_and(|s| s.torch().is_on());
        if torch_on {
            for device in &self.flash_devices {
                if let Err(e) = device.torch(0.5) {
                    warn!(device = device.name(), error = %e, "Torch restore failed");
                }
            }
        } else {
            flash::all_off(&self.flash_devices);
        }

        task
    }

    /// Encode the latest preview frame as a photo.
    ///
    /// The capture guard is already armed by [`begin_capture`]; the
    /// refusal path here disarms it again.
    fn capture_photo(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(frame) = self.current_frame.clone() else {
            warn!("Frame disappeared before encoding");
            self.capture.finish();
            return Task::none();
        };

        let crop_factor = self
            .session
            .as_ref()
            .map(|s| s.software_crop_factor())
            .unwrap_or(1.0);
        let output = storage::temp_capture_path();

        info!(output = %output.display(), crop_factor, "Capturing photo");

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    camera::encode_photo(&frame, crop_factor, output)
                        .map_err(CaptureError::EncodingFailed)
                })
                .await
                .unwrap_or_else(|e| Err(CaptureError::DeviceFailure(e.to_string())))
                .map(|path| CapturedMedia {
                    path,
                    kind: MediaKind::Photo,
                })
            },
            |result| cosmic::Action::App(Message::CaptureFinished(result)),
        )
    }

    pub(crate) fn handle_capture_finished(
        &mut self,
        result: Result<CapturedMedia, CaptureError>,
    ) -> Task<cosmic::Action<Message>> {
        self.capture.finish();

        match result {
            Ok(media) => {
                info!(path = %media.path.display(), "Capture ready for review");
                self.overlay = self.overlay.close();
                self.screen = Screen::Review(media);
                Task::none()
            }
            Err(err) => {
                // Swallowed on purpose, the session stays usable
                error!(error = %err, "Capture failed");
                Task::none()
            }
        }
    }

    // =========================================================================
    // Review Handlers
    // =========================================================================

    /// Persist the reviewed capture into the photo library.
    ///
    /// The write is awaited before the review screen closes, so a
    /// failure keeps the capture around instead of losing it.
    pub(crate) fn handle_save_capture(&mut self) -> Task<cosmic::Action<Message>> {
        let Screen::Review(media) = &self.screen else {
            return Task::none();
        };

        let media_path = media.path.clone();
        let library = storage::library_dir(&self.config.save_folder_name);
        info!(library = %library.display(), "Saving capture to library");

        Task::perform(
            async move {
                let saved = storage::save_to_library(media_path, library).await?;
                let path = saved.display().to_string();
                notify::send(&fl!("saved-notification-title"), &path).await;
                Ok(path)
            },
            |result| cosmic::Action::App(Message::SaveFinished(result)),
        )
    }

    pub(crate) fn handle_save_finished(
        &mut self,
        result: Result<String, StorageError>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(path) => {
                info!(path = %path, "Capture saved");
                apply_save_outcome(&mut self.screen, &mut self.overlay, true);
                self.show_notice(fl!("saved-to-gallery"))
            }
            Err(error) => {
                // Stay on the review screen so the capture is not lost
                error!(%error, "Failed to save capture");
                apply_save_outcome(&mut self.screen, &mut self.overlay, false);
                self.show_notice(fl!("save-failed"))
            }
        }
    }

    pub(crate) fn handle_discard_capture(&mut self) -> Task<cosmic::Action<Message>> {
        if let Screen::Review(media) = &self.screen {
            info!(path = %media.path.display(), "Discarding capture");
            storage::discard(&media.path);
        }
        self.screen = Screen::Capture;
        self.overlay = self.overlay.close();
        Task::none()
    }

    pub(crate) fn handle_open_gallery(&mut self) -> Task<cosmic::Action<Message>> {
        let library = storage::library_dir(&self.config.save_folder_name);
        if let Err(err) = open::that_detached(&library) {
            error!(path = %library.display(), error = %err, "Failed to open gallery");
        }
        Task::none()
    }
}
