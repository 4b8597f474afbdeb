// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! This module handles all application messages by routing them to focused
//! handler methods. The main `update()` function acts as a dispatcher, while
//! specific handlers are implemented in the `handlers` submodules organized
//! by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::ui`: Context pages, dial overlays, notices, settings
//! - `handlers::permissions`: Capability probes and the permission gate
//! - `handlers::camera`: Device enumeration, frames, session parameters
//! - `handlers::capture`: Shutter, review, save/discard, gallery

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    ///
    /// This dispatcher pattern keeps the main update function clean and makes
    /// it easy to find the handling code for any message type.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::ToggleZoomDial => self.handle_toggle_zoom_dial(),
            Message::ToggleExposureDial => self.handle_toggle_exposure_dial(),
            Message::CloseDial => self.handle_close_dial(),
            Message::NoticeExpired => self.handle_notice_expired(),

            // ===== Permissions =====
            Message::RefreshPermissions => self.handle_refresh_permissions(),
            Message::PermissionsProbed(state) => self.handle_permissions_probed(state),
            Message::ContinueToCapture => self.handle_continue_to_capture(),

            // ===== Camera Control =====
            Message::DevicesEnumerated(devices) => self.handle_devices_enumerated(devices),
            Message::PreviewFrame(frame) => self.handle_preview_frame(frame),
            Message::SetZoom(factor) => self.handle_set_zoom(factor),
            Message::ResetZoom => self.handle_reset_zoom(),
            Message::SetExposure(step) => self.handle_set_exposure(step),
            Message::ResetExposure => self.handle_reset_exposure(),
            Message::ToggleFlash => self.handle_toggle_flash(),
            Message::ToggleTorch => self.handle_toggle_torch(),
            Message::ToggleFacing => self.handle_toggle_facing(),

            // ===== Capture Operations =====
            Message::Capture => self.handle_capture(),
            Message::FlashComplete => self.handle_flash_complete(),
            Message::CaptureFinished(result) => self.handle_capture_finished(result),
            Message::SaveCapture => self.handle_save_capture(),
            Message::SaveFinished(result) => self.handle_save_finished(result),
            Message::DiscardCapture => self.handle_discard_capture(),
            Message::OpenGallery => self.handle_open_gallery(),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetTheme(theme) => self.handle_set_theme(theme),
            Message::ToggleMirrorPreview => self.handle_toggle_mirror_preview(),
        }
    }
}
