// SPDX-License-Identifier: GPL-3.0-only

//! UI Navigation handlers
//!
//! Handles context pages, dial overlays, notices, and settings.

use crate::app::state::{AppModel, ContextPage, Message};
use crate::config::AppTheme;
use crate::constants::ui::NOTICE_DISPLAY_MS;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::{error, info};

impl AppModel {
    // =========================================================================
    // UI Navigation Handlers
    // =========================================================================

    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        match open::that_detached(&url) {
            Ok(()) => {}
            Err(err) => {
                error!(url = %url, error = %err, "Failed to open URL");
            }
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_zoom_dial(&mut self) -> Task<cosmic::Action<Message>> {
        self.overlay = self.overlay.toggle_zoom_dial();
        info!(overlay = ?self.overlay, "Zoom dial toggled");
        Task::none()
    }

    pub(crate) fn handle_toggle_exposure_dial(&mut self) -> Task<cosmic::Action<Message>> {
        self.overlay = self.overlay.toggle_exposure_dial();
        info!(overlay = ?self.overlay, "Exposure dial toggled");
        Task::none()
    }

    pub(crate) fn handle_close_dial(&mut self) -> Task<cosmic::Action<Message>> {
        self.overlay = self.overlay.close();
        Task::none()
    }

    /// Show a transient notice and schedule its removal
    pub(crate) fn show_notice(&mut self, text: String) -> Task<cosmic::Action<Message>> {
        self.notice = Some(text);
        Self::delay_task(NOTICE_DISPLAY_MS, Message::NoticeExpired)
    }

    pub(crate) fn handle_notice_expired(&mut self) -> Task<cosmic::Action<Message>> {
        self.notice = None;
        Task::none()
    }

    // =========================================================================
    // Settings Handlers
    // =========================================================================

    pub(crate) fn handle_update_config(&mut self, config: crate::config::Config) -> Task<cosmic::Action<Message>> {
        self.config = config;
        Task::none()
    }

    pub(crate) fn handle_set_theme(&mut self, theme: AppTheme) -> Task<cosmic::Action<Message>> {
        self.config.app_theme = theme;
        if let Some(handler) = self.config_handler.as_ref() {
            if let Err(err) = self.config.write_entry(handler) {
                error!(?err, "Failed to save theme setting");
            }
        }
        cosmic::command::set_theme(self.config.app_theme.theme())
    }

    pub(crate) fn handle_toggle_mirror_preview(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.mirror_preview = !self.config.mirror_preview;
        if let Some(handler) = self.config_handler.as_ref() {
            if let Err(err) = self.config.write_entry(handler) {
                error!(?err, "Failed to save mirror setting");
            }
        }
        Task::none()
    }
}
