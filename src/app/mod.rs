// SPDX-License-Identifier: GPL-3.0-only

//! Main application module
//!
//! This module contains the application state, message handling, UI
//! rendering, and business logic for the camera application.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, Screen, ...)
//! - `session`: Per-device capture parameters (zoom, exposure, flash)
//! - `dial`: Zoom and exposure dial overlays (geometry + view)
//! - `permissions_view`: Permission gate screen
//! - `review`: Post-capture review screen
//! - `settings`: Settings drawer UI
//! - `view`: Capture screen rendering
//! - `update`: Message dispatch
//! - `handlers`: Message handlers grouped by domain

pub mod dial;
mod handlers;
mod permissions_view;
mod review;
pub mod session;
mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera::{frame_loop, v4l2};
use crate::config::Config;
use crate::fl;
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, ContextPage, Message, OverlayMode, Screen};
use tracing::error;

const REPOSITORY: &str = "https://github.com/obscura-cam/obscura";
const APP_ICON: &[u8] =
    include_bytes!("../../resources/icons/hicolor/scalable/apps/io.github.obscura-cam.obscura.svg");

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.obscura-cam.obscura";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            screen: Screen::default(),
            permissions: Default::default(),
            registry: Default::default(),
            session: None,
            controller: None,
            current_frame: None,
            overlay: OverlayMode::default(),
            capture: Default::default(),
            notice: None,
            flash_devices: crate::flash::FlashDevice::discover(),
            frames_this_window: 0,
            fps_window_start: None,
            measured_fps: 0,
        };

        // Probe capabilities and enumerate cameras off the UI thread
        let probe_task = Task::done(cosmic::Action::App(Message::RefreshPermissions));
        let enumerate_task = Task::perform(
            async {
                tokio::task::spawn_blocking(v4l2::enumerate_devices)
                    .await
                    .unwrap_or_default()
            },
            |devices| cosmic::Action::App(Message::DevicesEnumerated(devices)),
        );

        (app, Task::batch([probe_task, enumerate_task]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        match &self.screen {
            Screen::Permissions => self.permissions_view(),
            Screen::Capture => self.capture_view(),
            Screen::Review(media) => self.review_view(media),
        }
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::SinkExt;

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // Preview stream keyed on the active device path; changing the
        // facing swaps the key, which drops the old loop and starts a
        // fresh one.
        let preview_sub = match (&self.screen, &self.session) {
            (Screen::Permissions, _) | (_, None) => Subscription::none(),
            (_, Some(session)) => {
                let path = session.device().path.clone();
                Subscription::run_with_id(
                    ("preview", path.clone()),
                    cosmic::iced::stream::channel(4, move |mut output| async move {
                        let mut frames = frame_loop::spawn(path);
                        while let Some(frame) = frames.recv().await {
                            if output.send(Message::PreviewFrame(frame)).await.is_err() {
                                break;
                            }
                        }
                    }),
                )
            }
        };

        Subscription::batch([config_sub, preview_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
