// SPDX-License-Identifier: GPL-3.0-only

//! Permission gate screen
//!
//! First screen on launch. Lists the capability probes and blocks the
//! capture screen until the camera probe succeeds.

use crate::app::state::{AppModel, Message};
use crate::fl;
use crate::permissions::PermissionStatus;
use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, icon};

fn status_label(status: PermissionStatus) -> String {
    match status {
        PermissionStatus::Granted => fl!("permission-granted"),
        PermissionStatus::Denied => fl!("permission-denied"),
        PermissionStatus::NotDetermined => fl!("permission-not-determined"),
    }
}

fn status_icon(granted: bool) -> widget::icon::Named {
    if granted {
        icon::from_name("emblem-ok-symbolic")
    } else {
        icon::from_name("dialog-warning-symbolic")
    }
}

fn capability_row<'a>(
    name: String,
    status: PermissionStatus,
) -> Element<'a, Message> {
    let spacing = cosmic::theme::spacing();
    widget::row()
        .push(status_icon(status == PermissionStatus::Granted).size(16).icon())
        .push(widget::text(name).width(Length::Fill))
        .push(widget::text(status_label(status)))
        .spacing(spacing.space_xs)
        .align_y(Alignment::Center)
        .width(Length::Fixed(360.0))
        .into()
}

impl AppModel {
    pub fn permissions_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let library_status = if self.permissions.library {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };

        let mut column = widget::column()
            .push(widget::text::title2(fl!("permissions-title")))
            .push(widget::text(fl!("permissions-description")))
            .push(capability_row(
                fl!("permission-camera"),
                self.permissions.camera,
            ))
            .push(capability_row(
                fl!("permission-microphone"),
                self.permissions.microphone,
            ))
            .push(capability_row(fl!("permission-library"), library_status))
            .spacing(spacing.space_s)
            .align_x(Alignment::Center);

        if !self.permissions.all_granted() {
            column = column.push(
                widget::text::caption(fl!("permissions-partial-warning")),
            );
        }

        let denied = self.permissions.camera == PermissionStatus::Denied
            || self.permissions.microphone == PermissionStatus::Denied
            || (!self.permissions.library
                && self.permissions.camera != PermissionStatus::NotDetermined);
        if denied {
            column = column.push(widget::text::caption(fl!("permissions-denied-hint")));
        }

        let refresh = widget::button::standard(fl!("permissions-refresh"))
            .on_press(Message::RefreshPermissions);

        let mut continue_button = widget::button::suggested(fl!("permissions-continue"));
        if self.permissions.is_ready() {
            continue_button = continue_button.on_press(Message::ContinueToCapture);
        }

        column = column.push(
            widget::row()
                .push(refresh)
                .push(continue_button)
                .spacing(spacing.space_m)
                .align_y(Alignment::Center),
        );

        if let Some(notice) = &self.notice {
            column = column.push(widget::text::caption(notice.clone()));
        }

        widget::container(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into()
    }
}
