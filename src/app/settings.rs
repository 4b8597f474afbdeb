// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer view

use crate::app::state::{AppModel, ContextPage, Message};
use crate::config::AppTheme;
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::widget;

impl AppModel {
    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let theme_button = |label: String, theme: AppTheme| {
            let class = if self.config.app_theme == theme {
                cosmic::theme::Button::Suggested
            } else {
                cosmic::theme::Button::Standard
            };
            widget::button::text(label)
                .on_press(Message::SetTheme(theme))
                .class(class)
        };

        let theme_row = widget::row()
            .push(theme_button(fl!("theme-system"), AppTheme::System))
            .push(theme_button(fl!("theme-dark"), AppTheme::Dark))
            .push(theme_button(fl!("theme-light"), AppTheme::Light))
            .spacing(spacing.space_xxs);

        let mirror_toggle =
            widget::toggler(self.config.mirror_preview).on_toggle(|_| Message::ToggleMirrorPreview);

        let save_folder = crate::storage::library_dir(&self.config.save_folder_name);

        let settings_column: Element<'_, Message> = widget::column()
            .push(
                widget::text(fl!("settings-appearance"))
                    .size(16)
                    .font(cosmic::font::bold()),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(theme_row)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::row()
                    .push(
                        widget::text(fl!("settings-mirror-preview"))
                            .size(16)
                            .font(cosmic::font::bold()),
                    )
                    .push(widget::horizontal_space().width(cosmic::iced::Length::Fill))
                    .push(mirror_toggle)
                    .align_y(cosmic::iced::Alignment::Center),
            )
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(fl!("settings-save-folder"))
                    .size(16)
                    .font(cosmic::font::bold()),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(save_folder.display().to_string()).size(12))
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(format!("Version {}", env!("CARGO_PKG_VERSION")))
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .spacing(0)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}
