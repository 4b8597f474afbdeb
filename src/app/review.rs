// SPDX-License-Identifier: GPL-3.0-only

//! Review screen
//!
//! Shown after a capture completes. The photo stays in a temporary
//! location until the user saves it to the library or discards it.

use crate::app::state::{AppModel, Message};
use crate::backends::camera::CapturedMedia;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

impl AppModel {
    pub fn review_view<'a>(&'a self, media: &'a CapturedMedia) -> Element<'a, Message> {
        let spacing = cosmic::theme::spacing();

        let image = widget::image::Image::new(widget::image::Handle::from_path(&media.path))
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(cosmic::iced::ContentFit::Contain);

        let save = widget::button::suggested(fl!("save-to-gallery"))
            .on_press(Message::SaveCapture);

        let discard = widget::button::destructive(fl!("discard-capture"))
            .on_press(Message::DiscardCapture);

        let buttons = widget::row()
            .push(discard)
            .push(save)
            .spacing(spacing.space_m)
            .align_y(Alignment::Center);

        let mut column = widget::column()
            .push(
                widget::container(image)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .push(
                widget::container(buttons)
                    .width(Length::Fill)
                    .align_x(cosmic::iced::alignment::Horizontal::Center)
                    .padding(spacing.space_s),
            )
            .width(Length::Fill)
            .height(Length::Fill);

        if let Some(notice) = &self.notice {
            column = column.push(
                widget::container(widget::text(notice.clone()).size(14))
                    .width(Length::Fill)
                    .align_x(cosmic::iced::alignment::Horizontal::Center)
                    .padding([0, 0, spacing.space_s, 0]),
            );
        }

        widget::container(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }
}
