// SPDX-License-Identifier: GPL-3.0-only

//! Capture screen view
//!
//! Composes the live preview with its control overlays: the status
//! readout, the top button row, the shutter row, and the expanded dial
//! when one is open.

use crate::app::state::{AppModel, Message, OverlayMode};
use crate::backends::camera::Facing;
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget::{self, icon};

/// Semi-transparent pill background for preview overlays
fn overlay_pill_style(theme: &cosmic::Theme) -> widget::container::Style {
    let cosmic = theme.cosmic();
    let bg = cosmic.bg_color();
    widget::container::Style {
        background: Some(Background::Color(Color::from_rgba(
            bg.red,
            bg.green,
            bg.blue,
            ui::OVERLAY_BACKGROUND_ALPHA,
        ))),
        border: cosmic::iced::Border {
            radius: cosmic.corner_radii.radius_m.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// White ring of the shutter button
fn shutter_outer_style(_theme: &cosmic::Theme) -> widget::container::Style {
    widget::container::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        border: cosmic::iced::Border {
            color: Color::WHITE,
            width: 3.0,
            radius: (ui::CAPTURE_BUTTON_OUTER / 2.0).into(),
        },
        ..Default::default()
    }
}

fn shutter_inner_style(active: bool) -> impl Fn(&cosmic::Theme) -> widget::container::Style {
    move |_theme| widget::container::Style {
        background: Some(Background::Color(if active {
            Color::from_rgba(1.0, 1.0, 1.0, 0.5)
        } else {
            Color::WHITE
        })),
        border: cosmic::iced::Border {
            radius: ui::CAPTURE_BUTTON_RADIUS.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

impl AppModel {
    /// Build the capture screen
    pub fn capture_view(&self) -> Element<'_, Message> {
        let preview = self.build_preview();

        let mut preview_stack = cosmic::iced::widget::stack![
            preview,
            widget::container(self.build_status_overlay())
                .width(Length::Fill)
                .align_x(cosmic::iced::alignment::Horizontal::Left)
                .align_y(cosmic::iced::alignment::Vertical::Top)
                .padding(8),
            widget::container(self.build_top_bar())
                .width(Length::Fill)
                .align_y(cosmic::iced::alignment::Vertical::Top),
        ];

        if !self.overlay.is_normal() {
            preview_stack = preview_stack.push(self.build_dial_overlay());
        }

        if let Some(notice) = &self.notice {
            preview_stack = preview_stack.push(
                widget::container(
                    widget::container(widget::text(notice.clone()).size(14))
                        .style(overlay_pill_style)
                        .padding([6, 12]),
                )
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(cosmic::iced::alignment::Horizontal::Center)
                .align_y(cosmic::iced::alignment::Vertical::Bottom)
                .padding([0, 0, 16, 0]),
            );
        }

        let main_column = widget::column()
            .push(
                preview_stack
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .push(self.build_shutter_row())
            .width(Length::Fill)
            .height(Length::Fill);

        widget::container(main_column)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }

    /// Build the live preview image, black until the first frame
    fn build_preview(&self) -> Element<'_, Message> {
        let Some(frame) = &self.current_frame else {
            return widget::container(widget::text(fl!("waiting-for-camera")).size(14))
                .width(Length::Fill)
                .height(Length::Fill)
                .center(Length::Fill)
                .into();
        };

        let mirror = self.config.mirror_preview
            && self
                .session
                .as_ref()
                .is_some_and(|s| s.facing() == Facing::Front);

        let pixels = if mirror {
            mirror_rgba(&frame.rgba, frame.width, frame.height)
        } else {
            frame.rgba.to_vec()
        };

        let handle = widget::image::Handle::from_rgba(frame.width, frame.height, pixels);
        widget::image::Image::new(handle)
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(cosmic::iced::ContentFit::Contain)
            .into()
    }

    /// Exposure/zoom readout and the FPS counter
    fn build_status_overlay(&self) -> Element<'_, Message> {
        let (exposure, zoom) = self
            .session
            .as_ref()
            .map(|s| (s.exposure(), s.zoom()))
            .unwrap_or((0, 1.0));

        let status = format!("EV {:+} | {:.1}x", exposure, zoom);
        let fps = format!("{} fps", self.measured_fps);

        let mut column = widget::column()
            .push(
                widget::container(widget::text(status).size(ui::STATUS_LABEL_TEXT_SIZE))
                    .style(overlay_pill_style)
                    .padding([4, 8]),
            )
            .push(
                widget::container(widget::text(fps).size(ui::STATUS_LABEL_TEXT_SIZE))
                    .style(overlay_pill_style)
                    .padding([4, 8]),
            );

        // Photo resolution the active device will deliver
        if let Some(format) = self.session.as_ref().and_then(|s| s.device().best_format()) {
            let size = format!("{}x{}", format.photo_width, format.photo_height);
            column = column.push(
                widget::container(widget::text(size).size(ui::STATUS_LABEL_TEXT_SIZE))
                    .style(overlay_pill_style)
                    .padding([4, 8]),
            );
        }

        column.spacing(4).width(Length::Shrink).into()
    }

    /// Build the top bar: torch, flash, facing, and gallery buttons
    fn build_top_bar(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let (flash_on, torch_on) = self
            .session
            .as_ref()
            .map(|s| (s.flash().is_on(), s.torch().is_on()))
            .unwrap_or((false, false));

        let mut row = widget::row()
            .padding(spacing.space_xs)
            .spacing(spacing.space_xxs)
            .align_y(Alignment::Center);

        row = row.push(widget::Space::new(Length::Fill, Length::Shrink));

        row = row.push(
            widget::button::icon(icon::from_name("display-brightness-symbolic"))
                .on_press(Message::ToggleTorch)
                .class(if torch_on {
                    cosmic::theme::Button::Suggested
                } else {
                    cosmic::theme::Button::Standard
                }),
        );

        row = row.push(
            widget::button::icon(icon::from_name("weather-storm-symbolic"))
                .on_press(Message::ToggleFlash)
                .class(if flash_on {
                    cosmic::theme::Button::Suggested
                } else {
                    cosmic::theme::Button::Standard
                }),
        );

        row = row.push(
            widget::button::icon(icon::from_name("object-flip-horizontal-symbolic"))
                .on_press(Message::ToggleFacing),
        );

        row = row.push(
            widget::button::icon(icon::from_name("folder-pictures-symbolic"))
                .on_press(Message::OpenGallery),
        );

        widget::container(row)
            .width(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::TRANSPARENT)),
                ..Default::default()
            })
            .into()
    }

    /// Build the bottom row: dial toggles around the shutter.
    ///
    /// While a dial is expanded the other dial's toggle loses its press
    /// handler, so the only way from one dial to the other is closing
    /// the open one first.
    fn build_shutter_row(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let mut zoom_toggle = widget::button::text(fl!("zoom-dial")).class(
            if self.overlay == OverlayMode::ZoomDial {
                cosmic::theme::Button::Suggested
            } else {
                cosmic::theme::Button::Standard
            },
        );
        if self.overlay != OverlayMode::ExposureDial {
            zoom_toggle = zoom_toggle.on_press(Message::ToggleZoomDial);
        }

        let zoom_reset = widget::button::icon(icon::from_name("edit-undo-symbolic"))
            .on_press(Message::ResetZoom)
            .class(cosmic::theme::Button::Text)
            .padding(4);

        let mut exposure_toggle = widget::button::text(fl!("exposure-dial")).class(
            if self.overlay == OverlayMode::ExposureDial {
                cosmic::theme::Button::Suggested
            } else {
                cosmic::theme::Button::Standard
            },
        );
        if self.overlay != OverlayMode::ZoomDial {
            exposure_toggle = exposure_toggle.on_press(Message::ToggleExposureDial);
        }

        let exposure_reset = widget::button::icon(icon::from_name("edit-undo-symbolic"))
            .on_press(Message::ResetExposure)
            .class(cosmic::theme::Button::Text)
            .padding(4);

        widget::row()
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .push(zoom_reset)
            .push(zoom_toggle)
            .push(self.build_shutter_button())
            .push(exposure_toggle)
            .push(exposure_reset)
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .spacing(spacing.space_s)
            .padding(spacing.space_s)
            .align_y(Alignment::Center)
            .width(Length::Fill)
            .into()
    }

    /// Round shutter button, dimmed while a capture is in flight or
    /// the photo library grant is missing
    fn build_shutter_button(&self) -> Element<'_, Message> {
        let dimmed = self.capture.is_in_flight() || !self.permissions.shutter_allowed();

        let inner = widget::container(widget::Space::new(Length::Shrink, Length::Shrink))
            .style(shutter_inner_style(dimmed))
            .width(Length::Fixed(ui::CAPTURE_BUTTON_INNER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_INNER));

        let outer = widget::container(inner)
            .style(shutter_outer_style)
            .center(Length::Fixed(ui::CAPTURE_BUTTON_OUTER));

        widget::mouse_area(outer).on_press(Message::Capture).into()
    }
}

/// Flip an RGBA buffer horizontally (selfie mirror)
fn mirror_rgba(rgba: &[u8], width: u32, height: u32) -> Vec<u8> {
    let row_bytes = width as usize * 4;
    let mut out = vec![0u8; rgba.len().min(row_bytes * height as usize)];
    for y in 0..height as usize {
        let row = &rgba[y * row_bytes..(y + 1) * row_bytes];
        let out_row = &mut out[y * row_bytes..(y + 1) * row_bytes];
        for x in 0..width as usize {
            let src = x * 4;
            let dst = (width as usize - 1 - x) * 4;
            out_row[dst..dst + 4].copy_from_slice(&row[src..src + 4]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_swaps_columns() {
        // 2x1 image: red pixel then blue pixel
        let rgba = [255, 0, 0, 255, 0, 0, 255, 255];
        let flipped = mirror_rgba(&rgba, 2, 1);
        assert_eq!(&flipped[..4], &[0, 0, 255, 255]);
        assert_eq!(&flipped[4..], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_mirror_is_involution() {
        let rgba: Vec<u8> = (0..4 * 3 * 2).map(|i| i as u8).collect();
        let twice = mirror_rgba(&mirror_rgba(&rgba, 3, 2), 3, 2);
        assert_eq!(twice, rgba);
    }
}
