// SPDX-License-Identifier: GPL-3.0-only

//! Dial overlay UI view
//!
//! Renders the arc of option buttons computed by [`geometry`] as a
//! full-viewport overlay. Clicking outside the options collapses the
//! dial.

use crate::app::dial::geometry::{self, DialPoint};
use crate::app::state::{AppModel, Message, OverlayMode};
use crate::constants::dial::OPTION_SIZE;
use crate::constants::ui::OVERLAY_BACKGROUND_ALPHA;
use cosmic::Element;
use cosmic::iced::widget::{responsive, stack};
use cosmic::iced::{Background, Color, Length, Size};
use cosmic::widget;

/// Container style for a round dial option
fn option_style(selected: bool) -> impl Fn(&cosmic::Theme) -> widget::container::Style {
    move |theme| {
        let cosmic = theme.cosmic();
        let bg = if selected {
            let accent = cosmic.accent_color();
            Color::from_rgba(accent.red, accent.green, accent.blue, 0.9)
        } else {
            let base = cosmic.bg_color();
            Color::from_rgba(base.red, base.green, base.blue, OVERLAY_BACKGROUND_ALPHA)
        };
        widget::container::Style {
            background: Some(Background::Color(bg)),
            border: cosmic::iced::Border {
                radius: (OPTION_SIZE / 2.0).into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// One labelled dial option centered on its arc point
fn option_button<'a>(
    label: String,
    point: DialPoint,
    selected: bool,
    message: Message,
) -> Element<'a, Message> {
    let button = widget::mouse_area(
        widget::container(widget::text(label).size(14))
            .style(option_style(selected))
            .center(Length::Fixed(OPTION_SIZE)),
    )
    .on_press(message);

    positioned(button.into(), point, OPTION_SIZE)
}

/// Place an element so its center lands on `point`
fn positioned(element: Element<'_, Message>, point: DialPoint, size: f32) -> Element<'_, Message> {
    let top = (point.y - size / 2.0).max(0.0);
    let left = (point.x - size / 2.0).max(0.0);
    widget::container(element)
        .padding(cosmic::iced::Padding {
            top,
            right: 0.0,
            bottom: 0.0,
            left,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

impl AppModel {
    /// Build the expanded dial overlay for the current mode.
    ///
    /// The layout is viewport-dependent, so the arc is computed inside
    /// a responsive wrapper with the measured size.
    pub fn build_dial_overlay(&self) -> Element<'_, Message> {
        responsive(move |size: Size| self.build_dial_layers(size)).into()
    }

    fn build_dial_layers(&self, size: Size) -> Element<'_, Message> {
        let mut layers = stack![];

        match self.overlay {
            OverlayMode::ZoomDial => {
                let options = self.zoom_options();
                let current = self.session.as_ref().map(|s| s.zoom());
                let count = options.len();
                for (index, zoom) in options.into_iter().enumerate() {
                    let selected = current.is_some_and(|z| (z - zoom).abs() < 0.05);
                    layers = layers.push(option_button(
                        format_zoom(zoom),
                        geometry::option_position(index, count, size.width, size.height),
                        selected,
                        Message::SetZoom(zoom),
                    ));
                }
            }
            OverlayMode::ExposureDial => {
                let scale = self
                    .session
                    .as_ref()
                    .map(|s| s.device().exposure_scale)
                    .unwrap_or_default();
                let current = self.session.as_ref().map(|s| s.exposure());
                let options = scale.options();
                for (index, step) in options.iter().enumerate() {
                    let selected = current == Some(*step);
                    layers = layers.push(option_button(
                        format_exposure(*step),
                        geometry::option_position(index, options.len(), size.width, size.height),
                        selected,
                        Message::SetExposure(*step),
                    ));
                }
            }
            OverlayMode::Normal => {}
        }

        // Close affordance next to the arc center
        let close = widget::mouse_area(
            widget::container(widget::icon::from_name("window-close-symbolic").size(16).icon())
                .style(option_style(false))
                .center(Length::Fixed(OPTION_SIZE * 0.8)),
        )
        .on_press(Message::CloseDial);
        layers = layers.push(positioned(
            close.into(),
            geometry::close_position(size.width, size.height),
            OPTION_SIZE * 0.8,
        ));

        // Backdrop click collapses the dial
        widget::mouse_area(
            widget::container(layers)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .on_press(Message::CloseDial)
        .into()
    }
}

fn format_zoom(zoom: f32) -> String {
    if (zoom - zoom.round()).abs() < f32::EPSILON {
        format!("{}x", zoom as i32)
    } else {
        format!("{:.1}x", zoom)
    }
}

fn format_exposure(step: i32) -> String {
    if step > 0 {
        format!("+{}", step)
    } else {
        format!("{}", step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_labels() {
        assert_eq!(format_zoom(1.0), "1x");
        assert_eq!(format_zoom(1.5), "1.5x");
        assert_eq!(format_zoom(8.0), "8x");
    }

    #[test]
    fn test_exposure_labels_signed() {
        assert_eq!(format_exposure(5), "+5");
        assert_eq!(format_exposure(0), "0");
        assert_eq!(format_exposure(-10), "-10");
    }
}
