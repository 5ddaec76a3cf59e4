//! Reusable UI components
//!
//! Small custom-painted widgets shared by the settings panels.

use crate::theme;
use eframe::egui;
use serde::{Deserialize, Serialize};

/// Where a setting's description is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionMode {
    /// Beneath the title
    Inline,
    /// On hover over the title
    #[default]
    Tooltip,
}

/// Labeled setting row: a fixed-width title column (with its description),
/// then the controls. Ungrouped rows get their own bordered frame.
pub fn setting_container<R>(
    ui: &mut egui::Ui,
    title: &str,
    description: &str,
    mode: DescriptionMode,
    grouped: bool,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let frame = if grouped {
        egui::Frame::new().inner_margin(egui::Margin::symmetric(16, 8))
    } else {
        theme::section_frame()
    };

    frame
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.set_width(theme::SETTING_TITLE_WIDTH);
                    let title_resp = ui.add(
                        egui::Label::new(
                            egui::RichText::new(title)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_PRIMARY),
                        )
                        .selectable(false)
                        .sense(egui::Sense::hover()),
                    );
                    match mode {
                        DescriptionMode::Inline => {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(description)
                                        .size(theme::FONT_SECTION)
                                        .color(theme::TEXT_MUTED),
                                )
                                .wrap(),
                            );
                        }
                        DescriptionMode::Tooltip => {
                            title_resp.on_hover_text(description);
                        }
                    }
                });
                ui.add_space(theme::SPACING_MD);
                add_contents(ui)
            })
            .inner
        })
        .inner
}

/// Single-line text input styled like the search box
pub fn text_input(
    ui: &mut egui::Ui,
    text: &mut String,
    hint: &str,
    width: f32,
    enabled: bool,
) -> egui::Response {
    egui::Frame::new()
        .fill(theme::BG_INPUT)
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
        .corner_radius(theme::RADIUS_DEFAULT)
        .inner_margin(egui::Margin::symmetric(6, 4))
        .show(ui, |ui| {
            ui.add_enabled(
                enabled,
                egui::TextEdit::singleline(text)
                    .hint_text(hint)
                    .frame(false)
                    .desired_width(width)
                    .font(egui::FontId::proportional(theme::FONT_LABEL)),
            )
        })
        .inner
}

/// Accent button painted by hand. Returns true if clicked while enabled.
pub fn accent_button(ui: &mut egui::Ui, label: &str, enabled: bool) -> bool {
    let font = egui::FontId::proportional(theme::FONT_SECTION);
    let text_w = text_width(ui, label, &font);
    let sense = if enabled {
        egui::Sense::click()
    } else {
        egui::Sense::hover()
    };
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(text_w + 24.0, theme::BUTTON_HEIGHT), sense);

    let (fill, draw_rect, text_color) = if enabled {
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        let (fill, draw_rect) = theme::button_visual(&response, theme::BTN_ACCENT, rect);
        (fill, draw_rect, theme::TEXT_ON_ACCENT)
    } else {
        (theme::BTN_DISABLED, rect, theme::BTN_DISABLED_TEXT)
    };

    ui.painter().rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
    ui.painter().text(
        draw_rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        font,
        text_color,
    );
    enabled && response.clicked()
}

/// Removable chip: label plus an X icon. Returns true if clicked while enabled.
///
/// `id` must stay the same across frames for the chip to register clicks.
pub fn chip(ui: &mut egui::Ui, id: egui::Id, label: &str, hover: &str, enabled: bool) -> bool {
    let font = egui::FontId::proportional(theme::FONT_SECTION);
    let icon_font = egui::FontId::proportional(theme::FONT_CAPTION);
    let pad = 8.0;
    let icon_w = 12.0;
    let text_w = text_width(ui, label, &font);

    let sense = if enabled {
        egui::Sense::click()
    } else {
        egui::Sense::hover()
    };
    let (_, rect) = ui.allocate_space(egui::vec2(
        pad + text_w + theme::SPACING_SM + icon_w + pad,
        theme::CHIP_HEIGHT,
    ));
    let response = ui.interact(rect, id, sense);

    let (fill, draw_rect) = if enabled {
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        theme::button_visual(&response, theme::BTN_DEFAULT, rect)
    } else {
        (theme::BTN_DISABLED, rect)
    };
    let text_color = if enabled {
        theme::TEXT_SECONDARY
    } else {
        theme::BTN_DISABLED_TEXT
    };
    let icon_color = if enabled && response.hovered() {
        theme::STATUS_ERROR
    } else {
        text_color
    };

    let painter = ui.painter();
    painter.rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
    painter.text(
        egui::pos2(draw_rect.min.x + pad, draw_rect.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        font,
        text_color,
    );
    painter.text(
        egui::pos2(draw_rect.max.x - pad - icon_w / 2.0, draw_rect.center().y),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::X,
        icon_font,
        icon_color,
    );

    let clicked = enabled && response.clicked();
    response.on_hover_text(hover);
    clicked
}

fn text_width(ui: &egui::Ui, text: &str, font: &egui::FontId) -> f32 {
    ui.fonts(|f| {
        f.layout_no_wrap(text.to_owned(), font.clone(), theme::TEXT_PRIMARY)
            .rect
            .width()
    })
}
