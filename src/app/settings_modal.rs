//! Settings modal: general preferences and the symbol mappings editor

use super::App;
use crate::i18n::{LocaleCode, TranslationBundle};
use crate::theme;
use crate::ui::components::DescriptionMode;
use eframe::egui;
use tracing::info;

impl App {
    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let modal_response = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(theme::SETTINGS_MODAL_WIDTH);

                // Title bar with close button
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(self.t("settings.title", "Settings"))
                                .size(theme::FONT_HEADING)
                                .strong(),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let close_size = 24.0;
                        let (rect, response) = ui.allocate_exact_size(
                            egui::vec2(close_size, close_size),
                            egui::Sense::click(),
                        );
                        let close_color = if response.hovered() {
                            ui.painter().rect_filled(rect, 4.0, theme::BG_SURFACE);
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                            theme::STATUS_ERROR
                        } else {
                            theme::TEXT_DIM
                        };
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            egui_phosphor::regular::X,
                            egui::FontId::proportional(16.0),
                            close_color,
                        );
                        if response.on_hover_text(self.t("app.close", "Close")).clicked() {
                            self.show_settings = false;
                        }
                    });
                });
                ui.add_space(4.0);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // — General —
                section_label(ui, &self.t("settings.general", "General"));

                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(self.t("settings.language", "Language"))
                                .size(theme::FONT_BODY),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let [left, right] = LocaleCode::ALL;
                        let mut left_active = self.bundle.locale == left;
                        if theme::segmented_toggle(ui, left.label(), right.label(), &mut left_active)
                        {
                            let locale = if left_active { left } else { right };
                            info!(locale = locale.code(), "Locale changed");
                            self.bundle = TranslationBundle::new(locale);
                        }
                    });
                });
                ui.add_space(theme::SPACING_SM);

                let inline = self.editor.description_mode == DescriptionMode::Inline;
                if theme::settings_checkbox(
                    ui,
                    inline,
                    &self.t("settings.descriptionMode", "Show descriptions inline"),
                ) {
                    self.editor.description_mode = if inline {
                        DescriptionMode::Tooltip
                    } else {
                        DescriptionMode::Inline
                    };
                }
                if theme::settings_checkbox(
                    ui,
                    self.editor.grouped,
                    &self.t("settings.grouped", "Group settings"),
                ) {
                    self.editor.grouped = !self.editor.grouped;
                }

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // — Advanced —
                section_label(ui, &self.t("settings.advanced.title", "Advanced"));

                let editor = &mut self.editor;
                let store = &self.store;
                let bundle = &self.bundle;
                if editor.grouped {
                    theme::section_frame()
                        .inner_margin(egui::Margin::same(0))
                        .show(ui, |ui| editor.show(ui, store, bundle));
                } else {
                    editor.show(ui, store, bundle);
                }
            });

        if modal_response.should_close() {
            self.show_settings = false;
        }
    }
}

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_LABEL)
                .color(theme::ACCENT),
        )
        .selectable(false),
    );
    ui.add_space(2.0);
}
