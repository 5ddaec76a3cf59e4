//! Live preview of the mappings applied to sample text

use super::App;
use crate::mappings::expand;
use crate::theme;
use crate::ui::SymbolMappingsEditor;
use eframe::egui;

impl App {
    pub(crate) fn render_preview(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::Label::new(
                egui::RichText::new(self.t("preview.title", "Preview"))
                    .size(theme::FONT_LABEL)
                    .color(theme::ACCENT),
            )
            .selectable(false),
        );
        ui.add_space(theme::SPACING_SM);

        let hint = self.t("preview.placeholder", "Type text to see your mappings applied");
        theme::section_frame().show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut self.preview_text)
                    .hint_text(hint)
                    .frame(false)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .font(egui::FontId::proportional(theme::FONT_BODY)),
            );
        });

        ui.add_space(theme::SPACING_LG);
        ui.add(
            egui::Label::new(
                egui::RichText::new(self.t("preview.output", "Result"))
                    .size(theme::FONT_LABEL)
                    .color(theme::ACCENT),
            )
            .selectable(false),
        );
        ui.add_space(theme::SPACING_SM);

        let output = if self.preview_text.trim().is_empty() {
            egui::RichText::new(self.t("preview.empty", "Nothing to expand yet"))
                .color(theme::TEXT_DIM)
        } else {
            let mappings = SymbolMappingsEditor::mappings(&self.store);
            egui::RichText::new(expand(&self.preview_text, &mappings)).color(theme::TEXT_PRIMARY)
        };
        theme::section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.add(egui::Label::new(output.size(theme::FONT_BODY)).wrap());
        });
    }
}
