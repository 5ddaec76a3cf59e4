//! App module - contains the main application state and logic

mod preview;
mod settings_modal;

use crate::i18n::TranslationBundle;
use crate::settings::Settings;
use crate::store::SqliteSettingsStore;
use crate::theme;
use crate::ui::SymbolMappingsEditor;
use eframe::egui;
use std::path::PathBuf;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) store: SqliteSettingsStore,
    pub(crate) bundle: TranslationBundle,
    pub(crate) editor: SymbolMappingsEditor,
    pub(crate) show_settings: bool,
    pub(crate) preview_text: String,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
    // Runs the store's writer task; dropped last
    pub(crate) _runtime: tokio::runtime::Runtime,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: SqliteSettingsStore,
        runtime: tokio::runtime::Runtime,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        store.set_repaint_context(&cc.egui_ctx);

        Self {
            store,
            bundle: TranslationBundle::new(settings.locale),
            editor: SymbolMappingsEditor::new(settings.description_mode, settings.grouped),
            show_settings: false,
            preview_text: settings.preview_text,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
            _runtime: runtime,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            locale: self.bundle.locale,
            description_mode: self.editor.description_mode,
            grouped: self.editor.grouped,
            preview_text: self.preview_text.clone(),
        };
        settings.save(&self.data_dir);
    }

    /// Translated text for a dotted key
    pub(crate) fn t(&self, key: &str, default: &str) -> String {
        self.bundle.text(key, default)
    }
}
