//! Symbol mappings editor
//!
//! Holds only the draft phrase/symbol. The mapping list is read from the
//! settings store every frame, and every change is submitted to the store as
//! a whole-list replacement.

use super::components::{accent_button, chip, setting_container, text_input, DescriptionMode};
use crate::constants::SYMBOL_MAPPINGS_KEY;
use crate::i18n::TranslationBundle;
use crate::mappings::{prepare_add, validate_draft, with_added, without_phrase, SymbolMapping};
use crate::store::{SettingsStore, SettingsStoreExt};
use crate::theme;
use eframe::egui;
use tracing::{debug, warn};

const T: &str = "settings.advanced.symbolMappings";

pub struct SymbolMappingsEditor {
    pub pending_phrase: String,
    pub pending_symbol: String,
    pub description_mode: DescriptionMode,
    pub grouped: bool,
    /// Set by an Enter submit; the phrase input takes focus back once the
    /// write settles and the inputs are enabled again
    refocus_phrase: bool,
}

impl SymbolMappingsEditor {
    pub fn new(description_mode: DescriptionMode, grouped: bool) -> Self {
        Self {
            pending_phrase: String::new(),
            pending_symbol: String::new(),
            description_mode,
            grouped,
            refocus_phrase: false,
        }
    }

    /// Current list as the store has it; absent or malformed reads as empty
    pub fn mappings(store: &dyn SettingsStore) -> Vec<SymbolMapping> {
        store
            .get_as::<Vec<SymbolMapping>>(SYMBOL_MAPPINGS_KEY)
            .unwrap_or_default()
    }

    /// Whether the add control is enabled. Duplicates are left to [`add`].
    ///
    /// [`add`]: Self::add
    pub fn can_add(&self, updating: bool) -> bool {
        can_submit(&self.pending_phrase, &self.pending_symbol, updating)
    }

    /// Validate the draft and submit the extended list. Returns true if a write
    /// was issued; the draft is cleared only then.
    pub fn add(&mut self, store: &dyn SettingsStore) -> bool {
        if store.is_updating(SYMBOL_MAPPINGS_KEY) {
            debug!("Symbol mappings write in flight, ignoring add");
            return false;
        }

        let current = Self::mappings(store);
        let mapping = match prepare_add(&current, &self.pending_phrase, &self.pending_symbol) {
            Ok(mapping) => mapping,
            Err(reason) => {
                debug!(reason = %reason, "Symbol mapping rejected");
                return false;
            }
        };

        debug!(phrase = %mapping.phrase, symbol = %mapping.symbol, "Adding symbol mapping");
        if let Err(e) = store.update_as(SYMBOL_MAPPINGS_KEY, &with_added(&current, mapping)) {
            warn!(error = %e, "Failed to encode symbol mappings");
            return false;
        }

        self.pending_phrase.clear();
        self.pending_symbol.clear();
        true
    }

    /// Submit the list without `phrase` (exact match)
    pub fn remove(store: &dyn SettingsStore, phrase: &str) {
        debug!(phrase, "Removing symbol mapping");
        let list = without_phrase(&Self::mappings(store), phrase);
        if let Err(e) = store.update_as(SYMBOL_MAPPINGS_KEY, &list) {
            warn!(error = %e, "Failed to encode symbol mappings");
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, store: &dyn SettingsStore, bundle: &TranslationBundle) {
        let updating = store.is_updating(SYMBOL_MAPPINGS_KEY);
        let mappings = Self::mappings(store);
        let t = |key: &str, default: &str| bundle.text(&format!("{T}.{key}"), default);

        let (enter, clicked) = setting_container(
            ui,
            &t("title", "Symbol Mappings"),
            &t("description", "Replace phrases with symbols."),
            self.description_mode,
            self.grouped,
            |ui| {
                ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                let phrase = text_input(
                    ui,
                    &mut self.pending_phrase,
                    &t("phrasePlaceholder", "Phrase"),
                    theme::PHRASE_INPUT_WIDTH,
                    !updating,
                );
                if self.refocus_phrase && !updating {
                    phrase.request_focus();
                    self.refocus_phrase = false;
                }
                ui.add(
                    egui::Label::new(egui::RichText::new("→").color(theme::TEXT_MUTED))
                        .selectable(false),
                );
                let symbol = text_input(
                    ui,
                    &mut self.pending_symbol,
                    &t("symbolPlaceholder", "Symbol"),
                    theme::SYMBOL_INPUT_WIDTH,
                    !updating,
                );

                let enter = (phrase.lost_focus() || symbol.lost_focus())
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let enabled = can_submit(&self.pending_phrase, &self.pending_symbol, updating);
                let clicked = accent_button(ui, &t("add", "Add"), enabled);
                (enter, clicked)
            },
        );

        if (enter || clicked) && self.add(store) && enter {
            self.refocus_phrase = true;
        }

        if mappings.is_empty() {
            return;
        }

        ui.add_space(theme::SPACING_SM);
        let frame = if self.grouped {
            egui::Frame::new().inner_margin(egui::Margin::symmetric(16, 8))
        } else {
            theme::section_frame()
        };

        let mut removed = None;
        frame.show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(theme::SPACING_SM, theme::SPACING_SM);
                for mapping in &mappings {
                    let hover = bundle.text_with(
                        &format!("{T}.remove"),
                        "Remove {{phrase}}",
                        &[("phrase", &mapping.phrase)],
                    );
                    if chip(ui, chip_id(&mapping.phrase), &mapping.label(), &hover, !updating) {
                        removed = Some(mapping.phrase.clone());
                    }
                }
            });
        });

        if let Some(phrase) = removed {
            Self::remove(store, &phrase);
        }
    }
}

fn can_submit(phrase: &str, symbol: &str, updating: bool) -> bool {
    !updating && validate_draft(phrase, symbol).is_ok()
}

fn chip_id(phrase: &str) -> egui::Id {
    egui::Id::new(("symbol_mapping_chip", phrase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocaleCode;
    use crate::store::memory::MemorySettingsStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn arrow_store() -> MemorySettingsStore {
        MemorySettingsStore::new().with_value(
            SYMBOL_MAPPINGS_KEY,
            json!([{ "phrase": "arrow", "symbol": "→" }]),
        )
    }

    fn editor(phrase: &str, symbol: &str) -> SymbolMappingsEditor {
        let mut editor = SymbolMappingsEditor::new(DescriptionMode::Tooltip, false);
        editor.pending_phrase = phrase.into();
        editor.pending_symbol = symbol.into();
        editor
    }

    #[test]
    fn add_appends_normalized_entry_and_clears_draft() {
        let store = arrow_store();
        let mut editor = editor(" Check ", "✓");

        assert!(editor.add(&store));
        assert_eq!(
            SymbolMappingsEditor::mappings(&store),
            vec![
                SymbolMapping::new("arrow", "→"),
                SymbolMapping::new("check", "✓"),
            ]
        );
        assert_eq!(editor.pending_phrase, "");
        assert_eq!(editor.pending_symbol, "");
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn add_to_empty_store() {
        let store = MemorySettingsStore::new();
        assert!(SymbolMappingsEditor::mappings(&store).is_empty());

        assert!(editor("Arrow", " → ").add(&store));
        assert_eq!(
            SymbolMappingsEditor::mappings(&store),
            vec![SymbolMapping::new("arrow", "→")]
        );
    }

    #[test_log::test]
    fn duplicate_add_is_a_no_op() {
        let store = arrow_store();
        let mut editor = editor("Arrow", "⇒");

        assert!(!editor.add(&store));
        assert_eq!(
            SymbolMappingsEditor::mappings(&store),
            vec![SymbolMapping::new("arrow", "→")]
        );
        assert_eq!(editor.pending_phrase, "Arrow");
        assert_eq!(editor.pending_symbol, "⇒");
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn invalid_drafts_are_no_ops() {
        let store = arrow_store();
        for (phrase, symbol) in [
            ("a".repeat(51), "x".to_string()),
            ("word".into(), "x".repeat(11)),
            ("   ".into(), "x".into()),
            ("word".into(), "".into()),
        ] {
            let mut editor = editor(&phrase, &symbol);
            assert!(!editor.add(&store), "accepted {phrase:?} -> {symbol:?}");
            assert_eq!(editor.pending_phrase, phrase);
            assert_eq!(editor.pending_symbol, symbol);
        }
        assert_eq!(SymbolMappingsEditor::mappings(&store).len(), 1);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn add_control_enablement() {
        assert!(editor("check", "✓").can_add(false));
        assert!(!editor("check", "✓").can_add(true));
        assert!(!editor("  ", "✓").can_add(false));
        assert!(!editor("check", " ").can_add(false));
        assert!(!editor(&"a".repeat(51), "✓").can_add(false));
        assert!(!editor("check", &"✓".repeat(11)).can_add(false));
        // duplicates stay enabled; the handler rejects them
        assert!(editor("arrow", "⇒").can_add(false));
    }

    #[test]
    fn remove_present_phrase() {
        let store = arrow_store();
        SymbolMappingsEditor::remove(&store, "arrow");
        assert!(SymbolMappingsEditor::mappings(&store).is_empty());
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn remove_missing_phrase_leaves_list() {
        let store = arrow_store();
        SymbolMappingsEditor::remove(&store, "check");
        assert_eq!(
            SymbolMappingsEditor::mappings(&store),
            vec![SymbolMapping::new("arrow", "→")]
        );
    }

    #[test]
    fn list_updates_only_when_store_resolves() {
        let store = MemorySettingsStore::deferred();
        let mut first = editor("arrow", "→");

        assert!(first.add(&store));
        assert!(store.is_updating(SYMBOL_MAPPINGS_KEY));
        assert!(SymbolMappingsEditor::mappings(&store).is_empty());

        // a second add while the first is in flight is ignored
        let mut second = editor("check", "✓");
        assert!(!second.add(&store));
        assert_eq!(second.pending_phrase, "check");

        store.resolve();
        assert!(!store.is_updating(SYMBOL_MAPPINGS_KEY));
        assert_eq!(
            SymbolMappingsEditor::mappings(&store),
            vec![SymbolMapping::new("arrow", "→")]
        );
        assert!(second.add(&store));
    }

    #[test_log::test]
    fn malformed_stored_value_reads_as_empty() {
        let store = MemorySettingsStore::new().with_value(SYMBOL_MAPPINGS_KEY, json!("oops"));
        assert!(SymbolMappingsEditor::mappings(&store).is_empty());
    }

    #[test]
    fn renders_headless() {
        let store = arrow_store();
        let bundle = TranslationBundle::new(LocaleCode::En);
        let ctx = egui::Context::default();

        for (mode, grouped) in [
            (DescriptionMode::Tooltip, false),
            (DescriptionMode::Inline, true),
        ] {
            let mut editor = SymbolMappingsEditor::new(mode, grouped);
            editor.pending_phrase = "check".into();
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    editor.show(ui, &store, &bundle);
                });
            });
            assert_eq!(editor.pending_phrase, "check");
        }
        assert_eq!(store.writes(), 0);
    }

    /// Drives the editor one frame at a time inside a central panel
    struct Frames {
        ctx: egui::Context,
        bundle: TranslationBundle,
        editor: SymbolMappingsEditor,
    }

    impl Frames {
        fn new(editor: SymbolMappingsEditor) -> Self {
            Self {
                ctx: egui::Context::default(),
                bundle: TranslationBundle::new(LocaleCode::En),
                editor,
            }
        }

        /// Runs one frame; returns the area the editor allocated
        fn run(&mut self, store: &MemorySettingsStore, events: Vec<egui::Event>) -> egui::Rect {
            let input = egui::RawInput {
                screen_rect: Some(egui::Rect::from_min_size(
                    egui::Pos2::ZERO,
                    egui::vec2(800.0, 600.0),
                )),
                events,
                ..Default::default()
            };
            let mut used = egui::Rect::NOTHING;
            let _ = self.ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    used = ui
                        .scope(|ui| self.editor.show(ui, store, &self.bundle))
                        .response
                        .rect;
                });
            });
            used
        }

        fn press(&mut self, store: &MemorySettingsStore, key: egui::Key) {
            let event = |pressed| egui::Event::Key {
                key,
                physical_key: None,
                pressed,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            };
            self.run(store, vec![event(true), event(false)]);
        }

        fn click(&mut self, store: &MemorySettingsStore, pos: egui::Pos2) {
            let button = |pressed| egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                modifiers: egui::Modifiers::NONE,
            };
            self.run(store, vec![egui::Event::PointerMoved(pos)]);
            self.run(store, vec![button(true)]);
            self.run(store, vec![button(false)]);
        }

        fn chip_center(&self, phrase: &str) -> egui::Pos2 {
            self.ctx
                .read_response(chip_id(phrase))
                .map(|r| r.rect.center())
                .unwrap_or_else(|| panic!("no chip for {phrase:?}"))
        }
    }

    #[test]
    fn enter_in_phrase_input_adds() {
        let store = arrow_store();
        let mut frames = Frames::new(editor(" Check ", "✓"));

        frames.run(&store, vec![]);
        frames.press(&store, egui::Key::Tab);
        frames.press(&store, egui::Key::Enter);

        assert_eq!(store.writes(), 1);
        assert_eq!(
            SymbolMappingsEditor::mappings(&store),
            vec![
                SymbolMapping::new("arrow", "→"),
                SymbolMapping::new("check", "✓"),
            ]
        );
        assert_eq!(frames.editor.pending_phrase, "");
        assert_eq!(frames.editor.pending_symbol, "");
    }

    #[test]
    fn enter_in_symbol_input_adds() {
        let store = MemorySettingsStore::new();
        let mut frames = Frames::new(editor("Arrow", " → "));

        frames.run(&store, vec![]);
        frames.press(&store, egui::Key::Tab);
        frames.press(&store, egui::Key::Tab);
        frames.press(&store, egui::Key::Enter);

        assert_eq!(store.writes(), 1);
        assert_eq!(
            SymbolMappingsEditor::mappings(&store),
            vec![SymbolMapping::new("arrow", "→")]
        );
        assert_eq!(frames.editor.pending_phrase, "");
        assert_eq!(frames.editor.pending_symbol, "");
    }

    #[test]
    fn enter_on_invalid_draft_writes_nothing() {
        let store = arrow_store();
        let mut frames = Frames::new(editor("Arrow", "⇒"));

        frames.run(&store, vec![]);
        frames.press(&store, egui::Key::Tab);
        frames.press(&store, egui::Key::Enter);

        assert_eq!(store.writes(), 0);
        assert_eq!(frames.editor.pending_phrase, "Arrow");
    }

    #[test]
    fn phrase_input_is_focused_again_after_enter_add() {
        let store = MemorySettingsStore::new();
        let mut frames = Frames::new(editor("arrow", "→"));

        frames.run(&store, vec![]);
        frames.press(&store, egui::Key::Tab);
        frames.press(&store, egui::Key::Tab);
        frames.press(&store, egui::Key::Enter);
        assert_eq!(store.writes(), 1);

        frames.run(&store, vec![]);
        frames.run(&store, vec![egui::Event::Text("check".into())]);
        assert_eq!(frames.editor.pending_phrase, "check");
        assert_eq!(frames.editor.pending_symbol, "");
    }

    #[test]
    fn chip_section_only_when_list_is_non_empty() {
        let mut frames = Frames::new(editor("", ""));

        let with_chips = frames.run(&arrow_store(), vec![]);
        let without_chips = frames.run(&MemorySettingsStore::new(), vec![]);

        assert!(
            with_chips.height() - without_chips.height() >= theme::CHIP_HEIGHT,
            "{with_chips:?} vs {without_chips:?}"
        );
    }

    #[test]
    fn clicking_chip_removes_once() {
        let store = MemorySettingsStore::deferred().with_value(
            SYMBOL_MAPPINGS_KEY,
            json!([{ "phrase": "arrow", "symbol": "→" }]),
        );
        let mut frames = Frames::new(editor("", ""));

        let with_chips = frames.run(&store, vec![]);
        let chip = frames.chip_center("arrow");
        frames.click(&store, chip);

        assert_eq!(store.writes(), 1);
        assert!(store.is_updating(SYMBOL_MAPPINGS_KEY));

        store.resolve();
        assert!(SymbolMappingsEditor::mappings(&store).is_empty());
        let after = frames.run(&store, vec![]);
        assert!(after.height() < with_chips.height());
    }

    #[test]
    fn chips_ignore_clicks_while_write_in_flight() {
        let store = MemorySettingsStore::deferred().with_value(
            SYMBOL_MAPPINGS_KEY,
            json!([{ "phrase": "arrow", "symbol": "→" }]),
        );
        let mut frames = Frames::new(editor("check", "✓"));

        frames.run(&store, vec![]);
        assert!(frames.editor.add(&store));
        assert_eq!(store.writes(), 1);

        frames.run(&store, vec![]);
        let chip = frames.chip_center("arrow");
        frames.click(&store, chip);

        assert_eq!(store.writes(), 1);
        store.resolve();
        assert_eq!(
            SymbolMappingsEditor::mappings(&store),
            vec![
                SymbolMapping::new("arrow", "→"),
                SymbolMapping::new("check", "✓"),
            ]
        );
    }
}
