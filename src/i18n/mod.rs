//! JSON-backed translations with per-locale bundles and English fallback.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// Supported UI locales
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    #[default]
    En,
    De,
}

impl LocaleCode {
    pub const ALL: [Self; 2] = [Self::En, Self::De];

    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// Name shown in the language picker
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "Deutsch",
        }
    }
}

/// Parsed translation tree for one locale
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    pub locale: LocaleCode,
    tree: Value,
}

impl TranslationBundle {
    pub fn new(locale: LocaleCode) -> Self {
        let tree = serde_json::from_str(raw_locale(locale)).unwrap_or(Value::Null);
        Self { locale, tree }
    }

    /// Resolve a dotted path (`section.key`), falling back to English and then
    /// to `default`.
    pub fn text(&self, path: &str, default: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&EN_FALLBACK.tree, path))
            .unwrap_or_else(|| default.to_string())
    }

    /// Like [`text`](Self::text), substituting `{{name}}` placeholders.
    pub fn text_with(&self, path: &str, default: &str, params: &[(&str, &str)]) -> String {
        let mut text = self.text(path, default);
        for (name, value) in params {
            text = text.replace(&format!("{{{{{name}}}}}"), value);
        }
        text
    }
}

static EN_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::De => include_str!("../../i18n/de.json"),
    }
}
