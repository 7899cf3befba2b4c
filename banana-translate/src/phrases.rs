//! Canned phrases and per-target labels used by synthesis
//!
//! The [`PhraseTable`] is sparse: only a handful of language pairs have a
//! sample phrase, everything else falls back to a [`TargetLabels`] prefix.
//! Both tables are immutable once built and can be shared freely.

use crate::language::{LanguageCode, UnsupportedLanguage};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Label used when a target language has no entry in [`TargetLabels`]
pub const FALLBACK_LABEL: &str = "Translation:";

const DEFAULT_PHRASES: &[(LanguageCode, LanguageCode, &str)] = &[
    (LanguageCode::En, LanguageCode::Vi, "Xin chào, đây là bản dịch tiếng Việt"),
    (LanguageCode::En, LanguageCode::Zh, "你好，这是中文翻译"),
    (LanguageCode::En, LanguageCode::Ja, "こんにちは、これは日本語の翻訳です"),
    (LanguageCode::En, LanguageCode::Ko, "안녕하세요, 이것은 한국어 번역입니다"),
    (LanguageCode::En, LanguageCode::Fr, "Bonjour, ceci est une traduction française"),
    (LanguageCode::En, LanguageCode::De, "Hallo, das ist eine deutsche Übersetzung"),
    (LanguageCode::En, LanguageCode::Es, "Hola, esta es una traducción al español"),
    (LanguageCode::En, LanguageCode::It, "Ciao, questa è una traduzione italiana"),
    (LanguageCode::En, LanguageCode::Pt, "Olá, esta é uma tradução em português"),
    (LanguageCode::En, LanguageCode::Ru, "Привет, это русский перевод"),
    (LanguageCode::En, LanguageCode::Ar, "مرحبا، هذه ترجمة عربية"),
    (LanguageCode::Vi, LanguageCode::En, "Hello, this is an English translation"),
    (LanguageCode::Vi, LanguageCode::Zh, "你好，这是中文翻译"),
    (LanguageCode::Vi, LanguageCode::Ja, "こんにちは、これは日本語の翻訳です"),
    (LanguageCode::Vi, LanguageCode::Ko, "안녕하세요, 이것은 한국어 번역입니다"),
    (LanguageCode::Vi, LanguageCode::Fr, "Bonjour, ceci est une traduction française"),
    (LanguageCode::Vi, LanguageCode::De, "Hallo, das ist eine deutsche Übersetzung"),
    (LanguageCode::Vi, LanguageCode::Es, "Hola, esta es una traducción al español"),
];

const DEFAULT_LABELS: &[(LanguageCode, &str)] = &[
    (LanguageCode::Vi, "Bản dịch tiếng Việt:"),
    (LanguageCode::Zh, "中文翻译:"),
    (LanguageCode::Ja, "日本語翻訳:"),
    (LanguageCode::Ko, "한국어 번역:"),
    (LanguageCode::Fr, "Traduction française:"),
    (LanguageCode::De, "Deutsche Übersetzung:"),
    (LanguageCode::Es, "Traducción al español:"),
    (LanguageCode::It, "Traduzione italiana:"),
    (LanguageCode::Pt, "Tradução em português:"),
    (LanguageCode::Ru, "Русский перевод:"),
    (LanguageCode::Ar, "الترجمة العربية:"),
    (LanguageCode::En, "English translation:"),
];

/// Errors raised while loading a phrase table from disk
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid phrase table: {0}")]
    Shape(String),
    #[error(transparent)]
    Language(#[from] UnsupportedLanguage),
}

/// Sparse `(source, target) → phrase` lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseTable {
    phrases: HashMap<(LanguageCode, LanguageCode), String>,
}

impl PhraseTable {
    /// An empty table: every pair falls back to its target label
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_phrase(
        mut self,
        source: LanguageCode,
        target: LanguageCode,
        phrase: impl Into<String>,
    ) -> Self {
        self.phrases.insert((source, target), phrase.into());
        self
    }

    pub fn get(&self, source: LanguageCode, target: LanguageCode) -> Option<&str> {
        self.phrases.get(&(source, target)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Parse a phrase table from JSON
    ///
    /// The document maps source codes to objects that map target codes to
    /// phrases:
    ///
    /// ```json
    /// {
    ///     "@metadata": { "authors": ["..."] },
    ///     "en": { "vi": "Xin chào", "fr": "Bonjour" }
    /// }
    /// ```
    ///
    /// Keys starting with `@` are skipped at both levels.
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let json: Value = serde_json::from_str(content)?;
        let sources = json
            .as_object()
            .ok_or_else(|| LoadError::Shape("root must be an object".to_string()))?;

        let mut table = PhraseTable::empty();
        for (source_key, targets) in sources {
            if source_key.starts_with('@') {
                continue;
            }
            let source: LanguageCode = source_key.parse()?;
            let targets = targets.as_object().ok_or_else(|| {
                LoadError::Shape(format!("entry '{}' must be an object", source_key))
            })?;

            for (target_key, phrase) in targets {
                if target_key.starts_with('@') {
                    continue;
                }
                let target: LanguageCode = target_key.parse()?;
                let phrase = phrase.as_str().ok_or_else(|| {
                    LoadError::Shape(format!(
                        "phrase '{}.{}' must be a string",
                        source_key, target_key
                    ))
                })?;
                table.phrases.insert((source, target), phrase.to_string());
            }
        }

        Ok(table)
    }

    /// Load a phrase table from a JSON file, see [`PhraseTable::from_json_str`]
    pub fn from_json_file(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// The built-in demo table
    pub fn builtin() -> Self {
        DEFAULT_PHRASES
            .iter()
            .fold(PhraseTable::empty(), |table, (source, target, phrase)| {
                table.with_phrase(*source, *target, *phrase)
            })
    }
}

/// Prefix label per target language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetLabels {
    labels: HashMap<LanguageCode, String>,
}

impl TargetLabels {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, target: LanguageCode, label: impl Into<String>) -> Self {
        self.labels.insert(target, label.into());
        self
    }

    /// Label for `target`, or [`FALLBACK_LABEL`]
    pub fn label_for(&self, target: LanguageCode) -> &str {
        self.labels
            .get(&target)
            .map(String::as_str)
            .unwrap_or(FALLBACK_LABEL)
    }

    pub fn builtin() -> Self {
        DEFAULT_LABELS
            .iter()
            .fold(TargetLabels::empty(), |labels, (target, label)| {
                labels.with_label(*target, *label)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_sparse() {
        let table = PhraseTable::builtin();
        assert_eq!(table.len(), 18);
        assert_eq!(
            table.get(LanguageCode::En, LanguageCode::Vi),
            Some("Xin chào, đây là bản dịch tiếng Việt")
        );
        assert_eq!(
            table.get(LanguageCode::Vi, LanguageCode::En),
            Some("Hello, this is an English translation")
        );
        // vi → it is not part of the demo table
        assert_eq!(table.get(LanguageCode::Vi, LanguageCode::It), None);
        assert_eq!(table.get(LanguageCode::Fr, LanguageCode::En), None);
    }

    #[test]
    fn test_builtin_labels_cover_every_language() {
        let labels = TargetLabels::builtin();
        for language in LanguageCode::ALL {
            assert_ne!(labels.label_for(language), FALLBACK_LABEL);
        }
        assert_eq!(labels.label_for(LanguageCode::De), "Deutsche Übersetzung:");
    }

    #[test]
    fn test_missing_label_falls_back() {
        let labels = TargetLabels::empty().with_label(LanguageCode::Fr, "FR:");
        assert_eq!(labels.label_for(LanguageCode::Fr), "FR:");
        assert_eq!(labels.label_for(LanguageCode::Ko), FALLBACK_LABEL);
    }

    #[test]
    fn test_from_json_skips_metadata() {
        let json = r#"{
            "@metadata": { "authors": ["someone"] },
            "en": { "fr": "Salut", "@comment": "ignored" },
            "de": { "en": "Hi" }
        }"#;
        let table = PhraseTable::from_json_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(LanguageCode::En, LanguageCode::Fr), Some("Salut"));
        assert_eq!(table.get(LanguageCode::De, LanguageCode::En), Some("Hi"));
    }

    #[test]
    fn test_from_json_normalizes_tags() {
        let table = PhraseTable::from_json_str(r#"{ "en-GB": { "pt-BR": "Olá" } }"#).unwrap();
        assert_eq!(table.get(LanguageCode::En, LanguageCode::Pt), Some("Olá"));
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert!(matches!(
            PhraseTable::from_json_str("[]"),
            Err(LoadError::Shape(_))
        ));
        assert!(matches!(
            PhraseTable::from_json_str(r#"{ "en": "flat" }"#),
            Err(LoadError::Shape(_))
        ));
        assert!(matches!(
            PhraseTable::from_json_str(r#"{ "en": { "fr": 3 } }"#),
            Err(LoadError::Shape(_))
        ));
        assert!(matches!(
            PhraseTable::from_json_str(r#"{ "xx": { "fr": "?" } }"#),
            Err(LoadError::Language(_))
        ));
        assert!(matches!(
            PhraseTable::from_json_str("{ not json"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = PhraseTable::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_from_json_file_roundtrip_on_disk() {
        let path = std::env::temp_dir().join(format!(
            "banana-translate-phrases-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "ja": { "en": "Hello from Tokyo" } }"#).unwrap();
        let table = PhraseTable::from_json_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(
            table.get(LanguageCode::Ja, LanguageCode::En),
            Some("Hello from Tokyo")
        );
    }
}
