//! Supported languages and the `auto` source sentinel
//!
//! The set of languages is closed: every phrase table key, detection rule and
//! wire value is one of [`LanguageCode`]. The source side of a request may also
//! be [`SourceLanguage::Auto`], which asks the pipeline to infer the language
//! from the text itself.
//!
//! # Example
//!
//! ```
//! use banana_translate::{LanguageCode, SourceLanguage};
//!
//! let target: LanguageCode = "vi".parse().unwrap();
//! assert_eq!(target.name(), "Vietnamese");
//!
//! // BCP 47 tags are reduced to their primary language subtag
//! let regional: LanguageCode = "zh-Hans".parse().unwrap();
//! assert_eq!(regional, LanguageCode::Zh);
//!
//! let source: SourceLanguage = "auto".parse().unwrap();
//! assert!(source.is_auto());
//! ```

use icu_locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire value of the auto-detect sentinel
pub const AUTO: &str = "auto";

/// A supported language, serialized as its two-letter ISO 639-1 code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Vi,
    Zh,
    Ja,
    Ko,
    Fr,
    De,
    Es,
    It,
    Pt,
    Ru,
    Ar,
}

impl LanguageCode {
    /// All supported languages, in the order the language picker lists them
    pub const ALL: [LanguageCode; 12] = [
        LanguageCode::En,
        LanguageCode::Vi,
        LanguageCode::Zh,
        LanguageCode::Ja,
        LanguageCode::Ko,
        LanguageCode::Fr,
        LanguageCode::De,
        LanguageCode::Es,
        LanguageCode::It,
        LanguageCode::Pt,
        LanguageCode::Ru,
        LanguageCode::Ar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Vi => "vi",
            LanguageCode::Zh => "zh",
            LanguageCode::Ja => "ja",
            LanguageCode::Ko => "ko",
            LanguageCode::Fr => "fr",
            LanguageCode::De => "de",
            LanguageCode::Es => "es",
            LanguageCode::It => "it",
            LanguageCode::Pt => "pt",
            LanguageCode::Ru => "ru",
            LanguageCode::Ar => "ar",
        }
    }

    /// English display name
    pub fn name(&self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Vi => "Vietnamese",
            LanguageCode::Zh => "Chinese",
            LanguageCode::Ja => "Japanese",
            LanguageCode::Ko => "Korean",
            LanguageCode::Fr => "French",
            LanguageCode::De => "German",
            LanguageCode::Es => "Spanish",
            LanguageCode::It => "Italian",
            LanguageCode::Pt => "Portuguese",
            LanguageCode::Ru => "Russian",
            LanguageCode::Ar => "Arabic",
        }
    }

    /// Flag emoji shown next to the name
    pub fn flag(&self) -> &'static str {
        match self {
            LanguageCode::En => "🇺🇸",
            LanguageCode::Vi => "🇻🇳",
            LanguageCode::Zh => "🇨🇳",
            LanguageCode::Ja => "🇯🇵",
            LanguageCode::Ko => "🇰🇷",
            LanguageCode::Fr => "🇫🇷",
            LanguageCode::De => "🇩🇪",
            LanguageCode::Es => "🇪🇸",
            LanguageCode::It => "🇮🇹",
            LanguageCode::Pt => "🇵🇹",
            LanguageCode::Ru => "🇷🇺",
            LanguageCode::Ar => "🇸🇦",
        }
    }

    fn from_exact(code: &str) -> Option<Self> {
        LanguageCode::ALL
            .into_iter()
            .find(|language| language.as_str() == code)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a supported language
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for LanguageCode {
    type Err = UnsupportedLanguage;

    /// Parse a language code
    ///
    /// Exact two-letter codes are matched first. Anything else is parsed as a
    /// BCP 47 locale and reduced to its primary language subtag, so `en-US`
    /// and `EN` both resolve to [`LanguageCode::En`].
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        if let Some(language) = LanguageCode::from_exact(code) {
            return Ok(language);
        }

        let locale: Locale = code
            .parse()
            .map_err(|_| UnsupportedLanguage(code.to_string()))?;
        LanguageCode::from_exact(locale.id.language.as_str())
            .ok_or_else(|| UnsupportedLanguage(code.to_string()))
    }
}

/// Source side of a translation request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// Infer the language from the text
    #[default]
    Auto,
    Code(LanguageCode),
}

impl SourceLanguage {
    pub fn is_auto(&self) -> bool {
        matches!(self, SourceLanguage::Auto)
    }

    /// The declared language, if any
    pub fn code(&self) -> Option<LanguageCode> {
        match self {
            SourceLanguage::Auto => None,
            SourceLanguage::Code(code) => Some(*code),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::Auto => AUTO,
            SourceLanguage::Code(code) => code.as_str(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::Auto => "Auto-detect",
            SourceLanguage::Code(code) => code.name(),
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            SourceLanguage::Auto => "🌐",
            SourceLanguage::Code(code) => code.flag(),
        }
    }

    /// True when both sides name the same real language
    pub fn conflicts_with(&self, target: LanguageCode) -> bool {
        self.code() == Some(target)
    }
}

impl From<LanguageCode> for SourceLanguage {
    fn from(code: LanguageCode) -> Self {
        SourceLanguage::Code(code)
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceLanguage {
    type Err = UnsupportedLanguage;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        if code == AUTO {
            return Ok(SourceLanguage::Auto);
        }
        code.parse().map(SourceLanguage::Code)
    }
}
