//! Request and response data structures
//!
//! [`TranslateRequestBody`] is the loose wire shape: every field is optional so
//! that missing input is reported as a validation error rather than a parse
//! failure. [`TranslationRequest`] is the validated, immutable form the
//! orchestrator works on.

use crate::error::ValidationError;
use crate::language::{AUTO, LanguageCode, SourceLanguage};
use serde::{Deserialize, Serialize};

/// Maximum accepted input length, in characters
pub const MAX_TEXT_CHARS: usize = 5000;

/// Number of characters in `text`, as counted against [`MAX_TEXT_CHARS`]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// `text` may be sent as a plain string or as an array of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Single(String),
    Many(Vec<String>),
}

impl TextField {
    /// Collapse into one string; array items are joined with a single space
    pub fn into_text(self) -> String {
        match self {
            TextField::Single(text) => text,
            TextField::Many(parts) => parts.join(" "),
        }
    }
}

impl From<&str> for TextField {
    fn from(text: &str) -> Self {
        TextField::Single(text.to_string())
    }
}

/// JSON body of `POST /api/translate`
///
/// ```json
/// { "text": "Hello world", "sourceLang": "auto", "targetLang": "vi" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextField>,
    #[serde(default, alias = "source_lang", skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
    #[serde(default, alias = "target_lang", skip_serializing_if = "Option::is_none")]
    pub target_lang: Option<String>,
}

impl TranslateRequestBody {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: Some(TextField::Single(text.into())),
            source_lang: Some(source_lang.into()),
            target_lang: Some(target_lang.into()),
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A validated translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source: SourceLanguage,
    target: LanguageCode,
}

impl TranslationRequest {
    /// Build a request from typed parts, enforcing the length and
    /// same-language rules
    pub fn new(
        text: impl Into<String>,
        source: SourceLanguage,
        target: LanguageCode,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if char_count(&text) > MAX_TEXT_CHARS {
            return Err(ValidationError::TextTooLong {
                max: MAX_TEXT_CHARS,
            });
        }
        if source.conflicts_with(target) {
            return Err(ValidationError::SameLanguage);
        }
        Ok(Self {
            text,
            source,
            target,
        })
    }

    /// Validate a wire body
    ///
    /// Checks run in a fixed order: missing fields, text length, literal
    /// same-language comparison, then language support.
    pub fn from_body(body: TranslateRequestBody) -> Result<Self, ValidationError> {
        let text = body.text.map(TextField::into_text).unwrap_or_default();
        let source_lang = body.source_lang.unwrap_or_default();
        let target_lang = body.target_lang.unwrap_or_default();

        if text.is_empty() || source_lang.is_empty() || target_lang.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if char_count(&text) > MAX_TEXT_CHARS {
            return Err(ValidationError::TextTooLong {
                max: MAX_TEXT_CHARS,
            });
        }
        // Compared as sent, before any normalization
        if source_lang == target_lang {
            return Err(ValidationError::SameLanguage);
        }
        if target_lang == AUTO {
            return Err(ValidationError::AutoTarget);
        }

        let source: SourceLanguage = source_lang
            .parse()
            .map_err(|_| ValidationError::UnsupportedLanguage(source_lang.clone()))?;
        let target: LanguageCode = target_lang
            .parse()
            .map_err(|_| ValidationError::UnsupportedLanguage(target_lang.clone()))?;

        Self::new(text, source, target)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> SourceLanguage {
        self.source
    }

    pub fn target(&self) -> LanguageCode {
        self.target
    }

    /// Wire form of this request
    pub fn to_body(&self) -> TranslateRequestBody {
        TranslateRequestBody::new(self.text.clone(), self.source.as_str(), self.target.as_str())
    }
}

/// Successful translation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translated_text: String,
    /// Present only when the request asked for auto-detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_source_lang: Option<LanguageCode>,
    pub confidence: f64,
    pub characters_translated: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(text: &str, source: &str, target: &str) -> TranslateRequestBody {
        TranslateRequestBody::new(text, source, target)
    }

    #[test]
    fn test_from_body_accepts_valid_request() {
        let request = TranslationRequest::from_body(body("Hello", "en", "vi")).unwrap();
        assert_eq!(request.text(), "Hello");
        assert_eq!(request.source(), SourceLanguage::Code(LanguageCode::En));
        assert_eq!(request.target(), LanguageCode::Vi);
    }

    #[test]
    fn test_from_body_missing_fields() {
        let cases = vec![
            TranslateRequestBody::default(),
            body("", "en", "vi"),
            body("Hello", "", "vi"),
            body("Hello", "en", ""),
            TranslateRequestBody {
                text: Some(TextField::Single("Hello".into())),
                source_lang: None,
                target_lang: Some("vi".into()),
            },
            TranslateRequestBody {
                text: Some(TextField::Many(vec![])),
                source_lang: Some("en".into()),
                target_lang: Some("vi".into()),
            },
        ];
        for case in cases {
            assert_eq!(
                TranslationRequest::from_body(case.clone()),
                Err(ValidationError::MissingFields),
                "{:?}",
                case
            );
        }
    }

    #[test]
    fn test_whitespace_text_is_not_missing() {
        assert!(TranslationRequest::from_body(body("   ", "en", "vi")).is_ok());
    }

    #[test]
    fn test_from_body_text_too_long() {
        let at_limit = "a".repeat(MAX_TEXT_CHARS);
        assert!(TranslationRequest::from_body(body(&at_limit, "en", "vi")).is_ok());

        let over = "a".repeat(MAX_TEXT_CHARS + 1);
        assert_eq!(
            TranslationRequest::from_body(body(&over, "en", "vi")),
            Err(ValidationError::TextTooLong { max: 5000 })
        );
        // Length is checked before languages, so even a bad pair reports length
        assert_eq!(
            TranslationRequest::from_body(body(&over, "en", "en")),
            Err(ValidationError::TextTooLong { max: 5000 })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 5000 three-byte characters are still within the limit
        let text = "你".repeat(MAX_TEXT_CHARS);
        assert!(TranslationRequest::from_body(body(&text, "zh", "en")).is_ok());
    }

    #[test]
    fn test_from_body_same_language() {
        assert_eq!(
            TranslationRequest::from_body(body("test", "en", "en")),
            Err(ValidationError::SameLanguage)
        );
        // Literal comparison: even unsupported codes are rejected as identical
        assert_eq!(
            TranslationRequest::from_body(body("test", "xx", "xx")),
            Err(ValidationError::SameLanguage)
        );
    }

    #[test]
    fn test_from_body_same_language_after_normalization() {
        assert_eq!(
            TranslationRequest::from_body(body("test", "en-US", "en")),
            Err(ValidationError::SameLanguage)
        );
    }

    #[test]
    fn test_from_body_unsupported_and_auto_target() {
        assert_eq!(
            TranslationRequest::from_body(body("test", "xx", "en")),
            Err(ValidationError::UnsupportedLanguage("xx".into()))
        );
        assert_eq!(
            TranslationRequest::from_body(body("test", "en", "tlh")),
            Err(ValidationError::UnsupportedLanguage("tlh".into()))
        );
        assert_eq!(
            TranslationRequest::from_body(body("test", "en", "auto")),
            Err(ValidationError::AutoTarget)
        );
    }

    #[test]
    fn test_auto_source_never_conflicts() {
        for target in LanguageCode::ALL {
            assert!(TranslationRequest::new("text", SourceLanguage::Auto, target).is_ok());
        }
    }

    #[test]
    fn test_body_deserializes_camel_and_snake_case() {
        let camel: TranslateRequestBody =
            serde_json::from_str(r#"{"text":"Hi","sourceLang":"en","targetLang":"fr"}"#).unwrap();
        let snake: TranslateRequestBody =
            serde_json::from_str(r#"{"text":["Hi"],"source_lang":"en","target_lang":"fr"}"#)
                .unwrap();
        assert_eq!(
            TranslationRequest::from_body(camel).unwrap(),
            TranslationRequest::from_body(snake).unwrap()
        );
    }

    #[test]
    fn test_text_array_is_joined_with_spaces() {
        let body: TranslateRequestBody =
            serde_json::from_str(r#"{"text":["Hello","big","world"],"sourceLang":"en","targetLang":"de"}"#)
                .unwrap();
        let request = TranslationRequest::from_body(body).unwrap();
        assert_eq!(request.text(), "Hello big world");
    }

    #[test]
    fn test_result_serialization_omits_absent_detection() {
        let result = TranslationResult {
            translated_text: "Hola".into(),
            detected_source_lang: None,
            confidence: 0.97,
            characters_translated: 5,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["translatedText"], "Hola");
        assert_eq!(json["charactersTranslated"], 5);
        assert!(json.get("detectedSourceLang").is_none());

        let detected = TranslationResult {
            detected_source_lang: Some(LanguageCode::Ru),
            ..result
        };
        let json = serde_json::to_value(&detected).unwrap();
        assert_eq!(json["detectedSourceLang"], "ru");
    }

    #[test]
    fn test_to_body_round_trips_through_validation() {
        let request =
            TranslationRequest::new("Bonjour", SourceLanguage::Auto, LanguageCode::En).unwrap();
        assert_eq!(
            TranslationRequest::from_body(request.to_body()).unwrap(),
            request
        );
    }
}
