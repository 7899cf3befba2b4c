//! Script-range language detection
//!
//! Detection walks an ordered list of [`DetectionRule`]s and returns the first
//! language whose patterns match anywhere in the text. There is no scoring:
//! a string mixing Cyrillic and CJK resolves to whichever rule comes first.
//! Text that matches no rule is reported as English.
//!
//! # Example
//!
//! ```
//! use banana_translate::{LanguageCode, detect_language};
//!
//! assert_eq!(detect_language("你好"), LanguageCode::Zh);
//! assert_eq!(detect_language("Привет"), LanguageCode::Ru);
//! assert_eq!(detect_language("hello"), LanguageCode::En);
//! ```

use crate::language::LanguageCode;
use regex::Regex;
use std::sync::LazyLock;

/// Language reported when no rule matches
pub const DEFAULT_LANGUAGE: LanguageCode = LanguageCode::En;

/// Vietnamese letters carrying diacritics, matched case-insensitively
const VIETNAMESE_PATTERN: &str = "(?i)[àáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩòóọỏõôồốộổỗơờớợởỡùúụủũưừứựửữỳýỵỷỹđ]";

/// Default rules in priority order
const DEFAULT_RULES: [(LanguageCode, &[&str]); 6] = [
    (LanguageCode::Vi, &[VIETNAMESE_PATTERN]),
    (LanguageCode::Zh, &[r"[\x{4e00}-\x{9fff}]"]),
    (LanguageCode::Ja, &[r"[\x{3040}-\x{309f}\x{30a0}-\x{30ff}]"]),
    (LanguageCode::Ko, &[r"[\x{ac00}-\x{d7af}]"]),
    (LanguageCode::Ar, &[r"[\x{0600}-\x{06ff}]"]),
    (LanguageCode::Ru, &["(?i)[а-яё]"]),
];

static DEFAULT_DETECTION_RULES: LazyLock<DetectionRules> = LazyLock::new(DetectionRules::default);

/// Script-range matchers for a single language
#[derive(Debug, Clone)]
pub struct DetectionRule {
    language: LanguageCode,
    patterns: Vec<Regex>,
}

impl DetectionRule {
    /// Compile a rule from regex sources
    pub fn new(language: LanguageCode, patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { language, patterns })
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    /// True if any pattern matches any character of `text`
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(text))
    }
}

/// Ordered rule table; declaration order is the tie-break
#[derive(Debug, Clone)]
pub struct DetectionRules {
    rules: Vec<DetectionRule>,
}

impl DetectionRules {
    pub fn new(rules: Vec<DetectionRule>) -> Self {
        Self { rules }
    }

    /// Append a rule with the lowest priority so far
    pub fn with_rule(mut self, rule: DetectionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[DetectionRule] {
        &self.rules
    }

    /// Detect the language of `text`
    ///
    /// Total and deterministic: empty input, or input with no matching script,
    /// yields [`DEFAULT_LANGUAGE`].
    pub fn detect(&self, text: &str) -> LanguageCode {
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map(DetectionRule::language)
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}

impl Default for DetectionRules {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(language, patterns)| {
                DetectionRule::new(*language, patterns)
                    .expect("built-in detection patterns are valid")
            })
            .collect();
        Self::new(rules)
    }
}

/// Detect the language of `text` with the built-in rule table
pub fn detect_language(text: &str) -> LanguageCode {
    DEFAULT_DETECTION_RULES.detect(text)
}
