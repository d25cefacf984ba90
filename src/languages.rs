use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    pub code: String,
    pub name: String,
}

impl LanguageDescriptor {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Target languages advertised by `GET /api/languages`.
const SUPPORTED: &[(&str, &str)] = &[
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("tr", "Turkish"),
];

/// Used when the primary provider's language list can't be fetched.
const COMMON: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
];

fn to_descriptors(table: &[(&str, &str)]) -> Vec<LanguageDescriptor> {
    table
        .iter()
        .map(|(code, name)| LanguageDescriptor::new(*code, *name))
        .collect()
}

pub fn supported_languages() -> Vec<LanguageDescriptor> {
    to_descriptors(SUPPORTED)
}

pub fn common_languages() -> Vec<LanguageDescriptor> {
    to_descriptors(COMMON)
}
