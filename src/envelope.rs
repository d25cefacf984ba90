//! JSON shapes returned to clients. Field names are part of the public
//! contract; keep them camelCase.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::languages::LanguageDescriptor;
use crate::translate::{Alternative, ExampleOrigin, ExampleTranslation, TranslationResult};

/// ISO-8601 UTC timestamp with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub success: bool,
    pub original: String,
    pub translated: String,
    pub source_language: String,
    pub target_language: String,
    pub confidence: Option<f64>,
    pub alternatives: Vec<Alternative>,
    pub timestamp: String,
}

impl TranslateResponse {
    pub fn new(original: &str, target_language: &str, result: TranslationResult) -> Self {
        Self {
            success: true,
            original: original.to_string(),
            translated: result.translated_word,
            source_language: result.source_language,
            target_language: target_language.to_string(),
            confidence: result.confidence,
            alternatives: result.alternatives,
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExampleSentenceBody {
    pub original: String,
    pub translated: String,
    pub source: ExampleOrigin,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleTranslateResponse {
    pub success: bool,
    pub original: String,
    pub translated: String,
    pub target_language: String,
    pub example_sentence: ExampleSentenceBody,
    pub confidence: Option<f64>,
    pub timestamp: String,
}

impl ExampleTranslateResponse {
    pub fn new(original: &str, target_language: &str, result: ExampleTranslation) -> Self {
        Self {
            success: true,
            original: original.to_string(),
            translated: result.word.translated_word,
            target_language: target_language.to_string(),
            example_sentence: ExampleSentenceBody {
                original: result.example.text,
                translated: result.translated_example,
                source: result.example.origin,
            },
            confidence: result.word.confidence,
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub success: bool,
    pub languages: Vec<LanguageDescriptor>,
}

impl LanguagesResponse {
    pub fn new(languages: Vec<LanguageDescriptor>) -> Self {
        Self {
            success: true,
            languages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            example: None,
            timestamp: None,
        }
    }
}
