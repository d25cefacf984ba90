use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use super::interface::{
    Alternative, ProviderError, ProviderTranslation, TranslationProvider, AUTO_LANGUAGE,
    DEFAULT_SOURCE_LANGUAGE, MAX_ALTERNATIVES,
};
use crate::dictionary::ExampleLookup;
use crate::languages::{common_languages, LanguageDescriptor};

/// Normalized outcome of the provider chain.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub translated_word: String,
    pub source_language: String,
    pub confidence: Option<f64>,
    pub alternatives: Vec<Alternative>,
    pub provider: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleOrigin {
    Dictionary,
    Template,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExampleSentence {
    pub text: String,
    pub origin: ExampleOrigin,
}

impl ExampleSentence {
    pub fn template(word: &str) -> Self {
        Self {
            text: format!("I want to learn the word \"{}\".", word),
            origin: ExampleOrigin::Template,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExampleTranslation {
    pub word: TranslationResult,
    pub example: ExampleSentence,
    pub translated_example: String,
}

/// Both providers failed. Carries each cause for logging.
#[derive(Debug, Clone, Error)]
#[error("translation failed: {primary}; fallback: {secondary}")]
pub struct TranslationError {
    pub primary: ProviderError,
    pub secondary: ProviderError,
}

impl TranslationError {
    /// A chain failure counts as a timeout when either attempt timed out.
    pub fn is_timeout(&self) -> bool {
        self.primary.is_timeout() || self.secondary.is_timeout()
    }
}

/// Something that can list the languages a provider accepts.
#[async_trait]
pub trait LanguageCatalog: Send + Sync {
    async fn languages(&self) -> Result<Vec<LanguageDescriptor>, ProviderError>;
}

#[async_trait]
impl LanguageCatalog for super::LibreTranslateClient {
    async fn languages(&self) -> Result<Vec<LanguageDescriptor>, ProviderError> {
        self.fetch_languages().await
    }
}

/// Runs the fixed primary → secondary provider chain and the
/// example-sentence pipeline on top of it.
pub struct TranslationService {
    primary: Arc<dyn TranslationProvider>,
    secondary: Arc<dyn TranslationProvider>,
    dictionary: Arc<dyn ExampleLookup>,
    catalog: Arc<dyn LanguageCatalog>,
}

impl TranslationService {
    pub fn new(
        primary: Arc<dyn TranslationProvider>,
        secondary: Arc<dyn TranslationProvider>,
        dictionary: Arc<dyn ExampleLookup>,
        catalog: Arc<dyn LanguageCatalog>,
    ) -> Self {
        Self {
            primary,
            secondary,
            dictionary,
            catalog,
        }
    }

    /// Translate `word`, trying the secondary provider exactly once if the
    /// primary fails for any reason.
    pub async fn translate_word(
        &self,
        word: &str,
        target_language: &str,
        source_language: &str,
    ) -> Result<TranslationResult, TranslationError> {
        let primary_err = match self
            .primary
            .translate(word, source_language, target_language)
            .await
        {
            Ok(outcome) => return Ok(normalize(outcome, source_language, self.primary.name())),
            Err(e) => e,
        };

        warn!(
            provider = self.primary.name(),
            fallback = self.secondary.name(),
            kind = primary_err.kind(),
            error = %primary_err,
            "Primary provider failed, falling back"
        );

        match self
            .secondary
            .translate(word, source_language, target_language)
            .await
        {
            Ok(outcome) => Ok(normalize(outcome, source_language, self.secondary.name())),
            Err(secondary_err) => {
                error!(
                    provider = self.secondary.name(),
                    kind = secondary_err.kind(),
                    error = %secondary_err,
                    "Fallback provider failed"
                );
                Err(TranslationError {
                    primary: primary_err,
                    secondary: secondary_err,
                })
            }
        }
    }

    /// Translate `word` (assumed English) together with an example sentence
    /// from the dictionary, or a templated one when none is found.
    pub async fn translate_with_example(
        &self,
        word: &str,
        target_language: &str,
    ) -> Result<ExampleTranslation, TranslationError> {
        let example = match self.dictionary.lookup_example(word).await {
            Some(text) => ExampleSentence {
                text,
                origin: ExampleOrigin::Dictionary,
            },
            None => {
                info!(word, "No dictionary example, using template sentence");
                ExampleSentence::template(word)
            }
        };

        let (word_result, sentence_result) = futures::future::try_join(
            self.translate_word(word, target_language, DEFAULT_SOURCE_LANGUAGE),
            self.translate_word(&example.text, target_language, DEFAULT_SOURCE_LANGUAGE),
        )
        .await?;

        Ok(ExampleTranslation {
            word: word_result,
            example,
            translated_example: sentence_result.translated_word,
        })
    }

    /// Languages accepted by the primary provider, or a built-in list when it
    /// can't be asked.
    pub async fn live_languages(&self) -> Vec<LanguageDescriptor> {
        match self.catalog.languages().await {
            Ok(languages) if !languages.is_empty() => languages,
            Ok(_) => common_languages(),
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Language list unavailable, using built-in list");
                common_languages()
            }
        }
    }
}

fn normalize(
    outcome: ProviderTranslation,
    source_language: &str,
    provider: &'static str,
) -> TranslationResult {
    let source_language = outcome
        .detected_language
        .filter(|lang| !lang.is_empty())
        .unwrap_or_else(|| {
            if source_language == AUTO_LANGUAGE {
                DEFAULT_SOURCE_LANGUAGE.to_string()
            } else {
                source_language.to_string()
            }
        });

    let mut alternatives = outcome.alternatives;
    alternatives.truncate(MAX_ALTERNATIVES);

    TranslationResult {
        translated_word: outcome.text,
        source_language,
        confidence: outcome.confidence,
        alternatives,
        provider,
    }
}
